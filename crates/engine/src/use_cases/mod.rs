//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area.

pub mod management;
pub mod stats;

// Re-export main types
pub use management::{ManagementError, ManagementUseCases};
pub use stats::{RecalculateStats, StatsError};

//! Charsheet Engine library.
//!
//! Recalculates computed character stats and persists them.
//!
//! ## Structure
//!
//! - `use_cases/` - Recalculation service and the management layer that triggers it
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;

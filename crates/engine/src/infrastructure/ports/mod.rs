//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Record storage (SQLite today, anything that can hold JSON blobs tomorrow)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CharacterRepo, EquipmentRepo, GameSystemRepo, TraitRepo};

#[cfg(test)]
pub use repos::{MockCharacterRepo, MockEquipmentRepo, MockGameSystemRepo, MockTraitRepo};

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;

// =============================================================================
// Testability Ports
// =============================================================================
pub use testing::ClockPort;

#[cfg(test)]
pub use testing::MockClockPort;

//! Management use cases for CRUD-style operations.
//!
//! Every write that can change a formula input re-runs stat recalculation
//! before returning.

use charsheet_domain::DomainError;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::stats::StatsError;

mod character_sheet;
mod game_system;

pub use character_sheet::{CharacterDetails, CharacterSheetCrud};
pub use game_system::GameSystemCrud;

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Recalculation failed: {0}")]
    Stats(#[from] StatsError),
    #[error("Domain error: {0}")]
    Domain(String),
}

impl ManagementError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

impl From<DomainError> for ManagementError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::InvalidInput(msg),
            other => Self::Domain(other.to_string()),
        }
    }
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub character_sheet: CharacterSheetCrud,
    pub game_system: GameSystemCrud,
}

impl ManagementUseCases {
    pub fn new(character_sheet: CharacterSheetCrud, game_system: GameSystemCrud) -> Self {
        Self {
            character_sheet,
            game_system,
        }
    }
}

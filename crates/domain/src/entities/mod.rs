//! Domain entities.

mod character_sheet;
mod character_trait;
mod equipment;
mod game_system;

pub use character_sheet::CharacterSheet;
pub use character_trait::CharacterTrait;
pub use equipment::{EquipmentTemplate, EquippedItem};
pub use game_system::GameSystem;

//! Charsheet domain: character records, computed-stat schemas and the
//! formula engine that derives stats from them.

pub mod entities;
pub mod error;
pub mod ids;
pub mod rules;
pub mod value_objects;

pub use entities::{CharacterSheet, CharacterTrait, EquipmentTemplate, EquippedItem, GameSystem};

pub use error::DomainError;

// Re-export ID types
pub use ids::{CharacterId, EquipmentId, EquipmentTemplateId, GameSystemId, TraitId};

pub use rules::{
    check_schema, recompute_stats, Formula, FormulaFailure, RecomputeOutcome, RuleError,
    RuleEvaluator, SchemaReport,
};

pub use value_objects::{CharacterContext, CharacterStats, ComputedStatRule, ComputedStatsSchema};

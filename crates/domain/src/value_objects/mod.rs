//! Value objects for character data and rule schemas.

mod character_context;
mod computed_stats;
mod stats;

pub use character_context::CharacterContext;
pub use computed_stats::{
    ComputedStatRule, ComputedStatsSchema, COMPUTED_STATS_KEY, FORMULA_KEY, SHEET_SCHEMA_KEY,
};
pub use stats::{coerce_integer, CharacterStats};

//! Rule evaluation engine for derived character stats.
//!
//! A game system declares derived stats as three-token formulas
//! (`<left> <op> <right>`). [`Formula`] parses one, [`ValueResolver`] turns
//! each operand into an integer against a [`CharacterContext`], and
//! [`recompute_stats`] runs every formula in a schema for one character.
//!
//! Evaluation is pure: no I/O happens here. Persisting the outcome is the
//! caller's job.
//!
//! [`CharacterContext`]: crate::value_objects::CharacterContext

mod cache;
mod error;
mod evaluator;
mod formula;
mod function;
mod operand;
mod recompute;
mod resolver;

pub use cache::LookupCache;
pub use error::RuleError;
pub use evaluator::RuleEvaluator;
pub use formula::{Formula, Operator};
pub use function::RuleFunction;
pub use operand::{FunctionCall, Operand};
pub use recompute::{check_schema, recompute_stats, FormulaFailure, RecomputeOutcome, SchemaReport};
pub use resolver::ValueResolver;

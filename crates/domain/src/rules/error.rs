use thiserror::Error;

/// Hard failures of a single formula.
///
/// Lookup misses inside `stat`/`trait_meta`/`equipment_meta` are never errors;
/// they resolve to `0`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Operand is neither an integer literal nor a `name(args)` call
    #[error("Malformed operand: {0}")]
    MalformedOperand(String),
    /// Function name outside the whitelist
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    /// Operator other than `+` or `-`
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
    /// Formula is not exactly `<left> <op> <right>`
    #[error("Unsupported formula format: {0}")]
    UnsupportedFormula(String),
}

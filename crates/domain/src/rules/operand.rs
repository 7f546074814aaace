//! Operand parsing.
//!
//! An operand token is either a base-10 integer literal with an optional
//! leading `-`, or a call `name(arg1, arg2)` where `name` is a whitelisted
//! [`RuleFunction`]. Arguments are plain strings split on commas; each is
//! trimmed and loses one layer of `'` or `"` quotes. Commas and parentheses
//! inside argument values are not supported.

use std::fmt;
use std::str::FromStr;

use super::{RuleError, RuleFunction};

/// A lookup call with its arguments bound by function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionCall {
    Stat { name: String },
    TraitMeta { category: String, path: String },
    EquipmentMeta { location: String, path: String },
}

impl FunctionCall {
    pub fn function(&self) -> RuleFunction {
        match self {
            Self::Stat { .. } => RuleFunction::Stat,
            Self::TraitMeta { .. } => RuleFunction::TraitMeta,
            Self::EquipmentMeta { .. } => RuleFunction::EquipmentMeta,
        }
    }

    fn bind(function: RuleFunction, token: &str, args: Vec<String>) -> Result<Self, RuleError> {
        if args.len() != function.arity() {
            return Err(RuleError::MalformedOperand(format!(
                "{token} ({function} takes {} argument(s), got {})",
                function.arity(),
                args.len()
            )));
        }
        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_default();
        Ok(match function {
            RuleFunction::Stat => Self::Stat { name: next() },
            RuleFunction::TraitMeta => Self::TraitMeta {
                category: next(),
                path: next(),
            },
            RuleFunction::EquipmentMeta => Self::EquipmentMeta {
                location: next(),
                path: next(),
            },
        })
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stat { name } => write!(f, "stat('{name}')"),
            Self::TraitMeta { category, path } => write!(f, "trait_meta('{category}', '{path}')"),
            Self::EquipmentMeta { location, path } => {
                write!(f, "equipment_meta('{location}', '{path}')")
            }
        }
    }
}

/// One side of a binary formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Literal(i64),
    Call(FunctionCall),
}

impl Operand {
    pub fn parse(token: &str) -> Result<Self, RuleError> {
        if let Some(literal) = parse_literal(token)? {
            return Ok(Self::Literal(literal));
        }

        let (name, raw_args) = split_call(token)
            .ok_or_else(|| RuleError::MalformedOperand(token.to_string()))?;
        let function: RuleFunction = name.parse()?;
        FunctionCall::bind(function, token, parse_args(raw_args)).map(Self::Call)
    }
}

impl FromStr for Operand {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Call(call) => write!(f, "{call}"),
        }
    }
}

/// `Ok(None)` when the token is not shaped like a literal at all.
fn parse_literal(token: &str) -> Result<Option<i64>, RuleError> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    token
        .parse::<i64>()
        .map(Some)
        .map_err(|_| RuleError::MalformedOperand(format!("{token} (integer out of range)")))
}

/// Split `name(args)` into `name` and the raw argument text.
///
/// `name` is one or more word characters; the token must end with `)`.
fn split_call(token: &str) -> Option<(&str, &str)> {
    let open = token.find('(')?;
    let name = &token[..open];
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    let raw_args = token[open + 1..].strip_suffix(')')?;
    Some((name, raw_args))
}

fn parse_args(raw: &str) -> Vec<String> {
    raw.split(',').map(|arg| strip_quotes(arg.trim()).to_string()).collect()
}

/// Drops at most one leading and one trailing quote; they need not match.
fn strip_quotes(arg: &str) -> &str {
    let is_quote = |c: char| c == '\'' || c == '"';
    let arg = arg.strip_prefix(is_quote).unwrap_or(arg);
    arg.strip_suffix(is_quote).unwrap_or(arg)
}

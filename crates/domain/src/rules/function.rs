//! Whitelisted lookup functions callable from formulas.

use std::fmt;
use std::str::FromStr;

use super::RuleError;

/// The closed set of functions a formula may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFunction {
    /// `stat(name)`
    Stat,
    /// `trait_meta(category, path)`
    TraitMeta,
    /// `equipment_meta(location, path)`
    EquipmentMeta,
}

impl RuleFunction {
    pub const ALL: [RuleFunction; 3] = [Self::Stat, Self::TraitMeta, Self::EquipmentMeta];

    pub fn name(self) -> &'static str {
        match self {
            Self::Stat => "stat",
            Self::TraitMeta => "trait_meta",
            Self::EquipmentMeta => "equipment_meta",
        }
    }

    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Stat => 1,
            Self::TraitMeta | Self::EquipmentMeta => 2,
        }
    }
}

impl fmt::Display for RuleFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleFunction {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| RuleError::UnknownFunction(s.to_string()))
    }
}

//! Lookup memoization scoped to one evaluation pass.

use std::collections::HashMap;

use crate::entities::{CharacterTrait, EquippedItem};
use crate::value_objects::CharacterContext;

/// Memoizes "trait by category" and "equipment by location" for one pass
/// over one character.
///
/// The cache borrows the context it was filled from, so it cannot outlive the
/// pass or be reused for another character. Misses are cached too.
#[derive(Debug)]
pub struct LookupCache<'a> {
    context: &'a CharacterContext,
    traits: HashMap<String, Option<&'a CharacterTrait>>,
    equipment: HashMap<String, Option<&'a EquippedItem>>,
    lookups: usize,
}

impl<'a> LookupCache<'a> {
    pub fn new(context: &'a CharacterContext) -> Self {
        Self {
            context,
            traits: HashMap::new(),
            equipment: HashMap::new(),
            lookups: 0,
        }
    }

    pub fn context(&self) -> &'a CharacterContext {
        self.context
    }

    /// Trait in `category`; categories differing only in case share an entry.
    pub fn trait_in_category(&mut self, category: &str) -> Option<&'a CharacterTrait> {
        let context = self.context;
        let lookups = &mut self.lookups;
        *self
            .traits
            .entry(category.to_lowercase())
            .or_insert_with(|| {
                *lookups += 1;
                context.trait_in_category(category)
            })
    }

    pub fn equipment_at(&mut self, location: &str) -> Option<&'a EquippedItem> {
        let context = self.context;
        let lookups = &mut self.lookups;
        *self
            .equipment
            .entry(location.to_string())
            .or_insert_with(|| {
                *lookups += 1;
                context.equipment_at(location)
            })
    }

    /// Number of underlying (uncached) lookups performed so far.
    pub fn lookups(&self) -> usize {
        self.lookups
    }
}

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::composition::recipe::RecipeId;

/// Selection state of an [`EffectVariantSelector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Unselected,
    Selected(RecipeId),
}

/// Picks which recipe runs, never repeating the current one on regenerate.
///
/// Only the immediately previous recipe is excluded; with three recipes a
/// sequence like A, B, A is allowed.
#[derive(Clone, Debug)]
pub struct EffectVariantSelector {
    recipes: Vec<RecipeId>,
    state: Selection,
}

impl EffectVariantSelector {
    /// Selector over `recipes` in the given order; duplicates are dropped.
    pub fn new(recipes: impl IntoIterator<Item = RecipeId>) -> Self {
        let mut out: Vec<RecipeId> = Vec::new();
        for r in recipes {
            if !out.contains(&r) {
                out.push(r);
            }
        }
        Self {
            recipes: out,
            state: Selection::Unselected,
        }
    }

    pub fn recipes(&self) -> &[RecipeId] {
        &self.recipes
    }

    pub fn state(&self) -> Selection {
        self.state
    }

    pub fn current(&self) -> Option<RecipeId> {
        match self.state {
            Selection::Unselected => None,
            Selection::Selected(r) => Some(r),
        }
    }

    /// Uniform draw over every enabled recipe.
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<RecipeId> {
        let picked = self.recipes.choose(rng).copied()?;
        debug!(recipe = %picked, "recipe initialized");
        self.state = Selection::Selected(picked);
        Some(picked)
    }

    /// Uniform draw over every enabled recipe except the current one.
    ///
    /// From `Unselected` this behaves like [`initialize`](Self::initialize).
    /// With a single recipe the selection stays where it is.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<RecipeId> {
        let Selection::Selected(current) = self.state else {
            return self.initialize(rng);
        };
        let candidates: Vec<RecipeId> = self
            .recipes
            .iter()
            .copied()
            .filter(|r| *r != current)
            .collect();
        let Some(picked) = candidates.choose(rng).copied() else {
            debug!(recipe = %current, "nothing else to regenerate into");
            return Some(current);
        };
        debug!(from = %current, to = %picked, "recipe regenerated");
        self.state = Selection::Selected(picked);
        Some(picked)
    }

    pub fn reset(&mut self) {
        self.state = Selection::Unselected;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/selector.rs"]
mod tests;

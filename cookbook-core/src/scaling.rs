//! Serving-size scaling.
//!
//! A recipe's ingredient quantities are authored for its base servings. To
//! cook for a different number of people every quantity is multiplied by
//! `target / base`. The calculation never fails: a missing or unusable base
//! counts as 1 serving and an unusable quantity counts as 0.

use serde::Serialize;
use utoipa::ToSchema;

use crate::quantity::format_quantity;
use crate::recipe::{Ingredient, Unit};

/// A requested serving count. Never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServingCount(u32);

impl ServingCount {
    pub const MIN: u32 = 1;

    pub fn new(servings: u32) -> Self {
        Self(servings.max(Self::MIN))
    }

    /// Clamp an arbitrary signed request (e.g. from a query string) into range.
    pub fn clamped(servings: i64) -> Self {
        Self::new(servings.clamp(Self::MIN as i64, u32::MAX as i64) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn decrement(self) -> Self {
        Self::new(self.0 - 1)
    }
}

impl Default for ServingCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<u32> for ServingCount {
    fn from(servings: u32) -> Self {
        Self::new(servings)
    }
}

/// An ingredient with its quantity rescaled for the target servings.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ScaledIngredient {
    pub quantity: f64,
    /// Quantity rounded to at most 2 decimals, trailing zeros stripped
    pub display_quantity: String,
    pub unit: Unit,
    pub item: String,
}

/// Base servings used for division: missing, zero, negative or non-finite
/// values count as 1.
pub fn effective_base_servings(base: Option<f64>) -> f64 {
    match base {
        Some(b) if b.is_finite() && b > 0.0 => b,
        _ => 1.0,
    }
}

pub fn scale_factor(base: Option<f64>, target: ServingCount) -> f64 {
    f64::from(target.get()) / effective_base_servings(base)
}

/// Multiply a quantity by the scale factor. Non-finite quantities count as 0;
/// products too large for `f64` saturate instead of overflowing.
pub fn scale_quantity(quantity: f64, factor: f64) -> f64 {
    if !quantity.is_finite() {
        return 0.0;
    }
    (quantity * factor).clamp(-f64::MAX, f64::MAX)
}

/// Rescale every ingredient from `base` servings to `target` servings.
/// Units and item names pass through unchanged.
pub fn scale_ingredients(
    ingredients: &[Ingredient],
    base: Option<f64>,
    target: ServingCount,
) -> Vec<ScaledIngredient> {
    let factor = scale_factor(base, target);

    ingredients
        .iter()
        .map(|ingredient| {
            let quantity = scale_quantity(ingredient.quantity, factor);
            ScaledIngredient {
                quantity,
                display_quantity: format_quantity(quantity),
                unit: ingredient.unit,
                item: ingredient.item.clone(),
            }
        })
        .collect()
}

//! Import of loosely-typed recipe documents.
//!
//! Older recipe exports store numbers as either JSON numbers or strings and
//! leave fields out. Import keeps the forgiving defaults those documents were
//! written with: servings fall back to 4, times to 0 and quantities to 0.

use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::ValidationError;
use crate::quantity::lenient_quantity;
use crate::recipe::{Ingredient, Instruction, RecipeDraft, Unit};

pub const DEFAULT_SERVINGS: u32 = 4;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRecipe {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub servings: Option<Value>,
    #[serde(default, alias = "prep_time")]
    #[schema(value_type = Option<Object>)]
    pub prep_time: Option<Value>,
    #[serde(default, alias = "cook_time")]
    #[schema(value_type = Option<Object>)]
    pub cook_time: Option<Value>,
    #[serde(default)]
    pub ingredients: Vec<LegacyIngredient>,
    #[serde(default)]
    pub instructions: Vec<LegacyInstruction>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LegacyIngredient {
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
}

/// Instructions were stored either as `{ "step": "..." }` objects or bare strings.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum LegacyInstruction {
    Step { step: String },
    Text(String),
}

impl LegacyInstruction {
    fn into_step(self) -> String {
        match self {
            LegacyInstruction::Step { step } => step,
            LegacyInstruction::Text(text) => text,
        }
    }
}

impl LegacyRecipe {
    /// Coerce into a draft and validate it.
    pub fn into_draft(self) -> Result<RecipeDraft, ValidationError> {
        let servings = coerce_number(self.servings.as_ref())
            .filter(|s| *s > 0.0)
            .map(|s| to_whole(s).max(1))
            .unwrap_or(DEFAULT_SERVINGS);

        let prep_time = coerce_minutes(self.prep_time.as_ref());
        let cook_time = coerce_minutes(self.cook_time.as_ref());

        let ingredients = self
            .ingredients
            .into_iter()
            .enumerate()
            .map(|(index, ingredient)| ingredient.into_ingredient(index + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let instructions = self
            .instructions
            .into_iter()
            .map(|instruction| Instruction {
                step: instruction.into_step(),
            })
            .collect();

        let draft = RecipeDraft {
            title: self.title.trim().to_string(),
            servings,
            prep_time,
            cook_time,
            ingredients,
            instructions,
        };
        draft.validate()?;
        Ok(draft)
    }
}

impl LegacyIngredient {
    fn into_ingredient(self, position: usize) -> Result<Ingredient, ValidationError> {
        let unit = match self.unit.as_deref().map(str::trim) {
            None | Some("") => Unit::Item,
            Some(raw) => Unit::parse(raw).ok_or_else(|| ValidationError::UnknownUnit {
                position,
                unit: raw.to_string(),
            })?,
        };

        Ok(Ingredient {
            quantity: coerce_number(self.quantity.as_ref()).unwrap_or(0.0),
            unit,
            item: self.item.unwrap_or_default().trim().to_string(),
        })
    }
}

/// A JSON number, or a string read with the lenient quantity rules.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => Some(lenient_quantity(Some(s))),
        _ => None,
    }
}

fn coerce_minutes(value: Option<&Value>) -> u32 {
    coerce_number(value)
        .filter(|m| *m > 0.0)
        .map(to_whole)
        .unwrap_or(0)
}

fn to_whole(value: f64) -> u32 {
    // `as` saturates at the u32 bounds
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy(value: Value) -> LegacyRecipe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_string_numbers_are_coerced() {
        let draft = legacy(json!({
            "title": "Pancakes",
            "servings": "2",
            "prepTime": "10",
            "cookTime": 20,
            "ingredients": [{"quantity": "1.5", "unit": "cup", "item": "flour"}],
            "instructions": [{"step": "Mix"}, "Fry"],
            "imageUrl": "https://example.com/p.jpg",
            "userId": "abc"
        }))
        .into_draft()
        .unwrap();

        assert_eq!(draft.servings, 2);
        assert_eq!(draft.prep_time, 10);
        assert_eq!(draft.cook_time, 20);
        assert_eq!(draft.ingredients[0].quantity, 1.5);
        assert_eq!(draft.instructions[1].step, "Fry");
    }

    #[test]
    fn test_missing_values_use_defaults() {
        let draft = legacy(json!({
            "title": "Toast",
            "ingredients": [{"item": "bread"}, {"quantity": "lots", "unit": "", "item": "butter"}]
        }))
        .into_draft()
        .unwrap();

        assert_eq!(draft.servings, DEFAULT_SERVINGS);
        assert_eq!(draft.prep_time, 0);
        assert_eq!(draft.cook_time, 0);
        assert_eq!(draft.ingredients[0].quantity, 0.0);
        assert_eq!(draft.ingredients[0].unit, Unit::Item);
        assert_eq!(draft.ingredients[1].quantity, 0.0);
    }

    #[test]
    fn test_zero_or_garbage_servings_default_to_four() {
        for servings in [json!(0), json!("none"), json!(null), json!(true)] {
            let draft = legacy(json!({"title": "Soup", "servings": servings}))
                .into_draft()
                .unwrap();
            assert_eq!(draft.servings, DEFAULT_SERVINGS);
        }
    }

    #[test]
    fn test_fractional_servings_round() {
        let draft = legacy(json!({"title": "Soup", "servings": 2.4}))
            .into_draft()
            .unwrap();
        assert_eq!(draft.servings, 2);

        let draft = legacy(json!({"title": "Soup", "servings": 0.2}))
            .into_draft()
            .unwrap();
        assert_eq!(draft.servings, 1);
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let result = legacy(json!({
            "title": "Soup",
            "ingredients": [{"quantity": 1, "unit": "bucket", "item": "water"}]
        }))
        .into_draft();

        assert_eq!(
            result,
            Err(ValidationError::UnknownUnit {
                position: 1,
                unit: "bucket".to_string()
            })
        );
    }

    #[test]
    fn test_missing_title_rejected() {
        let result = legacy(json!({"servings": 2})).into_draft();
        assert_eq!(result, Err(ValidationError::EmptyTitle));
    }
}

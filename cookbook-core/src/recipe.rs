//! Typed recipe records and their validation.

use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;
use crate::quantity::parse_quantity;

/// Measurement units offered when entering an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Item,
    Cup,
    Tbsp,
    Tsp,
    G,
    Oz,
    Lb,
    Ml,
}

impl Unit {
    pub const ALL: &'static [Unit] = &[
        Unit::Item,
        Unit::Cup,
        Unit::Tbsp,
        Unit::Tsp,
        Unit::G,
        Unit::Oz,
        Unit::Lb,
        Unit::Ml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Item => "item",
            Unit::Cup => "cup",
            Unit::Tbsp => "tbsp",
            Unit::Tsp => "tsp",
            Unit::G => "g",
            Unit::Oz => "oz",
            Unit::Lb => "lb",
            Unit::Ml => "ml",
        }
    }

    /// Case-insensitive lookup by short name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(s))
    }
}

/// A single ingredient line: quantity, unit and item name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    /// Amount for the recipe's base servings. Accepts a JSON number or a
    /// numeric string ("1.5", "1/2"); missing or blank means 0.
    #[serde(default, deserialize_with = "quantity_number_or_text")]
    #[schema(value_type = f64)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: Unit,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Instruction {
    pub step: String,
}

/// Largest servings or minutes value a recipe can store.
pub const MAX_RECIPE_COUNT: u32 = i32::MAX as u32;

/// Largest ingredient quantity accepted; scaling it by any serving count
/// stays finite.
pub const MAX_QUANTITY: f64 = 1e12;

/// Everything needed to create a recipe, before it has an id or owner.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub servings: u32,
    pub prep_time: u32,
    pub cook_time: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
}

impl RecipeDraft {
    /// Check the draft against the recipe schema. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        if self.servings == 0 {
            return Err(ValidationError::ZeroServings);
        }

        for (field, value) in [
            ("servings", self.servings),
            ("prep_time", self.prep_time),
            ("cook_time", self.cook_time),
        ] {
            if value > MAX_RECIPE_COUNT {
                return Err(ValidationError::TooLarge {
                    field,
                    value,
                    max: MAX_RECIPE_COUNT,
                });
            }
        }

        for (index, ingredient) in self.ingredients.iter().enumerate() {
            let position = index + 1;
            if !(0.0..=MAX_QUANTITY).contains(&ingredient.quantity) {
                return Err(ValidationError::InvalidQuantity {
                    position,
                    quantity: ingredient.quantity,
                });
            }
            if ingredient.item.trim().is_empty() {
                return Err(ValidationError::EmptyIngredientItem { position });
            }
        }

        for (index, instruction) in self.instructions.iter().enumerate() {
            if instruction.step.trim().is_empty() {
                return Err(ValidationError::EmptyInstruction {
                    position: index + 1,
                });
            }
        }

        Ok(())
    }

    pub fn keywords(&self) -> Vec<String> {
        title_keywords(&self.title)
    }
}

/// Search keywords for a title: lowercased whitespace-separated words,
/// first occurrence kept.
pub fn title_keywords(title: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in title.split_whitespace() {
        let word = word.to_lowercase();
        if !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn quantity_number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(NumberOrText::Number(n)) => Ok(n),
        Some(NumberOrText::Text(t)) if t.trim().is_empty() => Ok(0.0),
        Some(NumberOrText::Text(t)) => parse_quantity(&t)
            .ok_or_else(|| de::Error::custom(format!("invalid quantity: {:?}", t))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flour() -> Ingredient {
        Ingredient {
            quantity: 2.0,
            unit: Unit::Cup,
            item: "flour".to_string(),
        }
    }

    fn draft() -> RecipeDraft {
        RecipeDraft {
            title: "Midnight Pasta".to_string(),
            servings: 4,
            prep_time: 15,
            cook_time: 30,
            ingredients: vec![flour()],
            instructions: vec![Instruction {
                step: "Boil water".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_draft() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert_eq!(d.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_zero_servings_rejected() {
        let mut d = draft();
        d.servings = 0;
        assert_eq!(d.validate(), Err(ValidationError::ZeroServings));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut d = draft();
        d.ingredients.push(Ingredient {
            quantity: -1.0,
            unit: Unit::G,
            item: "salt".to_string(),
        });
        assert_eq!(
            d.validate(),
            Err(ValidationError::InvalidQuantity {
                position: 2,
                quantity: -1.0
            })
        );
    }

    #[test]
    fn test_counts_beyond_storage_rejected() {
        let mut d = draft();
        d.servings = 3_000_000_000;
        assert_eq!(
            d.validate(),
            Err(ValidationError::TooLarge {
                field: "servings",
                value: 3_000_000_000,
                max: MAX_RECIPE_COUNT,
            })
        );

        let mut d = draft();
        d.cook_time = u32::MAX;
        assert!(matches!(
            d.validate(),
            Err(ValidationError::TooLarge { field: "cook_time", .. })
        ));

        let mut d = draft();
        d.prep_time = MAX_RECIPE_COUNT;
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn test_huge_quantity_rejected() {
        let mut d = draft();
        d.ingredients[0].quantity = 1e308;
        assert_eq!(
            d.validate(),
            Err(ValidationError::InvalidQuantity {
                position: 1,
                quantity: 1e308
            })
        );

        d.ingredients[0].quantity = MAX_QUANTITY;
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn test_blank_item_and_step_rejected() {
        let mut d = draft();
        d.ingredients[0].item = String::new();
        assert_eq!(
            d.validate(),
            Err(ValidationError::EmptyIngredientItem { position: 1 })
        );

        let mut d = draft();
        d.instructions.push(Instruction {
            step: " ".to_string(),
        });
        assert_eq!(
            d.validate(),
            Err(ValidationError::EmptyInstruction { position: 2 })
        );
    }

    #[test]
    fn test_title_keywords() {
        assert_eq!(
            title_keywords("Midnight  Pasta alla midnight"),
            vec!["midnight", "pasta", "alla"]
        );
        assert!(title_keywords("   ").is_empty());
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!(Unit::parse("TBSP"), Some(Unit::Tbsp));
        assert_eq!(Unit::parse(" ml "), Some(Unit::Ml));
        assert_eq!(Unit::parse("handful"), None);
    }

    #[test]
    fn test_ingredient_quantity_from_text() {
        let ing: Ingredient =
            serde_json::from_str(r#"{"quantity": "1.5", "unit": "cup", "item": "milk"}"#).unwrap();
        assert_eq!(ing.quantity, 1.5);
        assert_eq!(ing.unit, Unit::Cup);
    }

    #[test]
    fn test_ingredient_missing_quantity_and_unit() {
        let ing: Ingredient = serde_json::from_str(r#"{"item": "eggs"}"#).unwrap();
        assert_eq!(ing.quantity, 0.0);
        assert_eq!(ing.unit, Unit::Item);

        let ing: Ingredient =
            serde_json::from_str(r#"{"quantity": null, "item": "eggs"}"#).unwrap();
        assert_eq!(ing.quantity, 0.0);
    }

    #[test]
    fn test_ingredient_rejects_non_numeric_text() {
        let result: Result<Ingredient, _> =
            serde_json::from_str(r#"{"quantity": "a pinch", "item": "salt"}"#);
        assert!(result.is_err());

        let result: Result<Ingredient, _> =
            serde_json::from_str(r#"{"quantity": 1, "unit": "handful", "item": "salt"}"#);
        assert!(result.is_err());
    }
}

pub mod error;
pub mod image;
pub mod legacy;
pub mod quantity;
pub mod recipe;
pub mod scaling;

pub use error::{ImageError, ValidationError};
pub use crate::image::{validate_image, ALLOWED_FORMATS, MAX_FILE_SIZE};
pub use legacy::{LegacyIngredient, LegacyInstruction, LegacyRecipe};
pub use quantity::{format_quantity, lenient_quantity, parse_quantity};
pub use recipe::{
    title_keywords, Ingredient, Instruction, RecipeDraft, Unit, MAX_QUANTITY, MAX_RECIPE_COUNT,
};
pub use scaling::{
    effective_base_servings, scale_factor, scale_ingredients, scale_quantity, ScaledIngredient,
    ServingCount,
};

use image::ImageFormat;
use thiserror::Error;

/// Reasons a recipe draft is refused at the store boundary.
///
/// Positions are 1-based so messages can be shown to users as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Servings must be at least 1")]
    ZeroServings,

    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("Ingredient {position} has an invalid quantity: {quantity}")]
    InvalidQuantity { position: usize, quantity: f64 },

    #[error("Ingredient {position} is missing an item name")]
    EmptyIngredientItem { position: usize },

    #[error("Ingredient {position} has an unknown unit: {unit}")]
    UnknownUnit { position: usize, unit: String },

    #[error("Instruction step {position} cannot be empty")]
    EmptyInstruction { position: usize },
}

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image: {0}")]
    Read(#[from] std::io::Error),

    #[error("Could not detect image format")]
    UnknownFormat,

    #[error("Unsupported image format: {0:?}. Allowed: JPEG, PNG, GIF, WebP")]
    Unsupported(ImageFormat),

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Failed to process image: {0}")]
    Codec(#[from] image::ImageError),
}

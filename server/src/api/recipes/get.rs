use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::DbUuid;
use crate::photos::resolve_url;
use crate::store;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDateTime;
use cookbook_core::{
    scale_factor, scale_ingredients, Ingredient, Instruction, ScaledIngredient, ServingCount,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetRecipeParams {
    /// Servings to scale the ingredients to (default: the recipe's own
    /// servings; values below 1 are treated as 1)
    pub servings: Option<i64>,
}

/// Ingredients recalculated for a chosen number of servings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScaledView {
    pub servings: u32,
    /// Target for the "-" control; never below 1
    pub previous_servings: u32,
    /// Target for the "+" control
    pub next_servings: u32,
    pub scale_factor: f64,
    pub ingredients: Vec<ScaledIngredient>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    /// Servings the stored ingredient quantities are written for
    pub servings: u32,
    pub prep_time: u32,
    pub cook_time: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    pub photo_id: Option<Uuid>,
    pub photo_url: Option<String>,
    pub keywords: Vec<String>,
    pub created_at: NaiveDateTime,
    pub scaled: ScaledView,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID"),
        GetRecipeParams,
    ),
    responses(
        (status = 200, description = "Recipe with ingredients scaled to the requested servings", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Query(params): Query<GetRecipeParams>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let mut conn = get_conn!(pool);

    let recipe = store::recipes::get_for_owner(&mut conn, DbUuid::from(id), user.id)
        .map_err(|e| ApiError::fetch("fetch recipe", e))?
        .ok_or(ApiError::NotFound("Recipe"))?;

    let base = Some(f64::from(recipe.servings));
    let target = params
        .servings
        .map(ServingCount::clamped)
        .unwrap_or_else(|| ServingCount::new(recipe.servings));

    let scaled = ScaledView {
        servings: target.get(),
        previous_servings: target.decrement().get(),
        next_servings: target.increment().get(),
        scale_factor: scale_factor(base, target),
        ingredients: scale_ingredients(&recipe.ingredients, base, target),
    };

    Ok(Json(RecipeResponse {
        id: recipe.id,
        title: recipe.title,
        servings: recipe.servings,
        prep_time: recipe.prep_time,
        cook_time: recipe.cook_time,
        ingredients: recipe.ingredients,
        instructions: recipe.instructions,
        photo_url: recipe.photo_id.map(resolve_url),
        photo_id: recipe.photo_id,
        keywords: recipe.keywords,
        created_at: recipe.created_at,
        scaled,
    }))
}

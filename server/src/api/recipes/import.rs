use crate::api::{ErrorResponse, JsonBody};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use axum::{extract::State, http::StatusCode, Json};
use cookbook_core::LegacyRecipe;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::create::{save_draft, CreateRecipeResponse};

/// A recipe document in the loose legacy shape, plus an optional cover photo.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecipeRequest {
    #[serde(flatten)]
    pub recipe: LegacyRecipe,
    #[serde(default, alias = "photo_id")]
    pub photo_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/recipes/import",
    tag = "recipes",
    request_body(
        content = ImportRecipeRequest,
        example = json!({
            "title": "Pancakes",
            "servings": "4",
            "prepTime": "10",
            "ingredients": [{"quantity": "1 1/2", "unit": "cup", "item": "flour"}],
            "instructions": [{"step": "Mix"}, "Fry"]
        })
    ),
    responses(
        (status = 201, description = "Recipe imported", body = CreateRecipeResponse),
        (status = 400, description = "Document can't be turned into a valid recipe", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn import_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    JsonBody(request): JsonBody<ImportRecipeRequest>,
) -> Result<(StatusCode, Json<CreateRecipeResponse>), ApiError> {
    let draft = request.recipe.into_draft()?;

    let mut conn = get_conn!(pool);
    let id = save_draft(&mut conn, user.id, &draft, request.photo_id)?;

    Ok((StatusCode::CREATED, Json(CreateRecipeResponse { id })))
}

use crate::api::{ErrorResponse, JsonBody};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::DbUuid;
use crate::store;
use axum::{extract::State, http::StatusCode, Json};
use cookbook_core::{Ingredient, Instruction, RecipeDraft};
use diesel::SqliteConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    /// Number of servings the ingredient quantities are written for
    pub servings: u32,
    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time: u32,
    /// Cooking time in minutes
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    /// Cover photo from POST /api/photos
    pub photo_id: Option<Uuid>,
}

impl CreateRecipeRequest {
    fn into_parts(self) -> (RecipeDraft, Option<Uuid>) {
        let draft = RecipeDraft {
            title: self.title,
            servings: self.servings,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            ingredients: self.ingredients,
            instructions: self.instructions,
        };
        (draft, self.photo_id)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
}

/// Validate a draft and store it for `owner`. Shared with the import endpoint.
pub(crate) fn save_draft(
    conn: &mut SqliteConnection,
    owner: DbUuid,
    draft: &RecipeDraft,
    photo_id: Option<Uuid>,
) -> Result<Uuid, ApiError> {
    draft.validate()?;

    let photo_id = photo_id.map(DbUuid::from);
    if let Some(photo_id) = photo_id {
        let owned = store::photos::exists_for_owner(conn, photo_id, owner)
            .map_err(|e| ApiError::fetch("fetch photo", e))?;
        if !owned {
            return Err(ApiError::BadRequest(format!(
                "Photo {} does not exist",
                photo_id
            )));
        }
    }

    let id = store::recipes::insert(conn, owner, draft, photo_id)
        .map_err(|e| ApiError::write("create recipe", e))?;

    tracing::info!(recipe_id = %id, owner = %owner, "Recipe created");

    Ok(id)
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Recipe failed validation", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    JsonBody(request): JsonBody<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<CreateRecipeResponse>), ApiError> {
    let (draft, photo_id) = request.into_parts();

    let mut conn = get_conn!(pool);
    let id = save_draft(&mut conn, user.id, &draft, photo_id)?;

    Ok((StatusCode::CREATED, Json(CreateRecipeResponse { id })))
}

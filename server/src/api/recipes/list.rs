use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::photos::resolve_url;
use crate::store;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDateTime;
use cookbook_core::title_keywords;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 1000;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Keywords to match against recipe titles (all must match, case-insensitive)
    pub q: Option<String>,
    /// Number of items to return (default: 20, max: 1000)
    pub limit: Option<usize>,
    /// Number of items to skip (default: 0)
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub servings: u32,
    pub prep_time: u32,
    pub cook_time: u32,
    pub photo_id: Option<Uuid>,
    pub photo_url: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    /// Number of matching recipes before pagination
    pub total: usize,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "The caller's recipes, newest first", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListRecipesParams>,
) -> Result<Json<ListRecipesResponse>, ApiError> {
    let mut conn = get_conn!(pool);

    let documents = store::recipes::list_for_owner(&mut conn, user.id)
        .map_err(|e| ApiError::fetch("fetch recipes", e))?;

    let query = params.q.as_deref().map(title_keywords).unwrap_or_default();
    let matching: Vec<_> = documents
        .into_iter()
        .filter(|doc| doc.matches(&query))
        .collect();

    let total = matching.len();
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let recipes = matching
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|doc| RecipeSummary {
            id: doc.id,
            title: doc.title,
            servings: doc.servings,
            prep_time: doc.prep_time,
            cook_time: doc.cook_time,
            photo_url: doc.photo_id.map(resolve_url),
            photo_id: doc.photo_id,
            created_at: doc.created_at,
        })
        .collect();

    Ok(Json(ListRecipesResponse { recipes, total }))
}

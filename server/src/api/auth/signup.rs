use super::{Credentials, TokenResponse};
use crate::api::{ErrorResponse, JsonBody};
use crate::auth::{create_session, hash_password};
use crate::config::Settings;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::{DbUuid, NewUser};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "Account created and signed in", body = TokenResponse),
        (status = 400, description = "Blank username or password", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let username = credentials.username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("Username cannot be empty".to_string()));
    }
    if credentials.password.is_empty() {
        return Err(ApiError::BadRequest("Password cannot be empty".to_string()));
    }

    let password_hash = hash_password(&credentials.password, settings.insecure_password_hashing)
        .map_err(|e| ApiError::write("hash password", e.to_string()))?;

    let mut conn = get_conn!(pool);

    let user_id = DbUuid::new_v4();
    let inserted = diesel::insert_into(users::table)
        .values(&NewUser {
            id: user_id,
            username,
            password_hash: &password_hash,
            created_at: Utc::now().naive_utc(),
        })
        .execute(&mut conn);

    // Usernames are unique ignoring case (see the users_username_lower index)
    match inserted {
        Ok(_) => {}
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(ApiError::Conflict("Username already exists"));
        }
        Err(e) => return Err(ApiError::write("create user", e)),
    }

    let token = create_session(&mut conn, user_id, settings.session_ttl)
        .map_err(|e| ApiError::write("create session", e))?;

    tracing::info!(user_id = %user_id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            user_id: user_id.into(),
            token,
        }),
    ))
}

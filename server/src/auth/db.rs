use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::{DbUuid, NewSession, Session, User};
use crate::schema::{sessions, users};
use crate::config::MAX_SESSION_TTL_DAYS;
use chrono::{TimeDelta, Utc};
use diesel::prelude::*;

use super::crypto::{generate_token, hash_token};
use super::extractor::AuthSession;

/// Create a session for the user and return its bearer token.
pub fn create_session(
    conn: &mut SqliteConnection,
    user_id: DbUuid,
    ttl: TimeDelta,
) -> QueryResult<String> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let now = Utc::now().naive_utc();

    let new_session = NewSession {
        id: DbUuid::new_v4(),
        user_id,
        token_hash: &token_hash,
        expires_at: now + ttl.clamp(TimeDelta::zero(), TimeDelta::days(MAX_SESSION_TTL_DAYS)),
        created_at: now,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

/// Look up a live session (not expired, user not deleted) by bearer token.
pub fn find_session(
    conn: &mut SqliteConnection,
    token: &str,
) -> QueryResult<Option<(Session, User)>> {
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now().naive_utc()))
        .filter(users::deleted_at.is_null())
        .select((Session::as_select(), User::as_select()))
        .first(conn)
        .optional()
}

pub fn delete_session(conn: &mut SqliteConnection, session_id: DbUuid) -> QueryResult<usize> {
    diesel::delete(sessions::table.filter(sessions::id.eq(session_id))).execute(conn)
}

/// Resolve a bearer token to the signed-in user, or 401.
pub fn authenticate(pool: &DbPool, token: &str) -> Result<AuthSession, ApiError> {
    let mut conn = get_conn!(pool);

    match find_session(&mut conn, token) {
        Ok(Some((session, user))) => Ok(AuthSession { user, session }),
        Ok(None) => Err(ApiError::Unauthorized("Invalid or expired token")),
        Err(e) => Err(ApiError::fetch("look up session", e)),
    }
}

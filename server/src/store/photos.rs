use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::StoreError;
use crate::models::{DbUuid, NewPhoto};
use crate::schema::photos;

/// Image bytes plus the content type they were uploaded as.
#[derive(Debug, Clone)]
pub struct PhotoBlob {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Storage path for an upload: `recipes/{owner}/{unix_millis}-{file name}`.
pub fn storage_path(owner: Uuid, uploaded_at: NaiveDateTime, file_name: &str) -> String {
    format!(
        "recipes/{}/{}-{}",
        owner,
        uploaded_at.and_utc().timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// Keep only characters that are safe inside a single path segment.
fn sanitize_file_name(name: &str) -> String {
    // Browsers may send a full client-side path
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Store an uploaded image and its thumbnail; returns the photo id.
pub fn insert(
    conn: &mut SqliteConnection,
    owner: DbUuid,
    file_name: &str,
    content_type: &str,
    data: &[u8],
    thumbnail: &[u8],
) -> Result<Uuid, StoreError> {
    let id = DbUuid::new_v4();
    let created_at = Utc::now().naive_utc();
    let path = storage_path(owner.into(), created_at, file_name);

    diesel::insert_into(photos::table)
        .values(&NewPhoto {
            id,
            user_id: owner,
            path: &path,
            content_type,
            data,
            thumbnail,
            created_at,
        })
        .execute(conn)?;

    Ok(id.into())
}

/// Whether `owner` has a photo with this id (without loading the blob).
pub fn exists_for_owner(
    conn: &mut SqliteConnection,
    id: DbUuid,
    owner: DbUuid,
) -> Result<bool, StoreError> {
    let count: i64 = photos::table
        .filter(photos::id.eq(id))
        .filter(photos::user_id.eq(owner))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}

pub fn get_for_owner(
    conn: &mut SqliteConnection,
    id: DbUuid,
    owner: DbUuid,
) -> Result<Option<PhotoBlob>, StoreError> {
    let row: Option<(String, Vec<u8>)> = photos::table
        .filter(photos::id.eq(id))
        .filter(photos::user_id.eq(owner))
        .select((photos::content_type, photos::data))
        .first(conn)
        .optional()?;

    Ok(row.map(|(content_type, data)| PhotoBlob { content_type, data }))
}

/// The pre-rendered default-size thumbnail (JPEG).
pub fn thumbnail_for_owner(
    conn: &mut SqliteConnection,
    id: DbUuid,
    owner: DbUuid,
) -> Result<Option<Vec<u8>>, StoreError> {
    Ok(photos::table
        .filter(photos::id.eq(id))
        .filter(photos::user_id.eq(owner))
        .select(photos::thumbnail)
        .first(conn)
        .optional()?)
}

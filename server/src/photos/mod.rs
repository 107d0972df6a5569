pub mod processing;

use cookbook_core::MAX_FILE_SIZE;
use uuid::Uuid;

/// Request body limit for uploads: the largest allowed image plus room for
/// multipart framing.
pub const MAX_UPLOAD_BODY: usize = MAX_FILE_SIZE + 64 * 1024;

/// Resolve a stored photo reference to the URL it is served from.
pub fn resolve_url(id: Uuid) -> String {
    format!("/api/photos/{}", id)
}

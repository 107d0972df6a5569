mod crypto;
mod db;
mod extractor;
mod middleware;

pub use crypto::{generate_token, hash_password, hash_token, verify_password};
pub use db::{authenticate, create_session, delete_session, find_session};
pub use extractor::{bearer_token, AuthSession, AuthUser};
pub use middleware::require_auth;

pub mod extractors;
pub mod middleware;
pub mod password;

use base64::{prelude::BASE64_STANDARD, Engine};
use serde::{Deserialize, Serialize};

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};

/// Payload for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response to a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Ready-to-send `Authorization` header value for subsequent requests.
    pub token: String,
    pub username: String,
}

/// Builds the `Authorization` header value for HTTP Basic: `Basic base64(user:password)`.
pub fn basic_authorization(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        BASE64_STANDARD.encode(format!("{}:{}", username, password))
    )
}

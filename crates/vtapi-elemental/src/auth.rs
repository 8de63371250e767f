//! Elemental API request signing.
//!
//! Every request carries `X-Auth-User`, `X-Auth-Expires` and `X-Auth-Key`
//! headers. The key is a double MD5 over the endpoint path (relative to
//! `/api`), the login, the API key and the expiry timestamp.

use md5::{Digest, Md5};

pub const HEADER_USER: &str = "X-Auth-User";
pub const HEADER_EXPIRES: &str = "X-Auth-Expires";
pub const HEADER_KEY: &str = "X-Auth-Key";

/// Compute the `X-Auth-Key` header value.
///
/// `path` must not include the `/api` prefix or a query string.
pub fn auth_key(path: &str, user_login: &str, api_key: &str, expires: i64) -> String {
    let expires = expires.to_string();
    let inner = md5_hex(&[path, user_login, api_key, &expires]);
    md5_hex(&[api_key, &inner])
}

fn md5_hex(parts: &[&str]) -> String {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

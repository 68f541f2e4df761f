//! Anti-forgery protection for mutating admin routes.
//!
//! Tokens are HMAC-SHA256 over a fixed context string, keyed by the
//! configured secret. The frontend receives the token inside the
//! delete-confirmation dialog and the setting form view, and sends it back
//! in the [`CSRF_TOKEN_HEADER`] header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the anti-forgery token.
pub const CSRF_TOKEN_HEADER: &str = "x-csrf-token";

/// Context string bound into every token so tokens cannot be replayed for
/// other HMAC uses of the same secret.
const TOKEN_CONTEXT: &[u8] = b"shopkit-admin-csrf-v1";

/// Compute the anti-forgery token for the given secret, hex-encoded.
pub fn csrf_token(secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(TOKEN_CONTEXT);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a presented token against the secret.
///
/// Comparison goes through the MAC's constant-time check.
pub fn verify_csrf_token(secret: &str, presented: &str) -> bool {
    let Some(bytes) = hex::decode(presented) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(TOKEN_CONTEXT);
    mac.verify_slice(&bytes).is_ok()
}

/// Extractor that proves the request carried a valid anti-forgery token.
///
/// Add it as a handler parameter to declare the route protected:
///
/// ```ignore
/// async fn delete(_csrf: CsrfProtected, State(state): State<AppState>) -> ... {
///     // only reached with a valid token
/// }
/// ```
pub struct CsrfProtected;

impl FromRequestParts<AppState> for CsrfProtected {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(CSRF_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Forbidden("Missing anti-forgery token".to_string()))?;

        if !verify_csrf_token(&state.config.csrf_secret, presented) {
            return Err(AppError::Forbidden("Invalid anti-forgery token".to_string()));
        }

        Ok(CsrfProtected)
    }
}

mod hex {
    /// Encode bytes as lowercase hex.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes
            .as_ref()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }

    /// Decode a hex string, `None` on any malformed input.
    pub fn decode(input: &str) -> Option<Vec<u8>> {
        if !input.is_ascii() || input.len() % 2 != 0 {
            return None;
        }
        (0..input.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&input[i..i + 2], 16).ok())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! The credential gate protecting mutating operations.

use crate::error::{ApiError, ApiResult};
use satchel_core::{mask_secret, AuthConfig};
use std::fmt;

/// The masked form of an accepted secret, safe for logs and metadata.
///
/// This is the only representation handed out after authorization; the raw
/// secret is dropped inside [`authorize`].
#[derive(Clone, PartialEq, Eq)]
pub struct MaskedSecret(String);

impl MaskedSecret {
    /// The masked value, e.g. `s2c...`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaskedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for MaskedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MaskedSecret({})", self.0)
    }
}

/// Validate a caller-supplied `Authorization` header value.
///
/// Expects `<scheme> <secret>` and splits on the first space; the scheme
/// itself is not inspected. A missing header, a malformed value, and an
/// unrecognized secret all collapse into the same [`ApiError::Unauthorized`]
/// outcome, reported only after the configured delay so that failure timing
/// leaks nothing about the cause. Each request sleeps independently; no lock
/// is held, so concurrent requests are not throttled by one another.
pub async fn authorize(header: Option<&str>, config: &AuthConfig) -> ApiResult<MaskedSecret> {
    let presented = header
        .and_then(|value| value.split_once(' '))
        .map(|(_scheme, secret)| secret);

    if let Some(secret) = presented {
        if !secret.is_empty() && config.secrets.iter().any(|s| s == secret) {
            return Ok(MaskedSecret(mask_secret(secret, config.secret_reveal_len)));
        }
    }

    tokio::time::sleep(config.invalid_secret_delay()).await;
    Err(ApiError::Unauthorized)
}

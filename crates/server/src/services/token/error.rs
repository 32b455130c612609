//! Access token error types.

use thiserror::Error;

/// Errors that can occur while issuing or verifying access tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token has passed its `exp` claim.
    #[error("token expired")]
    Expired,

    /// The token is malformed, badly signed, or otherwise unacceptable.
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// Signing failed.
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

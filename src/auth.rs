//! Bearer-token subject extraction.
//!
//! Tokens are issued and verified by the external auth service; this module
//! only reads the subject claim out of the payload for identity.

use crate::models::UserId;
use base64::Engine;
use serde_json::Value;
use uuid::Uuid;

/// Pull the user id out of a JWT-shaped bearer token without verifying it.
///
/// Returns `None` for anything malformed: a missing payload segment, bad
/// base64, bad JSON, or a subject that is not a uuid. Absence is a value
/// here, not an exception.
pub fn decode_user_id(token: &str) -> Option<UserId> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    let subject = claims
        .get("sub")
        .or_else(|| claims.get("nameid"))?
        .as_str()?;
    Uuid::parse_str(subject).ok()
}

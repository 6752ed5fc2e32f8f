//! Authentication token model.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Length of a generated token id.
pub const TOKEN_ID_LENGTH: usize = 20;

/// Session token, stored in the `tokens` collection keyed by id.
///
/// A token is valid iff `expires` is strictly in the future and the
/// stored `phone` matches the identity making the request. Expired
/// tokens are not swept; they sit on disk as inert garbage until
/// explicitly deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Random opaque id (fixed length, lowercase alphanumeric)
    pub id: String,
    /// Phone of the user this token authenticates
    pub phone: String,
    /// Absolute expiry instant, epoch milliseconds
    pub expires: i64,
}

impl Token {
    pub fn is_expired(&self) -> bool {
        self.expires <= Utc::now().timestamp_millis()
    }
}

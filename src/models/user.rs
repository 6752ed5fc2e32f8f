//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User account, stored in the `users` collection keyed by phone number.
///
/// The stored record never contains the plaintext password, and
/// `hashed_password` is stripped before the record is returned to a
/// caller (see the users routes).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Phone number (globally unique, doubles as the document id)
    pub phone: String,
    /// HMAC-SHA256 of the password, hex encoded
    pub hashed_password: String,
    /// Terms-of-service agreement flag
    pub tos_agreement: bool,
    /// Ids of the checks this user owns, in creation order
    #[serde(default)]
    pub checks: Vec<String>,
}

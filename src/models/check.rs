//! Check (monitoring target) model.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Length of a generated check id.
pub const CHECK_ID_LENGTH: usize = 20;

/// Bounds for `timeout_seconds`, inclusive.
pub const TIMEOUT_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A monitoring-target definition, stored in the `checks` collection.
///
/// Every check belongs to exactly one user via `user_phone`; the owning
/// user's `checks` list holds the reverse edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    /// Random opaque id (fixed length, lowercase alphanumeric)
    pub id: String,
    /// Phone of the owning user
    pub user_phone: String,
    /// Scheme used when the check is polled
    pub protocol: Protocol,
    /// Target URL (scheme-less host/path)
    pub url: String,
    /// HTTP method used when the check is polled
    pub method: CheckMethod,
    /// Status codes counted as success
    pub success_codes: Vec<u16>,
    /// Per-request timeout, 1 to 5 seconds
    pub timeout_seconds: u8,
}

/// Scheme a check is polled over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl FromStr for Protocol {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            _ => Err(()),
        }
    }
}

/// HTTP method a check is polled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMethod {
    Post,
    Get,
    Put,
    Delete,
}

impl FromStr for CheckMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(CheckMethod::Post),
            "get" => Ok(CheckMethod::Get),
            "put" => Ok(CheckMethod::Put),
            "delete" => Ok(CheckMethod::Delete),
            _ => Err(()),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};


/// The authenticated principal as returned by `/admin/current` or `/admin/login`.
///
/// Only `_id` is interpreted by the client; every other field is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl CurrentUser {
    /// Best-effort display name built from whatever name fields the server sent.
    pub fn display_name(&self) -> String {
        let text = |key: &str| {
            self.profile
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        match (text("first_name"), text("last_name")) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => text("name")
                .or_else(|| text("login_name"))
                .unwrap_or(&self.id)
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub occupation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoComment {
    #[serde(rename = "_id")]
    pub id: String,
    pub comment: String,
    pub date_time: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub file_name: String,
    pub date_time: String,
    #[serde(default)]
    pub comments: Vec<PhotoComment>,
}

/// Formats an RFC 3339 timestamp as `YYYY-MM-DD HH:MM` (UTC).
/// Unparsable input is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

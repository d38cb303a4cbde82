//! Profile and user records from the `/profile` endpoint.

use jiff::Timestamp;
use serde_json::Value;

use crate::api::raw::{self, MissingField};

/// The authenticated account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: Option<Timestamp>,
    pub verified: bool,
}

/// Account profile: the user plus plan and quota metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub user: User,
    pub subscription_plan: Option<String>,
    pub streaming_quota: Option<u64>,
    /// Free-form feature flags; the API does not commit to a shape here.
    pub features: Option<Value>,
}

impl User {
    pub(crate) fn from_value(value: &Value) -> Result<Self, MissingField> {
        Ok(Self {
            id: raw::id(value, "id").ok_or(MissingField("id"))?,
            username: raw::string(value, "username").unwrap_or_default(),
            display_name: raw::string(value, "display_name")
                .or_else(|| raw::string(value, "name"))
                .unwrap_or_default(),
            email: raw::string(value, "email").unwrap_or_default(),
            avatar_url: raw::string(value, "avatar_url"),
            created_at: raw::timestamp(value, "created_at"),
            verified: raw::boolean(value, "verified").unwrap_or(false),
        })
    }
}

impl Profile {
    /// Convert a raw profile payload.
    ///
    /// The API returns either `{"user": {...}, ...profile fields}` or a flat
    /// object where user and profile fields share the top level; both merge
    /// into the same typed record.
    pub(crate) fn from_value(value: &Value) -> Result<Self, MissingField> {
        let user_value = value.get("user").unwrap_or(value);
        Ok(Self {
            user: User::from_value(user_value)?,
            subscription_plan: raw::string(value, "subscription_plan"),
            streaming_quota: raw::unsigned(value, "streaming_quota"),
            features: value.get("features").cloned(),
        })
    }
}

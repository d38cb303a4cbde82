//! Channel records from the `/channels` endpoints.

use jiff::Timestamp;
use serde_json::Value;

use crate::api::raw::{self, MissingField};

/// A configured restreaming destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub enabled: bool,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub followers_count: Option<u64>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Channel {
    /// Convert one raw channel object. `id` and `name` are required; every
    /// other field degrades to its default when absent or malformed.
    pub(crate) fn from_value(value: &Value) -> Result<Self, MissingField> {
        Ok(Self {
            id: raw::id(value, "id").ok_or(MissingField("id"))?,
            name: raw::string(value, "name").ok_or(MissingField("name"))?,
            platform: raw::string(value, "platform").unwrap_or_default(),
            enabled: raw::boolean(value, "enabled").unwrap_or(true),
            url: raw::string(value, "url"),
            thumbnail_url: raw::string(value, "thumbnail_url"),
            description: raw::string(value, "description"),
            followers_count: raw::unsigned(value, "followers_count"),
            created_at: raw::timestamp(value, "created_at"),
            updated_at: raw::timestamp(value, "updated_at"),
        })
    }
}

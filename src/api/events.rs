//! Stream-event records from the `/events` endpoint.

use jiff::Timestamp;
use serde_json::Value;

use crate::api::raw::{self, MissingField};

/// One scheduled, running, or finished streaming event.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    pub id: String,
    pub title: String,
    pub status: String,
    /// The wire field is `type`.
    pub kind: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    /// Duration in seconds.
    pub duration: Option<u64>,
    pub viewer_count: Option<u64>,
    pub peak_viewers: Option<u64>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl StreamEvent {
    /// Convert one raw event object. Only `id` is required.
    pub(crate) fn from_value(value: &Value) -> Result<Self, MissingField> {
        Ok(Self {
            id: raw::id(value, "id").ok_or(MissingField("id"))?,
            title: raw::string(value, "title").unwrap_or_default(),
            status: raw::string(value, "status").unwrap_or_default(),
            kind: raw::string(value, "type").unwrap_or_default(),
            start_time: raw::timestamp(value, "start_time"),
            end_time: raw::timestamp(value, "end_time"),
            duration: raw::unsigned(value, "duration"),
            viewer_count: raw::unsigned(value, "viewer_count"),
            peak_viewers: raw::unsigned(value, "peak_viewers"),
            created_at: raw::timestamp(value, "created_at"),
            updated_at: raw::timestamp(value, "updated_at"),
        })
    }
}

//! Schema records for the real-time chat and streaming-telemetry messages.
//!
//! The WebSocket transport itself is out of scope; these types exist so
//! consumers of a raw message feed can normalize payloads with the same
//! silent-default discipline as the REST conversions. `timestamp` stays the
//! raw wire string: telemetry producers are not consistent enough about its
//! format to commit to an instant here.

use std::fmt;

use serde_json::Value;

use crate::api::raw;

/// The author of a chat message, as much of it as the platform relayed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatUser {
    pub id: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub platform: Option<String>,
    pub is_moderator: Option<bool>,
    pub is_subscriber: Option<bool>,
    pub badges: Vec<String>,
}

/// Chat message content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatMessage {
    pub text: Option<String>,
    pub emotes: Vec<Value>,
    pub mentions: Vec<Value>,
}

/// One real-time chat event.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEvent {
    pub event_type: String,
    pub timestamp: String,
    pub channel_id: Option<String>,
    pub user: Option<ChatUser>,
    pub message: Option<ChatMessage>,
    pub platform: Option<String>,
    pub event_id: Option<String>,
}

/// Encoder/ingest health numbers attached to a streaming event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamingMetrics {
    pub bitrate: Option<u64>,
    pub fps: Option<f64>,
    pub resolution: Option<String>,
    pub dropped_frames: Option<u64>,
    pub encoding_time: Option<f64>,
}

/// One real-time streaming-telemetry event.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamingEvent {
    pub event_type: String,
    pub timestamp: String,
    pub channel_id: Option<String>,
    pub event_id: Option<String>,
    pub metrics: Option<StreamingMetrics>,
    pub status: Option<String>,
    pub platform: Option<String>,
    pub message: Option<String>,
}

impl ChatEvent {
    /// Normalize a raw feed message. Never fails: unknown or missing fields
    /// degrade to `"unknown"` / absent.
    pub fn from_message(data: &Value) -> Self {
        let user = data.get("user").map(|user| ChatUser {
            id: raw::string(user, "id"),
            username: raw::string(user, "username"),
            display_name: raw::string(user, "display_name"),
            platform: raw::string(user, "platform"),
            is_moderator: raw::boolean(user, "is_moderator"),
            is_subscriber: raw::boolean(user, "is_subscriber"),
            badges: string_list(user, "badges"),
        });

        // the message arrives either as a bare string or structured
        let message = data.get("message").map(|message| match message {
            Value::String(text) => ChatMessage {
                text: Some(text.clone()),
                ..ChatMessage::default()
            },
            other => ChatMessage {
                text: raw::string(other, "text"),
                emotes: value_list(other, "emotes"),
                mentions: value_list(other, "mentions"),
            },
        });

        Self {
            event_type: raw::string(data, "type").unwrap_or_else(|| "unknown".to_owned()),
            timestamp: raw::string(data, "timestamp").unwrap_or_default(),
            channel_id: raw::string(data, "channel_id"),
            user,
            message,
            platform: raw::string(data, "platform"),
            event_id: raw::string(data, "event_id"),
        }
    }
}

impl StreamingEvent {
    /// Normalize a raw telemetry message. Never fails.
    pub fn from_message(data: &Value) -> Self {
        let metrics = data.get("metrics").map(|metrics| StreamingMetrics {
            bitrate: raw::unsigned(metrics, "bitrate"),
            fps: raw::float(metrics, "fps"),
            resolution: raw::string(metrics, "resolution"),
            dropped_frames: raw::unsigned(metrics, "dropped_frames"),
            encoding_time: raw::float(metrics, "encoding_time"),
        });

        Self {
            event_type: raw::string(data, "type").unwrap_or_else(|| "unknown".to_owned()),
            timestamp: raw::string(data, "timestamp").unwrap_or_default(),
            channel_id: raw::string(data, "channel_id"),
            event_id: raw::string(data, "event_id"),
            metrics,
            status: raw::string(data, "status"),
            platform: raw::string(data, "platform"),
            message: raw::string(data, "message"),
        }
    }
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn value_list(value: &Value, key: &str) -> Vec<Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

impl fmt::Display for ChatUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .display_name
            .as_deref()
            .or(self.username.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("Unknown");
        write!(f, "{name}")?;
        if !self.badges.is_empty() {
            write!(f, " [{}]", self.badges.join(", "))?;
        }
        if let Some(platform) = &self.platform {
            write!(f, " ({platform})")?;
        }
        Ok(())
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.as_deref().unwrap_or(""))
    }
}

impl fmt::Display for ChatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.timestamp)?;
        match (self.event_type.as_str(), &self.user, &self.message) {
            ("message", Some(user), Some(message)) => write!(f, " {user}: {message}"),
            ("join", Some(user), _) => write!(f, " JOIN: {user} joined"),
            ("leave", Some(user), _) => write!(f, " LEAVE: {user} left"),
            _ => {
                write!(f, " {}", self.event_type.to_uppercase())?;
                if let Some(channel_id) = &self.channel_id {
                    write!(f, " | Channel: {channel_id}")?;
                }
                if let Some(platform) = &self.platform {
                    write!(f, " | Platform: {platform}")?;
                }
                if let Some(user) = &self.user {
                    write!(f, " | User: {user}")?;
                }
                if let Some(message) = &self.message {
                    write!(f, " | Message: {message}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for StreamingMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(bitrate) = self.bitrate {
            parts.push(format!("Bitrate: {bitrate} kbps"));
        }
        if let Some(fps) = self.fps {
            parts.push(format!("FPS: {fps}"));
        }
        if let Some(resolution) = &self.resolution {
            parts.push(format!("Resolution: {resolution}"));
        }
        if let Some(dropped) = self.dropped_frames {
            parts.push(format!("Dropped frames: {dropped}"));
        }
        if let Some(encoding_time) = self.encoding_time {
            parts.push(format!("Encoding time: {encoding_time}ms"));
        }
        if parts.is_empty() {
            f.write_str("No metrics available")
        } else {
            f.write_str(&parts.join(" | "))
        }
    }
}

impl fmt::Display for StreamingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.event_type.to_uppercase())?;
        if let Some(channel_id) = &self.channel_id {
            write!(f, " | Channel: {channel_id}")?;
        }
        if let Some(event_id) = &self.event_id {
            write!(f, " | Event: {event_id}")?;
        }
        if let Some(platform) = &self.platform {
            write!(f, " | Platform: {platform}")?;
        }
        if let Some(status) = &self.status {
            write!(f, " | Status: {status}")?;
        }
        if let Some(message) = &self.message {
            write!(f, " | Message: {message}")?;
        }
        if let Some(metrics) = &self.metrics {
            write!(f, "\n  Metrics: {metrics}")?;
        }
        Ok(())
    }
}

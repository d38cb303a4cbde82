//! Data-endpoint client and the typed records its responses normalize into.

pub mod channels;
pub mod chat;
pub mod client;
pub mod events;
pub mod profile;
pub(crate) mod raw;
pub mod retry;
pub mod types;

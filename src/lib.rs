//! Typed async client for the Restream.io streaming-management API.
//!
//! The crate authenticates with a persisted bearer token, refreshing it via
//! the OAuth refresh-token flow when it has expired, and exposes the
//! read-only data endpoints (profile, channels, events) as strongly-typed
//! operations. Listing endpoints historically answer in two shapes, a bare
//! JSON array or a paginated envelope; both normalize into one [`Listing`]
//! sum so callers never see the ambiguity.
//!
//! ```no_run
//! use restream_api::{AuthSession, Config, Listing};
//!
//! # async fn run() -> Result<(), restream_api::Error> {
//! let session = AuthSession::new(Config::from_env());
//! let client = session.acquire().await?;
//!
//! match client.list_channels().await? {
//!     Listing::Unpaginated(channels) => println!("{} channels", channels.len()),
//!     Listing::Paginated { total, .. } => println!("{total} channels in total"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod store;

pub use api::channels::Channel;
pub use api::chat::{ChatEvent, ChatMessage, ChatUser, StreamingEvent, StreamingMetrics};
pub use api::client::RestreamClient;
pub use api::events::StreamEvent;
pub use api::profile::{Profile, User};
pub use api::retry::RetryPolicy;
pub use api::types::Listing;
pub use auth::AuthSession;
pub use config::Config;
pub use error::{ApiError, AuthenticationError, Error};
pub use store::{TokenSet, TokenStore};

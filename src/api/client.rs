//! The HTTP gateway for the data endpoints.

use reqwest::Method;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::api::channels::Channel;
use crate::api::events::StreamEvent;
use crate::api::profile::Profile;
use crate::api::retry::RetryPolicy;
use crate::api::types::{Listing, normalize_listing};
use crate::error::{ApiError, Error};

/// Client over the Restream data endpoints, bound to a single access token
/// for one logical session.
///
/// All operations are read-only GETs, idempotent, and wrapped in the
/// client's [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct RestreamClient {
    http: reqwest::Client,
    api_base: Url,
    access_token: String,
    retry: RetryPolicy,
}

impl RestreamClient {
    pub fn new(http: reqwest::Client, api_base: Url, access_token: impl Into<String>) -> Self {
        Self {
            http,
            api_base,
            access_token: access_token.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Fetch the authenticated account's profile.
    #[instrument(skip(self))]
    pub async fn get_profile(&self) -> Result<Profile, Error> {
        let (url, data) = self.get("/profile").await?;
        let profile = Profile::from_value(&data).map_err(|e| ApiError::decode(&url, e))?;
        tracing::debug!(user = %profile.user.id, "fetched profile");
        Ok(profile)
    }

    /// List the account's configured channels.
    #[instrument(skip(self))]
    pub async fn list_channels(&self) -> Result<Listing<Channel>, Error> {
        let (url, data) = self.get("/channels").await?;
        let channels = normalize_listing(&data, "channels", None, None, Channel::from_value)
            .map_err(|e| ApiError::decode(&url, e))?;
        tracing::debug!(returned = channels.len(), total = channels.total(), "fetched channels");
        Ok(channels)
    }

    /// Fetch one channel by id.
    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: &str) -> Result<Channel, Error> {
        let (url, data) = self.get(&format!("/channels/{channel_id}")).await?;
        let channel = Channel::from_value(&data).map_err(|e| ApiError::decode(&url, e))?;
        Ok(channel)
    }

    /// List the account's streaming events.
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> Result<Listing<StreamEvent>, Error> {
        let (url, data) = self.get("/events").await?;
        let events = normalize_listing(&data, "events", Some(1), Some(20), StreamEvent::from_value)
            .map_err(|e| ApiError::decode(&url, e))?;
        tracing::debug!(returned = events.len(), total = events.total(), "fetched events");
        Ok(events)
    }

    /// One retried GET, returning the target URL alongside the decoded body.
    async fn get(&self, path: &str) -> Result<(String, Value), ApiError> {
        let url = self.endpoint(path);
        let data = self.retry.run(|| self.request(Method::GET, &url)).await?;
        Ok((url, data))
    }

    /// Join a path onto the base URL, tolerating duplicated slashes on
    /// either side of the seam.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// One authenticated call and the decoded JSON body, or a typed failure.
    async fn request(&self, method: Method, url: &str) -> Result<Value, ApiError> {
        let response = self
            .http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .send()
            .await
            .map_err(|e| ApiError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            tracing::debug!(%status, url, "API request failed");
            return Err(ApiError::http(message, status, body, url));
        }

        response.json().await.map_err(|e| ApiError::transport(url, e))
    }
}

/// Pull a human-readable message out of an error payload, preferring the
/// `message` field over `error`, with a generic fallback when the body is
/// not decodable JSON.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|payload| {
            payload
                .get("message")
                .or_else(|| payload.get("error"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "API request failed".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: &str) -> RestreamClient {
        // trailing slash on purpose: the join must tolerate it
        let base = Url::parse(&format!("{}/v1/", server.uri())).unwrap();
        RestreamClient::new(reqwest::Client::new(), base, token)
    }

    #[tokio::test]
    async fn requests_carry_the_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/profile"))
            .and(header("Authorization", "Bearer sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "u1",
                "username": "streamer",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let profile = client_for(&server, "sekrit").get_profile().await.unwrap();
        assert_eq!(profile.user.id, "u1");
        assert_eq!(profile.user.username, "streamer");
    }

    #[tokio::test]
    async fn bare_array_channels_are_unpaginated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "ch_1", "name": "One", "platform": "twitch", "enabled": true},
                {"id": "ch_2", "name": "Two", "platform": "youtube", "enabled": false},
            ])))
            .mount(&server)
            .await;

        let listing = client_for(&server, "t").list_channels().await.unwrap();
        match listing {
            Listing::Unpaginated(channels) => {
                assert_eq!(channels.len(), 2);
                assert_eq!(channels[0].id, "ch_1");
                assert!(!channels[1].enabled);
            }
            other => panic!("expected the bare shape, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn enveloped_events_get_pagination_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "events": [{"id": "ev_1", "title": "T", "status": "upcoming", "type": "scheduled"}],
                "total": 12,
            })))
            .mount(&server)
            .await;

        let listing = client_for(&server, "t").list_events().await.unwrap();
        assert_eq!(
            listing,
            Listing::Paginated {
                items: vec![
                    StreamEvent::from_value(&serde_json::json!({
                        "id": "ev_1", "title": "T", "status": "upcoming", "type": "scheduled",
                    }))
                    .unwrap()
                ],
                total: 12,
                page: Some(1),
                per_page: Some(20),
            }
        );
    }

    #[tokio::test]
    async fn unrecognized_listing_shape_is_empty_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/channels"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"unexpected": "shape"})),
            )
            .mount(&server)
            .await;

        let listing = client_for(&server, "t").list_channels().await.unwrap();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn get_channel_hits_the_detail_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/channels/ch_9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "ch_9",
                "name": "Nine",
                "platform": "twitch",
                "enabled": true,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let channel = client_for(&server, "t").get_channel("ch_9").await.unwrap();
        assert_eq!(channel.name, "Nine");
    }

    #[tokio::test]
    async fn transient_failures_retry_then_succeed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/events"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let listing = client_for(&server, "t").list_events().await.unwrap();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn retries_exhaust_and_surface_the_last_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/events"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        match client_for(&server, "t").list_events().await.unwrap_err() {
            Error::Api(err) => {
                assert_eq!(err.status, Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_errors_fail_on_the_first_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/channels/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "channel not found"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        match client_for(&server, "t").get_channel("missing").await.unwrap_err() {
            Error::Api(err) => {
                assert_eq!(err.status, Some(reqwest::StatusCode::NOT_FOUND));
                assert_eq!(err.message, "channel not found");
                assert!(err.url.ends_with("/v1/channels/missing"));
                assert!(err.body.unwrap().contains("channel not found"));
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_field_is_the_fallback_message_source() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/profile"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({"error": "forbidden"})),
            )
            .mount(&server)
            .await;

        match client_for(&server, "t").get_profile().await.unwrap_err() {
            Error::Api(err) => assert_eq!(err.message, "forbidden"),
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_error_body_gets_a_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/profile"))
            .respond_with(ResponseTemplate::new(400).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        match client_for(&server, "t").get_profile().await.unwrap_err() {
            Error::Api(err) => {
                assert_eq!(err.message, "API request failed");
                assert_eq!(err.body.as_deref(), Some("<html>nope</html>"));
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_required_id_is_a_decode_error_with_the_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "no id here"},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        match client_for(&server, "t").list_channels().await.unwrap_err() {
            Error::Api(err) => {
                assert!(err.message.contains("`id`"));
                assert_eq!(err.status, None);
                assert!(err.url.ends_with("/v1/channels"));
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[test]
    fn endpoint_join_tolerates_slash_duplication() {
        let client = RestreamClient::new(
            reqwest::Client::new(),
            Url::parse("https://api.example.test/v1/").unwrap(),
            "t",
        );
        assert_eq!(
            client.endpoint("/profile"),
            "https://api.example.test/v1/profile"
        );
        assert_eq!(
            client.endpoint("profile"),
            "https://api.example.test/v1/profile"
        );
    }
}

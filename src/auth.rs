//! Token lifecycle: deciding which access token to present, refreshing it
//! when expired, and persisting the result.

use serde::Deserialize;
use tracing::instrument;

use crate::api::client::RestreamClient;
use crate::config::Config;
use crate::error::{AuthenticationError, Error};
use crate::store::{TokenSet, TokenStore};

/// Timeout for the token-exchange call. Data calls keep the transport
/// default.
const REFRESH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Owns the decision of which access token a session gets.
///
/// [`AuthSession::acquire`] loads the persisted token set, refreshes it via
/// the OAuth refresh-token flow when it has expired, and hands out a
/// [`RestreamClient`] bound to the resulting access token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    config: Config,
    store: TokenStore,
    http: reqwest::Client,
}

/// Payload of a successful token exchange.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Lifetime in seconds, converted to an absolute `expires_at` before
    /// persisting.
    #[serde(default)]
    expires_in: Option<u64>,
}

impl AuthSession {
    pub fn new(config: Config) -> Self {
        let store = TokenStore::new(&config.config_dir);
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: TokenStore) -> Self {
        Self {
            config,
            store,
            http: reqwest::Client::new(),
        }
    }

    /// Produce a client usable for one logical session.
    ///
    /// Fails with [`AuthenticationError`] when no token set is stored, the
    /// stored set has no access token, or the set has expired and cannot be
    /// refreshed.
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> Result<RestreamClient, Error> {
        let Some(tokens) = self.store.load().await? else {
            return Err(AuthenticationError::new(
                "no stored tokens found; authorize this client first",
            )
            .into());
        };

        if tokens.access_token.is_empty() {
            return Err(AuthenticationError::new("stored token set has no access token").into());
        }

        let access_token = if tokens.is_expired(epoch_now()) {
            match tokens.refresh_token.as_deref() {
                Some(refresh_token) => {
                    tracing::debug!("access token expired, refreshing");
                    self.refresh(refresh_token).await?
                }
                None => {
                    return Err(AuthenticationError::new(
                        "access token expired and no refresh token is available; authorize again",
                    )
                    .into());
                }
            }
        } else {
            tokens.access_token
        };

        Ok(RestreamClient::new(
            self.http.clone(),
            self.config.api_base.clone(),
            access_token,
        ))
    }

    /// Exchange the refresh token for a new access token and persist the
    /// full new token set, overwriting the stored one.
    async fn refresh(&self, refresh_token: &str) -> Result<String, Error> {
        let Some(client_id) = self.config.client_id.as_deref() else {
            return Err(AuthenticationError::new(
                "RESTREAM_CLIENT_ID is not set; cannot refresh the access token",
            )
            .into());
        };

        let mut form = vec![
            ("grant_type", "refresh_token"),
            ("client_id", client_id),
            ("refresh_token", refresh_token),
        ];
        if let Some(client_secret) = self.config.client_secret.as_deref() {
            form.push(("client_secret", client_secret));
        }

        let response = self
            .http
            .post(self.config.token_url.clone())
            .header("Accept", "application/json")
            .timeout(REFRESH_TIMEOUT)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthenticationError::transport("network error during token refresh", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthenticationError::with_status(
                format!("token refresh failed: {status}"),
                status,
            )
            .into());
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| AuthenticationError::transport("malformed token refresh response", e))?;

        // Providers may omit the refresh token on rotation; keep the one we
        // just used so the next refresh still works.
        let tokens = TokenSet {
            refresh_token: refreshed
                .refresh_token
                .or_else(|| Some(refresh_token.to_owned())),
            expires_at: refreshed.expires_in.map(|secs| epoch_now() + secs as i64),
            access_token: refreshed.access_token,
        };
        self.store.save(&tokens).await?;
        tracing::debug!("refreshed access token persisted");

        Ok(tokens.access_token)
    }
}

fn epoch_now() -> i64 {
    jiff::Timestamp::now().as_second()
}

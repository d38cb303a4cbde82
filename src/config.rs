//! Client configuration: endpoint URLs, OAuth client credentials, and the
//! on-disk location of persisted tokens.

use std::path::PathBuf;

use url::Url;

/// Default base for the data endpoints.
pub const API_BASE: &str = "https://api.restream.io/v1";

/// Default OAuth token-exchange endpoint.
pub const TOKEN_URL: &str = "https://api.restream.io/oauth/token";

/// Everything the client needs beyond a token set.
///
/// The endpoint URLs are explicit values handed to the gateway at
/// construction rather than globals, so tests (and self-hosted deployments)
/// can point the client elsewhere.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: Url,
    pub token_url: Url,
    /// OAuth client id; required for token refresh.
    pub client_id: Option<String>,
    /// OAuth client secret; some provider apps do without one.
    pub client_secret: Option<String>,
    /// Directory holding `tokens.json`.
    pub config_dir: PathBuf,
}

impl Config {
    /// Build a configuration from the environment.
    ///
    /// Reads `RESTREAM_CLIENT_ID`, `RESTREAM_CLIENT_SECRET`, and
    /// `RESTREAM_CONFIG_PATH`, defaulting the config directory to
    /// `~/.config/restream.io`.
    pub fn from_env() -> Self {
        let config_dir = std::env::var_os("RESTREAM_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_config_dir);

        Self {
            api_base: Url::parse(API_BASE).expect("default API base is a valid URL"),
            token_url: Url::parse(TOKEN_URL).expect("default token endpoint is a valid URL"),
            client_id: std::env::var("RESTREAM_CLIENT_ID").ok(),
            client_secret: std::env::var("RESTREAM_CLIENT_SECRET").ok(),
            config_dir,
        }
    }

    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    pub fn with_token_url(mut self, token_url: Url) -> Self {
        self.token_url = token_url;
        self
    }

    pub fn with_config_dir(mut self, config_dir: impl Into<PathBuf>) -> Self {
        self.config_dir = config_dir.into();
        self
    }

    pub fn with_client(mut self, client_id: impl Into<String>, client_secret: Option<String>) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = client_secret;
        self
    }
}

fn default_config_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("restream.io"))
        .unwrap_or_else(|| PathBuf::from(".restream.io"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls_parse() {
        let api_base = Url::parse(API_BASE).unwrap();
        assert_eq!(api_base.scheme(), "https");
        assert_eq!(api_base.path(), "/v1");

        let token_url = Url::parse(TOKEN_URL).unwrap();
        assert_eq!(token_url.path(), "/oauth/token");
    }

    #[test]
    fn builder_overrides() {
        let config = Config::from_env()
            .with_api_base(Url::parse("http://localhost:9000/v1").unwrap())
            .with_config_dir("/tmp/cfg")
            .with_client("cid", Some("secret".into()));

        assert_eq!(config.api_base.as_str(), "http://localhost:9000/v1");
        assert_eq!(config.config_dir, PathBuf::from("/tmp/cfg"));
        assert_eq!(config.client_id.as_deref(), Some("cid"));
        assert_eq!(config.client_secret.as_deref(), Some("secret"));
    }
}

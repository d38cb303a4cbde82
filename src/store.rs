//! On-disk persistence of the OAuth token set.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The persisted triple of access token, optional refresh token, and
/// optional absolute expiry instant (epoch seconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl TokenSet {
    /// True when the token has an expiry and it has passed. A token without
    /// an `expires_at` is treated as still valid.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// File-based token storage, default `<config_dir>/tokens.json`.
///
/// The containing directory is created with mode `0o700` and the file is
/// written with mode `0o600`. Saves go through a sibling temp file followed
/// by a rename, so a concurrent reader observes either the old or the new
/// complete token set, never a partial write.
///
/// There is no lock around refresh-and-persist: two sessions refreshing at
/// the same time will both write, and the last writer wins.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join("tokens.json"),
        }
    }

    /// Store backed by a specific file, useful for tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the persisted token set, or `None` when no file exists yet.
    /// An unreadable or undecodable file is a fatal I/O error.
    pub async fn load(&self) -> io::Result<Option<TokenSet>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        serde_json::from_str(&data).map(Some).map_err(io::Error::other)
    }

    /// Atomically overwrite the persisted token set.
    pub async fn save(&self, tokens: &TokenSet) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                tokio::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700)).await?;
            }
        }

        let data = serde_json::to_string_pretty(tokens).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &data).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600)).await?;
        }
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

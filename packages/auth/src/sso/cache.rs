// ABOUTME: On-disk SSO token cache, one JSON file per tenant start URL
// ABOUTME: Writes go to a uniquely named temp file that is renamed into place, so readers never see a torn token

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use sha1::{Digest, Sha1};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::{
    error::{AuthError, AuthResult},
    sso::types::CachedToken,
};

/// Cache key for a start URL: lowercase hex SHA-1, as used by the AWS SDKs
pub fn cache_key(start_url: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(start_url.as_bytes());
    hex::encode(hasher.finalize())
}

/// Handle on the token cache directory
#[derive(Debug, Clone)]
pub struct TokenCache {
    dir: PathBuf,
}

impl TokenCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Canonical cache file for a start URL
    pub fn path_for(&self, start_url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(start_url)))
    }

    /// Read the cached token for a start URL
    ///
    /// Missing and unparsable files both yield `None`; callers treat either as
    /// "no usable token".
    pub async fn read(&self, start_url: &str) -> Option<CachedToken> {
        let path = self.path_for(start_url);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cached SSO token at {}", path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read cached SSO token {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice::<CachedToken>(&bytes) {
            Ok(token) => {
                debug!("Loaded cached SSO token from {}", path.display());
                Some(token)
            }
            Err(e) => {
                warn!("Ignoring unparsable SSO token cache {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Atomically replace the cached token for `token.start_url`
    pub async fn write(&self, token: &CachedToken) -> AuthResult<PathBuf> {
        self.stage(token).await?.commit().await
    }

    /// Serialize `token` to a temp file next to its canonical path
    ///
    /// Nothing is visible at the canonical path until [`StagedWrite::commit`].
    pub async fn stage(&self, token: &CachedToken) -> AuthResult<StagedWrite> {
        if token.start_url.is_empty() {
            return Err(AuthError::Storage(
                "Cannot cache a token without a start URL".to_string(),
            ));
        }

        create_private_dir(&self.dir).await?;

        let target = self.path_for(&token.start_url);
        let temp = temp_path_for(&target);

        let mut payload = serde_json::to_vec(token)?;
        payload.push(b'\n');

        if let Err(e) = write_private_file(&temp, &payload).await {
            let _ = fs::remove_file(&temp).await;
            return Err(AuthError::Storage(format!(
                "Failed to write temporary token cache {}: {}",
                temp.display(),
                e
            )));
        }

        debug!("Staged SSO token cache at {}", temp.display());
        Ok(StagedWrite { temp, target })
    }

    /// Remove the cached token for a start URL; returns whether a file existed
    pub async fn delete(&self, start_url: &str) -> AuthResult<bool> {
        let path = self.path_for(start_url);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted SSO token cache {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AuthError::Storage(format!(
                "Failed to delete token cache {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// A fully written temp file waiting to be renamed over the canonical path
#[derive(Debug)]
pub struct StagedWrite {
    temp: PathBuf,
    target: PathBuf,
}

impl StagedWrite {
    pub fn temp_path(&self) -> &Path {
        &self.temp
    }

    pub fn target_path(&self) -> &Path {
        &self.target
    }

    /// Rename the temp file into place
    ///
    /// On failure the temp file is removed and any previous cache file is left
    /// untouched.
    pub async fn commit(self) -> AuthResult<PathBuf> {
        if let Err(e) = fs::rename(&self.temp, &self.target).await {
            let _ = fs::remove_file(&self.temp).await;
            return Err(AuthError::Storage(format!(
                "Failed to replace token cache {}: {}",
                self.target.display(),
                e
            )));
        }

        debug!("Stored SSO token cache at {}", self.target.display());
        Ok(self.target)
    }
}

fn temp_path_for(target: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut name = target.as_os_str().to_owned();
    name.push(format!(".tmp-{}-{}", std::process::id(), nanos));
    PathBuf::from(name)
}

async fn create_private_dir(dir: &Path) -> AuthResult<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o700);

    builder.create(dir).await.map_err(|e| {
        AuthError::Storage(format!(
            "Failed to create token cache directory {}: {}",
            dir.display(),
            e
        ))
    })
}

async fn write_private_file(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    // Owner read/write only: the file carries live bearer credentials
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(payload).await?;
    file.sync_all().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_matches_sdk_naming() {
        assert_eq!(
            cache_key("https://my-org.awsapps.com/start"),
            "acff06c7037450e5a3fddcacb0a34e921da42d68"
        );
    }

    #[test]
    fn test_path_is_deterministic_and_distinct() {
        let cache = TokenCache::new("/tmp/berth-cache");
        let a = cache.path_for("https://my-org.awsapps.com/start");
        let b = cache.path_for("https://my-org.awsapps.com/start");
        let c = cache.path_for("https://other-org.awsapps.com/start");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(
            c.file_name().unwrap().to_str().unwrap(),
            "72877ce9ddbe7dae58260922f9bb0baeb5207240.json"
        );
    }

    #[test]
    fn test_temp_path_sits_next_to_target() {
        let target = PathBuf::from("/tmp/berth-cache/abc.json");
        let temp = temp_path_for(&target);
        assert_eq!(temp.parent(), target.parent());
        assert!(temp
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("abc.json.tmp-"));
    }
}

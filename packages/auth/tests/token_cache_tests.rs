// ABOUTME: Integration tests for the on-disk SSO token cache
// ABOUTME: Tests read/write/delete, atomic replacement and behavior on interrupted or failed writes

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use berth_auth::{CachedToken, TokenCache};

const START_URL: &str = "https://my-org.awsapps.com/start";

fn sample_token(access_token: &str) -> CachedToken {
    CachedToken {
        start_url: START_URL.to_string(),
        region: "us-east-1".to_string(),
        access_token: access_token.to_string(),
        expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        registration_expires_at: Utc.with_ymd_and_hms(2030, 3, 1, 0, 0, 0).unwrap(),
    }
}

fn dir_entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_read_missing_file_returns_none() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path());

    assert!(cache.read(START_URL).await.is_none());
}

#[tokio::test]
async fn test_read_unparsable_file_returns_none() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path());
    std::fs::write(cache.path_for(START_URL), b"{ not json").unwrap();

    assert!(cache.read(START_URL).await.is_none());
}

#[tokio::test]
async fn test_write_then_read() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path().join("sso").join("cache"));
    let token = sample_token("first");

    let path = cache.write(&token).await.unwrap();
    assert_eq!(path, cache.path_for(START_URL));

    let loaded = cache.read(START_URL).await.unwrap();
    assert_eq!(loaded, token);
}

#[tokio::test]
async fn test_write_leaves_exactly_one_file_with_last_content() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path());

    cache.write(&sample_token("first")).await.unwrap();
    cache.write(&sample_token("second")).await.unwrap();

    assert_eq!(
        dir_entries(temp_dir.path()),
        vec!["acff06c7037450e5a3fddcacb0a34e921da42d68.json".to_string()]
    );
    let loaded = cache.read(START_URL).await.unwrap();
    assert_eq!(loaded.access_token, "second");
}

#[tokio::test]
async fn test_interrupted_write_leaves_previous_file_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path());

    let path = cache.write(&sample_token("first")).await.unwrap();
    let before = std::fs::read(&path).unwrap();

    // Staged but never committed: the process died before the rename
    let staged = cache.stage(&sample_token("second")).await.unwrap();
    assert!(staged.temp_path().exists());

    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert_eq!(cache.read(START_URL).await.unwrap().access_token, "first");
}

#[tokio::test]
async fn test_interrupted_first_write_leaves_no_canonical_file() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path());

    let _staged = cache.stage(&sample_token("first")).await.unwrap();

    assert!(!cache.path_for(START_URL).exists());
    assert!(cache.read(START_URL).await.is_none());
}

#[tokio::test]
async fn test_failed_rename_removes_temp_and_keeps_target() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path());

    // A non-empty directory at the canonical path makes the rename fail
    let target = cache.path_for(START_URL);
    std::fs::create_dir(&target).unwrap();
    std::fs::write(target.join("keep"), b"x").unwrap();

    let staged = cache.stage(&sample_token("first")).await.unwrap();
    let temp = staged.temp_path().to_path_buf();

    let err = staged.commit().await.unwrap_err();
    assert!(matches!(err, berth_auth::AuthError::Storage(_)));
    assert!(!temp.exists());
    assert!(target.join("keep").exists());
}

#[tokio::test]
async fn test_write_without_start_url_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path());

    let mut token = sample_token("first");
    token.start_url.clear();

    assert!(cache.write(&token).await.is_err());
    assert!(dir_entries(temp_dir.path()).is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_cache_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path());

    let path = cache.write(&sample_token("first")).await.unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[tokio::test]
async fn test_delete_reports_whether_file_existed() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path());

    cache.write(&sample_token("first")).await.unwrap();

    assert!(cache.delete(START_URL).await.unwrap());
    assert!(!cache.path_for(START_URL).exists());
    assert!(!cache.delete(START_URL).await.unwrap());
}

#[tokio::test]
async fn test_tokens_are_partitioned_by_start_url() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TokenCache::new(temp_dir.path());

    let mut other = sample_token("other");
    other.start_url = "https://other-org.awsapps.com/start".to_string();
    other.expires_at = Utc::now() + Duration::hours(1);

    cache.write(&sample_token("mine")).await.unwrap();
    cache.write(&other).await.unwrap();

    assert_eq!(cache.read(START_URL).await.unwrap().access_token, "mine");
    assert_eq!(
        cache
            .read("https://other-org.awsapps.com/start")
            .await
            .unwrap()
            .access_token,
        "other"
    );
    assert_eq!(dir_entries(temp_dir.path()).len(), 2);
}

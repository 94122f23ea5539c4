// ABOUTME: Formatting of credentials and log records for terminal output

use aws_credential_types::Credentials;
use berth_config::constants::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN};
use berth_logs::LogRecord;
use serde::Serialize;

/// Resolved credentials in the shape printed by `berth sso creds`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialsOutput {
    pub access_key: String,
    pub secret_key: String,
    pub token: String,
}

impl From<&Credentials> for CredentialsOutput {
    fn from(creds: &Credentials) -> Self {
        Self {
            access_key: creds.access_key_id().to_string(),
            secret_key: creds.secret_access_key().to_string(),
            token: creds.session_token().unwrap_or_default().to_string(),
        }
    }
}

impl CredentialsOutput {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// `KEY="value"` assignment for each credential variable
    pub fn env_line(&self, key: &str) -> Option<String> {
        let value = match key {
            AWS_ACCESS_KEY_ID => &self.access_key,
            AWS_SECRET_ACCESS_KEY => &self.secret_key,
            AWS_SESSION_TOKEN => &self.token,
            _ => return None,
        };
        Some(format!("{}=\"{}\"", key, value))
    }

    pub fn to_env(&self) -> String {
        [AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN]
            .iter()
            .filter_map(|key| self.env_line(key))
            .map(|line| line + "\n")
            .collect()
    }
}

/// One log record as `<stream> [<timestamp>] <message>`
pub fn format_record(record: &LogRecord) -> String {
    format!(
        "{} [{}] {}",
        record.stream_name,
        record.timestamp().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
        record.message.trim_end()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn creds() -> CredentialsOutput {
        CredentialsOutput {
            access_key: "ASIAEXAMPLE".to_string(),
            secret_key: "secret".to_string(),
            token: "session".to_string(),
        }
    }

    #[test]
    fn test_json_keys() {
        assert_eq!(
            creds().to_json().unwrap(),
            r#"{"access_key":"ASIAEXAMPLE","secret_key":"secret","token":"session"}"#
        );
    }

    #[test]
    fn test_env_format() {
        assert_eq!(
            creds().to_env(),
            "AWS_ACCESS_KEY_ID=\"ASIAEXAMPLE\"\nAWS_SECRET_ACCESS_KEY=\"secret\"\nAWS_SESSION_TOKEN=\"session\"\n"
        );
    }

    #[test]
    fn test_from_sdk_credentials() {
        let sdk = Credentials::new("AKID", "SECRET", None, None, "test");
        let out = CredentialsOutput::from(&sdk);
        assert_eq!(out.access_key, "AKID");
        assert_eq!(out.token, "");
    }

    #[test]
    fn test_format_record() {
        let record = LogRecord {
            id: "1".to_string(),
            stream_name: "ecs/web/0f1e2d".to_string(),
            timestamp_ms: 1_700_000_000_123,
            ingestion_time_ms: None,
            message: "GET /health 200\n".to_string(),
        };
        assert_eq!(
            format_record(&record),
            "ecs/web/0f1e2d [2023-11-14 22:13:20.123 UTC] GET /health 200"
        );
    }
}

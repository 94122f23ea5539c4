// ABOUTME: Rewrites AWS credential variables in dotenv-style files
// ABOUTME: Only existing AWS_* credential lines are replaced; every other line is kept as-is

use std::fs;
use std::path::Path;

use berth_config::constants::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN};
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::output::CredentialsOutput;

const CREDENTIAL_KEYS: [&str; 3] = [AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN];

/// Variable assigned on this line, ignoring an `export ` prefix
fn assigned_key(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
    let (key, _) = line.split_once('=')?;
    Some(key.trim_end())
}

/// Replace credential assignments in `contents`
pub fn replace_credentials(contents: &str, creds: &CredentialsOutput) -> String {
    let mut out = String::with_capacity(contents.len());
    for line in contents.lines() {
        let replacement = assigned_key(line)
            .filter(|key| CREDENTIAL_KEYS.contains(key))
            .and_then(|key| creds.env_line(key));

        match replacement {
            Some(new_line) => out.push_str(&new_line),
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

/// Rewrite one env file in place; the file must already exist
pub fn update_env_file(path: &Path, creds: &CredentialsOutput) -> CliResult<()> {
    let env_error = |source| CliError::EnvFile {
        path: path.display().to_string(),
        source,
    };

    let contents = fs::read_to_string(path).map_err(env_error)?;
    let updated = replace_credentials(&contents, creds);
    fs::write(path, updated).map_err(env_error)?;

    debug!("Updated AWS credentials in {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    fn creds() -> CredentialsOutput {
        CredentialsOutput {
            access_key: "ASIANEW".to_string(),
            secret_key: "new-secret".to_string(),
            token: "new-token".to_string(),
        }
    }

    #[test]
    fn test_replaces_only_credential_lines() {
        let input = "\
APP_ENV=local
AWS_ACCESS_KEY_ID=\"ASIAOLD\"
AWS_SECRET_ACCESS_KEY=old
# AWS_SESSION_TOKEN is refreshed by berth
AWS_SESSION_TOKEN=
AWS_REGION=us-east-1
";
        let expected = "\
APP_ENV=local
AWS_ACCESS_KEY_ID=\"ASIANEW\"
AWS_SECRET_ACCESS_KEY=\"new-secret\"
# AWS_SESSION_TOKEN is refreshed by berth
AWS_SESSION_TOKEN=\"new-token\"
AWS_REGION=us-east-1
";
        assert_eq!(replace_credentials(input, &creds()), expected);
    }

    #[rstest]
    #[case("AWS_ACCESS_KEY_ID=x", Some("AWS_ACCESS_KEY_ID"))]
    #[case("export AWS_SESSION_TOKEN=x", Some("AWS_SESSION_TOKEN"))]
    #[case("  AWS_SECRET_ACCESS_KEY = x", Some("AWS_SECRET_ACCESS_KEY"))]
    #[case("AWS_ACCESS_KEY_ID_BACKUP=x", Some("AWS_ACCESS_KEY_ID_BACKUP"))]
    #[case("# comment", None)]
    fn test_assigned_key(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(assigned_key(line), expected);
    }

    #[test]
    fn test_similar_keys_are_left_alone() {
        let input = "AWS_ACCESS_KEY_ID_BACKUP=keep\n";
        assert_eq!(replace_credentials(input, &creds()), input);
    }

    #[test]
    fn test_update_env_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "AWS_ACCESS_KEY_ID=old\nDEBUG=1").unwrap();

        update_env_file(&path, &creds()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "AWS_ACCESS_KEY_ID=\"ASIANEW\"\nDEBUG=1\n"
        );
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = update_env_file(&temp_dir.path().join(".env"), &creds()).unwrap_err();
        assert!(matches!(err, CliError::EnvFile { .. }));
    }
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Datelike, Duration, Utc};
use evlog::meta;
use serde::{Deserialize, Serialize};

use crate::google::oauth::OAuthClient;
use crate::runtime::get_logger;

/// Tokens are refreshed this long before they actually expire.
const EXPIRY_DELTA_SECS: i64 = 10;

/// OAuth token as persisted in `token.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Token {
    /// The expiry instant, if the token expires at all. The zero time
    /// (`0001-01-01T00:00:00Z`) means "never".
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry.filter(|t| t.year() > 1)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            None => false,
            Some(expiry) => expiry - Duration::seconds(EXPIRY_DELTA_SECS) < now,
        }
    }

    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && !self.is_expired(now)
    }
}

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> anyhow::Result<Token> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("open {}", self.path.display()))?;

        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", self.path.display()))
    }

    pub async fn save(&self, token: &Token) -> anyhow::Result<()> {
        let mut bytes = serde_json::to_vec(token)?;
        bytes.push(b'\n');

        tokio::fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("create {}", self.path.display()))
    }

    /// Loads the stored token, refreshing and re-saving it when it has expired.
    pub async fn valid_token(&self, oauth: &OAuthClient) -> anyhow::Result<Token> {
        let token = self.load().await?;

        let now = Utc::now();
        if token.is_valid(now) {
            return Ok(token);
        }

        get_logger().info("Refreshing expired token.", meta![
            "Path" => self.path.display(),
        ]);

        let refreshed = oauth.refresh(&token).await.context("refresh token")?;
        self.save(&refreshed).await?;

        Ok(refreshed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn token(expiry: Option<DateTime<Utc>>) -> Token {
        Token {
            access_token: "access".to_owned(),
            token_type: "Bearer".to_owned(),
            refresh_token: "refresh".to_owned(),
            expiry,
        }
    }

    #[test]
    fn expiry_has_grace_period() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

        assert!(!token(Some(now + Duration::minutes(5))).is_expired(now));
        assert!(token(Some(now + Duration::seconds(5))).is_expired(now));
        assert!(token(Some(now - Duration::minutes(1))).is_expired(now));
    }

    #[test]
    fn zero_or_missing_expiry_never_expires() {
        let now = Utc::now();
        let zero = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();

        assert!(token(None).is_valid(now));
        assert!(token(Some(zero)).is_valid(now));
        assert!(!Token { access_token: String::new(), ..token(None) }.is_valid(now));
    }

    #[test]
    fn reads_files_written_by_other_oauth_clients() {
        let raw = r#"{"access_token":"ya29.a0","token_type":"Bearer","refresh_token":"1//0g","expiry":"2026-10-19T14:03:11.123456+02:00"}"#;
        let token: Token = serde_json::from_str(raw).unwrap();

        assert_eq!(token.access_token, "ya29.a0");
        assert_eq!(token.refresh_token, "1//0g");
        assert_eq!(
            token.expires_at().unwrap().timestamp(),
            Utc.with_ymd_and_hms(2026, 10, 19, 12, 3, 11).unwrap().timestamp()
        );

        let raw = r#"{"access_token":"abc","expiry":"0001-01-01T00:00:00Z"}"#;
        let token: Token = serde_json::from_str(raw).unwrap();
        assert_eq!(token.expires_at(), None);
        assert!(token.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn saves_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));

        let saved = token(Some(Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()));
        store.save(&saved).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.ends_with("}\n"));
        assert!(raw.contains(r#""expiry":"2026-10-19T12:00:00Z""#), "{}", raw);

        assert_eq!(store.load().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));

        let err = store.load().await.unwrap_err();
        assert!(format!("{:#}", err).contains("token.json"));
    }
}

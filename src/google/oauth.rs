use anyhow::{bail, Context};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::google::token::Token;

pub const CALENDAR_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_url: String,
    auth_url: String,
    token_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_token(self, now: DateTime<Utc>) -> Token {
        Token {
            access_token: self.access_token,
            token_type: self.token_type,
            refresh_token: self.refresh_token,
            expiry: self
                .expires_in
                .filter(|secs| *secs > 0)
                .and_then(Duration::try_seconds)
                .and_then(|lifetime| now.checked_add_signed(lifetime)),
        }
    }
}

impl OAuthClient {
    pub fn new(config: &Config, http: Client) -> Self {
        Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_url: config.redirect_url.clone(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
        }
    }

    /// The consent page URL the user is sent to; `state` comes back on the
    /// callback.
    pub fn authorize_url(&self, state: &str) -> anyhow::Result<Url> {
        Url::parse_with_params(&self.auth_url, &[
            ("access_type", "offline"),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_url.as_str()),
            ("response_type", "code"),
            ("scope", CALENDAR_READONLY_SCOPE),
            ("state", state),
        ])
        .with_context(|| format!("AUTH_URL '{}' is invalid", self.auth_url))
    }

    pub async fn exchange(&self, code: &str) -> anyhow::Result<Token> {
        let response = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_url.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .await?;

        Ok(response.into_token(Utc::now()))
    }

    pub async fn refresh(&self, token: &Token) -> anyhow::Result<Token> {
        if token.refresh_token.is_empty() {
            bail!("token expired and has no refresh token");
        }

        let response = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", token.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .await?;

        let mut refreshed = response.into_token(Utc::now());
        if refreshed.refresh_token.is_empty() {
            refreshed.refresh_token = token.refresh_token.clone();
        }

        Ok(refreshed)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> anyhow::Result<TokenResponse> {
        let response = self
            .http
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .context("token request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("status {}: {}", status, text.trim());
        }

        response.json().await.context("invalid token response")
    }
}

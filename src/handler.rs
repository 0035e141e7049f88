use std::time::Duration as StdDuration;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::config::Config;
use crate::google::calendar::CalendarClient;
use crate::google::oauth::OAuthClient;
use crate::google::token::TokenStore;

const LOGIN_STATE_TTL_MINUTES: i64 = 10;
const LOGIN_STATE_LEN: usize = 32;
const HTTP_TIMEOUT_SECS: u64 = 30;

pub struct AppState {
    pub config: Config,
    pub oauth: OAuthClient,
    pub calendar: CalendarClient,
    pub tokens: TokenStore,
    pending_logins: DashMap<String, DateTime<Utc>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            oauth: OAuthClient::new(&config, http.clone()),
            calendar: CalendarClient::new(&config, http),
            tokens: TokenStore::new(config.token_path.clone()),
            pending_logins: DashMap::new(),
            config,
        })
    }

    /// Issues a fresh login state and forgets any that have gone stale.
    pub fn begin_login(&self, now: DateTime<Utc>) -> String {
        let ttl = Duration::minutes(LOGIN_STATE_TTL_MINUTES);
        self.pending_logins.retain(|_, issued| now - *issued < ttl);

        let state: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(LOGIN_STATE_LEN)
            .map(char::from)
            .collect();

        self.pending_logins.insert(state.clone(), now);
        state
    }

    /// Consumes `state`; true only if it was issued by `begin_login` and has
    /// not expired.
    pub fn finish_login(&self, state: &str, now: DateTime<Utc>) -> bool {
        match self.pending_logins.remove(state) {
            None => false,
            Some((_, issued)) => now - issued < Duration::minutes(LOGIN_STATE_TTL_MINUTES),
        }
    }

    pub fn pending_logins(&self) -> usize {
        self.pending_logins.len()
    }
}

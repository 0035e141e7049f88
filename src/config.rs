use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TOKEN_PATH: &str = "token.json";
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub listen_addr: SocketAddr,
    pub token_path: PathBuf,
    pub auth_url: String,
    pub token_url: String,
    pub calendar_api_url: String,
}

impl Config {
    /// Reads the configuration from the process environment. Call
    /// `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> anyhow::Result<Config> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("expected {}", key))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let listen_addr = optional("LISTEN_ADDR", DEFAULT_LISTEN_ADDR);
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("LISTEN_ADDR '{}' is invalid", listen_addr))?;

        Ok(Config {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            redirect_url: required("REDIRECT_URL")?,
            listen_addr,
            token_path: PathBuf::from(optional("TOKEN_PATH", DEFAULT_TOKEN_PATH)),
            auth_url: optional("AUTH_URL", GOOGLE_AUTH_URL),
            token_url: optional("TOKEN_URL", GOOGLE_TOKEN_URL),
            calendar_api_url: optional("CALENDAR_API_URL", GOOGLE_CALENDAR_API_URL)
                .trim_end_matches('/')
                .to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| vars.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("CLIENT_ID", "client-id"),
        ("CLIENT_SECRET", "client-secret"),
        ("REDIRECT_URL", "http://localhost:8080/callback"),
    ];

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();

        assert_eq!(config.client_id, "client-id");
        assert_eq!(config.client_secret, "client-secret");
        assert_eq!(config.redirect_url, "http://localhost:8080/callback");
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.token_path, PathBuf::from("token.json"));
        assert_eq!(config.auth_url, GOOGLE_AUTH_URL);
        assert_eq!(config.token_url, GOOGLE_TOKEN_URL);
        assert_eq!(config.calendar_api_url, GOOGLE_CALENDAR_API_URL);
    }

    #[test]
    fn reads_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("LISTEN_ADDR", "127.0.0.1:3000"));
        vars.push(("TOKEN_PATH", "/var/lib/next-meeting/token.json"));
        vars.push(("CALENDAR_API_URL", "http://127.0.0.1:9000/"));

        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.token_path, PathBuf::from("/var/lib/next-meeting/token.json"));
        assert_eq!(config.calendar_api_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn requires_credentials() {
        let err = Config::from_lookup(lookup(&REQUIRED[..2])).unwrap_err();
        assert_eq!(err.to_string(), "expected REDIRECT_URL");

        let mut vars = REQUIRED.to_vec();
        vars[0] = ("CLIENT_ID", "  ");
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert_eq!(err.to_string(), "expected CLIENT_ID");
    }

    #[test]
    fn rejects_bad_listen_addr() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("LISTEN_ADDR", ":8080"));
        assert!(Config::from_lookup(lookup(&vars)).is_err());
    }
}

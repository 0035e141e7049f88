use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use chrono::Utc;
use evlog::meta;
use serde::Deserialize;

use crate::handler::AppState;
use crate::routes::error::AppError;
use crate::runtime::get_logger;

const INDEX_HTML: &str = r#"<html><body><a href="/login">Google Log In</a></body></html>"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn login(State(state): State<Arc<AppState>>) -> Result<Redirect, AppError> {
    let login_state = state.begin_login(Utc::now());

    let url = state
        .oauth
        .authorize_url(&login_state)
        .map_err(|e| AppError::internal("Unable to build login URL", &e))?;

    get_logger().debug("Redirecting to Google login.", meta![
        "PendingLogins" => state.pending_logins(),
    ]);

    Ok(Redirect::temporary(url.as_str()))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, AppError> {
    if let Some(error) = params.error {
        return Err(AppError::bad_request(format!("Login was not completed: {}", error)));
    }

    let login_state = params.state.unwrap_or_default();
    if !state.finish_login(&login_state, Utc::now()) {
        return Err(AppError::bad_request("Invalid or expired login state"));
    }

    let code = match params.code.filter(|c| !c.is_empty()) {
        None => return Err(AppError::bad_request("Missing authorization code")),
        Some(v) => v,
    };

    let token = state
        .oauth
        .exchange(&code)
        .await
        .map_err(|e| AppError::internal("Failed to exchange token", &e))?;

    state
        .tokens
        .save(&token)
        .await
        .map_err(|e| AppError::internal("Unable to save token", &e))?;

    get_logger().info("Saved token.", meta![
        "Path" => state.tokens.path().display(),
        "Refreshable" => !token.refresh_token.is_empty(),
    ]);

    Ok(Redirect::temporary("/next-meeting"))
}

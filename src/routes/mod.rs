mod error;
mod login;
mod meeting;

use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::{Json, Router};
use evlog::meta;
use tokio::net::TcpListener;

use crate::handler::AppState;
use crate::runtime::get_logger;
use crate::theme::{ThemeConfig, THEME};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(login::index))
        .route("/login", get(login::login))
        .route("/callback", get(login::callback))
        .route("/next-meeting", get(meeting::next_meeting_text))
        .route("/api/next-meeting", get(meeting::next_meeting_json))
        .route("/api/theme", get(theme))
        .fallback(login::index)
        .with_state(state)
}

async fn theme() -> Json<&'static ThemeConfig> {
    Json(&THEME)
}

pub async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = state.config.listen_addr;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to listen on {}", addr))?;

    get_logger().info("Started running.", meta![
        "Address" => listener.local_addr()?,
    ]);

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}

//! In-process stand-in for Google's token and calendar endpoints.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::config::Config;

#[derive(Default)]
struct Recorded {
    token_requests: Vec<HashMap<String, String>>,
    event_queries: Vec<HashMap<String, String>>,
    events: Value,
}

pub struct MockGoogle {
    pub config: Config,
    recorded: Arc<Mutex<Recorded>>,
    _dir: tempfile::TempDir,
}

impl MockGoogle {
    pub const CODE: &'static str = "good-code";

    pub async fn start() -> MockGoogle {
        let recorded = Arc::new(Mutex::new(Recorded {
            events: json!([]),
            ..Default::default()
        }));

        let app = Router::new()
            .route("/token", post(token))
            .route("/calendars/primary/events", get(events))
            .with_state(recorded.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let dir = tempfile::tempdir().unwrap();

        MockGoogle {
            config: config(&base_url, dir.path()),
            recorded,
            _dir: dir,
        }
    }

    pub fn set_events(&self, events: Value) {
        self.recorded.lock().unwrap().events = events;
    }

    pub fn token_requests(&self) -> Vec<HashMap<String, String>> {
        self.recorded.lock().unwrap().token_requests.clone()
    }

    pub fn event_queries(&self) -> Vec<HashMap<String, String>> {
        self.recorded.lock().unwrap().event_queries.clone()
    }
}

/// Config pointing every Google endpoint at `base_url`, with the token file
/// kept in `dir`.
pub fn config(base_url: &str, dir: &Path) -> Config {
    Config {
        client_id: "client-id".to_owned(),
        client_secret: "client-secret".to_owned(),
        redirect_url: "http://localhost:8080/callback".to_owned(),
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        token_path: dir.join("token.json"),
        auth_url: format!("{}/auth", base_url),
        token_url: format!("{}/token", base_url),
        calendar_api_url: base_url.to_owned(),
    }
}

async fn token(
    State(recorded): State<Arc<Mutex<Recorded>>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    recorded.lock().unwrap().token_requests.push(form.clone());

    let field = |key: &str| form.get(key).map(String::as_str).unwrap_or_default();

    match field("grant_type") {
        "authorization_code" if field("code") == MockGoogle::CODE => Json(json!({
            "access_token": "access-1",
            "token_type": "Bearer",
            "refresh_token": "refresh-1",
            "expires_in": 3599,
        }))
        .into_response(),
        "refresh_token" if field("refresh_token") == "refresh-1" => Json(json!({
            "access_token": "access-2",
            "token_type": "Bearer",
            "expires_in": 3599,
        }))
        .into_response(),
        _ => (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid_grant" }))).into_response(),
    }
}

async fn events(
    State(recorded): State<Arc<Mutex<Recorded>>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "Bearer access-1" || v == "Bearer access-2")
        .unwrap_or(false);

    if !authorized {
        return (StatusCode::UNAUTHORIZED, "invalid credentials").into_response();
    }

    let mut recorded = recorded.lock().unwrap();
    recorded.event_queries.push(query);

    Json(json!({ "kind": "calendar#events", "items": recorded.events.clone() })).into_response()
}

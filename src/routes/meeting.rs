use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use evlog::meta;
use serde::Serialize;

use crate::google::calendar::{next_meeting, Meeting};
use crate::handler::AppState;
use crate::routes::error::{AppError, JsonError};
use crate::runtime::get_logger;

async fn find_next_meeting(state: &AppState) -> Result<Option<Meeting>, AppError> {
    let token = state
        .tokens
        .valid_token(&state.oauth)
        .await
        .map_err(|e| AppError::internal("Unable to get token from file", &e))?;

    let events = state
        .calendar
        .list_upcoming(&token.access_token, Utc::now())
        .await
        .map_err(|e| AppError::internal("Unable to retrieve events", &e))?;

    let meeting = next_meeting(&events);

    get_logger().debug("Looked up next meeting.", meta![
        "Events" => events.len(),
        "Found" => meeting.is_some(),
    ]);

    Ok(meeting)
}

pub async fn next_meeting_text(State(state): State<Arc<AppState>>) -> Result<String, AppError> {
    Ok(match find_next_meeting(&state).await? {
        None => "No upcoming meetings found.".to_owned(),
        Some(m) => format!("Next meeting: {} ({})\n", m.summary, m.start),
    })
}

#[derive(Debug, Serialize)]
pub struct NextMeetingResponse {
    pub meeting: Option<Meeting>,
}

pub async fn next_meeting_json(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NextMeetingResponse>, JsonError> {
    let meeting = find_next_meeting(&state).await?;

    Ok(Json(NextMeetingResponse { meeting }))
}

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::support::dates::day_label;

pub const WORKING_LOCATION: &str = "workingLocation";
pub const MAX_RESULTS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default = "default_event_type")]
    pub event_type: String,
    #[serde(default)]
    pub start: EventDateTime,
}

fn default_event_type() -> String {
    "default".to_owned()
}

impl Event {
    pub fn is_working_location(&self) -> bool {
        self.event_type == WORKING_LOCATION
    }
}

/// Either a timed start (`dateTime`) or an all-day start (`date`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl EventDateTime {
    fn date_time(&self) -> Option<&str> {
        self.date_time.as_deref().filter(|s| !s.is_empty())
    }

    pub fn text(&self) -> &str {
        self.date_time().or(self.date.as_deref()).unwrap_or_default()
    }

    /// The calendar day the event starts on, in the event's own offset.
    pub fn day(&self) -> Option<NaiveDate> {
        match self.date_time() {
            Some(dt) => DateTime::parse_from_rfc3339(dt).ok().map(|dt| dt.date_naive()),
            None => self
                .date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meeting {
    pub summary: String,
    pub start: String,
    pub day: Option<String>,
}

impl Meeting {
    fn from_event(event: &Event) -> Meeting {
        Meeting {
            summary: event.summary.clone(),
            start: event.start.text().to_owned(),
            day: event.start.day().map(day_label),
        }
    }
}

/// The first event in `events` that is an actual meeting rather than a
/// working-location marker.
pub fn next_meeting(events: &[Event]) -> Option<Meeting> {
    events
        .iter()
        .find(|e| !e.is_working_location())
        .map(Meeting::from_event)
}

#[derive(Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<Event>,
}

#[derive(Debug, Clone)]
pub struct CalendarClient {
    http: Client,
    base_url: String,
}

impl CalendarClient {
    pub fn new(config: &Config, http: Client) -> Self {
        Self {
            http,
            base_url: config.calendar_api_url.clone(),
        }
    }

    /// Lists up to `MAX_RESULTS` single events on the primary calendar starting
    /// at or after `now`, ordered by start time.
    pub async fn list_upcoming(&self, access_token: &str, now: DateTime<Utc>) -> anyhow::Result<Vec<Event>> {
        let time_min = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        let max_results = MAX_RESULTS.to_string();

        let response = self
            .http
            .get(format!("{}/calendars/primary/events", self.base_url))
            .bearer_auth(access_token)
            .query(&[
                ("showDeleted", "false"),
                ("singleEvents", "true"),
                ("timeMin", time_min.as_str()),
                ("maxResults", max_results.as_str()),
                ("orderBy", "startTime"),
            ])
            .send()
            .await
            .context("calendar request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("status {}: {}", status, text.trim());
        }

        let list: EventList = response.json().await.context("invalid events response")?;

        Ok(list.items)
    }
}

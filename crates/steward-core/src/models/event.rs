//! Event domain model.
//!
//! An [`EventForm`] is what the event-creation form submits. It is parsed
//! into an [`EventTemplate`] at the boundary, expanded by
//! [`RecurrenceExpander`](crate::recurrence::RecurrenceExpander) into
//! [`EventInstance`]s, and each instance is persisted as an [`Event`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StewardError;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Worship,
    Youth,
    Special,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Worship => "worship",
            EventType::Youth => "youth",
            EventType::Special => "special",
        }
    }
}

impl FromStr for EventType {
    type Err = StewardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "worship" => Ok(EventType::Worship),
            "youth" => Ok(EventType::Youth),
            "special" => Ok(EventType::Special),
            other => Err(StewardError::validation(
                "type",
                format!("unknown event type `{other}`"),
            )),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringPattern {
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for RecurringPattern {
    type Err = StewardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(RecurringPattern::Daily),
            "weekly" => Ok(RecurringPattern::Weekly),
            "monthly" => Ok(RecurringPattern::Monthly),
            other => Err(StewardError::validation(
                "recurringPattern",
                format!("expected one of daily, weekly, monthly; got `{other}`"),
            )),
        }
    }
}

/// Raw event-creation form submission. Every field is still untyped text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub zoom_link: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default = "default_pattern")]
    pub recurring_pattern: String,
    #[serde(default)]
    pub recurring_end_date: Option<String>,
    #[serde(default)]
    pub recurring_days: Vec<i64>,
}

fn default_pattern() -> String {
    "weekly".into()
}

/// A parsed, possibly recurring, event description. Consumed once by the
/// expander; never persisted itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub time: String,
    pub location: String,
    pub event_type: EventType,
    pub zoom_link: Option<String>,
    pub is_recurring: bool,
    pub recurring_pattern: RecurringPattern,
    pub recurring_end_date: Option<NaiveDate>,
    /// Weekday indices, 0 = Sunday .. 6 = Saturday.
    pub recurring_days: Vec<i64>,
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, StewardError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        StewardError::validation(field, format!("`{value}` is not a YYYY-MM-DD date: {e}"))
    })
}

impl TryFrom<EventForm> for EventTemplate {
    type Error = StewardError;

    fn try_from(form: EventForm) -> Result<Self, Self::Error> {
        if form.title.trim().is_empty() {
            return Err(StewardError::validation("title", "title is required"));
        }
        let start_date = parse_date("startDate", &form.date)?;
        let event_type = form.event_type.parse()?;
        let recurring_pattern = form.recurring_pattern.parse()?;
        let recurring_end_date = match form.recurring_end_date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(parse_date("recurringEndDate", raw)?),
            _ => None,
        };
        let zoom_link = form.zoom_link.filter(|link| !link.trim().is_empty());

        Ok(EventTemplate {
            title: form.title,
            description: form.description,
            start_date,
            time: form.time,
            location: form.location,
            event_type,
            zoom_link,
            is_recurring: form.is_recurring,
            recurring_pattern,
            recurring_end_date,
            recurring_days: form.recurring_days,
        })
    }
}

impl EventTemplate {
    /// Build a single instance of this template on `date`.
    pub fn instance_on(&self, date: NaiveDate) -> EventInstance {
        EventInstance {
            title: self.title.clone(),
            description: self.description.clone(),
            date,
            time: self.time.clone(),
            location: self.location.clone(),
            event_type: self.event_type,
            zoom_link: self.zoom_link.clone(),
        }
    }
}

/// One concrete, dated, non-recurring event ready for persistence. Holds
/// no reference back to its template or sibling instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInstance {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub event_type: EventType,
    pub zoom_link: Option<String>,
}

/// A persisted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub event_type: EventType,
    pub zoom_link: Option<String>,
    pub attendees: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub event_type: Option<EventType>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub zoom_link: Option<Option<String>>,
    pub attendees: Option<u32>,
}

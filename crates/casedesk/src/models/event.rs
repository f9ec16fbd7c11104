//! Hearings, deadlines and other dated events attached to cases.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CourtHearing,
    DocumentDeadline,
    Consultation,
    PaymentDeadline,
    CaseDeadline,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub case_id: i64,
    pub event_type: EventType,
    #[serde(with = "super::timestamp")]
    pub event_date: NaiveDateTime,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_reminder_days")]
    pub reminder_days_before: u8,
    #[serde(default)]
    pub event_status: EventStatus,
    #[serde(default)]
    pub reminder_sent: bool,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::timestamp")]
    pub updated_at: NaiveDateTime,
}

fn default_reminder_days() -> u8 {
    1
}

#[derive(Debug, Clone, Serialize)]
pub struct NewEvent {
    pub case_id: i64,
    pub event_type: EventType,
    #[serde(with = "super::timestamp")]
    pub event_date: NaiveDateTime,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub reminder_days_before: u8,
    pub event_status: EventStatus,
}

impl NewEvent {
    pub fn new(
        case_id: i64,
        event_type: EventType,
        event_date: NaiveDateTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            case_id,
            event_type,
            event_date,
            description: description.into(),
            location: None,
            reminder_days_before: default_reminder_days(),
            event_status: EventStatus::Scheduled,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "super::timestamp::option"
    )]
    pub event_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_days_before: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_status: Option<EventStatus>,
}

/// Events of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub case_id: i64,
    #[serde(default)]
    pub case_number: Option<String>,
    pub event_type: EventType,
    #[serde(with = "super::timestamp")]
    pub event_date: NaiveDateTime,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    pub event_status: EventStatus,
}

/// Scheduled events in the next seven days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEvents {
    #[serde(default)]
    pub events: Vec<UpcomingEvent>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    pub id: i64,
    pub case_id: i64,
    #[serde(default)]
    pub case_number: Option<String>,
    pub event_type: EventType,
    #[serde(with = "super::timestamp")]
    pub event_date: NaiveDateTime,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    pub days_until: i64,
    #[serde(default)]
    pub is_today: bool,
    #[serde(default)]
    pub is_urgent: bool,
}

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::category::Category;
use super::day::{self, hh_mm};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
}

impl CalendarEvent {
    pub fn day(&self) -> Option<NaiveDate> {
        day::parse_day(&self.date)
    }

    /// Same day and intersecting time ranges. Touching ends do not count.
    pub fn overlaps(&self, other: &CalendarEvent) -> bool {
        match (self.day(), other.day()) {
            (Some(a), Some(b)) if a == b => {
                self.start_time < other.end_time && other.start_time < self.end_time
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Event title must not be empty")]
    EmptyTitle,
    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("Invalid time '{0}'. Use HH:MM.")]
    InvalidTime(String),
    #[error("Event must end after it starts ({start} - {end})")]
    EndBeforeStart { start: String, end: String },
}

/// Raw form input for a new event, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub category: Category,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date: day::day_key(date),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            ..Self::default()
        }
    }

    pub fn with_times(mut self, start: &str, end: &str) -> Self {
        self.start_time = start.to_string();
        self.end_time = end.to_string();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn validate(&self) -> Result<(NaiveDate, NaiveTime, NaiveTime), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        let date = day::parse_day(&self.date)
            .ok_or_else(|| DraftError::InvalidDate(self.date.clone()))?;
        let start = day::parse_time(&self.start_time)
            .ok_or_else(|| DraftError::InvalidTime(self.start_time.clone()))?;
        let end = day::parse_time(&self.end_time)
            .ok_or_else(|| DraftError::InvalidTime(self.end_time.clone()))?;
        if end <= start {
            return Err(DraftError::EndBeforeStart {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }
        Ok((date, start, end))
    }

    pub fn into_event(self) -> Result<CalendarEvent, DraftError> {
        let (date, start_time, end_time) = self.validate()?;
        Ok(CalendarEvent {
            id: Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            date: day::day_key(date),
            start_time,
            end_time,
            description: self.description,
            category: self.category,
        })
    }
}

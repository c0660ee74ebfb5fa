//! Normalization of raw schedule records into calendar events.
//!
//! Each record carries a week number, a day code and a start hour; the
//! parser turns those into a concrete date range, assembles a readable
//! description and maps the module colour onto the event palette.

pub mod color;
pub mod dates;

use chrono::Duration;
use serde_json::Value;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{Result, TimetableError};
use crate::models::{CalendarEvent, DateRange, RawScheduleRecord};

pub use color::closest_color;
pub use dates::{extract_duration_from_type, get_day_date};

/// Prefix of every event id produced from a schedule record
pub const EVENT_ID_PREFIX: &str = "flop-event-";

/// Schedule data as handed to the parser: either serialized JSON text or
/// records that were already decoded.
#[derive(Debug, Clone, Copy)]
pub enum ScheduleInput<'a> {
    Serialized(&'a str),
    Structured(&'a [RawScheduleRecord]),
}

impl<'a> From<&'a str> for ScheduleInput<'a> {
    fn from(text: &'a str) -> Self {
        ScheduleInput::Serialized(text)
    }
}

impl<'a> From<&'a String> for ScheduleInput<'a> {
    fn from(text: &'a String) -> Self {
        ScheduleInput::Serialized(text)
    }
}

impl<'a> From<&'a [RawScheduleRecord]> for ScheduleInput<'a> {
    fn from(records: &'a [RawScheduleRecord]) -> Self {
        ScheduleInput::Structured(records)
    }
}

impl<'a> From<&'a Vec<RawScheduleRecord>> for ScheduleInput<'a> {
    fn from(records: &'a Vec<RawScheduleRecord>) -> Self {
        ScheduleInput::Structured(records)
    }
}

pub struct EventRecordParser<'a> {
    config: &'a EngineConfig,
}

impl<'a> EventRecordParser<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Parse a whole batch, one event per record, in input order.
    /// Nothing is returned unless every record parses.
    pub fn parse<'i>(&self, input: impl Into<ScheduleInput<'i>>) -> Result<Vec<CalendarEvent>> {
        let events = match input.into() {
            ScheduleInput::Serialized(text) => {
                let records = Self::decode(text)?;
                self.parse_records(&records)?
            }
            ScheduleInput::Structured(records) => self.parse_records(records)?,
        };
        debug!(count = events.len(), "Parsed schedule records");
        Ok(events)
    }

    fn decode(text: &str) -> Result<Vec<RawScheduleRecord>> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_array() {
            return Err(TimetableError::Parse("Expected an array of events".to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    fn parse_records(&self, records: &[RawScheduleRecord]) -> Result<Vec<CalendarEvent>> {
        records.iter().map(|record| self.parse_event(record)).collect()
    }

    pub fn parse_event(&self, record: &RawScheduleRecord) -> Result<CalendarEvent> {
        let course = &record.course;
        let date = get_day_date(&record.day, course.week, course.year).ok_or_else(|| {
            TimetableError::Parse(format!(
                "record {}: no calendar date for week {} of {}",
                record.id, course.week, course.year
            ))
        })?;

        let duration =
            extract_duration_from_type(&course.course_type, self.config.default_duration_minutes);
        let (start, end) = dates::at_hour(date, record.start_time)
            .and_then(|start| {
                let end = start.checked_add_signed(Duration::try_minutes(duration)?)?;
                Some((start, end))
            })
            .ok_or_else(|| {
                TimetableError::Parse(format!(
                    "record {}: start hour {} or duration {}min out of range",
                    record.id, record.start_time, duration
                ))
            })?;

        Ok(CalendarEvent {
            id: format!("{}{}", EVENT_ID_PREFIX, record.id),
            all_day: false,
            date_range: DateRange { start, end },
            title: record.title().to_string(),
            description: Self::describe(record),
            location: record.location().to_string(),
            staff: record.staff().map(str::to_string),
            color: closest_color(
                &course.module.display.background_color_hex,
                &self.config.palette,
                self.config.fallback_color(),
            ),
            groups: course.groups.clone(),
        })
    }

    fn describe(record: &RawScheduleRecord) -> String {
        let course = &record.course;
        let groups = course
            .groups
            .iter()
            .map(|g| g.full_name())
            .collect::<Vec<_>>()
            .join(", ");

        let mut lines = vec![
            format!("Type: {}", course.course_type),
            format!("Module: {}", course.module.name),
            format!("Groups: {}", groups),
        ];
        if !course.support_staff.is_empty() {
            lines.push(format!("Support Tutors: {}", course.support_staff.join(", ")));
        }
        lines.push(format!("Week: {}", course.week));
        lines.push(format!("Session: {}", record.session_number));
        lines.join("\n")
    }
}

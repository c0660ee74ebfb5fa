//! Calendar-interchange (ICS) importer.
//!
//! Produces the same `CalendarEvent` values as the schedule-record parser
//! from `.ics` text. ICS events carry no group memberships, so they only
//! show up when no group filter is active.
//!
//! Stream structure (folding, components, parameters) is handled by the
//! `ical` crate; this module only maps `VEVENT` properties onto events.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;
use ical::IcalParser;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{Result, TimetableError};
use crate::models::{CalendarEvent, DateRange, EventColor};
use crate::utils::unescape_text;

/// Prefix of every event id produced from an ICS event
pub const ICS_EVENT_ID_PREFIX: &str = "ics-event-";

static RE_STAFF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Staff:[ \t]*([^\n]+)").expect("valid staff regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IcsTime {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl IcsTime {
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let value = value.strip_suffix('Z').unwrap_or(value);
        if value.len() == 8 {
            NaiveDate::parse_from_str(value, "%Y%m%d").ok().map(IcsTime::Date)
        } else {
            NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S")
                .ok()
                .map(IcsTime::DateTime)
        }
    }

    /// `VALUE=DATE` forces the date form; otherwise the value's shape decides
    fn from_property(property: &Property) -> Option<Self> {
        let value = property.value.as_deref()?;
        if has_param(property, "VALUE", "DATE") {
            let date = value.trim().get(..8)?;
            return NaiveDate::parse_from_str(date, "%Y%m%d").ok().map(IcsTime::Date);
        }
        Self::parse(value)
    }

    fn to_datetime(self) -> NaiveDateTime {
        match self {
            IcsTime::Date(date) => date.and_time(NaiveTime::MIN),
            IcsTime::DateTime(dt) => dt,
        }
    }
}

pub struct IcsImporter<'a> {
    config: &'a EngineConfig,
}

impl<'a> IcsImporter<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Parse every VEVENT of every calendar in `text`. Events without a
    /// usable DTSTART are skipped; text that is not a calendar is an error.
    pub fn parse(&self, text: &str) -> Result<Vec<CalendarEvent>> {
        let mut calendars = 0usize;
        let mut index = 0usize;
        let mut events = Vec::new();

        for calendar in IcalParser::new(text.as_bytes()) {
            let calendar =
                calendar.map_err(|e| TimetableError::Calendar(format!("ICS parse error: {e}")))?;
            calendars += 1;

            for event in &calendar.events {
                match self.parse_event(event, index) {
                    Some(parsed) => events.push(parsed),
                    None => warn!(event = index, "Skipping calendar event without a usable start"),
                }
                index += 1;
            }
        }

        if calendars == 0 {
            return Err(TimetableError::Calendar("no VCALENDAR found".to_string()));
        }

        debug!(calendars, vevents = index, events = events.len(), "Imported calendar events");
        Ok(events)
    }

    fn parse_event(&self, event: &IcalEvent, index: usize) -> Option<CalendarEvent> {
        let start_value = IcsTime::from_property(property(event, "DTSTART")?)?;
        let start = start_value.to_datetime();

        let end = match property(event, "DTEND").and_then(IcsTime::from_property) {
            Some(end_value) => end_value.to_datetime(),
            None => match start_value {
                IcsTime::Date(_) => start.checked_add_signed(Duration::days(1))?,
                IcsTime::DateTime(_) => start,
            },
        };

        let duration = end - start;
        let all_day = matches!(start_value, IcsTime::Date(_))
            || duration >= Duration::hours(24)
            || (start.time() == NaiveTime::MIN && duration > Duration::hours(12));

        let text_of = |name: &str| value(event, name).map(unescape_text).unwrap_or_default();
        let title = text_of("SUMMARY");
        let description = text_of("DESCRIPTION");

        let id = match value(event, "UID").map(str::trim) {
            Some(uid) if !uid.is_empty() => format!("{}{}", ICS_EVENT_ID_PREFIX, uid),
            _ => format!("{}{}", ICS_EVENT_ID_PREFIX, index),
        };

        Some(CalendarEvent {
            id,
            all_day,
            date_range: DateRange { start, end },
            color: self.infer_color(&format!("{} {}", title, description)),
            staff: extract_staff(&description),
            location: text_of("LOCATION"),
            title,
            description,
            groups: Vec::new(),
        })
    }

    /// First configured keyword appearing as a whole word wins
    fn infer_color(&self, text: &str) -> EventColor {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        self.config
            .color_keywords
            .iter()
            .find(|rule| {
                let keyword = rule.keyword.to_lowercase();
                words.iter().any(|w| *w == keyword)
            })
            .map(|rule| rule.color)
            .unwrap_or_else(|| self.config.fallback_color())
    }
}

/// First property of the event itself named `name`; alarms are not searched
fn property<'e>(event: &'e IcalEvent, name: &str) -> Option<&'e Property> {
    event
        .properties
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

fn value<'e>(event: &'e IcalEvent, name: &str) -> Option<&'e str> {
    property(event, name)?.value.as_deref()
}

fn has_param(property: &Property, name: &str, expected: &str) -> bool {
    property.params.iter().flatten().any(|(key, values)| {
        key.eq_ignore_ascii_case(name) && values.iter().any(|v| v.eq_ignore_ascii_case(expected))
    })
}

fn extract_staff(description: &str) -> Option<String> {
    RE_STAFF
        .captures(description)
        .map(|caps| caps[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Named colours an event can be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Blue,
    Orange,
    Violet,
    Rose,
    Emerald,
}

impl std::fmt::Display for EventColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventColor::Blue => write!(f, "blue"),
            EventColor::Orange => write!(f, "orange"),
            EventColor::Violet => write!(f, "violet"),
            EventColor::Rose => write!(f, "rose"),
            EventColor::Emerald => write!(f, "emerald"),
        }
    }
}

/// A student group as attached to one scheduled course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct GroupMembership {
    pub id: i64,
    // The timetable service calls the cohort "train_prog" (training programme)
    #[serde(alias = "train_prog")]
    pub cohort: String,
    pub name: String,
    #[serde(rename = "isStructural", alias = "is_structural", default)]
    pub is_structural: bool,
}

impl GroupMembership {
    /// "<cohort> <name>", the form used in filters and descriptions
    pub fn full_name(&self) -> String {
        format!("{} {}", self.cohort, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A normalized calendar event. Never mutated once built; filtering
/// produces new sequences instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub all_day: bool,
    pub date_range: DateRange,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff: Option<String>,
    pub color: EventColor,
    #[serde(default)]
    pub groups: Vec<GroupMembership>,
}

impl CalendarEvent {
    pub fn has_groups(&self) -> bool {
        !self.groups.is_empty()
    }

    /// True if any membership belongs to the given cohort
    pub fn in_cohort(&self, cohort: &str) -> bool {
        self.groups.iter().any(|g| g.cohort == cohort)
    }

    /// Compact date/time for list output: "Mon 06 Jan 08:00-09:30"
    pub fn formatted_time_range(&self) -> String {
        if self.all_day {
            return self.date_range.start.format("%a %d %b (all day)").to_string();
        }
        format!(
            "{}-{}",
            self.date_range.start.format("%a %d %b %H:%M"),
            self.date_range.end.format("%H:%M")
        )
    }
}

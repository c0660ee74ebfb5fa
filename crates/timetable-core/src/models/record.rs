use serde::{Deserialize, Serialize};

use super::GroupMembership;

// Field names follow the published record format; aliases accept the
// timetable service's own names for the same fields.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScheduleRecord {
    pub id: i64,
    #[serde(default)]
    pub room: Option<Room>,
    /// Start hour of the session
    pub start_time: i64,
    /// Day code: "mo", "tu", "we", "th", "fr" (or "f"), "sa", "su"
    pub day: String,
    pub course: Course,
    #[serde(default)]
    pub tutor: Option<String>,
    #[serde(rename = "sessionNumber", alias = "number", default)]
    pub session_number: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub id: i64,
    /// Course type, e.g. "TD", "CM 1h30"
    #[serde(rename = "type", default)]
    pub course_type: String,
    pub week: i64,
    pub year: i32,
    #[serde(default)]
    pub groups: Vec<GroupMembership>,
    #[serde(rename = "supportStaff", alias = "supp_tutor", default)]
    pub support_staff: Vec<String>,
    pub module: Module,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbrev: String,
    #[serde(default)]
    pub display: ModuleDisplay,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleDisplay {
    #[serde(rename = "backgroundColorHex", alias = "color_bg", default)]
    pub background_color_hex: String,
}

impl RawScheduleRecord {
    pub fn location(&self) -> &str {
        self.room.as_ref().map(|r| r.name.as_str()).unwrap_or("")
    }

    /// Module full name, falling back to its abbreviation
    pub fn title(&self) -> &str {
        let module = &self.course.module;
        if module.name.is_empty() {
            &module.abbrev
        } else {
            &module.name
        }
    }

    pub fn staff(&self) -> Option<&str> {
        self.tutor.as_deref().filter(|t| !t.is_empty())
    }
}

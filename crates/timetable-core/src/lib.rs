//! Core library for timetable.
//!
//! Turns raw schedule records from a timetable service into calendar
//! events, infers the group taxonomy of every cohort from group names,
//! and filters events hierarchically: asking for `DV1.1` also returns what
//! is scheduled for `DV1`, `DV` and the whole cohort.
//!
//! Everything here is synchronous and side-effect free. Components borrow
//! an [`EngineConfig`] holding the palette and naming tables.
//!
//! ```no_run
//! use timetable_core::{EngineConfig, EventFilter, EventRecordParser};
//!
//! # fn main() -> timetable_core::Result<()> {
//! let config = EngineConfig::default();
//! let json = std::fs::read_to_string("schedule.json").unwrap_or_default();
//! let events = EventRecordParser::new(&config).parse(json.as_str())?;
//! let visible = EventFilter::new(&config).filter(&events, &["BUT2 DV1.1"])?;
//! println!("{} of {} events", visible.len(), events.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod groups;
pub mod ics;
pub mod models;
pub mod parser;
pub mod utils;

pub use config::{ColorKeyword, EngineConfig, PaletteEntry};
pub use error::{Result, TimetableError};
pub use filter::{is_subgroup_of, EventFilter};
pub use groups::{get_parent_groups, GroupHierarchyBuilder, GroupPathResolver};
pub use ics::IcsImporter;
pub use models::{
    CalendarEvent, CohortGroups, DateRange, EventColor, GroupHierarchyNode, GroupLevel,
    GroupMembership, RawScheduleRecord,
};
pub use parser::{EventRecordParser, ScheduleInput};

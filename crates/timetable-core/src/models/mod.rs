//! Data models for timetable entities.
//!
//! This module contains all the data structures used to represent
//! schedule data including:
//!
//! - `RawScheduleRecord`: A scheduled course as delivered by the timetable service
//! - `CalendarEvent`, `GroupMembership`: Normalized, renderable events
//! - `GroupHierarchyNode`, `CohortGroups`: The per-cohort group forest

pub mod event;
pub mod hierarchy;
pub mod record;

pub use event::{CalendarEvent, DateRange, EventColor, GroupMembership};
pub use hierarchy::{CohortGroups, GroupHierarchyNode, GroupLevel};
pub use record::{Course, Module, ModuleDisplay, RawScheduleRecord, Room};

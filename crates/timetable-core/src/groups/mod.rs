//! Cohort group taxonomy.
//!
//! Group names follow loose conventions ("A", "A1", "DV1.1", "G2") that
//! encode how deep a group sits inside its cohort. This module infers a
//! tree per cohort from those names and walks it back up to find every
//! group a given group belongs to.

pub mod builder;
pub mod naming;
pub mod resolver;

pub use builder::GroupHierarchyBuilder;
pub use resolver::{get_parent_groups, GroupPathResolver};

//! Hierarchical event filtering.
//!
//! Requested group names are widened to their closed ancestor sets, then
//! an event is kept when one of its memberships matches one of the
//! resulting names.

use std::borrow::Cow;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::groups::naming;
use crate::groups::{GroupHierarchyBuilder, GroupPathResolver};
use crate::models::{CalendarEvent, CohortGroups, GroupMembership};

pub struct EventFilter<'a> {
    config: &'a EngineConfig,
}

impl<'a> EventFilter<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Events visible to any of `requested`. With no requested names the
    /// input is handed back untouched; otherwise events without groups are
    /// always dropped.
    pub fn filter<'e, S: AsRef<str>>(
        &self,
        events: &'e [CalendarEvent],
        requested: &[S],
    ) -> Result<Cow<'e, [CalendarEvent]>> {
        if requested.is_empty() {
            return Ok(Cow::Borrowed(events));
        }

        let forest = GroupHierarchyBuilder::new(self.config).extract_groups(events)?;
        let targets = expand_targets(&forest, requested);

        let kept: Vec<CalendarEvent> = events
            .iter()
            .filter(|event| event_matches(event, &targets))
            .cloned()
            .collect();

        debug!(
            requested = requested.len(),
            targets = targets.len(),
            kept = kept.len(),
            total = events.len(),
            "Filtered events by group"
        );
        Ok(Cow::Owned(kept))
    }
}

/// Union of the ancestor sets of every requested name, first-seen order
pub fn expand_targets<S: AsRef<str>>(forest: &[CohortGroups], requested: &[S]) -> Vec<String> {
    let resolver = GroupPathResolver::new(forest);
    let mut targets: Vec<String> = Vec::new();
    for name in requested {
        for parent in resolver.parent_groups(name.as_ref()) {
            if !targets.contains(&parent) {
                targets.push(parent);
            }
        }
    }
    targets
}

pub fn event_matches(event: &CalendarEvent, targets: &[String]) -> bool {
    if event.groups.is_empty() {
        return false;
    }
    targets
        .iter()
        .any(|target| event.groups.iter().any(|group| membership_matches(group, target)))
}

/// Does a membership fall under a fully-qualified (or bare) target name?
pub fn membership_matches(group: &GroupMembership, target: &str) -> bool {
    let full_name = group.full_name();
    if target == full_name || target == group.name || target == group.cohort {
        return true;
    }

    let mut target_parts = target.split(' ');
    let mut group_parts = full_name.split(' ');
    if target_parts.next() != group_parts.next() {
        return false;
    }

    match (target_parts.next(), group_parts.next()) {
        (Some(target_name), Some(group_name)) => is_subgroup_of(group_name, target_name, &group.cohort),
        _ => false,
    }
}

/// Is group `a` inside group `b` by naming convention alone?
///
/// `DV1.1` is inside `DV1` and `DV`, `A1` inside `A`; `G1` is not inside
/// `G2` and `DV10` is not inside `DV1`. A `b` carrying the cohort
/// identifier covers the whole cohort.
pub fn is_subgroup_of(a: &str, b: &str, cohort: &str) -> bool {
    if b.contains(cohort) {
        return true;
    }
    if a == b {
        return true;
    }

    if let Some(remainder) = a.strip_prefix(b) {
        // A digit may only extend a name that does not already end in one
        let b_ends_in_digit = b.ends_with(|c: char| c.is_ascii_digit());
        return remainder.is_empty()
            || remainder.starts_with('.')
            || (!b_ends_in_digit && remainder.starts_with(|c: char| c.is_ascii_digit()));
    }

    let base_a = naming::strip_numeric_suffix(a);
    let base_b = naming::strip_numeric_suffix(b);
    if base_a == base_b {
        return a.chars().count() > b.chars().count();
    }

    base_a.starts_with(base_b.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, EventColor};
    use chrono::NaiveDate;

    fn group(id: i64, cohort: &str, name: &str) -> GroupMembership {
        GroupMembership {
            id,
            cohort: cohort.to_string(),
            name: name.to_string(),
            is_structural: true,
        }
    }

    fn event(id: &str, groups: Vec<GroupMembership>) -> CalendarEvent {
        let start = NaiveDate::from_ymd_opt(2025, 3, 3)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap();
        CalendarEvent {
            id: id.to_string(),
            all_day: false,
            date_range: DateRange { start, end: start },
            title: id.to_string(),
            description: String::new(),
            location: String::new(),
            staff: None,
            color: EventColor::Blue,
            groups,
        }
    }

    fn sample_events() -> Vec<CalendarEvent> {
        vec![
            event("amphi", vec![group(1, "BUT1", "BUT1")]),
            event("td-a", vec![group(2, "BUT1", "A")]),
            event("tp-a1", vec![group(3, "BUT1", "A1")]),
            event("dv", vec![group(4, "BUT2", "DV")]),
            event("dv1", vec![group(5, "BUT2", "DV1")]),
            event("dv1.1", vec![group(6, "BUT2", "DV1.1")]),
            event("meeting", vec![]),
            event("lp", vec![group(7, "LP", "LP1")]),
        ]
    }

    fn ids(events: &[CalendarEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    // -------------------------------------------------------------------------
    // is_subgroup_of
    // -------------------------------------------------------------------------

    #[test]
    fn test_is_subgroup_of_dotted_and_numbered() {
        assert!(is_subgroup_of("DV1.1", "DV1", "BUT2"));
        assert!(is_subgroup_of("DV1.1", "DV", "BUT2"));
        assert!(is_subgroup_of("A1", "A", "BUT1"));
        assert!(is_subgroup_of("A1", "A1", "BUT1"));
    }

    #[test]
    fn test_is_subgroup_of_rejects_siblings_and_lookalikes() {
        assert!(!is_subgroup_of("G1", "G2", "BUT1"));
        assert!(!is_subgroup_of("DV10", "DV1", "BUT2"));
        assert!(!is_subgroup_of("A", "A1", "BUT1"));
        assert!(!is_subgroup_of("DV", "RE", "BUT2"));
        assert!(!is_subgroup_of("DVX", "DV", "BUT2"));
    }

    #[test]
    fn test_is_subgroup_of_cohort_wildcard() {
        assert!(is_subgroup_of("G1", "BUT3I", "BUT3"));
        assert!(is_subgroup_of("anything", "BUT3", "BUT3"));
    }

    #[test]
    fn test_is_subgroup_of_base_names() {
        // Same base, longer name is the child
        assert!(is_subgroup_of("A.1", "A1", "BUT1"));
        assert!(!is_subgroup_of("A1", "A.1", "BUT1"));
        // Deeper base extends a shorter one
        assert!(is_subgroup_of("DVX1", "DV2", "BUT2"));
    }

    // -------------------------------------------------------------------------
    // membership_matches
    // -------------------------------------------------------------------------

    #[test]
    fn test_membership_matches_exact_forms() {
        let g = group(1, "BUT2", "DV1");
        assert!(membership_matches(&g, "BUT2 DV1"));
        assert!(membership_matches(&g, "DV1"));
        assert!(membership_matches(&g, "BUT2"));
    }

    #[test]
    fn test_membership_matches_requires_same_cohort() {
        let g = group(1, "BUT2", "DV1.1");
        assert!(membership_matches(&g, "BUT2 DV1"));
        assert!(!membership_matches(&g, "BUT1 DV1"));
        assert!(!membership_matches(&g, "BUT2 RE"));
        assert!(!membership_matches(&g, "RE"));
    }

    // -------------------------------------------------------------------------
    // EventFilter
    // -------------------------------------------------------------------------

    #[test]
    fn test_filter_without_groups_is_identity() {
        let events = sample_events();
        let config = EngineConfig::default();
        let none: [&str; 0] = [];
        let filtered = EventFilter::new(&config).filter(&events, &none).unwrap();
        assert!(matches!(filtered, Cow::Borrowed(_)));
        assert!(std::ptr::eq(filtered.as_ref(), events.as_slice()));
    }

    #[test]
    fn test_filter_by_cohort() {
        let events = sample_events();
        let config = EngineConfig::default();
        let filtered = EventFilter::new(&config).filter(&events, &["BUT1"]).unwrap();
        assert_eq!(ids(&filtered), vec!["amphi", "td-a", "tp-a1"]);

        let expected: Vec<&CalendarEvent> = events.iter().filter(|e| e.in_cohort("BUT1")).collect();
        assert_eq!(filtered.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_filter_by_leaf_includes_ancestors() {
        let events = sample_events();
        let config = EngineConfig::default();
        let filtered = EventFilter::new(&config).filter(&events, &["BUT2 DV1.1"]).unwrap();
        assert_eq!(ids(&filtered), vec!["dv", "dv1", "dv1.1"]);
    }

    #[test]
    fn test_filter_drops_events_without_groups() {
        let events = sample_events();
        let config = EngineConfig::default();
        let filtered = EventFilter::new(&config).filter(&events, &["LP"]).unwrap();
        assert_eq!(ids(&filtered), vec!["lp"]);
        assert!(filtered.iter().all(|e| e.has_groups()));
    }

    #[test]
    fn test_filter_unknown_group_matches_nothing() {
        let events = sample_events();
        let config = EngineConfig::default();
        let filtered = EventFilter::new(&config).filter(&events, &["MASTER M1"]).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_multiple_requests_union() {
        let events = sample_events();
        let config = EngineConfig::default();
        let filtered = EventFilter::new(&config)
            .filter(&events, &["LP".to_string(), "BUT1 A1".to_string()])
            .unwrap();
        assert_eq!(ids(&filtered), vec!["amphi", "td-a", "tp-a1", "lp"]);
    }

    #[test]
    fn test_filter_does_not_modify_events() {
        let events = sample_events();
        let before = events.clone();
        let config = EngineConfig::default();
        let _ = EventFilter::new(&config).filter(&events, &["BUT2 DV"]).unwrap();
        assert_eq!(events, before);
    }

    #[test]
    fn test_expand_targets_dedups() {
        let config = EngineConfig::default();
        let forest = GroupHierarchyBuilder::new(&config)
            .extract_groups(&sample_events())
            .unwrap();
        let targets = expand_targets(&forest, &["BUT2 DV1.1", "BUT2 DV1"]);
        assert_eq!(targets, vec!["BUT2 DV1.1", "BUT2", "BUT2 DV", "BUT2 DV1"]);
    }
}

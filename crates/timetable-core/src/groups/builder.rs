use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::naming;
use crate::config::EngineConfig;
use crate::error::{Result, TimetableError};
use crate::models::{CalendarEvent, CohortGroups, GroupHierarchyNode, GroupLevel, GroupMembership};
use crate::utils::cmp_natural;

/// Infers one group tree per cohort from the memberships attached to events.
pub struct GroupHierarchyBuilder<'a> {
    config: &'a EngineConfig,
}

impl<'a> GroupHierarchyBuilder<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Collect the distinct groups of every cohort seen in `events` and
    /// build the hierarchy forest. Within a cohort the first occurrence of
    /// a group name wins.
    pub fn extract_groups(&self, events: &[CalendarEvent]) -> Result<Vec<CohortGroups>> {
        let mut by_cohort: HashMap<&str, Vec<&GroupMembership>> = HashMap::new();
        let mut seen: HashSet<(&str, &str)> = HashSet::new();

        for group in events.iter().flat_map(|e| e.groups.iter()) {
            if seen.insert((group.cohort.as_str(), group.name.as_str())) {
                by_cohort.entry(group.cohort.as_str()).or_default().push(group);
            }
        }

        let mut cohorts: Vec<(&str, Vec<&GroupMembership>)> = by_cohort.into_iter().collect();
        cohorts.sort_by(|(a, _), (b, _)| self.cmp_cohorts(a, b));

        let forest = cohorts
            .into_iter()
            .map(|(cohort, groups)| -> Result<CohortGroups> {
                let hierarchy = self.build_hierarchy(cohort, &groups)?;
                Ok(CohortGroups {
                    cohort: cohort.to_string(),
                    hierarchy,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(cohorts = forest.len(), "Extracted group hierarchy forest");
        Ok(forest)
    }

    /// Cohorts with the priority prefix come first, each family in
    /// lexicographic order.
    fn cmp_cohorts(&self, a: &str, b: &str) -> Ordering {
        let prefix = self.config.priority_cohort_prefix.as_str();
        let a_priority = a.starts_with(prefix);
        let b_priority = b.starts_with(prefix);
        b_priority.cmp(&a_priority).then_with(|| a.cmp(b))
    }

    /// Level of a group inferred from its name alone
    pub fn classify(&self, name: &str) -> GroupLevel {
        if naming::is_dotted(name) {
            GroupLevel::Subgroup
        } else if self.config.is_specialization(name) {
            GroupLevel::Specialization
        } else if naming::is_letter_group(name) {
            if name.chars().count() == 1 {
                GroupLevel::Group
            } else {
                GroupLevel::Subgroup
            }
        } else {
            GroupLevel::Group
        }
    }

    /// Build the tree of one cohort. Names that fit no rule, or whose
    /// parent cannot be found, hang directly off the root.
    pub fn build_hierarchy(&self, cohort: &str, groups: &[&GroupMembership]) -> Result<GroupHierarchyNode> {
        let mut root = GroupHierarchyNode::root(cohort);

        // A group named after the cohort stands for the whole cohort
        let is_cohort_wide = |name: &str| name.contains(cohort);
        if let Some(cohort_group) = groups.iter().find(|g| is_cohort_wide(&g.name)) {
            root.id = cohort_group.id;
            root.name = cohort_group.name.clone();
        }

        let mut remaining: Vec<&GroupMembership> =
            groups.iter().copied().filter(|g| !is_cohort_wide(&g.name)).collect();
        remaining.sort_by(|a, b| {
            naming::complexity(&a.name)
                .cmp(&naming::complexity(&b.name))
                .then_with(|| cmp_natural(&a.name, &b.name))
        });

        let mut added: HashSet<&str> = HashSet::new();
        for group in remaining {
            if !added.insert(group.name.as_str()) {
                continue;
            }

            let node = GroupHierarchyNode {
                id: group.id,
                name: group.name.clone(),
                full_name: format!("{} {}", cohort, group.name),
                level: self.classify(&group.name),
                children: Vec::new(),
            };

            let parent_path = naming::parent_candidates(&group.name)
                .iter()
                .find_map(|candidate| root.path_to(candidate))
                .unwrap_or_default();
            let parent = root.node_at_mut(&parent_path).ok_or_else(|| {
                TimetableError::Extraction(format!(
                    "parent of {} vanished while building {}",
                    group.name, cohort
                ))
            })?;
            parent.children.push(node);
        }

        sort_children(&mut root);
        debug!(cohort = %cohort, nodes = root.node_count(), "Built group hierarchy");
        Ok(root)
    }
}

fn sort_children(node: &mut GroupHierarchyNode) {
    node.children.sort_by(|a, b| cmp_natural(&a.name, &b.name));
    for child in &mut node.children {
        sort_children(child);
    }
}

use super::naming;
use crate::models::{CohortGroups, GroupHierarchyNode};

/// Answers "which groups does this group belong to?" over a hierarchy forest.
pub struct GroupPathResolver<'a> {
    forest: &'a [CohortGroups],
}

impl<'a> GroupPathResolver<'a> {
    pub fn new(forest: &'a [CohortGroups]) -> Self {
        Self { forest }
    }

    /// Closed ancestor set of a fully-qualified group name ("BUT2 DV1.1").
    ///
    /// Holds the name itself, its cohort, every real ancestor found in the
    /// cohort's tree, plus ancestors guessed from the name (dotted prefixes,
    /// trailing digits stripped, everything before the first digit) even
    /// when no such group exists. A bare cohort yields just itself.
    /// Order is discovery order, without duplicates.
    pub fn parent_groups(&self, full_group_name: &str) -> Vec<String> {
        let Some((cohort, group_name)) = full_group_name.split_once(' ') else {
            return vec![full_group_name.to_string()];
        };

        let mut parents = vec![full_group_name.to_string(), cohort.to_string()];

        let Some(structure) = self.forest.iter().find(|c| c.cohort == cohort) else {
            return dedup(parents);
        };

        if let Some(ancestors) = find_ancestors(&structure.hierarchy, group_name) {
            parents.extend(ancestors);
        }

        let qualify = |name: &str| format!("{} {}", cohort, name);

        if group_name.contains('.') {
            let parts: Vec<&str> = group_name.split('.').collect();
            for i in (1..parts.len()).rev() {
                parents.push(qualify(&parts[..i].join(".")));
            }
        }

        let base_group = naming::strip_trailing_digits(group_name);
        if !base_group.is_empty() && base_group != group_name {
            parents.push(qualify(&base_group));
        }

        let super_group = naming::strip_from_first_digit(group_name);
        if !super_group.is_empty() && super_group != group_name && super_group != base_group {
            parents.push(qualify(super_group));
        }

        dedup(parents)
    }
}

/// Shorthand for `GroupPathResolver::new(forest).parent_groups(name)`
pub fn get_parent_groups(full_group_name: &str, forest: &[CohortGroups]) -> Vec<String> {
    GroupPathResolver::new(forest).parent_groups(full_group_name)
}

/// Full names on the path from `node` down to (excluding) the first node
/// named `target`, depth-first.
fn find_ancestors(node: &GroupHierarchyNode, target: &str) -> Option<Vec<String>> {
    if node.name == target {
        return Some(Vec::new());
    }
    for child in &node.children {
        if let Some(mut chain) = find_ancestors(child, target) {
            chain.insert(0, node.full_name.clone());
            return Some(chain);
        }
    }
    None
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::EngineConfig;
    use crate::groups::GroupHierarchyBuilder;
    use crate::models::GroupMembership;

    fn forest(cohort: &str, names: &[&str]) -> Vec<CohortGroups> {
        let groups: Vec<GroupMembership> = names
            .iter()
            .enumerate()
            .map(|(i, name)| GroupMembership {
                id: i as i64 + 1,
                cohort: cohort.to_string(),
                name: name.to_string(),
                is_structural: true,
            })
            .collect();
        let refs: Vec<&GroupMembership> = groups.iter().collect();
        let config = EngineConfig::default();
        let hierarchy = GroupHierarchyBuilder::new(&config)
            .build_hierarchy(cohort, &refs)
            .unwrap();
        vec![CohortGroups { cohort: cohort.to_string(), hierarchy }]
    }

    fn as_set(names: Vec<String>) -> HashSet<String> {
        names.into_iter().collect()
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parent_groups_of_chain_leaf() {
        let forest = forest("BUT2", &["DV1.1", "DV1", "DV"]);
        let parents = get_parent_groups("BUT2 DV1.1", &forest);
        assert_eq!(as_set(parents.clone()), set(&["BUT2 DV1.1", "BUT2", "BUT2 DV1", "BUT2 DV"]));
        assert_eq!(parents.len(), 4);
        assert_eq!(&parents[..2], &["BUT2 DV1.1".to_string(), "BUT2".to_string()]);
    }

    #[test]
    fn test_bare_cohort_is_singleton() {
        let forest = forest("BUT1", &["A", "A1"]);
        assert_eq!(get_parent_groups("BUT1", &forest), vec!["BUT1".to_string()]);
        assert_eq!(get_parent_groups("UNKNOWN", &forest), vec!["UNKNOWN".to_string()]);
    }

    #[test]
    fn test_unknown_cohort_keeps_name_and_cohort() {
        let forest = forest("BUT1", &["A", "A1"]);
        assert_eq!(
            get_parent_groups("BUT3 A1", &forest),
            vec!["BUT3 A1".to_string(), "BUT3".to_string()]
        );
    }

    #[test]
    fn test_heuristic_parents_without_real_nodes() {
        // Only the leaf exists; its conceptual parents are still reported
        let forest = forest("BUT2", &["RE2.3"]);
        assert_eq!(
            as_set(get_parent_groups("BUT2 RE2.3", &forest)),
            set(&["BUT2 RE2.3", "BUT2", "BUT2 RE2", "BUT2 RE"])
        );
    }

    #[test]
    fn test_letter_subgroup_parents() {
        let forest = forest("BUT1", &["A", "A1", "B"]);
        assert_eq!(
            get_parent_groups("BUT1 A1", &forest),
            vec!["BUT1 A1".to_string(), "BUT1".to_string(), "BUT1 A".to_string()]
        );
    }

    #[test]
    fn test_top_level_group_has_only_cohort() {
        let forest = forest("BUT1", &["TP", "A"]);
        assert_eq!(
            get_parent_groups("BUT1 TP", &forest),
            vec!["BUT1 TP".to_string(), "BUT1".to_string()]
        );
    }

    #[test]
    fn test_group_not_in_tree_still_gets_heuristics() {
        let forest = forest("BUT1", &["A"]);
        assert_eq!(
            as_set(get_parent_groups("BUT1 G12", &forest)),
            set(&["BUT1 G12", "BUT1", "BUT1 G"])
        );
    }
}

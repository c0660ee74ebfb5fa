use serde::{Deserialize, Serialize};

/// Depth of a node in a cohort's group tree, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum GroupLevel {
    Cohort,
    Specialization,
    Group,
    Subgroup,
}

impl std::fmt::Display for GroupLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupLevel::Cohort => write!(f, "cohort"),
            GroupLevel::Specialization => write!(f, "specialization"),
            GroupLevel::Group => write!(f, "group"),
            GroupLevel::Subgroup => write!(f, "subgroup"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct GroupHierarchyNode {
    pub id: i64,
    pub name: String,
    /// "<cohort> <name>", or just the cohort for the root
    pub full_name: String,
    pub level: GroupLevel,
    #[serde(default)]
    pub children: Vec<GroupHierarchyNode>,
}

impl GroupHierarchyNode {
    pub fn root(cohort: &str) -> Self {
        Self {
            id: 0,
            name: cohort.to_string(),
            full_name: cohort.to_string(),
            level: GroupLevel::Cohort,
            children: Vec::new(),
        }
    }

    /// Depth-first search by exact name, the node itself first.
    pub fn find(&self, name: &str) -> Option<&GroupHierarchyNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Child-index path to the first node named `name`, in the same
    /// traversal order as `find`. The root itself is the empty path.
    pub fn path_to(&self, name: &str) -> Option<Vec<usize>> {
        if self.name == name {
            return Some(Vec::new());
        }
        for (i, child) in self.children.iter().enumerate() {
            if let Some(mut path) = child.path_to(name) {
                path.insert(0, i);
                return Some(path);
            }
        }
        None
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut GroupHierarchyNode> {
        match path.split_first() {
            None => Some(self),
            Some((&i, rest)) => self.children.get_mut(i)?.node_at_mut(rest),
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Indented text tree, one "name (level)" line per node
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{} ({})\n", self.name, self.level));
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
    }
}

/// The group tree of one cohort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CohortGroups {
    pub cohort: String,
    pub hierarchy: GroupHierarchyNode,
}

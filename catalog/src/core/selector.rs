//! Deterministic selection over the group tree.

use crate::core::path::GroupPath;
use crate::tree::{Demonstration, Group};

/// Demonstrations under `filter`, depth-first in registration order.
///
/// `None` and the root path select everything.
pub fn select<'a>(root: &'a Group, filter: Option<&GroupPath>) -> Vec<&'a Demonstration> {
    let demos = root.demonstrations();
    match filter {
        Some(prefix) => demos
            .into_iter()
            .filter(|demo| demo.path.starts_with(prefix))
            .collect(),
        None => demos,
    }
}

/// Every group path that holds demonstrations, with the count at or below it.
pub fn list_groups(root: &Group) -> Vec<(GroupPath, usize)> {
    let mut out = Vec::new();
    for group in root.groups() {
        list_inner(group, &GroupPath::root(), &mut out);
    }
    out
}

fn list_inner(group: &Group, parent: &GroupPath, out: &mut Vec<(GroupPath, usize)>) {
    let path = parent.child(group.name.clone());
    out.push((path.clone(), group.count()));
    for child in group.groups() {
        list_inner(child, &path, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{demo, group_with};

    #[test]
    fn filter_selects_by_prefix() {
        let root = group_with(&[
            (&["strings", "repeat"], "r1"),
            (&["strings", "includes"], "i1"),
            (&["numbers"], "n1"),
            (&["strings", "repeat"], "r2"),
        ]);

        let all: Vec<&str> = select(&root, None)
            .iter()
            .map(|demo| demo.description.as_str())
            .collect();
        assert_eq!(all, vec!["r1", "r2", "i1", "n1"]);

        let filter = GroupPath::from(["strings", "repeat"]);
        let repeat: Vec<&str> = select(&root, Some(&filter))
            .iter()
            .map(|demo| demo.description.as_str())
            .collect();
        assert_eq!(repeat, vec!["r1", "r2"]);

        let missing = GroupPath::from(["classes"]);
        assert!(select(&root, Some(&missing)).is_empty());
    }

    #[test]
    fn lists_groups_with_counts() {
        let mut root = group_with(&[(&["strings", "repeat"], "r1"), (&["numbers"], "n1")]);
        let strings = GroupPath::from(["strings"]);
        root.group_mut(strings.segments()).push(demo(&strings, "s1"));

        let listed: Vec<(String, usize)> = list_groups(&root)
            .into_iter()
            .map(|(path, count)| (path.to_string(), count))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("strings".to_string(), 2),
                ("strings/repeat".to_string(), 1),
                ("numbers".to_string(), 1),
            ]
        );
    }
}

use crate::action::Action;
use crate::core::expectation::Expectation;
use crate::core::path::GroupPath;

/// One named example: an action paired with its expected outcome.
#[derive(Debug)]
pub struct Demonstration {
    pub path: GroupPath,
    pub description: String,
    pub action: Action,
    pub expectation: Expectation,
}

/// Position of an entry within its group, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Demo(usize),
    Group(usize),
}

/// Named, ordered collection of demonstrations and nested groups.
#[derive(Debug, Default)]
pub struct Group {
    pub name: String,
    entries: Vec<Entry>,
    demos: Vec<Demonstration>,
    groups: Vec<Group>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Descend along `segments`, creating groups on first use.
    pub fn group_mut(&mut self, segments: &[String]) -> &mut Group {
        let Some((first, rest)) = segments.split_first() else {
            return self;
        };
        let index = match self.groups.iter().position(|group| group.name == *first) {
            Some(index) => index,
            None => {
                self.groups.push(Group::new(first.clone()));
                self.entries.push(Entry::Group(self.groups.len() - 1));
                self.groups.len() - 1
            }
        };
        self.groups[index].group_mut(rest)
    }

    pub fn push(&mut self, demo: Demonstration) {
        self.demos.push(demo);
        self.entries.push(Entry::Demo(self.demos.len() - 1));
    }

    /// Nested groups in registration order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Demonstrations registered directly in this group.
    pub fn own_demonstrations(&self) -> &[Demonstration] {
        &self.demos
    }

    /// Depth-first walk in entry order.
    pub fn demonstrations(&self) -> Vec<&Demonstration> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Demonstration>) {
        for entry in &self.entries {
            match *entry {
                Entry::Demo(index) => out.push(&self.demos[index]),
                Entry::Group(index) => self.groups[index].collect(out),
            }
        }
    }

    /// Number of demonstrations in this group and below.
    pub fn count(&self) -> usize {
        self.demos.len() + self.groups.iter().map(Group::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;

    fn demo(path: &GroupPath, description: &str) -> Demonstration {
        Demonstration {
            path: path.clone(),
            description: description.to_string(),
            action: Action::value(|| 1),
            expectation: Expectation::Equal(Value::from(1)),
        }
    }

    #[test]
    fn walks_in_registration_order_within_groups() {
        let mut root = Group::default();
        let strings = GroupPath::from(["strings"]);
        let repeat = GroupPath::from(["strings", "repeat"]);
        let numbers = GroupPath::from(["numbers"]);

        root.group_mut(strings.segments()).push(demo(&strings, "a"));
        root.group_mut(numbers.segments()).push(demo(&numbers, "b"));
        root.group_mut(repeat.segments()).push(demo(&repeat, "c"));
        root.group_mut(strings.segments()).push(demo(&strings, "d"));

        let order: Vec<&str> = root
            .demonstrations()
            .iter()
            .map(|demo| demo.description.as_str())
            .collect();
        assert_eq!(order, vec!["a", "c", "d", "b"]);
        assert_eq!(root.count(), 4);
    }
}

//! In-memory catalog of demonstrations and its registration surface.

use std::collections::HashSet;
use std::future::Future;

use thiserror::Error;
use tracing::trace;

use crate::action::{Action, Completion};
use crate::core::expectation::{ErrorMatch, Expectation};
use crate::core::invariants::validate_registration;
use crate::core::path::GroupPath;
use crate::core::selector::{list_groups, select};
use crate::core::value::Value;
use crate::tree::{Demonstration, Group};

/// Mistakes in the catalog itself, surfaced at registration time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("duplicate demonstration {description:?} in group {path}")]
    DuplicateRegistration {
        path: GroupPath,
        description: String,
    },
    #[error("invalid demonstration {description:?} in group {path}: {reason}")]
    InvalidRegistration {
        path: GroupPath,
        description: String,
        reason: String,
    },
}

/// Registered demonstrations, grouped as a tree. Immutable once built.
#[derive(Debug, Default)]
pub struct Catalog {
    root: Group,
    seen: HashSet<(GroupPath, String)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one demonstration under `group`.
    pub fn register(
        &mut self,
        group: impl Into<GroupPath>,
        description: impl Into<String>,
        action: Action,
        expectation: Expectation,
    ) -> Result<(), RegistrationError> {
        let path = group.into();
        let description = description.into();

        let errors = validate_registration(&path, &description, &action, &expectation);
        if !errors.is_empty() {
            return Err(RegistrationError::InvalidRegistration {
                path,
                description,
                reason: errors.join("; "),
            });
        }

        let key = (path.clone(), description.clone());
        if self.seen.contains(&key) {
            return Err(RegistrationError::DuplicateRegistration { path, description });
        }
        self.seen.insert(key);

        trace!(group = %path, description = %description, kind = %expectation.kind(), "registered");
        self.root.group_mut(path.segments()).push(Demonstration {
            path,
            description,
            action,
            expectation,
        });
        Ok(())
    }

    /// Declarative registration scoped to a group.
    pub fn scope(&mut self, group: impl Into<GroupPath>) -> Scope<'_> {
        Scope {
            catalog: self,
            path: group.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Demonstrations under `filter`, in run order.
    pub fn select(&self, filter: Option<&GroupPath>) -> Vec<&Demonstration> {
        select(&self.root, filter)
    }

    /// Group paths with their demonstration counts, in registration order.
    pub fn groups(&self) -> Vec<(GroupPath, usize)> {
        list_groups(&self.root)
    }
}

/// Registration helper bound to one group path.
///
/// ```
/// use catalog::{Catalog, ErrorKind, Thrown, Value};
///
/// let mut catalog = Catalog::new();
/// let mut strings = catalog.scope(["strings"]);
/// strings.equal("includes finds a character", || "xyz".contains('x'), true)?;
/// strings
///     .group("repeat")
///     .throws("rejects a negative count", || Err(Thrown::range_error("-1")), ErrorKind::RangeError)?;
/// assert_eq!(catalog.len(), 2);
/// # Ok::<(), catalog::RegistrationError>(())
/// ```
pub struct Scope<'a> {
    catalog: &'a mut Catalog,
    path: GroupPath,
}

impl Scope<'_> {
    pub fn path(&self) -> &GroupPath {
        &self.path
    }

    /// Nested scope for a subgroup.
    pub fn group(&mut self, name: impl Into<String>) -> Scope<'_> {
        Scope {
            path: self.path.child(name),
            catalog: &mut *self.catalog,
        }
    }

    pub fn check(
        &mut self,
        description: impl Into<String>,
        action: Action,
        expectation: Expectation,
    ) -> Result<(), RegistrationError> {
        self.catalog
            .register(self.path.clone(), description, action, expectation)
    }

    /// `actual === expected`.
    pub fn equal<F, V>(
        &mut self,
        description: impl Into<String>,
        action: F,
        expected: impl Into<Value>,
    ) -> Result<(), RegistrationError>
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        self.check(
            description,
            Action::value(action),
            Expectation::Equal(expected.into()),
        )
    }

    /// `Object.is(actual, expected)`.
    pub fn same_value<F, V>(
        &mut self,
        description: impl Into<String>,
        action: F,
        expected: impl Into<Value>,
    ) -> Result<(), RegistrationError>
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        self.check(
            description,
            Action::value(action),
            Expectation::SameValue(expected.into()),
        )
    }

    pub fn deep_equal<F, V>(
        &mut self,
        description: impl Into<String>,
        action: F,
        expected: impl Into<Value>,
    ) -> Result<(), RegistrationError>
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        self.check(
            description,
            Action::value(action),
            Expectation::DeepEqual(expected.into()),
        )
    }

    /// The action must throw something matching `matcher`.
    pub fn throws<F>(
        &mut self,
        description: impl Into<String>,
        action: F,
        matcher: impl Into<ErrorMatch>,
    ) -> Result<(), RegistrationError>
    where
        F: Fn() -> Completion + Send + Sync + 'static,
    {
        self.check(
            description,
            Action::sync(action),
            Expectation::Throws(matcher.into()),
        )
    }

    /// The future must resolve; `check` optionally inspects the value.
    pub fn resolves<F, Fut>(
        &mut self,
        description: impl Into<String>,
        action: F,
        check: Option<Expectation>,
    ) -> Result<(), RegistrationError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Completion> + Send + 'static,
    {
        self.check(
            description,
            Action::future(action),
            Expectation::Resolves(check.map(Box::new)),
        )
    }

    pub fn rejects<F, Fut>(
        &mut self,
        description: impl Into<String>,
        action: F,
        matcher: impl Into<ErrorMatch>,
    ) -> Result<(), RegistrationError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Completion> + Send + 'static,
    {
        self.check(
            description,
            Action::future(action),
            Expectation::Rejects(matcher.into()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ErrorKind, Thrown};

    #[test]
    fn duplicate_pair_is_rejected_on_second_registration() {
        let mut catalog = Catalog::new();
        catalog
            .register(
                ["arithmetic"],
                "adds 1+2",
                Action::value(|| 1 + 2),
                Expectation::Equal(Value::from(3)),
            )
            .expect("first registration");

        let err = catalog
            .register(
                ["arithmetic"],
                "adds 1+2",
                Action::value(|| 3),
                Expectation::Equal(Value::from(3)),
            )
            .expect_err("duplicate");
        assert_eq!(
            err,
            RegistrationError::DuplicateRegistration {
                path: GroupPath::from(["arithmetic"]),
                description: "adds 1+2".to_string(),
            }
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn same_description_in_other_group_is_allowed() {
        let mut catalog = Catalog::new();
        let mut root = catalog.scope(["strings"]);
        root.group("startsWith")
            .equal("works with a string", || true, true)
            .expect("startsWith");
        root.group("endsWith")
            .equal("works with a string", || true, true)
            .expect("endsWith");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn invalid_registration_is_not_stored() {
        let mut catalog = Catalog::new();
        let err = catalog
            .scope(["errors"])
            .throws("", || Err(Thrown::range_error("x")), ErrorKind::RangeError)
            .expect_err("empty description");
        assert!(matches!(err, RegistrationError::InvalidRegistration { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn groups_lists_nested_paths() {
        let mut catalog = Catalog::new();
        let mut scope = catalog.scope(["strings"]);
        scope
            .group("repeat")
            .equal("x3", || "x".repeat(3), "xxx")
            .expect("register");
        let groups = catalog.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].0.to_string(), "strings/repeat");
    }
}

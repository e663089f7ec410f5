//! The kata catalog: language trivia as runnable demonstrations.
//!
//! Each topic module registers its demonstrations under its own top-level
//! group. Registration order is run order.

mod arrays;
mod basics;
mod classes;
mod destructuring;
mod functions;
mod numbers;
mod objects;
mod promises;
mod spread_rest;
mod strings;

use catalog::{
    Action, Catalog, Completion, Expectation, RegistrationError, Scope, Value,
};

/// Register every topic.
pub fn register_all(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    basics::register(catalog)?;
    strings::register(catalog)?;
    numbers::register(catalog)?;
    functions::register(catalog)?;
    destructuring::register(catalog)?;
    spread_rest::register(catalog)?;
    objects::register(catalog)?;
    arrays::register(catalog)?;
    classes::register(catalog)?;
    promises::register(catalog)?;
    Ok(())
}

/// A fresh catalog with every kata registered.
pub fn catalog() -> Result<Catalog, RegistrationError> {
    let mut catalog = Catalog::new();
    register_all(&mut catalog)?;
    Ok(catalog)
}

/// `actual === expected` for an action that may also throw.
fn returns<F>(
    scope: &mut Scope<'_>,
    description: &str,
    action: F,
    expected: impl Into<Value>,
) -> Result<(), RegistrationError>
where
    F: Fn() -> Completion + Send + Sync + 'static,
{
    scope.check(
        description,
        Action::sync(action),
        Expectation::Equal(expected.into()),
    )
}

#[cfg(test)]
mod tests {
    use catalog::{RunOptions, run};

    use super::*;

    #[tokio::test]
    async fn every_kata_passes() {
        let catalog = catalog().expect("catalog registers");
        let report = run(&catalog, &RunOptions::default()).await;
        assert!(report.total > 100, "only {} katas registered", report.total);
        assert!(
            report.is_success(),
            "failing katas:\n{}",
            report.render_text(false)
        );
    }

    #[test]
    fn every_topic_has_a_top_level_group() {
        let catalog = catalog().expect("catalog registers");
        let top_level: Vec<String> = catalog
            .groups()
            .into_iter()
            .filter(|(path, _)| path.segments().len() == 1)
            .map(|(path, _)| path.to_string())
            .collect();
        assert_eq!(
            top_level,
            [
                "basics",
                "strings",
                "numbers",
                "functions",
                "destructuring",
                "spread-rest",
                "objects",
                "arrays",
                "classes",
                "promises",
            ]
        );
    }
}

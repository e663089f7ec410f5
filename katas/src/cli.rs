//! CLI command implementations. Each returns the process exit code.

use std::path::Path;

use anyhow::{Context, Result, bail};
use catalog::exit_codes;
use catalog::io::config::{CONFIG_FILE, ReportFormat, RunConfig, load_config, write_config};
use catalog::{Catalog, GroupPath, RunOptions, run};
use tracing::{debug, info};

use crate::config::{RunOverrides, apply_overrides};
use crate::content;

/// Print every group path with its demonstration count.
pub fn cmd_list(filter: Option<&GroupPath>) -> Result<i32> {
    let catalog = load_catalog()?;
    let groups = matching_groups(&catalog, filter)?;
    for (path, count) in groups {
        println!("{path} {count}");
    }
    Ok(exit_codes::OK)
}

/// Run the selected katas and print the report.
pub fn cmd_run(
    config_path: &Path,
    filter: Option<GroupPath>,
    overrides: &RunOverrides,
) -> Result<i32> {
    let cfg = load_config(config_path)?;
    let cfg = apply_overrides(cfg, overrides).context("apply command-line flags")?;
    debug!(?cfg, "config resolved");

    let catalog = load_catalog()?;
    matching_groups(&catalog, filter.as_ref())?;

    let options = RunOptions::from_config(&cfg, filter);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("start async runtime")?;
    let report = runtime.block_on(run(&catalog, &options));

    match cfg.format {
        ReportFormat::Text => print!("{}", report.render_text(cfg.verbose)),
        ReportFormat::Json => print!("{}", report.render_json()?),
    }
    Ok(report.exit_code())
}

/// Write the default `katas.toml` into `dir`.
pub fn cmd_init(dir: &Path, force: bool) -> Result<i32> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        info!(path = %path.display(), "config exists, leaving it alone");
        println!("{} already exists (use --force to overwrite)", path.display());
        return Ok(exit_codes::OK);
    }
    write_config(&path, &RunConfig::default())?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn load_catalog() -> Result<Catalog> {
    let catalog = content::catalog().context("register katas")?;
    debug!(katas = catalog.len(), "catalog registered");
    Ok(catalog)
}

/// Groups under `filter`; a filter that names no group is an invocation error.
fn matching_groups(catalog: &Catalog, filter: Option<&GroupPath>) -> Result<Vec<(GroupPath, usize)>> {
    let groups: Vec<_> = catalog
        .groups()
        .into_iter()
        .filter(|(path, _)| filter.is_none_or(|prefix| path.starts_with(prefix)))
        .collect();
    if let Some(prefix) = filter
        && groups.is_empty()
    {
        bail!("no group matches filter {prefix}");
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_filter_is_an_error() {
        let catalog = content::catalog().expect("catalog");
        let filter: GroupPath = "no-such-topic".parse().expect("path");
        let err = matching_groups(&catalog, Some(&filter)).expect_err("unknown");
        assert!(err.to_string().contains("no-such-topic"));
    }

    #[test]
    fn filter_keeps_the_group_and_its_subgroups() {
        let catalog = content::catalog().expect("catalog");
        let filter: GroupPath = "strings/repeat".parse().expect("path");
        let groups = matching_groups(&catalog, Some(&filter)).expect("groups");
        let names: Vec<String> = groups.iter().map(|(path, _)| path.to_string()).collect();
        assert_eq!(names, ["strings/repeat", "strings/repeat/own-class"]);
    }

    #[test]
    fn init_respects_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "verbose = true\n").expect("write");

        cmd_init(temp.path(), false).expect("init");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "verbose = true\n");

        cmd_init(temp.path(), true).expect("init --force");
        assert_eq!(load_config(&path).expect("load"), RunConfig::default());
    }
}

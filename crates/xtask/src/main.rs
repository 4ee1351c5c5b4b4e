use std::collections::BTreeMap;

use anyhow::Context;
use serde::Deserialize;

/// Crates that must stay free of runtime, storage and transport stacks.
const PURE_CRATES: [&str; 2] = ["locatr-domain", "locatr-shared"];

const FORBIDDEN_IN_PURE: [&str; 7] = [
    "axum",
    "tower",
    "tower-http",
    "sqlx",
    "reqwest",
    "tokio",
    "locatr-engine",
];

/// Internal crates each crate may depend on.
const ALLOWED_INTERNAL: [(&str, &[&str]); 4] = [
    ("locatr-domain", &[]),
    ("locatr-shared", &["locatr-domain"]),
    ("locatr-engine", &["locatr-domain", "locatr-shared"]),
    ("locatr-client", &["locatr-shared"]),
];

#[derive(Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Deserialize)]
struct Dependency {
    name: String,
    /// `null` for normal dependencies, `"dev"` or `"build"` otherwise.
    kind: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let violations = violations(&metadata);
    if violations.is_empty() {
        println!("arch-check: OK ({} packages)", metadata.packages.len());
        return Ok(());
    }

    for violation in &violations {
        eprintln!("  {violation}");
    }
    anyhow::bail!("arch-check found {} violation(s)", violations.len())
}

fn violations(metadata: &Metadata) -> Vec<String> {
    let allowed: BTreeMap<&str, &[&str]> = ALLOWED_INTERNAL.into_iter().collect();
    let mut found = Vec::new();

    for package in &metadata.packages {
        let Some(internal_allowed) = allowed.get(package.name.as_str()) else {
            continue;
        };

        for dep in package.dependencies.iter().filter(|d| d.kind.is_none()) {
            let name = dep.name.as_str();
            if PURE_CRATES.contains(&package.name.as_str()) && FORBIDDEN_IN_PURE.contains(&name) {
                found.push(format!("{} must not depend on {name}", package.name));
            } else if name.starts_with("locatr-") && !internal_allowed.contains(&name) {
                found.push(format!("{} must not depend on {name}", package.name));
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(json: &str) -> Metadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn clean_layering_passes() {
        let meta = metadata(
            r#"{"packages":[
                {"name":"locatr-shared","dependencies":[{"name":"locatr-domain","kind":null},{"name":"serde","kind":null}]},
                {"name":"locatr-client","dependencies":[{"name":"locatr-shared","kind":null},{"name":"locatr-engine","kind":"dev"}]}
            ]}"#,
        );
        assert!(violations(&meta).is_empty());
    }

    #[test]
    fn runtime_dependency_in_domain_is_reported() {
        let meta = metadata(
            r#"{"packages":[{"name":"locatr-domain","dependencies":[{"name":"tokio","kind":null}]}]}"#,
        );
        assert_eq!(violations(&meta), vec!["locatr-domain must not depend on tokio"]);
    }

    #[test]
    fn client_may_not_link_the_engine() {
        let meta = metadata(
            r#"{"packages":[{"name":"locatr-client","dependencies":[{"name":"locatr-engine","kind":null}]}]}"#,
        );
        assert_eq!(violations(&meta).len(), 1);
    }
}

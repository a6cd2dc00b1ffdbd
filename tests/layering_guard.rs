//! Layering guardrails to keep `servergen_core` pure.
//!
//! The core crate holds vocabulary, type mappings and naming only. It must stay free of I/O and of third-party
//! crates so the mapping tables can be reused by any front-end. This test scans its `Cargo.toml` and fails if
//! a `[dependencies]` table lists anything.

fn dependency_lines(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut found = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if !line_no_comment.is_empty() {
            found.push(line_no_comment.to_string());
        }
    }
    found
}

#[test]
fn core_has_no_dependencies() {
    let manifest = include_str!("../crates/servergen_core/Cargo.toml");
    let deps = dependency_lines(manifest);
    assert!(deps.is_empty(), "`servergen_core` must not have dependencies, found: {deps:?}");
}

#[test]
fn root_depends_on_core() {
    let manifest = include_str!("../Cargo.toml");
    assert!(dependency_lines(manifest).iter().any(|line| line.starts_with("servergen_core")));
}

#[test]
fn scanner_sees_dependencies() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\n# comment\nserde = \"1\"\n\n\
                    [dev-dependencies]\ninsta = \"1\"\n";
    let deps = dependency_lines(manifest);
    assert_eq!(deps, vec!["serde = \"1\"".to_string()]);
}

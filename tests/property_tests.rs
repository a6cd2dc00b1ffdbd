//! Property-based tests for servergen
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use servergen::config::GenerationConfig;
use servergen::insert_before_marker;
use servergen::plan::manifest;
use servergen::plan::{Scope, plan};
use servergen_core::naming::{normalize, to_kebab_case, to_pascal_case};

const MARKER: &str = "servergen-needle-add-entity-model";

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9]{1,7}", 1..5)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

// =============================================================================
// Normalizer Properties
// =============================================================================

proptest! {
    /// Property: normalize(normalize(x)) == normalize(x)
    #[test]
    fn normalize_is_idempotent(input in "[A-Za-z0-9 _-]{0,24}") {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Property: idempotence also holds for arbitrary Unicode input
    #[test]
    fn normalize_is_idempotent_for_any_text(input in "\\PC{0,24}") {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Property: output only contains lowercase letters, digits and single inner underscores
    #[test]
    fn normalize_output_is_canonical(input in "[A-Za-z0-9 _-]{0,24}") {
        let out = normalize(&input);
        prop_assert!(out.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!out.starts_with('_') && !out.ends_with('_'));
        prop_assert!(!out.contains("__"));
    }

    /// Property: PascalCase, camelCase, kebab-case and spaced spellings converge
    #[test]
    fn spellings_converge(words in words()) {
        let expected = words.join("_");
        let pascal: String = words.iter().map(|w| capitalize(w)).collect();
        let camel: String = words[0].clone() + &words[1..].iter().map(|w| capitalize(w)).collect::<String>();
        let kebab = words.join("-");
        let spaced = words.join(" ");

        prop_assert_eq!(normalize(&pascal), expected.clone());
        prop_assert_eq!(normalize(&camel), expected.clone());
        prop_assert_eq!(normalize(&kebab), expected.clone());
        prop_assert_eq!(normalize(&spaced), expected);
    }

    /// Property: derived forms normalize back to the same name
    #[test]
    fn derived_forms_round_trip(words in words()) {
        let name = words.join("_");
        prop_assert_eq!(normalize(&to_kebab_case(&name)), name.clone());
        prop_assert_eq!(normalize(&to_pascal_case(&name)), name);
    }
}

// =============================================================================
// Injection Properties
// =============================================================================

proptest! {
    /// Property: removing the inserted block gives back the original bytes
    #[test]
    fn injection_preserves_other_bytes(
        before in prop::collection::vec("[ -~]{0,30}", 0..6),
        after in prop::collection::vec("[ -~]{0,30}", 0..6),
        indent in "[ ]{0,8}",
        fragment in "[a-z:;_ ]{1,20}",
    ) {
        prop_assume!(before.iter().chain(after.iter()).all(|line| !line.contains(MARKER)));
        prop_assume!(!fragment.trim().is_empty() && fragment == fragment.trim_start());

        let mut original = String::new();
        for line in &before {
            original.push_str(line);
            original.push('\n');
        }
        let marker_line_start = original.len();
        original.push_str(&format!("{indent}// {MARKER}\n"));
        for line in &after {
            original.push_str(line);
            original.push('\n');
        }

        let updated = insert_before_marker(&original, MARKER, &fragment).unwrap();
        let inserted = format!("{indent}{fragment}\n");
        prop_assert_eq!(&updated[..marker_line_start], &original[..marker_line_start]);
        prop_assert_eq!(&updated[marker_line_start..marker_line_start + inserted.len()], inserted.as_str());
        prop_assert_eq!(&updated[marker_line_start + inserted.len()..], &original[marker_line_start..]);
    }

    /// Property: n injections produce n copies, never deduplicated
    #[test]
    fn injection_count_matches_calls(n in 1usize..6) {
        let mut content = format!("// {MARKER}\n");
        for _ in 0..n {
            content = insert_before_marker(&content, MARKER, "pub mod product;").unwrap();
        }
        prop_assert_eq!(content.matches("pub mod product;").count(), n);
    }
}

// =============================================================================
// Planner Properties
// =============================================================================

proptest! {
    /// Property: entity destinations never keep the placeholder and always use the normalized name
    #[test]
    fn entity_plan_binds_normalized_name(words in words()) {
        let pascal: String = words.iter().map(|w| capitalize(w)).collect();
        let files = plan(manifest::ENTITY_FILES, &GenerationConfig::new("shop"), Scope::Entity(&pascal)).unwrap();
        let normalized = words.join("_");
        for file in &files {
            prop_assert!(!file.destination.contains("_entityFileName_"));
            prop_assert!(file.destination.contains(&normalized));
        }
    }
}

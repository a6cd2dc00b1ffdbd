//! Identifier normalization shared by file naming and generated symbol names.
//!
//! [`normalize`] is the one canonical transformation: every component that turns an entity name into a path
//! segment, a module name or a table name goes through it, so two call sites can never disagree about what
//! `OrderItem` becomes.
//!
//! ## Rules
//! - A word boundary is placed before an uppercase letter that follows a lowercase letter or a digit
//!   (`fooBar`, `Foo2Bar`), and before the last uppercase letter of an acronym run when a lowercase letter
//!   follows it (`HTTPServer` → `http_server`).
//! - Spaces, hyphens, underscores and any other non-alphanumeric characters are separators; runs of them
//!   collapse into one `_`, and leading/trailing separators are dropped.
//! - Output is lowercase. Characters a lowercase mapping expands into that are not alphanumeric (such as the
//!   combining dot of `İ`) are dropped, so the output is a fixed point.
//!
//! ## Examples
//! ```rust
//! use servergen_core::naming::normalize;
//!
//! assert_eq!(normalize("OrderItem"), "order_item");
//! assert_eq!(normalize("orderItem"), "order_item");
//! assert_eq!(normalize("order-item"), "order_item");
//! assert_eq!(normalize("order item"), "order_item");
//! assert_eq!(normalize(&normalize("OrderItem")), "order_item");
//! ```

/// Normalize an identifier to lowercase underscore-separated form.
pub fn normalize(identifier: &str) -> String {
    join_words(&split_words(identifier), "_")
}

/// Kebab-case form (`order-item`), used for URL paths.
pub fn to_kebab_case(identifier: &str) -> String {
    join_words(&split_words(identifier), "-")
}

/// PascalCase form (`OrderItem`), used for generated type names.
pub fn to_pascal_case(identifier: &str) -> String {
    split_words(identifier)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Pluralize the last word of a normalized or kebab-case name.
///
/// This covers the regular English suffix rules only; irregular nouns keep the `s` suffix.
pub fn pluralize(word: &str) -> String {
    let ends_with_consonant_y = word.ends_with('y')
        && word
            .chars()
            .rev()
            .nth(1)
            .is_some_and(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
    if ends_with_consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| word.ends_with(suffix)) {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

/// Collapse runs of underscores into one (`rel_store__product` → `rel_store_product`).
pub fn collapse_underscores(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Split an identifier into lowercase words.
fn split_words(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush(&mut words, &mut current);
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower);
            if boundary {
                flush(&mut words, &mut current);
            }
        }
        // Lowercasing may expand into combining marks; keep only what a later pass treats as word content
        current.extend(c.to_lowercase().filter(|l| l.is_alphanumeric() && !l.is_uppercase()));
    }
    flush(&mut words, &mut current);
    words
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

fn join_words(words: &[String], separator: &str) -> String {
    words.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_converges_across_spellings() {
        for input in ["OrderItem", "orderItem", "order-item", "order item", "order_item", "Order Item"] {
            assert_eq!(normalize(input), "order_item", "input: {input}");
        }
    }

    #[test]
    fn test_normalize_acronyms() {
        assert_eq!(normalize("HTTPServer"), "http_server");
        assert_eq!(normalize("userID"), "user_id");
    }

    #[test]
    fn test_normalize_digits() {
        assert_eq!(normalize("Order2Item"), "order2_item");
        assert_eq!(normalize("v2"), "v2");
    }

    #[test]
    fn test_normalize_collapses_separator_runs() {
        assert_eq!(normalize("--my  test__app--"), "my_test_app");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_non_ascii_is_idempotent() {
        assert_eq!(normalize("İstanbulOffice"), "istanbul_office");
        let inputs = ["İstanbulOffice", "ÉcoleNormale", "straßeName", "ǅemal", "Ⅻtest", "ΣίσυφοςΛίθος"];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_kebab_and_pascal() {
        assert_eq!(to_kebab_case("OrderItem"), "order-item");
        assert_eq!(to_pascal_case("order_item"), "OrderItem");
        assert_eq!(to_pascal_case("order-item"), "OrderItem");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("product"), "products");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("order-item"), "order-items");
    }

    #[test]
    fn test_collapse_underscores() {
        assert_eq!(collapse_underscores("rel_store__product"), "rel_store_product");
        assert_eq!(collapse_underscores("plain"), "plain");
    }
}

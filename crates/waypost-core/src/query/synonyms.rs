//! Equivalence classes for category and tag filters.
//!
//! Every value in a class is equivalent to every other: filtering by any
//! member matches posts carrying any member. A value outside all classes
//! only matches itself.

/// Category synonym classes.
pub const CATEGORY_SYNONYMS: &[(&str, &[&str])] = &[
    ("technology", &["technology", "tech"]),
    ("food", &["food", "cuisine", "cooking"]),
    ("travel", &["travel"]),
];

/// Tag (subcategory) synonym classes.
pub const TAG_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "webdev",
        &["webdev", "web development", "web dev", "development"],
    ),
    ("recipes", &["recipes", "recipe", "cooking"]),
    ("hiking", &["hiking"]),
];

/// Expand a filter value into the lower-cased set of values it matches.
pub fn expand(table: &[(&str, &[&str])], value: &str) -> Vec<String> {
    let key = value.trim().to_lowercase();
    let class = table
        .iter()
        .find(|(canonical, class)| *canonical == key || class.contains(&key.as_str()));
    match class {
        Some((_, class)) => class.iter().map(|s| s.to_string()).collect(),
        None => vec![key],
    }
}

/// Expand a category filter value.
pub fn expand_category(value: &str) -> Vec<String> {
    expand(CATEGORY_SYNONYMS, value)
}

/// Expand a tag filter value.
pub fn expand_tag(value: &str) -> Vec<String> {
    expand(TAG_SYNONYMS, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_category_expands() {
        assert_eq!(expand_category("Technology"), vec!["technology", "tech"]);
        assert_eq!(expand_category("food"), vec!["food", "cuisine", "cooking"]);
        assert_eq!(expand_category("travel"), vec!["travel"]);
    }

    #[test]
    fn test_unknown_value_matches_itself() {
        assert_eq!(expand_category(" Sports "), vec!["sports"]);
        assert_eq!(expand_tag("tech"), vec!["tech"]);
    }

    #[test]
    fn test_any_member_expands_to_whole_class() {
        assert_eq!(expand_category("tech"), vec!["technology", "tech"]);
        assert_eq!(expand_category("Cuisine"), vec!["food", "cuisine", "cooking"]);
        assert_eq!(
            expand_tag(" Web Development "),
            vec!["webdev", "web development", "web dev", "development"]
        );
        assert_eq!(expand_tag("recipe"), vec!["recipes", "recipe", "cooking"]);
    }

    #[test]
    fn test_classes_do_not_overlap_within_a_table() {
        for table in [CATEGORY_SYNONYMS, TAG_SYNONYMS] {
            let mut seen = Vec::new();
            for (canonical, class) in table {
                assert!(class.contains(canonical));
                for value in *class {
                    assert!(!seen.contains(value), "{value} is in two classes");
                    seen.push(*value);
                }
            }
        }
    }

    #[test]
    fn test_tag_classes() {
        assert!(expand_tag("WebDev").contains(&"web development".to_string()));
        assert_eq!(expand_tag("recipes"), vec!["recipes", "recipe", "cooking"]);
        assert_eq!(expand_tag("hiking"), vec!["hiking"]);
    }
}

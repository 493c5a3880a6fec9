/// Substances that trigger a warning when they appear in a food name.
pub const HARMFUL_INGREDIENTS: &[&str] = &[
    "sugar",
    "sodium",
    "trans fat",
    "artificial sweeteners",
    "MSG",
    "high fructose corn syrup",
];

/// Case-insensitive substring scan of a food name against the keyword table.
/// Substring on purpose: "sugarcane" warns about sugar.
pub fn annotate(food_name: &str) -> Vec<String> {
    let lowered = food_name.to_lowercase();
    HARMFUL_INGREDIENTS
        .iter()
        .filter(|keyword| lowered.contains(&keyword.to_lowercase()))
        .map(|keyword| format!("Contains {keyword}, which may be harmful to health."))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_food_has_no_warnings() {
        assert!(annotate("apple").is_empty());
        assert!(annotate("grilled chicken").is_empty());
    }

    #[test]
    fn sugar_matches_any_case() {
        let warnings = annotate("SUGAR glazed donut");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Contains sugar"));
    }

    #[test]
    fn substring_matches_sugarcane() {
        let warnings = annotate("sugarcane juice");
        assert_eq!(
            warnings,
            vec!["Contains sugar, which may be harmful to health.".to_string()]
        );
    }

    #[test]
    fn uppercase_keyword_matches_lowercase_name() {
        let warnings = annotate("soup with msg");
        assert_eq!(
            warnings,
            vec!["Contains MSG, which may be harmful to health.".to_string()]
        );
    }

    #[test]
    fn multiple_keywords_all_reported() {
        let warnings = annotate("high fructose corn syrup sugar bomb");
        assert_eq!(warnings.len(), 2);
    }
}

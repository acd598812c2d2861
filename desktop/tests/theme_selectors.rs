#![cfg(test)]
/*!
Selectors the profile components put in their markup must exist in the shared
theme. If you rename a class in `ui/src/components`, update REQUIRED_SELECTORS.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".page-profile",
    // Buttons
    ".button {",
    ".button--primary",
    // Chart card
    ".profile-card {",
    ".profile-card__meta",
    ".profile-card__meta--success",
    ".profile-card__meta--error",
    ".profile-card__placeholder",
    ".profile-chart",
    ".profile-chart__image",
    // Export panel
    ".profile-export",
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<_> = REQUIRED_SELECTORS
        .iter()
        .filter(|sel| !THEME_CSS.contains(*sel))
        .copied()
        .collect();

    assert!(
        missing.is_empty(),
        "Missing {} required CSS selectors/tokens in unified theme:\n{}",
        missing.len(),
        missing.join("\n")
    );
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 1_500,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars)"
    );
}

#[test]
fn status_modifiers_come_in_pairs() {
    let has_success = THEME_CSS.contains(".profile-card__meta--success");
    let has_error = THEME_CSS.contains(".profile-card__meta--error");
    assert!(
        has_success && has_error,
        "Export status modifiers missing (success: {has_success}, error: {has_error})"
    );
}

//! Formatting helpers for chart text.

use super::profile::DisplayMeta;

pub const TITLE_PREFIX: &str = "Profil cognitif";

/// `Profil cognitif #42 (30 ans)`, or `Profil cognitif #42` when the age is unknown.
pub fn profile_title(meta: &DisplayMeta) -> String {
    match meta.age {
        Some(age) => format!("{TITLE_PREFIX} #{} ({age} ans)", meta.case_number),
        None => format!("{TITLE_PREFIX} #{}", meta.case_number),
    }
}

/// Whole percentiles print without decimals, others with one.
pub fn format_percentile(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Lowercase ASCII slug for file names; anything else collapses to `-`.
pub fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "dossier".to_string()
    } else {
        trimmed.to_string()
    }
}

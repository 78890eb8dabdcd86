// ABOUTME: Pure display formatting for raw recipe fields
// ABOUTME: Minutes, ratings, calories, serves, nutrient values, and text helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

//! Display-string helpers.
//!
//! Every function here is pure and substitutes a placeholder for
//! missing data rather than failing; nothing in the formatting layer
//! can halt interaction.

/// Placeholder shown for absent optional fields
pub const PLACEHOLDER: &str = "-";

/// Placeholder shown when a recipe carries no description
pub const NO_DESCRIPTION: &str = "No description available.";

/// Format a duration in minutes as `1h 30m` / `45m`, or `-` when absent
#[must_use]
pub fn format_minutes(minutes: Option<u32>) -> String {
    match minutes {
        None | Some(0) => PLACEHOLDER.to_owned(),
        Some(m) => {
            let hours = m / 60;
            let mins = m % 60;
            if hours > 0 {
                format!("{hours}h {mins}m")
            } else {
                format!("{mins}m")
            }
        }
    }
}

/// Format a rating to one decimal place, or `-` when absent
#[must_use]
pub fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| PLACEHOLDER.to_owned(), |r| format!("{r:.1}"))
}

/// Format calories as a rounded `NNN kcal`, or `-` when absent
#[must_use]
pub fn format_calories(calories: Option<f64>) -> String {
    calories.map_or_else(
        || PLACEHOLDER.to_owned(),
        |c| format!("{} kcal", c.round() as i64),
    )
}

/// Format the serving count, substituting the default of 4 when absent
#[must_use]
pub fn format_serves(serves: Option<u32>) -> String {
    serves.unwrap_or(crate::DEFAULT_SERVES).to_string()
}

/// Description text with the placeholder substituted when absent/blank
#[must_use]
pub fn format_description(description: Option<&str>) -> &str {
    match description {
        Some(text) if !text.trim().is_empty() => text,
        _ => NO_DESCRIPTION,
    }
}

/// Pull a numeric value out of a loosely typed nutrient entry.
///
/// Upstream nutrient maps mix numbers with strings like `"431 kcal"` or
/// `"24 g"`; this parses the leading decimal when the value is text.
#[must_use]
pub fn nutrient_amount(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => {
            let leading: String = s
                .trim_start()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            leading.parse().ok()
        }
        _ => None,
    }
}

/// Truncate to at most `max` characters, appending an ellipsis when cut
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}\u{2026}")
}

/// Uppercase the first character, e.g. `protein` -> `Protein`
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

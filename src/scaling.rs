// ABOUTME: Best-effort portion scaling by rewriting leading numeric quantities
// ABOUTME: Display-only transform; fractions, ranges, and embedded numbers pass through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

use std::sync::OnceLock;

use regex::Regex;

/// Matches a decimal quantity at the start of an ingredient line
static LEADING_QUANTITY: OnceLock<Regex> = OnceLock::new();

fn leading_quantity() -> &'static Regex {
    LEADING_QUANTITY.get_or_init(|| {
        // Anchored digits with an optional decimal part. Fractions
        // ("1/2") and ranges ("2-3") would misparse as their first
        // component, so lines where the quantity is followed by '/',
        // '-', or another '.' are excluded in scale_line.
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^\d+(?:\.\d+)?").unwrap()
    })
}

/// Rewrite the leading quantity of each ingredient line by
/// `new_serves / original_serves`, rounding to one decimal place.
///
/// This is a display-only heuristic: results are never persisted and
/// lines that do not start with a plain decimal quantity are returned
/// unchanged. It makes no correctness guarantee for fractions, ranges,
/// or quantities embedded after text.
#[must_use]
pub fn scale_ingredients(lines: &[String], original_serves: u32, new_serves: u32) -> Vec<String> {
    let original = if original_serves == 0 {
        crate::DEFAULT_SERVES
    } else {
        original_serves
    };
    let ratio = f64::from(new_serves) / f64::from(original);

    lines.iter().map(|line| scale_line(line, ratio)).collect()
}

/// Scale a single line; used by the list-wide transform
#[must_use]
pub fn scale_line(line: &str, ratio: f64) -> String {
    let Some(found) = leading_quantity().find(line) else {
        return line.to_owned();
    };

    let rest = &line[found.end()..];
    if rest.starts_with(['/', '-', '.']) {
        // Fraction, range, or something stranger; leave it alone
        return line.to_owned();
    }

    let Ok(quantity) = found.as_str().parse::<f64>() else {
        return line.to_owned();
    };

    let scaled = format_quantity((quantity * ratio * 10.0).round() / 10.0);
    format!("{scaled}{rest}")
}

/// Render a scaled quantity without a spurious `.0` tail
fn format_quantity(value: f64) -> String {
    if (value.fract()).abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ABOUTME: Rendering seam turning view state into displayable output
// ABOUTME: Nutrition bar math plus a plain-text renderer for terminals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

//! # Rendering
//!
//! [`RecipeRenderer`] is the seam between the controller and whatever
//! front end displays the catalogue. The crate ships [`TextRenderer`]
//! for terminal output; a richer front end implements the same trait.

use crate::formatters;
use crate::models::{PageEnvelope, Recipe};
use std::collections::BTreeMap;

/// Calories are drawn against a fixed 800 kcal reference
const CALORIE_BASIS: f64 = 800.0;
/// Non-calorie nutrients share a scale no smaller than this
const NUTRIENT_SCALE_FLOOR: f64 = 50.0;
/// The largest non-calorie nutrient fills this much of its bar
const NUTRIENT_BASIS_PERCENT: f64 = 80.0;

/// Nutrients surfaced as bars, matched loosely against upstream keys
const BAR_NUTRIENTS: [&str; 4] = ["calories", "protein", "carbohydrate", "fat"];

/// One horizontal bar in the nutrition summary
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionBar {
    /// Display label, capitalized nutrient name
    pub label: String,
    /// Numeric amount as parsed from the recipe
    pub amount: f64,
    /// Bar width as a percentage, already capped at 100
    pub percent: f64,
}

/// Compute the nutrition bars for a recipe's nutrient map.
///
/// Keys are matched case-insensitively by substring, so upstream
/// variants like `carbohydrateContent` or `Total Fat` still land on
/// the right bar. Calories scale against a fixed 800 kcal basis; the
/// remaining nutrients scale relative to the largest of them, floored
/// at 50 so tiny values do not fill the chart.
#[must_use]
pub fn nutrition_bars(recipe: &Recipe) -> Vec<NutritionBar> {
    let mut amounts: BTreeMap<&str, f64> = BTreeMap::new();
    for (key, value) in &recipe.nutrients {
        let lower = key.to_lowercase();
        for name in BAR_NUTRIENTS {
            if lower.contains(name) && !amounts.contains_key(name) {
                if let Some(amount) = formatters::nutrient_amount(value) {
                    amounts.insert(name, amount);
                }
            }
        }
    }

    let non_calorie_max = amounts
        .iter()
        .filter(|(name, _)| **name != "calories")
        .map(|(_, amount)| *amount)
        .fold(0.0_f64, f64::max)
        .max(NUTRIENT_SCALE_FLOOR);

    BAR_NUTRIENTS
        .iter()
        .filter_map(|name| {
            let amount = *amounts.get(name)?;
            let percent = if *name == "calories" {
                (amount / CALORIE_BASIS * 100.0).min(100.0)
            } else {
                (amount / non_calorie_max * NUTRIENT_BASIS_PERCENT).min(100.0)
            };
            Some(NutritionBar {
                label: formatters::capitalize(name),
                amount,
                percent,
            })
        })
        .collect()
}

/// Seam between the controller and a concrete front end
pub trait RecipeRenderer {
    /// Render one page of recipes. `is_favorite` reports membership so
    /// the renderer can mark saved recipes.
    fn render_list(&self, envelope: &PageEnvelope, is_favorite: &dyn Fn(&Recipe) -> bool)
        -> String;

    /// Render a single recipe in full
    fn render_detail(&self, recipe: &Recipe) -> String;
}

/// Plain-text renderer for the bundled CLI
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl RecipeRenderer for TextRenderer {
    fn render_list(
        &self,
        envelope: &PageEnvelope,
        is_favorite: &dyn Fn(&Recipe) -> bool,
    ) -> String {
        if envelope.data.is_empty() {
            return "No recipes found.\n".to_owned();
        }

        let mut out = String::new();
        for (index, recipe) in envelope.data.iter().enumerate() {
            let marker = if is_favorite(recipe) { "*" } else { " " };
            out.push_str(&format!(
                "{marker} {:>2}. {:<42} {:>8} {:>10} {:>6}\n",
                index + 1,
                formatters::truncate(&recipe.title, 42),
                recipe
                    .cuisine
                    .as_deref()
                    .unwrap_or(formatters::PLACEHOLDER),
                formatters::format_calories(recipe.calories),
                formatters::format_rating(recipe.rating),
            ));
        }
        out.push_str(&format!(
            "\nPage {} of {} ({} recipes)\n",
            envelope.page, envelope.pages, envelope.total
        ));
        out
    }

    fn render_detail(&self, recipe: &Recipe) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", recipe.title));
        out.push_str(&format!(
            "{} | rating {} | {} | serves {}\n",
            recipe
                .cuisine
                .as_deref()
                .unwrap_or(formatters::PLACEHOLDER),
            formatters::format_rating(recipe.rating),
            formatters::format_calories(recipe.calories),
            formatters::format_serves(recipe.serves),
        ));
        out.push_str(&format!(
            "prep {} | cook {} | total {}\n\n",
            formatters::format_minutes(recipe.prep_time),
            formatters::format_minutes(recipe.cook_time),
            formatters::format_minutes(recipe.total_time),
        ));
        out.push_str(&format!(
            "{}\n",
            formatters::format_description(recipe.description.as_deref())
        ));

        if !recipe.ingredients.is_empty() {
            out.push_str("\nIngredients:\n");
            for line in &recipe.ingredients {
                out.push_str(&format!("  - {line}\n"));
            }
        }
        if !recipe.instructions.is_empty() {
            out.push_str("\nInstructions:\n");
            for (number, step) in recipe.instructions.iter().enumerate() {
                out.push_str(&format!("  {}. {step}\n", number + 1));
            }
        }

        let bars = nutrition_bars(recipe);
        if !bars.is_empty() {
            out.push_str("\nNutrition:\n");
            for bar in bars {
                let filled = (bar.percent / 5.0).round() as usize;
                out.push_str(&format!(
                    "  {:<13} {:<20} {}\n",
                    bar.label,
                    "#".repeat(filled.min(20)),
                    bar.amount,
                ));
            }
        }
        out
    }
}

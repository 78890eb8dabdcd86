// ABOUTME: Search filter set and comparison-expression rendering
// ABOUTME: Supports both replace-style snapshots and merge-style single-field mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

use serde::{Deserialize, Serialize};

/// Active search constraints for a catalogue query.
///
/// Absent/empty values mean "no constraint". The rating floor travels as
/// a `>=N` comparison expression and the calorie ceiling as `<=N`, both
/// as plain query-string values the server parses.
///
/// Two mutation styles exist because the two original front ends
/// diverged: [`FilterSet::snapshot`] replaces the whole set at once
/// (grid layout), while [`FilterSet::set`] / [`FilterSet::clear`] adjust
/// one field and keep the rest (table layout). Both are first-class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Title substring match
    pub query: Option<String>,
    /// Exact cuisine match
    pub cuisine: Option<String>,
    /// Minimum rating (inclusive)
    pub rating_floor: Option<f64>,
    /// Maximum calories (inclusive)
    pub calories_ceiling: Option<f64>,
}

/// A single adjustable filter field, for merge-style mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Title substring
    Query(String),
    /// Exact cuisine
    Cuisine(String),
    /// Minimum rating
    RatingFloor(f64),
    /// Maximum calories
    CaloriesCeiling(f64),
}

/// Name of a filter field, for merge-style clearing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Title substring
    Query,
    /// Exact cuisine
    Cuisine,
    /// Minimum rating
    RatingFloor,
    /// Maximum calories
    CaloriesCeiling,
}

impl FilterSet {
    /// Replace-style construction: snapshot all filter-control values at
    /// once. Empty strings mean the control is blank and the key is
    /// dropped entirely.
    #[must_use]
    pub fn snapshot(
        query: &str,
        cuisine: &str,
        rating_floor: Option<f64>,
        calories_ceiling: Option<f64>,
    ) -> Self {
        Self {
            query: non_empty(query),
            cuisine: non_empty(cuisine),
            rating_floor,
            calories_ceiling,
        }
    }

    /// Merge-style mutation: set one field, keep the rest
    pub fn set(&mut self, filter: Filter) {
        match filter {
            Filter::Query(value) => self.query = non_empty(&value),
            Filter::Cuisine(value) => self.cuisine = non_empty(&value),
            Filter::RatingFloor(value) => self.rating_floor = Some(value),
            Filter::CaloriesCeiling(value) => self.calories_ceiling = Some(value),
        }
    }

    /// Merge-style mutation: clear one field, keep the rest
    pub fn clear(&mut self, field: FilterField) {
        match field {
            FilterField::Query => self.query = None,
            FilterField::Cuisine => self.cuisine = None,
            FilterField::RatingFloor => self.rating_floor = None,
            FilterField::CaloriesCeiling => self.calories_ceiling = None,
        }
    }

    /// True when every key is empty; callers then use `list` instead of
    /// `search`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.cuisine.is_none()
            && self.rating_floor.is_none()
            && self.calories_ceiling.is_none()
    }

    /// Project the set into query pairs, omitting every empty key.
    /// Comparison fields render as `>=N` / `<=N` expressions.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = &self.query {
            pairs.push(("title", query.clone()));
        }
        if let Some(cuisine) = &self.cuisine {
            pairs.push(("cuisine", cuisine.clone()));
        }
        if let Some(floor) = self.rating_floor {
            pairs.push(("rating", format!(">={}", trim_float(floor))));
        }
        if let Some(ceiling) = self.calories_ceiling {
            pairs.push(("calories", format!("<={}", trim_float(ceiling))));
        }
        pairs
    }
}

/// Render a float without a trailing `.0` so `4.0` travels as `>=4`
fn trim_float(value: f64) -> String {
    if (value.fract()).abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

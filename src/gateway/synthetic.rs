// ABOUTME: In-memory recipe source with the same predicate semantics as the API
// ABOUTME: Deterministic catalogue used by tests and the offline demo mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

use super::RecipeSource;
use crate::config::clamp_page_size;
use crate::errors::GatewayError;
use crate::filters::FilterSet;
use crate::models::{PageEnvelope, Recipe};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Recipe source over an in-memory catalogue.
///
/// Applies the server's documented behavior: rating-descending default
/// order, title substring match, exact cuisine match, rating floor,
/// calorie ceiling, limit clamped to `1..=50`, and an empty page (not an
/// error) for requests past the end.
pub struct SyntheticSource {
    recipes: Vec<Recipe>,
}

impl SyntheticSource {
    /// Build a source over the given recipes
    #[must_use]
    pub fn new(mut recipes: Vec<Recipe>) -> Self {
        // Default catalogue order: rating descending, unrated last
        recipes.sort_by(|a, b| {
            let ra = a.rating.unwrap_or(f64::MIN);
            let rb = b.rating.unwrap_or(f64::MIN);
            rb.total_cmp(&ra)
        });
        Self { recipes }
    }

    /// Deterministic demo catalogue of `count` recipes cycling through a
    /// handful of cuisines, used by tests and `--offline` browsing
    #[must_use]
    pub fn demo_catalogue(count: usize) -> Self {
        const CUISINES: [&str; 5] = ["Thai", "Italian", "Mexican", "Indian", "French"];

        let recipes = (0..count)
            .map(|i| {
                let cuisine = CUISINES[i % CUISINES.len()];
                Recipe {
                    id: Some(i as i64 + 1),
                    title: format!("{cuisine} Classic No. {}", i + 1),
                    cuisine: Some(cuisine.to_owned()),
                    rating: Some(3.0 + ((i % 5) as f64) * 0.5),
                    total_time: Some(20 + (i as u32 % 7) * 10),
                    prep_time: Some(10),
                    cook_time: Some(10 + (i as u32 % 7) * 10),
                    calories: Some(250.0 + ((i % 8) as f64) * 75.0),
                    nutrients: BTreeMap::from([
                        (
                            "calories".to_owned(),
                            serde_json::json!(250.0 + ((i % 8) as f64) * 75.0),
                        ),
                        ("proteinContent".to_owned(), serde_json::json!("24 g")),
                        ("carbohydrateContent".to_owned(), serde_json::json!(42)),
                        ("fatContent".to_owned(), serde_json::json!("11 g")),
                    ]),
                    serves: Some(4),
                    ingredients: vec![
                        "2 cups flour".to_owned(),
                        "1.5 tbsp olive oil".to_owned(),
                        "a pinch of salt".to_owned(),
                    ],
                    instructions: vec![
                        "Prep the ingredients.".to_owned(),
                        "Cook until done.".to_owned(),
                        "Serve warm.".to_owned(),
                    ],
                    description: Some(format!("A reliable {cuisine} staple.")),
                    url: None,
                }
            })
            .collect();

        Self::new(recipes)
    }

    fn matches(recipe: &Recipe, filters: &FilterSet) -> bool {
        if let Some(query) = &filters.query {
            if !recipe
                .title
                .to_lowercase()
                .contains(&query.to_lowercase())
            {
                return false;
            }
        }
        if let Some(cuisine) = &filters.cuisine {
            if recipe.cuisine.as_deref() != Some(cuisine.as_str()) {
                return false;
            }
        }
        if let Some(floor) = filters.rating_floor {
            if recipe.rating.is_none_or(|r| r < floor) {
                return false;
            }
        }
        if let Some(ceiling) = filters.calories_ceiling {
            if recipe.calories.is_none_or(|c| c > ceiling) {
                return false;
            }
        }
        true
    }

    fn paginate(matching: Vec<&Recipe>, page: u32, limit: u32) -> PageEnvelope {
        let limit = clamp_page_size(limit);
        let total = matching.len() as u64;
        let pages = total.div_ceil(u64::from(limit)) as u32;

        let start = (page.saturating_sub(1) as usize) * limit as usize;
        let data: Vec<Recipe> = matching
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();

        PageEnvelope {
            data,
            page,
            pages,
            total,
            limit,
        }
    }
}

#[async_trait]
impl RecipeSource for SyntheticSource {
    async fn list(&self, page: u32, limit: u32) -> Result<PageEnvelope, GatewayError> {
        Ok(Self::paginate(self.recipes.iter().collect(), page, limit))
    }

    async fn search(
        &self,
        page: u32,
        limit: u32,
        filters: &FilterSet,
    ) -> Result<PageEnvelope, GatewayError> {
        let matching = self
            .recipes
            .iter()
            .filter(|recipe| Self::matches(recipe, filters))
            .collect();
        Ok(Self::paginate(matching, page, limit))
    }

    async fn cuisines(&self) -> Result<Vec<String>, GatewayError> {
        let mut names: Vec<String> = self
            .recipes
            .iter()
            .filter_map(|recipe| recipe.cuisine.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_pagination_envelope() {
        let source = SyntheticSource::demo_catalogue(30);
        let envelope = source.list(1, 12).await.unwrap();
        assert_eq!(envelope.data.len(), 12);
        assert_eq!(envelope.page, 1);
        assert_eq!(envelope.pages, 3);
        assert_eq!(envelope.total, 30);
    }

    #[tokio::test]
    async fn test_list_past_end_is_empty_not_error() {
        let source = SyntheticSource::demo_catalogue(30);
        let envelope = source.list(99, 12).await.unwrap();
        assert!(envelope.data.is_empty());
        assert_eq!(envelope.total, 30);
    }

    #[tokio::test]
    async fn test_default_order_is_rating_descending() {
        let source = SyntheticSource::demo_catalogue(30);
        let envelope = source.list(1, 30).await.unwrap();
        let ratings: Vec<f64> = envelope.data.iter().filter_map(|r| r.rating).collect();
        assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_search_rating_floor() {
        let source = SyntheticSource::demo_catalogue(30);
        let filters = FilterSet::snapshot("", "", Some(4.0), None);
        let envelope = source.search(1, 50, &filters).await.unwrap();
        assert!(!envelope.data.is_empty());
        assert!(envelope.data.iter().all(|r| r.rating.unwrap() >= 4.0));
    }

    #[tokio::test]
    async fn test_search_cuisine_is_exact() {
        let source = SyntheticSource::demo_catalogue(30);
        let filters = FilterSet::snapshot("", "Thai", None, None);
        let envelope = source.search(1, 50, &filters).await.unwrap();
        assert!(envelope
            .data
            .iter()
            .all(|r| r.cuisine.as_deref() == Some("Thai")));
    }

    #[tokio::test]
    async fn test_cuisines_distinct_and_sorted() {
        let source = SyntheticSource::demo_catalogue(30);
        let names = source.cuisines().await.unwrap();
        assert_eq!(names, vec!["French", "Indian", "Italian", "Mexican", "Thai"]);
    }
}

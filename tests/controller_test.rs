// ABOUTME: End-to-end controller behavior over the synthetic source and a tempdir store
// ABOUTME: Covers list/search routing, pagination, favorites, shopping list, and cooking mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

#![allow(clippy::unwrap_used)]

use anyhow::Result;
use async_trait::async_trait;
use saveur::controller::CatalogueController;
use saveur::errors::GatewayError;
use saveur::filters::{Filter, FilterField, FilterSet};
use saveur::gateway::{RecipeSource, SyntheticSource};
use saveur::models::{PageEnvelope, Recipe};
use saveur::session::StepOutcome;
use saveur::storage::{LocalStore, FAVORITES_KEY};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Source wrapper counting which query operation the controller picks
struct CountingSource {
    inner: SyntheticSource,
    list_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl CountingSource {
    fn new(count: usize) -> Self {
        Self {
            inner: SyntheticSource::demo_catalogue(count),
            list_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RecipeSource for CountingSource {
    async fn list(&self, page: u32, limit: u32) -> Result<PageEnvelope, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list(page, limit).await
    }

    async fn search(
        &self,
        page: u32,
        limit: u32,
        filters: &FilterSet,
    ) -> Result<PageEnvelope, GatewayError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.search(page, limit, filters).await
    }

    async fn cuisines(&self) -> Result<Vec<String>, GatewayError> {
        self.inner.cuisines().await
    }
}

/// Source whose every fetch fails, for degradation tests
struct FailingSource;

#[async_trait]
impl RecipeSource for FailingSource {
    async fn list(&self, _page: u32, _limit: u32) -> Result<PageEnvelope, GatewayError> {
        Err(GatewayError::Api {
            status: 503,
            message: "catalogue unavailable".to_owned(),
        })
    }

    async fn search(
        &self,
        _page: u32,
        _limit: u32,
        _filters: &FilterSet,
    ) -> Result<PageEnvelope, GatewayError> {
        Err(GatewayError::Api {
            status: 503,
            message: "catalogue unavailable".to_owned(),
        })
    }

    async fn cuisines(&self) -> Result<Vec<String>, GatewayError> {
        Err(GatewayError::Api {
            status: 503,
            message: "catalogue unavailable".to_owned(),
        })
    }
}

fn store_in(dir: &TempDir) -> LocalStore {
    LocalStore::open(dir.path()).unwrap()
}

fn controller_over(
    count: usize,
    dir: &TempDir,
) -> CatalogueController<SyntheticSource> {
    CatalogueController::new(SyntheticSource::demo_catalogue(count), store_in(dir), 12)
}

fn recipe(title: &str) -> Recipe {
    Recipe {
        title: title.to_owned(),
        ingredients: vec!["2 cups flour".to_owned(), "3 eggs".to_owned()],
        instructions: vec![
            "Mix.".to_owned(),
            "Bake.".to_owned(),
            "Cool.".to_owned(),
        ],
        ..Recipe::default()
    }
}

#[tokio::test]
async fn test_empty_filters_use_list_not_search() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller =
        CatalogueController::new(CountingSource::new(30), store_in(&dir), 12);

    controller.refresh().await;
    controller.next_page().await;

    assert_eq!(controller.source().list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(controller.source().search_calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_active_filters_route_through_search() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller =
        CatalogueController::new(CountingSource::new(30), store_in(&dir), 12);

    controller
        .apply_filters(FilterSet::snapshot("classic", "", None, None))
        .await;
    assert!(controller.is_search_mode());

    controller.reset_filters().await;
    assert!(!controller.is_search_mode());

    assert_eq!(controller.source().search_calls.load(Ordering::SeqCst), 1);
    assert_eq!(controller.source().list_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_pagination_envelope_scenario() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = controller_over(30, &dir);

    controller.refresh().await;
    let envelope = controller.current();
    assert_eq!(envelope.data.len(), 12);
    assert_eq!(envelope.page, 1);
    assert_eq!(envelope.pages, 3);
    assert_eq!(envelope.total, 30);
    Ok(())
}

#[tokio::test]
async fn test_next_page_clamps_at_last_page() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = controller_over(30, &dir);

    controller.refresh().await;
    controller.next_page().await;
    controller.next_page().await;
    assert_eq!(controller.current_page(), 3);
    assert_eq!(controller.current().data.len(), 6);

    // Already on the last known page: a no-op, not an empty fetch
    controller.next_page().await;
    assert_eq!(controller.current_page(), 3);
    assert_eq!(controller.current().data.len(), 6);
    Ok(())
}

#[tokio::test]
async fn test_prev_page_is_noop_below_one() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = controller_over(30, &dir);

    controller.refresh().await;
    controller.prev_page().await;
    assert_eq!(controller.current_page(), 1);
    Ok(())
}

#[tokio::test]
async fn test_merge_style_filter_mutation_keeps_other_fields() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = controller_over(30, &dir);

    controller.set_filter(Filter::Cuisine("Thai".to_owned())).await;
    controller.set_filter(Filter::RatingFloor(3.0)).await;
    assert_eq!(controller.filters().cuisine.as_deref(), Some("Thai"));
    assert_eq!(controller.filters().rating_floor, Some(3.0));
    assert!(controller
        .current()
        .data
        .iter()
        .all(|r| r.cuisine.as_deref() == Some("Thai")));

    controller.clear_filter(FilterField::Cuisine).await;
    assert_eq!(controller.filters().cuisine, None);
    assert_eq!(controller.filters().rating_floor, Some(3.0));
    assert!(controller.is_search_mode());
    Ok(())
}

#[tokio::test]
async fn test_fetch_failure_degrades_to_empty_with_indicator() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = CatalogueController::new(FailingSource, store_in(&dir), 12);

    controller.refresh().await;
    assert!(controller.current().data.is_empty());
    let error = controller.last_error().unwrap();
    assert!(error.contains("503"));
    Ok(())
}

#[tokio::test]
async fn test_stale_fetch_results_are_discarded() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = controller_over(30, &dir);

    let stale = controller.issue_ticket();
    let stale_result = controller.query_page(3).await;
    let fresh = controller.issue_ticket();
    let fresh_result = controller.query_page(1).await;

    assert!(!controller.apply_fetch(stale, stale_result));
    assert!(controller.apply_fetch(fresh, fresh_result));
    assert_eq!(controller.current().page, 1);
    Ok(())
}

#[tokio::test]
async fn test_favorite_toggle_is_idempotent_over_two_invocations() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = controller_over(5, &dir);
    let pad_thai = recipe("Pad Thai");

    assert!(controller.toggle_favorite(&pad_thai)?);
    assert!(controller.is_favorite(&pad_thai));
    assert_eq!(controller.favorites().len(), 1);
    assert_eq!(controller.favorites()[0].recipe.title, "Pad Thai");

    assert!(!controller.toggle_favorite(&pad_thai)?);
    assert!(!controller.is_favorite(&pad_thai));
    assert!(controller.favorites().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_favorites_survive_controller_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let pad_thai = recipe("Pad Thai");

    {
        let mut controller = controller_over(5, &dir);
        controller.toggle_favorite(&pad_thai)?;
    }

    let controller = controller_over(5, &dir);
    assert!(controller.is_favorite(&pad_thai));
    Ok(())
}

#[tokio::test]
async fn test_legacy_bare_snapshot_favorites_still_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let pad_thai = recipe("Pad Thai");

    // Entries persisted before `saved_at` existed were bare Recipe arrays
    store_in(&dir).save(FAVORITES_KEY, &vec![pad_thai.clone()])?;

    let controller = controller_over(5, &dir);
    assert!(controller.is_favorite(&pad_thai));
    Ok(())
}

#[tokio::test]
async fn test_shopping_list_append_never_duplicates() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = controller_over(5, &dir);

    let first = vec!["2 cups flour".to_owned(), "3 eggs".to_owned()];
    let second = vec!["3 eggs".to_owned(), "1 cup milk".to_owned()];

    assert_eq!(controller.add_ingredients_to_list(&first)?, 2);
    assert_eq!(controller.add_ingredients_to_list(&second)?, 1);
    assert_eq!(
        controller.shopping_list(),
        ["2 cups flour", "3 eggs", "1 cup milk"]
    );
    assert_eq!(controller.export_list(), "2 cups flour\n3 eggs\n1 cup milk");
    Ok(())
}

#[tokio::test]
async fn test_out_of_bounds_removal_is_a_noop() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = controller_over(5, &dir);

    controller.add_ingredients_to_list(&["3 eggs".to_owned()])?;
    controller.remove_from_list(99)?;
    assert_eq!(controller.shopping_list(), ["3 eggs"]);

    controller.remove_from_list(0)?;
    assert!(controller.shopping_list().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_clear_list_persists_the_empty_list() -> Result<()> {
    let dir = tempfile::tempdir()?;

    {
        let mut controller = controller_over(5, &dir);
        controller.add_ingredients_to_list(&["3 eggs".to_owned()])?;
        controller.clear_list()?;
    }

    let controller = controller_over(5, &dir);
    assert!(controller.shopping_list().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cooking_walkthrough_completes_at_last_step() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = controller_over(5, &dir);
    let dish = recipe("Pad Thai");

    controller.start_cooking(&dish);
    assert_eq!(controller.session().cursor(), Some(0));

    assert_eq!(controller.prev_step(), StepOutcome::AtBoundary);
    assert_eq!(controller.next_step(), StepOutcome::Moved);
    assert_eq!(controller.next_step(), StepOutcome::Moved);
    assert_eq!(controller.session().current_step(), Some("Cool."));

    assert_eq!(controller.next_step(), StepOutcome::Completed);
    assert!(!controller.session().is_active());
    Ok(())
}

#[tokio::test]
async fn test_portion_scaling_is_display_only() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let controller = controller_over(5, &dir);
    let dish = recipe("Pancakes");

    let scaled = controller.scale_portions(&dish, 8);
    assert_eq!(scaled, ["4 cups flour", "6 eggs"]);

    // Identity at the original serving count; the recipe itself unchanged
    let same = controller.scale_portions(&dish, 4);
    assert_eq!(same, ["2 cups flour", "3 eggs"]);
    assert_eq!(dish.ingredients[0], "2 cups flour");
    Ok(())
}

#[tokio::test]
async fn test_cuisines_pass_through_from_the_source() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let controller = controller_over(30, &dir);

    let names = controller.cuisines().await?;
    assert_eq!(names, ["French", "Indian", "Italian", "Mexican", "Thai"]);
    Ok(())
}

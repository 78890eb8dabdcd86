// ABOUTME: View-state controller owning page, filters, favorites, shopping list, and cooking mode
// ABOUTME: Mediates every user action between the recipe source and the local store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

//! # View state controller
//!
//! [`CatalogueController`] is the single authoritative holder of view
//! state. Renderers read from it and hand user actions back to it; it
//! talks to the [`RecipeSource`] for data and writes favorites and the
//! shopping list through the [`LocalStore`] synchronously after every
//! mutation.

use crate::errors::{GatewayError, StorageError};
use crate::filters::{Filter, FilterField, FilterSet};
use crate::gateway::RecipeSource;
use crate::models::{FavoriteEntry, PageEnvelope, Recipe};
use crate::scaling;
use crate::session::{CookingSession, StepOutcome};
use crate::storage::{LocalStore, Theme, FAVORITES_KEY, SHOPPING_LIST_KEY, THEME_KEY};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Tag identifying one issued fetch.
///
/// Fetches are tagged with a monotonically increasing sequence number;
/// a response whose tag is no longer the latest is discarded instead of
/// overwriting newer view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Single source of truth for browsing state.
///
/// Generic over the recipe source so the same controller drives the
/// HTTP gateway in production and the synthetic catalogue in tests.
pub struct CatalogueController<S: RecipeSource> {
    source: S,
    store: LocalStore,
    page_size: u32,

    current_page: u32,
    filters: FilterSet,
    search_mode: bool,
    /// Most recently applied page, retained so detail lookups need no
    /// refetch
    current: PageEnvelope,
    /// Error indicator from the last failed fetch, cleared on success
    last_error: Option<String>,

    favorites: Vec<FavoriteEntry>,
    shopping_list: Vec<String>,
    session: CookingSession,

    request_seq: AtomicU64,
}

impl<S: RecipeSource> CatalogueController<S> {
    /// Create a controller, loading favorites and the shopping list
    /// from the store. Corrupt or absent collections start empty.
    #[must_use]
    pub fn new(source: S, store: LocalStore, page_size: u32) -> Self {
        let favorites = load_favorites(&store);
        let shopping_list = store.load_or(SHOPPING_LIST_KEY, Vec::new());

        info!(
            favorites = favorites.len(),
            shopping_items = shopping_list.len(),
            "controller initialized from local store"
        );

        Self {
            source,
            store,
            page_size: crate::config::clamp_page_size(page_size),
            current_page: 1,
            filters: FilterSet::default(),
            search_mode: false,
            current: PageEnvelope::empty(),
            last_error: None,
            favorites,
            shopping_list,
            session: CookingSession::default(),
            request_seq: AtomicU64::new(0),
        }
    }

    // ── Fetching ────────────────────────────────────────────────────────

    /// Issue a fetch tag. Only the most recently issued tag may apply
    /// its result.
    #[must_use]
    pub fn issue_ticket(&self) -> FetchTicket {
        FetchTicket(self.request_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Run the query for the current filters and the given page.
    /// Selects `search` when any filter is active, `list` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] exactly as the source reported it; use
    /// [`Self::apply_fetch`] to fold it into view state instead of
    /// propagating.
    pub async fn query_page(&self, page: u32) -> Result<PageEnvelope, GatewayError> {
        if self.filters.is_empty() {
            self.source.list(page, self.page_size).await
        } else {
            self.source.search(page, self.page_size, &self.filters).await
        }
    }

    /// Fold a completed fetch into view state. Stale tickets are
    /// discarded (returns false); failures degrade to an empty envelope
    /// plus an error indicator.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageEnvelope, GatewayError>,
    ) -> bool {
        if ticket.0 != self.request_seq.load(Ordering::SeqCst) {
            debug!(ticket = ticket.0, "discarding stale fetch result");
            return false;
        }

        match result {
            Ok(envelope) => {
                self.current_page = envelope.page.max(1);
                self.current = envelope;
                self.last_error = None;
            }
            Err(error) => {
                warn!(%error, "fetch failed, degrading to empty result set");
                self.current = PageEnvelope::empty();
                self.last_error = Some(error.to_string());
            }
        }
        true
    }

    /// Fetch the current page with the current filters and apply it
    pub async fn refresh(&mut self) {
        let ticket = self.issue_ticket();
        let result = self.query_page(self.current_page).await;
        self.apply_fetch(ticket, result);
    }

    /// Distinct cuisine names for the filter control
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on network, API, or decode failure.
    pub async fn cuisines(&self) -> Result<Vec<String>, GatewayError> {
        self.source.cuisines().await
    }

    // ── Filters & pagination ────────────────────────────────────────────

    /// Replace-style filter application: snapshot all control values,
    /// engage search mode, reset to page 1, refetch.
    pub async fn apply_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
        self.search_mode = true;
        self.current_page = 1;
        self.refresh().await;
    }

    /// Merge-style mutation: set one filter field, reset to page 1,
    /// refetch. The other fields keep their values.
    pub async fn set_filter(&mut self, filter: Filter) {
        self.filters.set(filter);
        self.search_mode = !self.filters.is_empty();
        self.current_page = 1;
        self.refresh().await;
    }

    /// Merge-style mutation: clear one filter field, reset to page 1,
    /// refetch.
    pub async fn clear_filter(&mut self, field: FilterField) {
        self.filters.clear(field);
        self.search_mode = !self.filters.is_empty();
        self.current_page = 1;
        self.refresh().await;
    }

    /// Clear all filters and search mode, reset to page 1, refetch
    pub async fn reset_filters(&mut self) {
        self.filters = FilterSet::default();
        self.search_mode = false;
        self.current_page = 1;
        self.refresh().await;
    }

    /// Advance one page. Clamped: once an envelope has reported the
    /// total page count, requests past the end are no-ops rather than
    /// round trips for an empty page.
    pub async fn next_page(&mut self) {
        if self.current.pages > 0 && self.current_page >= self.current.pages {
            debug!(page = self.current_page, "already on the last page");
            return;
        }
        self.current_page += 1;
        self.refresh().await;
    }

    /// Go back one page; a no-op below page 1
    pub async fn prev_page(&mut self) {
        if self.current_page <= 1 {
            return;
        }
        self.current_page -= 1;
        self.refresh().await;
    }

    /// Jump to a specific 1-based page, clamped to the known bounds
    pub async fn go_to_page(&mut self, page: u32) {
        let mut target = page.max(1);
        if self.current.pages > 0 {
            target = target.min(self.current.pages);
        }
        if target == self.current_page && !self.current.data.is_empty() {
            return;
        }
        self.current_page = target;
        self.refresh().await;
    }

    // ── Favorites ───────────────────────────────────────────────────────

    /// Toggle favorites membership for a recipe and persist the
    /// collection. Returns the new membership state so the caller can
    /// update every affected view fragment.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the collection cannot be persisted;
    /// the in-memory state is updated regardless.
    pub fn toggle_favorite(&mut self, recipe: &Recipe) -> Result<bool, StorageError> {
        let id = recipe.recipe_id();
        let position = self.favorites.iter().position(|entry| {
            entry.recipe.recipe_id() == id || entry.recipe.title == recipe.title
        });

        let now_member = match position {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(FavoriteEntry::new(recipe.clone()));
                true
            }
        };

        self.store.save(FAVORITES_KEY, &self.favorites)?;
        debug!(%id, member = now_member, "favorite toggled");
        Ok(now_member)
    }

    /// Whether the recipe is currently favorited
    #[must_use]
    pub fn is_favorite(&self, recipe: &Recipe) -> bool {
        let id = recipe.recipe_id();
        self.favorites.iter().any(|entry| {
            entry.recipe.recipe_id() == id || entry.recipe.title == recipe.title
        })
    }

    /// Stored favorite entries, in insertion order
    #[must_use]
    pub fn favorites(&self) -> &[FavoriteEntry] {
        &self.favorites
    }

    // ── Shopping list ───────────────────────────────────────────────────

    /// Append ingredient lines not already present (exact string
    /// equality) and persist. Returns how many lines were added.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the list cannot be persisted.
    pub fn add_ingredients_to_list(&mut self, items: &[String]) -> Result<usize, StorageError> {
        let before = self.shopping_list.len();
        for item in items {
            if !self.shopping_list.contains(item) {
                self.shopping_list.push(item.clone());
            }
        }
        let added = self.shopping_list.len() - before;
        if added > 0 {
            self.store.save(SHOPPING_LIST_KEY, &self.shopping_list)?;
        }
        Ok(added)
    }

    /// Remove the line at `index` and persist. Out-of-bounds indices
    /// are tolerated as no-ops, never errors.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the list cannot be persisted.
    pub fn remove_from_list(&mut self, index: usize) -> Result<(), StorageError> {
        if index >= self.shopping_list.len() {
            return Ok(());
        }
        self.shopping_list.remove(index);
        self.store.save(SHOPPING_LIST_KEY, &self.shopping_list)
    }

    /// Empty the shopping list and persist
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the list cannot be persisted.
    pub fn clear_list(&mut self) -> Result<(), StorageError> {
        self.shopping_list.clear();
        self.store.save(SHOPPING_LIST_KEY, &self.shopping_list)
    }

    /// Current shopping-list lines in order
    #[must_use]
    pub fn shopping_list(&self) -> &[String] {
        &self.shopping_list
    }

    /// Plain-text export of the shopping list, one line per item
    #[must_use]
    pub fn export_list(&self) -> String {
        self.shopping_list.join("\n")
    }

    // ── Cooking mode ────────────────────────────────────────────────────

    /// Start a cooking walkthrough over the recipe's instructions
    pub fn start_cooking(&mut self, recipe: &Recipe) {
        info!(title = %recipe.title, steps = recipe.instructions.len(), "cooking mode started");
        self.session.start(&recipe.instructions);
    }

    /// Advance the walkthrough; completes the session at the last step
    pub fn next_step(&mut self) -> StepOutcome {
        self.session.next_step()
    }

    /// Step back in the walkthrough; a no-op at step 0
    pub fn prev_step(&mut self) -> StepOutcome {
        self.session.prev_step()
    }

    /// End the walkthrough early
    pub fn finish_cooking(&mut self) {
        self.session.finish();
    }

    /// The active cooking session, for step indicators
    #[must_use]
    pub const fn session(&self) -> &CookingSession {
        &self.session
    }

    // ── Portion scaling ─────────────────────────────────────────────────

    /// Display-only rescale of a recipe's ingredient lines to a new
    /// serving count. The underlying recipe is never mutated and
    /// nothing is persisted.
    #[must_use]
    pub fn scale_portions(&self, recipe: &Recipe, new_serves: u32) -> Vec<String> {
        scaling::scale_ingredients(&recipe.ingredients, recipe.serves_or_default(), new_serves)
    }

    // ── Theme ───────────────────────────────────────────────────────────

    /// Currently persisted theme preference
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.store.load_or(THEME_KEY, Theme::default())
    }

    /// Flip the theme preference and persist it
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the preference cannot be persisted.
    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let next = self.theme().toggled();
        self.store.save(THEME_KEY, &next)?;
        Ok(next)
    }

    // ── View state accessors ────────────────────────────────────────────

    /// The most recently applied page envelope
    #[must_use]
    pub const fn current(&self) -> &PageEnvelope {
        &self.current
    }

    /// 1-based page the view is on
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Active filter set
    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Whether the search controls are engaged
    #[must_use]
    pub const fn is_search_mode(&self) -> bool {
        self.search_mode
    }

    /// Error indicator from the last failed fetch, if any
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Recipe at `index` on the cached page, for detail lookups
    #[must_use]
    pub fn recipe_at(&self, index: usize) -> Option<&Recipe> {
        self.current.data.get(index)
    }

    /// The recipe source backing this controller
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }
}

/// Load favorites, accepting both the current entry format and the
/// bare-snapshot arrays persisted before `saved_at` existed
fn load_favorites(store: &LocalStore) -> Vec<FavoriteEntry> {
    let raw: serde_json::Value = store.load_or(FAVORITES_KEY, serde_json::Value::Null);
    if raw.is_null() {
        return Vec::new();
    }
    if let Ok(entries) = serde_json::from_value::<Vec<FavoriteEntry>>(raw.clone()) {
        return entries;
    }
    match serde_json::from_value::<Vec<Recipe>>(raw) {
        Ok(snapshots) => snapshots.into_iter().map(FavoriteEntry::new).collect(),
        Err(error) => {
            warn!(%error, "favorites store unreadable, starting empty");
            Vec::new()
        }
    }
}

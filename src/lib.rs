// ABOUTME: Crate root for the saveur recipe catalogue client
// ABOUTME: Wires the gateway, view state controller, local store, and renderers together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

//! # Saveur
//!
//! Client-side engine for a recipe catalogue: fetches paginated recipe
//! data from the catalogue API, holds all browsing state (page, filters,
//! favorites, shopping list, cooking walkthrough), and persists the
//! user's collections as JSON documents on disk.
//!
//! The crate is organized around three seams:
//!
//! - [`gateway::RecipeSource`]: where recipe pages come from. The HTTP
//!   gateway implements it against the catalogue API; the synthetic
//!   source implements it in memory for tests and offline browsing.
//! - [`controller::CatalogueController`]: the single owner of view
//!   state. Every user action goes through it.
//! - [`render::RecipeRenderer`]: how state becomes output. A plain-text
//!   renderer ships with the crate.
//!
//! ```no_run
//! use saveur::config::ClientConfig;
//! use saveur::controller::CatalogueController;
//! use saveur::gateway::HttpGateway;
//! use saveur::storage::LocalStore;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ClientConfig::from_env();
//! let gateway = HttpGateway::new(&config);
//! let store = LocalStore::open(&config.storage_dir)?;
//! let mut controller = CatalogueController::new(gateway, store, config.page_size);
//! controller.refresh().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod errors;
pub mod filters;
pub mod formatters;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod render;
pub mod scaling;
pub mod session;
pub mod storage;

/// Serving count assumed when a recipe does not state one.
///
/// Used as the scaling baseline and for display.
pub const DEFAULT_SERVES: u32 = 4;

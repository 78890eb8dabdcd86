// ABOUTME: Recipe source trait defining the catalogue query contract
// ABOUTME: Implemented over HTTP for the real API and in memory for tests/demos
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

//! # Recipe data gateway
//!
//! [`RecipeSource`] is the seam between the view-state controller and
//! whatever serves the catalogue. Two implementations ship with the
//! crate:
//!
//! - [`HttpGateway`]: the real paginated REST API
//! - [`SyntheticSource`]: an in-memory catalogue with the same predicate
//!   semantics, for tests and offline browsing
//!
//! Callers pick `search` whenever any filter is active and `list`
//! otherwise; both return the same page envelope.

mod http;
mod synthetic;

pub use http::HttpGateway;
pub use synthetic::SyntheticSource;

use crate::errors::GatewayError;
use crate::filters::FilterSet;
use crate::models::PageEnvelope;
use async_trait::async_trait;

/// Asynchronous source of paginated recipe data.
///
/// Every operation suspends until the backing store resolves. Failures
/// surface as [`GatewayError`]; the caller degrades to an empty result
/// set with a visible error indicator rather than retrying.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch one page of the default-ordered catalogue
    ///
    /// The server orders by rating descending. `limit` is clamped to the
    /// server's accepted range by implementations.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on network, API, or decode failure.
    async fn list(&self, page: u32, limit: u32) -> Result<PageEnvelope, GatewayError>;

    /// Fetch one page filtered by the given predicates
    ///
    /// Filter keys with empty values are omitted from the request
    /// entirely; `rating`/`calories` travel as comparison expressions.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on network, API, or decode failure.
    async fn search(
        &self,
        page: u32,
        limit: u32,
        filters: &FilterSet,
    ) -> Result<PageEnvelope, GatewayError>;

    /// Fetch the distinct cuisine names for populating a filter control
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on network, API, or decode failure.
    async fn cuisines(&self) -> Result<Vec<String>, GatewayError>;
}

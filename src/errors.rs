// ABOUTME: Error types for gateway and persistence operations
// ABOUTME: Network/decode failures and storage faults, none of which are fatal to the UI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

use thiserror::Error;

/// Errors surfaced by a recipe source.
///
/// The controller's contract on any of these is to degrade to an empty
/// page plus a visible error indicator. There is no retry or backoff.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The catalogue API returned a non-success status
    #[error("Catalogue API request failed with status {status}: {message}")]
    Api {
        /// HTTP status code returned by the API
        status: u16,
        /// Response body, as far as it could be read
        message: String,
    },

    /// Response body could not be decoded into the expected envelope
    #[error("Failed to decode {what}: {source}")]
    Decode {
        /// Which payload failed to decode (e.g. "page envelope")
        what: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Network communication error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured base URL could not be extended with the request path
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// Create a decode error for the named payload
    #[must_use]
    pub const fn decode(what: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { what, source }
    }
}

/// Errors surfaced by the local persistence adapter.
///
/// Only the write path reports errors; reads substitute the caller's
/// default so that initial render never fails on a corrupt store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Value could not be serialized for persistence
    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        /// Store key being written
        key: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem write failed
    #[error("Failed to persist key '{key}': {source}")]
    Io {
        /// Store key being written
        key: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

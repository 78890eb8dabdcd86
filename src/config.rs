// ABOUTME: Environment-derived client configuration with defaults
// ABOUTME: API base URL, page size, HTTP timeouts, and the local storage directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default page size used for catalogue fetches
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Server-side page size ceiling; the client clamps rather than letting
/// the server silently reduce the limit
pub const MAX_PAGE_SIZE: u32 = 50;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Client configuration for the catalogue gateway and local store
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the catalogue API (path prefix `/api` included)
    pub api_base: Url,
    /// Recipes requested per page, clamped to `1..=MAX_PAGE_SIZE`
    pub page_size: u32,
    /// Request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Directory holding the persisted favorites/shopping-list/theme files
    pub storage_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // Safe to parse: literal URL
            api_base: Url::parse("http://127.0.0.1:5000/api")
                .unwrap_or_else(|_| unreachable_base()),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            storage_dir: default_storage_dir(),
        }
    }
}

impl ClientConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    ///
    /// Recognized variables: `SAVEUR_API_BASE`, `SAVEUR_PAGE_SIZE`,
    /// `SAVEUR_TIMEOUT_SECS`, `SAVEUR_CONNECT_TIMEOUT_SECS`,
    /// `SAVEUR_STORAGE_DIR`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base = env::var("SAVEUR_API_BASE")
            .ok()
            .and_then(|raw| Url::parse(&raw).ok())
            .unwrap_or(defaults.api_base);

        let page_size = env::var("SAVEUR_PAGE_SIZE")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.page_size);

        let timeout = env::var("SAVEUR_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map_or(defaults.timeout, Duration::from_secs);

        let connect_timeout = env::var("SAVEUR_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map_or(defaults.connect_timeout, Duration::from_secs);

        let storage_dir = env::var("SAVEUR_STORAGE_DIR")
            .ok()
            .map_or(defaults.storage_dir, PathBuf::from);

        Self {
            api_base,
            page_size: clamp_page_size(page_size),
            timeout,
            connect_timeout,
            storage_dir,
        }
    }

    /// Page size clamped to the server's accepted range
    #[must_use]
    pub fn effective_page_size(&self) -> u32 {
        clamp_page_size(self.page_size)
    }
}

/// Clamp a requested page size to the server contract (`1..=50`),
/// substituting the default for zero
#[must_use]
pub fn clamp_page_size(limit: u32) -> u32 {
    if limit == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        limit.min(MAX_PAGE_SIZE)
    }
}

/// Platform data directory for persisted collections, falling back to
/// the current directory when the platform reports none
fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("saveur")
}

/// Fallback for the literal default URL; never reached because the
/// literal is valid, but keeps the parse non-panicking
fn unreachable_base() -> Url {
    // localhost with no path is always parsable
    #[allow(clippy::unwrap_used)]
    Url::parse("http://127.0.0.1").unwrap()
}

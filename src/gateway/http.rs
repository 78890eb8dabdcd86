// ABOUTME: HTTP implementation of the recipe source over the catalogue REST API
// ABOUTME: Builds paginated list/search/cuisines requests and normalizes failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

use super::RecipeSource;
use crate::config::{clamp_page_size, ClientConfig};
use crate::errors::GatewayError;
use crate::filters::FilterSet;
use crate::models::PageEnvelope;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};
use url::Url;

/// Recipe gateway backed by the remote catalogue API.
///
/// Issues `GET {base}/recipes`, `GET {base}/recipes/search`, and
/// `GET {base}/cuisines`. The underlying client pools connections and
/// applies the configured request/connect timeouts.
pub struct HttpGateway {
    client: Client,
    api_base: Url,
}

impl HttpGateway {
    /// Create a gateway from client configuration
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_base: config.api_base.clone(),
        }
    }

    /// Extend the base URL with a sub-path (`recipes`, `recipes/search`,
    /// `cuisines`) without clobbering the base's own path prefix
    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| GatewayError::InvalidUrl(self.api_base.to_string()))?;
            segments.pop_if_empty();
            for segment in path.split('/') {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    /// Send a GET and decode the body as a page envelope
    async fn fetch_envelope(
        &self,
        url: Url,
        pairs: &[(&str, String)],
    ) -> Result<PageEnvelope, GatewayError> {
        debug!(url = %url, "fetching recipe page");

        let response = self.client.get(url).query(pairs).send().await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(status = status.as_u16(), "catalogue API returned an error");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| GatewayError::decode("page envelope", e))
    }
}

#[async_trait]
impl RecipeSource for HttpGateway {
    async fn list(&self, page: u32, limit: u32) -> Result<PageEnvelope, GatewayError> {
        let url = self.endpoint("recipes")?;
        let pairs = [
            ("page", page.to_string()),
            ("limit", clamp_page_size(limit).to_string()),
        ];
        self.fetch_envelope(url, &pairs).await
    }

    async fn search(
        &self,
        page: u32,
        limit: u32,
        filters: &FilterSet,
    ) -> Result<PageEnvelope, GatewayError> {
        let url = self.endpoint("recipes/search")?;
        let mut pairs = vec![
            ("page", page.to_string()),
            ("limit", clamp_page_size(limit).to_string()),
        ];
        pairs.extend(filters.to_query_pairs());
        self.fetch_envelope(url, &pairs).await
    }

    async fn cuisines(&self) -> Result<Vec<String>, GatewayError> {
        let url = self.endpoint("cuisines")?;
        debug!(url = %url, "fetching cuisine list");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| GatewayError::decode("cuisine list", e))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn gateway() -> HttpGateway {
        HttpGateway::new(&ClientConfig::default())
    }

    #[test]
    fn test_endpoint_keeps_base_prefix() {
        let url = gateway().endpoint("recipes/search").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/recipes/search");
    }

    #[test]
    fn test_endpoint_single_segment() {
        let url = gateway().endpoint("cuisines").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/cuisines");
    }
}

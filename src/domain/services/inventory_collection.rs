/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use crate::domain::{extract_nodes, ApplianceConfig, InventoryError, NodeExtraction};
use crate::ports::{InventoryFetcher, InventoryReportingService};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

/// Domain service that implements node inventory collection
///
/// This service issues the single `/nodes` request through the fetcher port
/// and turns the response into node records. It keeps no state between
/// calls.
pub struct InventoryCollectionService {
    /// Authenticated fetcher (HTTP in production)
    fetcher: Arc<dyn InventoryFetcher>,
    /// Appliance endpoint and credentials
    config: ApplianceConfig,
}

impl InventoryCollectionService {
    /// Create a new inventory collection service
    ///
    /// # Arguments
    /// * `fetcher` - Fetcher used for the appliance request
    /// * `config` - Appliance endpoint and credentials
    pub fn new(fetcher: Arc<dyn InventoryFetcher>, config: ApplianceConfig) -> Self {
        Self { fetcher, config }
    }
}

#[async_trait]
impl InventoryReportingService for InventoryCollectionService {
    async fn fetch_document(&self) -> Result<Vec<u8>, InventoryError> {
        let url = self.config.nodes_url();
        debug!("Fetching node inventory from {url}");

        let body = self.fetcher.fetch(&url, &self.config.credentials).await?;
        debug!("Received {} bytes from {url}", body.len());
        Ok(body)
    }

    async fn collect_nodes(&self) -> Result<NodeExtraction, InventoryError> {
        let body = self.fetch_document().await?;
        let extraction = extract_nodes(&body)?;
        debug!(
            "Extracted {} node records ({} diagnostics)",
            extraction.records.len(),
            extraction.diagnostics.len()
        );
        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Credentials, ExtractError, FetchError};
    use std::sync::Mutex;

    /// Fetcher that replays a canned response and records what it was asked for
    struct CannedFetcher {
        response: Result<Vec<u8>, FetchError>,
        calls: Mutex<Vec<(String, Credentials)>>,
    }

    impl CannedFetcher {
        fn new(response: Result<Vec<u8>, FetchError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl InventoryFetcher for CannedFetcher {
        async fn fetch(
            &self,
            url: &str,
            credentials: &Credentials,
        ) -> Result<Vec<u8>, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), credentials.clone()));
            self.response.clone()
        }
    }

    fn test_config() -> ApplianceConfig {
        ApplianceConfig::new(
            "https://xclarity.example.com/",
            Credentials::new("reporter", "secret"),
        )
    }

    #[tokio::test]
    async fn test_collect_nodes_requests_nodes_url_once() {
        let body = br#"{"nodeList": [{"name": "Node1", "processors": [{"displayName": "Xeon 6248"}]}]}"#;
        let fetcher = CannedFetcher::new(Ok(body.to_vec()));
        let service = InventoryCollectionService::new(fetcher.clone(), test_config());

        let extraction = service.collect_nodes().await.unwrap();
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].name, "node1");

        let calls = fetcher.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://xclarity.example.com/nodes");
        assert_eq!(calls[0].1, Credentials::new("reporter", "secret"));
    }

    #[tokio::test]
    async fn test_fetch_document_returns_raw_bytes() {
        let body = b"{\"nodeList\": []}".to_vec();
        let fetcher = CannedFetcher::new(Ok(body.clone()));
        let service = InventoryCollectionService::new(fetcher, test_config());

        assert_eq!(service.fetch_document().await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_status_error_is_propagated() {
        let fetcher = CannedFetcher::new(Err(FetchError::HttpStatus {
            status: 403,
            body: "forbidden".to_string(),
        }));
        let service = InventoryCollectionService::new(fetcher, test_config());

        let err = service.collect_nodes().await.unwrap_err();
        match err {
            InventoryError::Fetch(FetchError::HttpStatus { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_document_is_extract_error() {
        let fetcher = CannedFetcher::new(Ok(b"not json".to_vec()));
        let service = InventoryCollectionService::new(fetcher, test_config());

        let err = service.collect_nodes().await.unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Extract(ExtractError::InvalidJson(_))
        ));
    }
}

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

//! HTTP inventory fetcher for the management appliance API

use crate::adapters::secondary::trust::{build_trust_store, TrustStore};
use crate::domain::{Credentials, FetchError, DEFAULT_TIMEOUT_SECS};
use crate::ports::InventoryFetcher;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::Duration;

/// HTTP fetcher that pulls documents from the appliance with Basic auth
pub struct HttpInventoryFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpInventoryFetcher {
    /// Create a new HTTP inventory fetcher
    ///
    /// # Arguments
    /// * `trust` - Roots the appliance certificate is verified against
    /// * `timeout` - Overall request timeout
    pub fn new(trust: &TrustStore, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .use_preconfigured_tls(trust.client_config())
            .no_proxy()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::ClientBuild(error_chain(&e)))?;

        Ok(Self { client, timeout })
    }

    /// Create with system roots only and the default timeout
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(
            &build_trust_store(None),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Request timeout this fetcher was built with
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl InventoryFetcher for HttpInventoryFetcher {
    async fn fetch(&self, url: &str, credentials: &Credentials) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()
            .await
            .map_err(|e| FetchError::Transport(error_chain(&e)))?;

        let status = response.status();
        debug!("GET {url} returned {status}");

        if !status.is_success() {
            // Appliances put the useful part of the error in the body
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::BodyRead(error_chain(&e)))?;

        Ok(body.to_vec())
    }
}

/// Flatten an error and its sources into one line
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

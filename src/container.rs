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

//! Dependency injection container for inventory services

use crate::adapters::{build_trust_store, HttpInventoryFetcher, TrustStore};
use crate::domain::{
    ApplianceConfig, FetchError, InventoryCollectionService, DEFAULT_TIMEOUT_SECS,
};
use crate::ports::{InventoryFetcher, InventoryReportingService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the dependency injection container
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// HTTP timeout for the appliance request
    pub http_timeout: Duration,
    /// Extra PEM certificate trusted alongside the system roots
    pub extra_cert_path: Option<PathBuf>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            extra_cert_path: None,
        }
    }
}

impl From<&ApplianceConfig> for ContainerConfig {
    fn from(appliance: &ApplianceConfig) -> Self {
        Self {
            http_timeout: Duration::from_secs(appliance.timeout_secs),
            extra_cert_path: appliance.cert_file.clone(),
        }
    }
}

/// Dependency injection container
pub struct ServiceContainer {
    config: ContainerConfig,
}

impl ServiceContainer {
    /// Create a new service container with configuration
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }

    /// Create a service container with default configuration
    pub fn default() -> Self {
        Self::new(ContainerConfig::default())
    }

    /// Create a container using the timeout and certificate of an appliance config
    pub fn for_appliance(appliance: &ApplianceConfig) -> Self {
        Self::new(ContainerConfig::from(appliance))
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Compose system roots with the configured extra certificate
    pub fn create_trust_store(&self) -> TrustStore {
        build_trust_store(self.config.extra_cert_path.as_deref())
    }

    /// Create the HTTP inventory fetcher
    pub fn create_fetcher(&self) -> Result<Arc<dyn InventoryFetcher>, FetchError> {
        let trust = self.create_trust_store();
        let fetcher = HttpInventoryFetcher::new(&trust, self.config.http_timeout)?;
        Ok(Arc::new(fetcher))
    }

    /// Create the complete inventory reporting service
    pub fn create_inventory_service(
        &self,
        appliance: ApplianceConfig,
    ) -> Result<Arc<dyn InventoryReportingService>, FetchError> {
        let fetcher = self.create_fetcher()?;
        Ok(Arc::new(InventoryCollectionService::new(fetcher, appliance)))
    }
}

/// Builder pattern for container configuration
pub struct ContainerConfigBuilder {
    config: ContainerConfig,
}

impl ContainerConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
        }
    }

    /// Set HTTP timeout
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    /// Trust an extra PEM certificate
    pub fn extra_cert_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.extra_cert_path = path;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ContainerConfig {
        self.config
    }
}

impl Default for ContainerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

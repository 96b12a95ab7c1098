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

//! XClarity Inventory Library
//!
//! This library pulls node hardware inventory from a management appliance
//! (Lenovo XClarity style `/nodes` API) and turns it into fixed-shape records,
//! using a Ports and Adapters (Hexagonal) architecture for maintainability
//! and testability.
//!
//! # Architecture
//!
//! - **Domain**: Node records, errors and pure extraction logic
//! - **Ports**: Interfaces for fetching, configuration and reporting
//! - **Adapters**: TLS/HTTP fetcher, TOML config, text rendering
//!
//! # Usage
//!
//! ```rust,no_run
//! use xclarity_inventory::{ApplianceConfig, Credentials, InventoryReportingService};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplianceConfig::new(
//!         "https://xclarity.example.com",
//!         Credentials::new("reporter", "secret"),
//!     );
//!     let service = xclarity_inventory::create_service(config)?;
//!
//!     let extraction = service.collect_nodes().await?;
//!     for node in &extraction.records {
//!         println!("{} {} {}", node.name, node.cpu_code, node.total_memory);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The extraction step can also be used on its own:
//!
//! ```rust
//! let raw = br#"{"nodeList": [{"name": "Node1", "processors": [{"displayName": "Xeon 6248", "cores": 20}]}]}"#;
//! let records = xclarity_inventory::extract_records(raw).unwrap();
//! assert_eq!(records[0].cpu_code, "6248");
//! ```

pub mod adapters;
pub mod container;
pub mod domain;
pub mod ports;

pub use adapters::primary::{format_record, write_raw, write_records};
pub use adapters::{
    build_trust_store, HttpInventoryFetcher, TomlConfigurationProvider, TrustStore,
    DEFAULT_CONFIG_PATH,
};
pub use container::{ContainerConfig, ContainerConfigBuilder, ServiceContainer};
pub use domain::{
    extract_nodes, extract_records, infer_cpu_code, inspect_cpu_code, total_memory,
    ApplianceConfig, ConfigError, Credentials, ExtractError, ExtractionDiagnostic, FetchError,
    InventoryCollectionService, InventoryError, NodeExtraction, NodeRecord, TrustDegradation,
};
pub use ports::{ConfigurationProvider, InventoryFetcher, InventoryReportingService, OutputFormat};

use std::sync::Arc;

/// Create an inventory service for an appliance with the production adapters
///
/// The trust store and HTTP client are built here, once.
pub fn create_service(
    config: ApplianceConfig,
) -> Result<Arc<dyn InventoryReportingService>, InventoryError> {
    let container = ServiceContainer::for_appliance(&config);
    Ok(container.create_inventory_service(config)?)
}

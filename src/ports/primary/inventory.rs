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

use crate::domain::{InventoryError, NodeExtraction};
use async_trait::async_trait;

/// Primary port - Main interface offered by the inventory domain
///
/// This is what external systems (CLI, library consumers) use to pull node
/// inventory from a configured management appliance.
#[async_trait]
pub trait InventoryReportingService: Send + Sync {
    /// Fetch the raw `/nodes` document from the appliance
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - Response body exactly as received
    /// * `Err(InventoryError)` - The fetch failed
    async fn fetch_document(&self) -> Result<Vec<u8>, InventoryError>;

    /// Fetch the `/nodes` document and extract node records from it
    ///
    /// # Returns
    /// * `Ok(NodeExtraction)` - Records in document order plus diagnostics
    /// * `Err(InventoryError)` - The fetch or the extraction failed
    async fn collect_nodes(&self) -> Result<NodeExtraction, InventoryError>;
}

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

use crate::domain::{Credentials, FetchError};
use async_trait::async_trait;

/// Secondary port - Authenticated document retrieval
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait InventoryFetcher: Send + Sync {
    /// GET `url` with HTTP Basic authentication
    ///
    /// # Arguments
    /// * `url` - Fully built URL, nothing is appended
    /// * `credentials` - Basic-auth username and password
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - Body of a 2xx response
    /// * `Err(FetchError)` - Transport, status or body read failure
    async fn fetch(&self, url: &str, credentials: &Credentials) -> Result<Vec<u8>, FetchError>;
}

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

use super::errors::ExtractionDiagnostic;
use std::fmt;
use std::path::PathBuf;

/// Default HTTP timeout for the appliance request, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Hardware summary of a single managed node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    /// Node name, lower-cased
    pub name: String,
    /// Serial number
    pub serial: String,
    /// Machine model
    pub model: String,
    /// Short CPU family code, or "Unknown"
    pub cpu_code: String,
    /// Speed of the first processor
    pub cpu_speed: f64,
    /// Number of populated processor sockets (always >= 1)
    pub sockets: u32,
    /// Cores of the first processor
    pub cores: u32,
    /// Sum of memory module capacities, in the appliance's unit
    pub total_memory: i64,
}

/// Records extracted from one inventory document, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeExtraction {
    pub records: Vec<NodeRecord>,
    pub diagnostics: Vec<ExtractionDiagnostic>,
}

/// HTTP Basic credentials for the appliance
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection settings for the management appliance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceConfig {
    /// Base URL of the appliance API, e.g. `https://xclarity.example.com`
    pub base_url: String,
    /// Extra PEM certificate to trust alongside the system roots
    pub cert_file: Option<PathBuf>,
    pub credentials: Credentials,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Accepted for compatibility with older config files; nothing polls
    pub interval: Option<u64>,
}

impl ApplianceConfig {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            cert_file: None,
            credentials,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            interval: None,
        }
    }

    /// URL of the node inventory collection
    pub fn nodes_url(&self) -> String {
        format!("{}/nodes", self.base_url.trim_end_matches('/'))
    }
}

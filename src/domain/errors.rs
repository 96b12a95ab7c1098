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

use std::path::PathBuf;
use thiserror::Error;

/// Informational conditions raised while composing the trust store.
///
/// None of these stop the pipeline; the store falls back to whatever roots
/// were successfully loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrustDegradation {
    /// Platform trusted roots could not be loaded
    #[error("system trusted roots unavailable: {0}")]
    SystemRootsUnavailable(String),
    /// The extra certificate file could not be read
    #[error("no additional certificates imported from {}: {}", .path.display(), .reason)]
    ExtraCertUnreadable { path: PathBuf, reason: String },
    /// The extra certificate file was read but held no usable certificate
    #[error("no certs imported from {}, proceeding with system CAs", .path.display())]
    NoCertificatesImported { path: PathBuf },
}

/// Errors raised by the appliance fetch step. All of them are fatal.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// HTTP client could not be constructed
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(String),
    /// DNS, connect, TLS handshake or timeout failure
    #[error("HTTP request error: {0}")]
    Transport(String),
    /// Appliance answered with a non-2xx status
    #[error("status error: HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    /// 2xx response whose body could not be read
    #[error("response error: {0}")]
    BodyRead(String),
}

impl FetchError {
    /// HTTP status carried by the error, if the appliance answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised when the fetched document cannot be turned into records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("document is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("unexpected document shape: {0}")]
    UnexpectedShape(String),
}

/// Informational notes raised while extracting node records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionDiagnostic {
    /// More than one candidate CPU code was found; the first was used
    AmbiguousCpuCode {
        node: String,
        description: String,
        candidates: Vec<String>,
    },
}

impl std::fmt::Display for ExtractionDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionDiagnostic::AmbiguousCpuCode {
                node,
                description,
                candidates,
            } => write!(
                f,
                "Multiple CPU code matches for node '{}' in '{}': {:?}",
                node, description, candidates
            ),
        }
    }
}

/// Errors raised while loading the appliance configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse config file {}: {}", .path.display(), .message)]
    Parse { path: PathBuf, message: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level error for a single inventory invocation
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_error_keeps_status_and_body() {
        let err = FetchError::HttpStatus {
            status: 401,
            body: "{\"message\":\"The user is not authorized\"}".to_string(),
        };

        assert_eq!(err.status(), Some(401));
        let rendered = err.to_string();
        assert!(rendered.contains("401"));
        assert!(rendered.contains("The user is not authorized"));
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = FetchError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_inventory_error_is_transparent() {
        let err: InventoryError = ExtractError::InvalidJson("EOF".to_string()).into();
        assert_eq!(err.to_string(), "document is not valid JSON: EOF");
    }

    #[test]
    fn test_ambiguous_diagnostic_display() {
        let diag = ExtractionDiagnostic::AmbiguousCpuCode {
            node: "nodea".to_string(),
            description: "Xeon 6248 8280".to_string(),
            candidates: vec!["6248".to_string(), "8280".to_string()],
        };
        assert!(diag.to_string().contains("Multiple CPU code matches"));
    }
}

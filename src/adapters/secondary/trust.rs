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

//! Trust store composition for the appliance client
//!
//! Management appliances usually ship with a self-signed certificate, so the
//! platform roots can be extended with one extra PEM file. Problems with that
//! file are never fatal: they are recorded and the store carries on with the
//! roots it has.

use crate::domain::TrustDegradation;
use log::{debug, info};
use rustls::{Certificate, ClientConfig, RootCertStore};
use std::path::Path;

/// Composed set of trusted roots plus notes about anything that was skipped
#[derive(Debug, Clone)]
pub struct TrustStore {
    roots: RootCertStore,
    system_roots: usize,
    extra_roots: usize,
    degradations: Vec<TrustDegradation>,
}

impl TrustStore {
    /// Compose a store from already-loaded system roots and an optional extra PEM file
    ///
    /// # Arguments
    /// * `system_roots` - DER encoded system roots, or the reason they are unavailable
    /// * `extra_cert_path` - Optional PEM file with one or more certificates
    pub fn compose(
        system_roots: Result<Vec<Vec<u8>>, String>,
        extra_cert_path: Option<&Path>,
    ) -> Self {
        let mut store = Self {
            roots: RootCertStore::empty(),
            system_roots: 0,
            extra_roots: 0,
            degradations: Vec::new(),
        };

        match system_roots {
            Ok(ders) => {
                let (added, ignored) = store.roots.add_parsable_certificates(&ders[..]);
                if ignored > 0 {
                    debug!("Ignored {ignored} unparseable system certificates");
                }
                store.system_roots = added;
            }
            Err(reason) => store.degrade(TrustDegradation::SystemRootsUnavailable(reason)),
        }

        if let Some(path) = extra_cert_path {
            store.import_extra(path);
        }

        debug!(
            "Trust store ready: {} system roots, {} extra roots",
            store.system_roots, store.extra_roots
        );
        store
    }

    fn import_extra(&mut self, path: &Path) {
        let pem = match std::fs::read(path) {
            Ok(pem) => pem,
            Err(e) => {
                self.degrade(TrustDegradation::ExtraCertUnreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        let ders = rustls_pemfile::certs(&mut pem.as_slice()).unwrap_or_else(|e| {
            debug!("PEM decoding of {} failed: {e}", path.display());
            Vec::new()
        });

        for der in ders {
            match self.roots.add(&Certificate(der)) {
                Ok(()) => self.extra_roots += 1,
                Err(e) => debug!("Rejected certificate from {}: {e}", path.display()),
            }
        }

        if self.extra_roots == 0 {
            self.degrade(TrustDegradation::NoCertificatesImported {
                path: path.to_path_buf(),
            });
        }
    }

    fn degrade(&mut self, degradation: TrustDegradation) {
        info!("{degradation}");
        self.degradations.push(degradation);
    }

    /// Number of platform roots in the store
    pub fn system_roots(&self) -> usize {
        self.system_roots
    }

    /// Number of roots imported from the extra certificate file
    pub fn extra_roots(&self) -> usize {
        self.extra_roots
    }

    /// Total number of trusted roots
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Informational notes recorded while composing the store
    pub fn degradations(&self) -> &[TrustDegradation] {
        &self.degradations
    }

    /// TLS client configuration that verifies servers against this store
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::builder()
            .with_safe_defaults()
            .with_root_certificates(self.roots.clone())
            .with_no_client_auth()
    }
}

/// Load the platform's trusted roots as DER blobs
pub fn load_system_roots() -> Result<Vec<Vec<u8>>, String> {
    rustls_native_certs::load_native_certs()
        .map(|certs| certs.into_iter().map(|cert| cert.0).collect())
        .map_err(|e| e.to_string())
}

/// Build the trust store from the platform roots and an optional extra certificate
pub fn build_trust_store(extra_cert_path: Option<&Path>) -> TrustStore {
    TrustStore::compose(load_system_roots(), extra_cert_path)
}

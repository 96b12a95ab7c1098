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

//! CPU code inference from free-text processor descriptions

use lazy_static::lazy_static;
use regex::Regex;

/// Returned when no CPU code can be recovered
pub const UNKNOWN_CPU_CODE: &str = "Unknown";

lazy_static! {
    // Xeon-style four digit code, ASCII only. The right-hand boundary is
    // checked by hand so that it isn't consumed and adjacent codes still have
    // a left boundary.
    static ref CPU_CODE_RE: Regex = Regex::new(r"[\t\n\x0C\r -]([2568][0-9]{3})").unwrap();
}

/// Outcome of scanning a processor description for CPU codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuCodeInference {
    /// Chosen code, or [`UNKNOWN_CPU_CODE`]
    pub code: String,
    /// Every candidate found, in left-to-right order
    pub candidates: Vec<String>,
}

impl CpuCodeInference {
    /// More than one candidate matched and the first was assumed correct
    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// Scan a processor description for Xeon-style CPU codes
///
/// A code is four ASCII digits starting with 2, 5, 6 or 8, preceded by ASCII
/// whitespace or a hyphen and followed by ASCII whitespace or the end of the
/// description.
///
/// # Arguments
/// * `description` - Processor display name, e.g. "Intel(R) Xeon(R) Gold 6248 CPU @ 2.50GHz"
///
/// # Returns
/// * The first candidate (or "Unknown") together with all candidates seen
pub fn inspect_cpu_code(description: &str) -> CpuCodeInference {
    let candidates: Vec<String> = CPU_CODE_RE
        .captures_iter(description)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let bounded = description[whole.end()..]
                .chars()
                .next()
                .map_or(true, |c| c.is_ascii_whitespace());
            bounded.then(|| caps[1].to_string())
        })
        .collect();

    let code = candidates
        .first()
        .cloned()
        .unwrap_or_else(|| UNKNOWN_CPU_CODE.to_string());

    CpuCodeInference { code, candidates }
}

/// Extract a meaningful CPU code from an unstructured processor description
///
/// When several codes match, the first one is assumed to be correct.
pub fn infer_cpu_code(description: &str) -> String {
    inspect_cpu_code(description).code
}

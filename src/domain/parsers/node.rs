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

//! Node record extraction from the appliance `/nodes` document

use super::common::{value_as_array, value_as_count, value_as_f64, value_as_string};
use super::cpu::inspect_cpu_code;
use super::memory::total_memory;
use crate::domain::{ExtractError, ExtractionDiagnostic, NodeExtraction, NodeRecord};
use log::{debug, warn};
use serde_json::Value;

/// Key holding the node collection in the `/nodes` document
pub const NODE_LIST_KEY: &str = "nodeList";

/// Locate the node collection in a decoded document
///
/// # Returns
/// * `Ok(&[Value])` - Node entries; empty when the key is absent
/// * `Err(ExtractError)` - The key exists but does not hold an array
pub fn node_list(document: &Value) -> Result<&[Value], ExtractError> {
    match document.get(NODE_LIST_KEY) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(nodes)) => Ok(nodes.as_slice()),
        Some(other) => Err(ExtractError::UnexpectedShape(format!(
            "'{}' is not an array (found {})",
            NODE_LIST_KEY,
            json_type_name(other)
        ))),
    }
}

/// Project one node entry into a record
///
/// # Returns
/// * `Some((NodeRecord, Option<ExtractionDiagnostic>))` - Record and any ambiguity note
/// * `None` - The node has no processors and is skipped
pub fn parse_node(node: &Value) -> Option<(NodeRecord, Option<ExtractionDiagnostic>)> {
    let processors = value_as_array(node.get("processors"));
    let first = processors.first()?;

    let name = value_as_string(node.get("name")).to_lowercase();
    let description = value_as_string(first.get("displayName"));
    let inference = inspect_cpu_code(&description);

    let diagnostic = inference
        .is_ambiguous()
        .then(|| ExtractionDiagnostic::AmbiguousCpuCode {
            node: name.clone(),
            description: description.clone(),
            candidates: inference.candidates.clone(),
        });

    let record = NodeRecord {
        name,
        serial: value_as_string(node.get("serialNumber")),
        model: value_as_string(node.get("model")),
        cpu_code: inference.code,
        cpu_speed: value_as_f64(first.get("speed")),
        sockets: u32::try_from(processors.len()).unwrap_or(u32::MAX),
        cores: value_as_count(first.get("cores")),
        total_memory: total_memory(node.get("memoryModules")),
    };

    Some((record, diagnostic))
}

/// Parse a raw `/nodes` response into records and diagnostics
///
/// Nodes without processors (empty bays and the like) are dropped. Records
/// keep document order.
pub fn extract_nodes(raw: &[u8]) -> Result<NodeExtraction, ExtractError> {
    let document: Value =
        serde_json::from_slice(raw).map_err(|e| ExtractError::InvalidJson(e.to_string()))?;

    let mut extraction = NodeExtraction::default();

    for (index, node) in node_list(&document)?.iter().enumerate() {
        match parse_node(node) {
            Some((record, diagnostic)) => {
                if let Some(diagnostic) = diagnostic {
                    warn!("{diagnostic}");
                    extraction.diagnostics.push(diagnostic);
                }
                extraction.records.push(record);
            }
            None => debug!(
                "Skipping node {} ('{}'): no processors",
                index,
                value_as_string(node.get("name"))
            ),
        }
    }

    Ok(extraction)
}

/// Parse a raw `/nodes` response into node records
pub fn extract_records(raw: &[u8]) -> Result<Vec<NodeRecord>, ExtractError> {
    extract_nodes(raw).map(|extraction| extraction.records)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

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

//! Memory module aggregation

use super::common::{value_as_array, value_as_i64};
use serde_json::Value;

/// Sum the capacity of every memory module of a node
///
/// No unit conversion is done; the result is in whatever unit the appliance
/// reports module capacities in.
///
/// # Arguments
/// * `modules` - The node's `memoryModules` value, if present
///
/// # Returns
/// * Total capacity, saturating at the `i64` bounds; 0 for a missing, empty
///   or non-array value
pub fn total_memory(modules: Option<&Value>) -> i64 {
    value_as_array(modules)
        .iter()
        .map(|module| value_as_i64(module.get("capacity")))
        .fold(0i64, |total, capacity| total.saturating_add(capacity))
}

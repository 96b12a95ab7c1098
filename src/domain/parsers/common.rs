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

//! Best-effort accessors for loosely-typed JSON fields
//!
//! Appliance documents are not strict about types: numbers sometimes arrive
//! as strings and fields come and go between firmware releases. These helpers
//! never fail; anything unusable becomes an empty string or zero.

use serde_json::Value;

/// Read a scalar field as a string
///
/// # Arguments
/// * `value` - Field value, if present
///
/// # Returns
/// * The string itself, the JSON text of a number or boolean, or `""`
pub fn value_as_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Read a field as a signed integer
///
/// Floats are truncated toward zero and numeric strings are parsed.
///
/// # Arguments
/// * `value` - Field value, if present
///
/// # Returns
/// * Parsed integer, or 0 when absent or non-numeric
pub fn value_as_i64(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Read a field as a float
///
/// # Arguments
/// * `value` - Field value, if present
///
/// # Returns
/// * Parsed float, or 0.0 when absent or non-numeric
pub fn value_as_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Read a non-negative count, clamping anything out of range to zero
pub fn value_as_count(value: Option<&Value>) -> u32 {
    u32::try_from(value_as_i64(value)).unwrap_or(0)
}

/// Borrow a field as an array slice; anything else is treated as empty
pub fn value_as_array(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

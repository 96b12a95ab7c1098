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

use crate::domain::{ApplianceConfig, ConfigError};
use std::str::FromStr;

/// Secondary port - Configuration provider abstraction
///
/// This interface abstracts how the appliance configuration is loaded,
/// allowing for different sources (files, environment, tests, etc.)
pub trait ConfigurationProvider: Send + Sync {
    /// Get the appliance connection configuration
    ///
    /// # Returns
    /// * `Ok(ApplianceConfig)` - Validated configuration
    /// * `Err(ConfigError)` - Error loading configuration
    fn appliance_config(&self) -> Result<ApplianceConfig, ConfigError>;
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed-width table: name serial model cpu speed sockets cores memory
    Table,
    /// Terse CSV: name,serial,model,sockets,cores
    Csv,
    /// Terse CSV with a trailing memory column
    CsvWithMemory,
    /// Fetched JSON passed through untouched
    Raw,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Table
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "csv-memory" => Ok(OutputFormat::CsvWithMemory),
            "raw" | "json" => Ok(OutputFormat::Raw),
            _ => Err("Output format must be one of 'table', 'csv', 'csv-memory' or 'raw'".to_string()),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::CsvWithMemory => write!(f, "csv-memory"),
            OutputFormat::Raw => write!(f, "raw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!(
            "csv-memory".parse::<OutputFormat>().unwrap(),
            OutputFormat::CsvWithMemory
        );
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Raw);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display_round_trips() {
        for format in [
            OutputFormat::Table,
            OutputFormat::Csv,
            OutputFormat::CsvWithMemory,
            OutputFormat::Raw,
        ] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }
}

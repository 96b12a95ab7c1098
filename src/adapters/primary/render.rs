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

//! Plain text rendering of node records

use crate::domain::NodeRecord;
use crate::ports::OutputFormat;
use std::borrow::Cow;
use std::io::{self, Write};

/// Format one record as a fixed-width table line
///
/// Columns: name serial model cpu speed sockets cores memory
pub fn table_line(record: &NodeRecord) -> String {
    format!(
        "{:<20} {:<10} {:<10} {:<8} {:.2} {} {:>2} {:>4}",
        record.name,
        record.serial,
        record.model,
        record.cpu_code,
        record.cpu_speed,
        record.sockets,
        record.cores,
        record.total_memory
    )
}

/// Format one record as a terse comma-separated line
///
/// Columns: name,serial,model,sockets,cores and optionally memory
pub fn csv_line(record: &NodeRecord, with_memory: bool) -> String {
    let mut fields = vec![
        csv_field(&record.name),
        csv_field(&record.serial),
        csv_field(&record.model),
        Cow::Owned(record.sockets.to_string()),
        Cow::Owned(record.cores.to_string()),
    ];
    if with_memory {
        fields.push(Cow::Owned(record.total_memory.to_string()));
    }
    fields.join(",")
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Format a record for the given output format; `None` for raw output
pub fn format_record(record: &NodeRecord, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Table => Some(table_line(record)),
        OutputFormat::Csv => Some(csv_line(record, false)),
        OutputFormat::CsvWithMemory => Some(csv_line(record, true)),
        OutputFormat::Raw => None,
    }
}

/// Write every record, one per line, in the order given
pub fn write_records<W: Write>(
    out: &mut W,
    records: &[NodeRecord],
    format: OutputFormat,
) -> io::Result<()> {
    for record in records {
        if let Some(line) = format_record(record, format) {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()
}

/// Pass the fetched document through untouched
pub fn write_raw<W: Write>(out: &mut W, raw: &[u8]) -> io::Result<()> {
    out.write_all(raw)?;
    if !raw.ends_with(b"\n") {
        out.write_all(b"\n")?;
    }
    out.flush()
}

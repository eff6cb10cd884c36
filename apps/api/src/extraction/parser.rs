//! Generator output parsing — three tiers, first success wins.
//!
//! 1. The whole (trimmed) response as JSON.
//! 2. The span from the first `{` to the last `}` as JSON.
//! 3. A line scanner keyed on the nine field names. Never fails.
//!
//! The result is still loosely typed; `normalize` turns it into a record.

use serde_json::{Map, Value};

use crate::models::Field;

/// Which tier produced the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    WholeResponse,
    EmbeddedObject,
    LineScan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub tier: ParseTier,
    pub value: Value,
}

pub fn parse_generator_output(response: &str) -> ParsedResponse {
    let response = response.trim();

    if let Ok(value) = serde_json::from_str::<Value>(response) {
        return ParsedResponse {
            tier: ParseTier::WholeResponse,
            value,
        };
    }

    if let Some(value) = embedded_object(response) {
        return ParsedResponse {
            tier: ParseTier::EmbeddedObject,
            value,
        };
    }

    ParsedResponse {
        tier: ParseTier::LineScan,
        value: Value::Object(scan_sections(response)),
    }
}

/// Greedy `{ … }` span: first opening brace to last closing brace, across lines.
fn embedded_object(response: &str) -> Option<Value> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&response[start..=end]).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No header seen yet; lines are dropped.
    Preamble,
    InSection(Field),
}

/// Line-based fallback.
///
/// A trimmed line equal to a field name opens that section. Within a section,
/// each non-empty line is appended to a list field or replaces a scalar field's
/// value, so only the last line of a multi-line scalar survives.
pub fn scan_sections(response: &str) -> Map<String, Value> {
    let mut sections: Map<String, Value> = Field::ALL
        .into_iter()
        .map(|f| (f.key().to_string(), f.default_value()))
        .collect();
    let mut state = ScanState::Preamble;

    for line in response.split('\n') {
        let line = line.trim();

        if let Some(field) = Field::from_key(line) {
            state = ScanState::InSection(field);
            continue;
        }

        let ScanState::InSection(field) = state else {
            continue;
        };
        if line.is_empty() {
            continue;
        }

        match sections.get_mut(field.key()) {
            Some(Value::Array(items)) => items.push(Value::String(line.to_string())),
            Some(slot) => *slot = Value::String(line.to_string()),
            None => {
                sections.insert(field.key().to_string(), Value::String(line.to_string()));
            }
        }
    }

    sections
}

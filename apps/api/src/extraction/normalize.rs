//! Normalization — loosely-typed parse result to `StructuredRecord`.
//!
//! Missing scalar fields become `""`. List fields that are missing or not
//! arrays become `[]`; a non-array value is discarded, never coerced. Keys
//! outside the nine known fields are dropped.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::extraction::ExtractionError;
use crate::models::{Entry, Field, StructuredRecord};

pub fn normalize(parsed: Value) -> Result<StructuredRecord, ExtractionError> {
    let mut map = match parsed {
        Value::Object(map) => map,
        other => {
            return Err(ExtractionError::NotAnObject {
                found: json_kind(&other),
            })
        }
    };

    Ok(StructuredRecord {
        name: scalar(&mut map, Field::Name),
        email: scalar(&mut map, Field::Email),
        github: scalar(&mut map, Field::GitHub),
        linkedin: scalar(&mut map, Field::LinkedIn),
        education: list(&mut map, Field::Education),
        professional_experience: list(&mut map, Field::ProfessionalExperience),
        projects: list(&mut map, Field::Projects),
        questions_and_answers: list(&mut map, Field::QuestionsAndAnswers),
        skills: list(&mut map, Field::Skills),
    })
}

/// Strings pass through, `null` is treated as absent, anything else keeps its JSON text.
fn scalar(map: &mut Map<String, Value>, field: Field) -> String {
    match map.remove(field.key()) {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Every array element survives; see [`Entry::from_value`].
fn list<T>(map: &mut Map<String, Value>, field: Field) -> Vec<Entry<T>>
where
    T: DeserializeOwned + Serialize,
{
    match map.remove(field.key()) {
        Some(Value::Array(items)) => items.into_iter().map(Entry::from_value).collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Structured resume record — the normalized output of the extraction pipeline.
//!
//! Scalar identity fields are plain strings. List fields hold loosely-typed
//! entries: the generator may emit free text, an object in the expected shape,
//! or something else entirely, and all three survive normalization.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ────────────────────────────────────────────────────────────────────────────
// Field catalogue
// ────────────────────────────────────────────────────────────────────────────

/// One of the nine keys every structured record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    GitHub,
    LinkedIn,
    Education,
    ProfessionalExperience,
    Projects,
    QuestionsAndAnswers,
    Skills,
}

impl Field {
    /// All fields in prompt order.
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Email,
        Field::GitHub,
        Field::LinkedIn,
        Field::Education,
        Field::ProfessionalExperience,
        Field::Projects,
        Field::QuestionsAndAnswers,
        Field::Skills,
    ];

    /// The serialized key, exactly as it appears in the record and in generator output.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::GitHub => "GitHub",
            Field::LinkedIn => "LinkedIn",
            Field::Education => "Education",
            Field::ProfessionalExperience => "Professional Experience",
            Field::Projects => "Projects",
            Field::QuestionsAndAnswers => "Questions and Answers",
            Field::Skills => "Skills",
        }
    }

    pub fn is_list(self) -> bool {
        !matches!(
            self,
            Field::Name | Field::Email | Field::GitHub | Field::LinkedIn
        )
    }

    /// Exact, case-sensitive lookup by serialized key.
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }

    /// `""` for scalar fields, `[]` for list fields.
    pub fn default_value(self) -> Value {
        if self.is_list() {
            Value::Array(Vec::new())
        } else {
            Value::String(String::new())
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// List entries
// ────────────────────────────────────────────────────────────────────────────

/// A single element of a list field.
///
/// A JSON string is `Text`. An object is `Structured` only when the typed shape
/// reproduces it exactly; a mistyped or `null` known key would otherwise be
/// lost, so such elements, like every other value, are kept verbatim as
/// `Other`. Deserialization of an `Entry` therefore never fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry<T> {
    Text(String),
    Structured(T),
    Other(Value),
}

impl<T: DeserializeOwned + Serialize> Entry<T> {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Entry::Text(text),
            value => match serde_json::from_value::<T>(value.clone()) {
                Ok(typed) if serde_json::to_value(&typed).ok().as_ref() == Some(&value) => {
                    Entry::Structured(typed)
                }
                _ => Entry::Other(value),
            },
        }
    }
}

impl<'de, T: DeserializeOwned + Serialize> Deserialize<'de> for Entry<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Entry::from_value)
    }
}

#[cfg(test)]
impl<T> Entry<T> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_structured(&self) -> Option<&T> {
        match self {
            Entry::Structured(t) => Some(t),
            _ => None,
        }
    }
}

impl<T> From<&str> for Entry<T> {
    fn from(text: &str) -> Self {
        Entry::Text(text.to_string())
    }
}

/// A degree or other education line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Degree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Keys the generator emitted beyond the known ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A professional experience entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An interview question paired with the answer the resume supports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Skills grouped under a heading, for generators that categorize them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Record
// ────────────────────────────────────────────────────────────────────────────

/// The normalized record. Always serializes with exactly the nine keys of [`Field::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "GitHub")]
    pub github: String,
    #[serde(rename = "LinkedIn")]
    pub linkedin: String,
    #[serde(rename = "Education")]
    pub education: Vec<Entry<Degree>>,
    #[serde(rename = "Professional Experience")]
    pub professional_experience: Vec<Entry<Role>>,
    #[serde(rename = "Projects")]
    pub projects: Vec<Entry<Project>>,
    #[serde(rename = "Questions and Answers")]
    pub questions_and_answers: Vec<Entry<QuestionAnswer>>,
    #[serde(rename = "Skills")]
    pub skills: Vec<Entry<SkillGroup>>,
}


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidReferenceError;

/// A validated pointer at a previously created fixture.
///
/// Either `factory` (optionally qualified by `index`) or `label` is set, and
/// never both `index` and `label`. Values are only produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    factory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Reference {
    pub(crate) fn new(factory: Option<String>, index: Option<i64>, label: Option<String>) -> Self {
        Reference {
            factory,
            index,
            label,
        }
    }

    pub fn factory(&self) -> Option<&str> {
        self.factory.as_deref()
    }

    /// Zero-based position among fixtures of the same factory; `-1` is the last.
    pub fn index(&self) -> Option<i64> {
        self.index
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Renders the reference back into phrase form, e.g. `2nd colour` or
/// `user: "me"`.
impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.factory, self.index, &self.label) {
            (Some(factory), Some(index), _) => match ordinal_for(index) {
                Some(ordinal) => write!(f, "{} {}", ordinal, factory),
                None => write!(f, "{}[{}]", factory, index),
            },
            (Some(factory), None, Some(label)) => write!(f, "{}: \"{}\"", factory, escape_label(label)),
            (Some(factory), None, None) => write!(f, "{}", factory),
            (None, _, Some(label)) => write!(f, "\"{}\"", escape_label(label)),
            (None, _, None) => Ok(()),
        }
    }
}

impl FromStr for Reference {
    type Err = InvalidReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_reference(s, None)
    }
}

/// The already split form of a reference, as handed over by calling code
/// or decoded from JSON. Keys other than `factory`, `index` and `label` end
/// up in `extra` and make the reference invalid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReferenceFields {
    #[serde(default)]
    pub factory: Option<String>,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ReferenceFields {
    pub fn new() -> Self {
        ReferenceFields::default()
    }

    pub fn with_factory(mut self, factory: impl Into<String>) -> Self {
        self.factory = Some(factory.into());
        self
    }

    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Parser input: free text in the reference grammar, or the structured triple.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawReference {
    Text(String),
    Structured(ReferenceFields),
}

impl From<&str> for RawReference {
    fn from(text: &str) -> Self {
        RawReference::Text(text.to_string())
    }
}

impl From<String> for RawReference {
    fn from(text: String) -> Self {
        RawReference::Text(text)
    }
}

impl From<ReferenceFields> for RawReference {
    fn from(fields: ReferenceFields) -> Self {
        RawReference::Structured(fields)
    }
}

/// Spells an index as the ordinal the grammar accepts: `0` is `1st`, `-1`
/// is `last`. Other negative indexes have no spelling.
pub fn ordinal_for(index: i64) -> Option<String> {
    if index == -1 {
        return Some("last".to_string());
    }
    if index < 0 {
        return None;
    }

    let position = index.checked_add(1)?;
    let suffix = match (position % 10, position % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };

    Some(format!("{}{}", position, suffix))
}

fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}


use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a reference was rejected. Serialises to the snake_case tag used by
/// callers that need to tell failures apart without matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    SuperfluousContent,
    FactoryOrLabelRequired,
    BothIndexAndLabel,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::SuperfluousContent => "superfluous_content",
            Reason::FactoryOrLabelRequired => "factory_or_label_required",
            Reason::BothIndexAndLabel => "both_index_and_label",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidReferenceError {
    #[error("superfluous content: {content:?}")]
    SuperfluousContent { content: String },

    #[error("factory or label required")]
    FactoryOrLabelRequired,

    #[error("can't specify both index and label")]
    BothIndexAndLabel,
}

impl InvalidReferenceError {
    pub fn reason(&self) -> Reason {
        match self {
            InvalidReferenceError::SuperfluousContent { .. } => Reason::SuperfluousContent,
            InvalidReferenceError::FactoryOrLabelRequired => Reason::FactoryOrLabelRequired,
            InvalidReferenceError::BothIndexAndLabel => Reason::BothIndexAndLabel,
        }
    }

    pub(crate) fn superfluous(content: impl Into<String>) -> Self {
        InvalidReferenceError::SuperfluousContent {
            content: content.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Empty alias phrase registered for {canonical:?}")]
    EmptyPhrase { canonical: String },

    #[error("Alias phrase {phrase:?} maps to both {first:?} and {second:?}")]
    ConflictingPhrase {
        phrase: String,
        first: String,
        second: String,
    },
}

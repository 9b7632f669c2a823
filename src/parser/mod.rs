
use pest::Parser;
use pest_derive::Parser;
use tracing::{debug, trace};

use crate::alias::AliasConfig;
use crate::error::InvalidReferenceError;
use crate::model::{RawReference, Reference, ReferenceFields};

#[derive(Parser)]
#[grammar = "pests/grammar.pest"]
pub struct ReferenceParser;

/// Ordinal words the grammar accepts, with the index each resolves to.
/// Numeric ordinals (`1st`, `22nd`, ...) are resolved by rule instead.
const ORDINAL_WORDS: &[(&str, i64)] = &[("first", 0), ("last", -1)];

/// Parses a reference given either as text or as already split fields.
pub fn parse(
    input: impl Into<RawReference>,
    config: Option<&AliasConfig>,
) -> Result<Reference, InvalidReferenceError> {
    match input.into() {
        RawReference::Text(text) => parse_reference(&text, config),
        RawReference::Structured(fields) => parse_fields(fields),
    }
}

/// Parses reference text. When `config` knows the whole (trimmed) text as
/// an alias, its canonical string is parsed instead; the canonical string
/// is not looked up again.
pub fn parse_reference(
    input: &str,
    config: Option<&AliasConfig>,
) -> Result<Reference, InvalidReferenceError> {
    let mut text = input.trim();

    if let Some(canonical) = config.and_then(|config| config.resolve(text)) {
        debug!(alias = text, canonical, "Substituted alias");
        text = canonical.trim();
    }

    let candidate = tokenize(text)?;
    let result = validate(candidate);

    match &result {
        Ok(reference) => debug!(input = text, %reference, "Parsed reference"),
        Err(error) => debug!(input = text, reason = %error.reason(), "Rejected reference"),
    }

    result
}

/// Validates a structured reference. Unknown keys count as superfluous
/// content.
pub fn parse_fields(fields: ReferenceFields) -> Result<Reference, InvalidReferenceError> {
    if let Some(key) = fields.extra.keys().next() {
        return Err(InvalidReferenceError::superfluous(key.clone()));
    }

    validate(Candidate {
        factory: fields.factory,
        index: fields.index,
        label: fields.label,
    })
}

/// What the grammar (or the caller) supplied, before the reference rules
/// are checked.
#[derive(Debug, Default)]
struct Candidate {
    factory: Option<String>,
    index: Option<i64>,
    label: Option<String>,
}

fn tokenize(text: &str) -> Result<Candidate, InvalidReferenceError> {
    let pairs = ReferenceParser::parse(Rule::reference, text)
        .map_err(|_| InvalidReferenceError::superfluous(text))?;

    let mut candidate = Candidate::default();

    for pair in pairs.flatten() {
        trace!(rule = ?pair.as_rule(), token = pair.as_str());

        match pair.as_rule() {
            Rule::ordinal => candidate.index = Some(parse_ordinal(pair.as_str())?),
            Rule::factory => candidate.factory = Some(pair.as_str().to_string()),
            Rule::label_text => candidate.label = Some(unescape_label(pair.as_str())),
            Rule::superfluous => {
                return Err(InvalidReferenceError::superfluous(pair.as_str()));
            }
            _ => {}
        }
    }

    Ok(candidate)
}

fn parse_ordinal(token: &str) -> Result<i64, InvalidReferenceError> {
    if let Some(&(_, index)) = ORDINAL_WORDS.iter().find(|(word, _)| *word == token) {
        return Ok(index);
    }

    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<i64>()
        .map(|position| position - 1)
        .map_err(|_| InvalidReferenceError::superfluous(token))
}

fn unescape_label(raw: &str) -> String {
    let mut label = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                label.push(escaped);
            }
        } else {
            label.push(c);
        }
    }
    label
}

fn validate(candidate: Candidate) -> Result<Reference, InvalidReferenceError> {
    // A label segment excludes an ordinal even when the label itself is blank.
    if candidate.index.is_some() && candidate.label.is_some() {
        return Err(InvalidReferenceError::BothIndexAndLabel);
    }

    // A blank label is rejected, never treated as absent.
    if candidate.label.as_deref().is_some_and(is_blank) {
        return Err(InvalidReferenceError::FactoryOrLabelRequired);
    }

    let factory = candidate.factory.filter(|factory| !is_blank(factory));

    if factory.is_none() && candidate.label.is_none() {
        return Err(InvalidReferenceError::FactoryOrLabelRequired);
    }

    Ok(Reference::new(factory, candidate.index, candidate.label))
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

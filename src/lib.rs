// src/lib.rs
pub mod alias;
pub mod api;
pub mod error;
pub mod model;
pub mod parser;

pub use alias::{AliasConfig, AliasConfigBuilder, AliasEntry};
pub use error::{ConfigError, InvalidReferenceError, Reason};
pub use model::{RawReference, Reference, ReferenceFields};
pub use parser::{parse, parse_fields, parse_reference};

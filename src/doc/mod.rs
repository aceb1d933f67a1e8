//! Structured document model for line-oriented `key=value` config text.
//!
//! A [`Document`] is an ordered list of sections, each an ordered list of
//! classified lines. Nothing is merged, deduplicated, or reordered at
//! parse time, so arbitrary hand-authored files survive a parse/serialize
//! round trip with their structure intact.

mod model;
mod parse;
mod serialize;

pub use model::{Document, Line, Section};
pub use parse::parse_document;
pub use serialize::serialize_document;

//! ueconfig: lossless editing of Unreal-style INI configuration files
//!
//! Engine configuration files are hand-authored, line-oriented text:
//! `[Section]` headers, `key=value` properties, comments, and blank lines,
//! with duplicate sections and unknown keys all legal. Corrupting any of
//! that on a write loses user data, so everything here is built around
//! round-trip fidelity.
//!
//! # Architecture
//!
//! Two independent paths over the same text:
//!
//! - [`doc`] — the structured document model. [`parse_document`] turns raw
//!   text into an ordered, lossless [`Document`]; a structured editor
//!   mutates it in place; [`serialize_document`] flattens it back out.
//! - [`settings`] — the quick-edit path. [`decode_settings`] pulls a fixed
//!   set of typed renderer settings straight out of raw text, and
//!   [`encode_settings`] writes them back with a minimal line-level
//!   rewrite that leaves everything else byte-for-byte untouched.
//!
//! Both paths preserve unrecognized content and emit canonical
//! `key=value` formatting for the lines they touch, so interleaving them
//! on the same file is safe.
//!
//! # Totality
//!
//! Parsing and decoding never fail: any text is representable, malformed
//! content simply decodes to an empty settings record. Only the file and
//! store layers return errors.

pub mod doc;
pub mod file;
pub mod settings;
pub mod store;

// Re-exports
pub use doc::{parse_document, serialize_document, Document, Line, Section};
pub use file::{read_text, write_text, FileError};
pub use settings::{
    decode_settings, encode_settings, AntiAliasingMethod, EngineSettings, GraphicsRhi,
};
pub use store::{JsonFileStore, MemoryStore, MetadataStore, ProjectMeta, StoreError};

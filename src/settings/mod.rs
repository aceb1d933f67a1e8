//! Typed quick-edit of known renderer settings over raw config text.
//!
//! A fixed table maps each setting to its owning section and key.
//! [`decode_settings`] is a whole-text pattern search; [`encode_settings`]
//! rewrites at most one line per setting (or inserts one), leaving every
//! other byte of the file alone. Neither goes through the structured
//! document model, and neither can fail.

mod quick;
mod schema;

pub use quick::{decode_settings, encode_settings};
pub use schema::{AntiAliasingMethod, EngineSettings, GraphicsRhi};

//! Decoder for LSIF dumps in the JSON-lines wire format.
//!
//! Every line goes through the same pipeline: JSON syntax into a loosely typed
//! [`serde_json::Value`], field-level validation against the schema table of
//! [`lsif_type::schema`], and finally narrowing into a typed
//! [`Entry`](lsif_type::Entry).

pub mod parser;

pub use parser::{decode_line, parse, Error, ErrorKind, Parse};

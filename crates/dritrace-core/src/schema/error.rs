use thiserror::Error;

/// Errors returned by schema construction, decoding and field access.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("buffer too short for {schema}: need {needed} bytes, got {actual}")]
    BufferTooShort {
        schema: &'static str,
        needed: usize,
        actual: usize,
    },
    #[error("unknown field: {name}")]
    UnknownField { name: String },
    #[error("unknown path segment: {segment}")]
    UnknownPath { segment: String },
    #[error("invalid field path: {path}")]
    InvalidPath { path: String },
    #[error("path segment {segment} does not address a leaf field")]
    NotALeaf { segment: String },
    #[error("field {name} is too wide to resolve as a scalar")]
    NotScalar { name: String },
}

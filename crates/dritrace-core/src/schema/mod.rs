//! Declarative binary record schemas.
//!
//! A [`Schema`] is an immutable tree of named fields: leaves with a fixed
//! byte width, or groups of nested fields. Schemas are built once (see
//! `protocol::layout`) and shared read-only across all decode operations;
//! every decode instantiates a fresh mutable [`Record`] value tree, so no
//! state is ever aliased between records.
//!
//! Field access uses the protocol's path syntax, parsed once into a
//! [`FieldPath`] and reused (see `path`).

mod codec;
mod error;
mod path;
mod value;

pub use error::SchemaError;
pub use path::{FieldPath, Segment};
pub use value::{FieldValue, LeafValue, Node, Record};

/// One node of a schema tree.
#[derive(Debug, Clone)]
pub enum Field {
    /// A contiguous run of `width` bytes.
    Leaf { name: &'static str, width: usize },
    /// An ordered sequence of nested fields.
    Group {
        name: &'static str,
        fields: Vec<Field>,
    },
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Leaf { name, .. } => name,
            Field::Group { name, .. } => name,
        }
    }

    /// Total byte length of this field, computed recursively.
    pub fn byte_len(&self) -> usize {
        match self {
            Field::Leaf { width, .. } => *width,
            Field::Group { fields, .. } => fields.iter().map(Field::byte_len).sum(),
        }
    }
}

/// Shorthand constructor for a leaf field.
pub fn leaf(name: &'static str, width: usize) -> Field {
    Field::Leaf { name, width }
}

/// Shorthand constructor for a group field.
pub fn group(name: &'static str, fields: Vec<Field>) -> Field {
    Field::Group { name, fields }
}

/// An immutable, named record layout with a fixed total byte length.
///
/// # Examples
/// ```
/// use dritrace_core::schema::{Schema, leaf};
///
/// let schema = Schema::new("pair", vec![leaf("lo", 1), leaf("hi", 1)], 2);
/// assert_eq!(schema.byte_len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
    len: usize,
}

impl Schema {
    /// Build a schema and check its computed length against the declared
    /// constant. A mismatch is a configuration defect, not a runtime
    /// condition, and aborts immediately.
    pub fn new(name: &'static str, fields: Vec<Field>, expected_len: usize) -> Self {
        let len: usize = fields.iter().map(Field::byte_len).sum();
        assert_eq!(
            len, expected_len,
            "schema {name}: declared {expected_len} bytes, layout sums to {len}"
        );
        Self { name, fields, len }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn byte_len(&self) -> usize {
        self.len
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Create a fresh, zeroed value tree mirroring this schema.
    pub fn instantiate(&self) -> Record {
        Record::new(self.fields.iter().map(value::zeroed_node).collect())
    }
}

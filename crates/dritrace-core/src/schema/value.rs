use super::{Field, SchemaError};

/// Payload of a leaf node.
///
/// Decoded leaves hold `Bytes` in *reverse wire order* (the protocol is
/// little-endian on the wire, so the stored sequence reads big-endian).
/// Leaves written through [`Record::set`] may hold a plain `Scalar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafValue {
    Scalar(u64),
    Bytes(Vec<u8>),
}

/// One node of a decoded value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf { width: usize, value: LeafValue },
    Group(Vec<(&'static str, Node)>),
}

/// A mutable value tree mirroring a schema's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(&'static str, Node)>,
}

impl Record {
    pub(super) fn new(fields: Vec<(&'static str, Node)>) -> Self {
        Self { fields }
    }

    pub(super) fn fields(&self) -> &[(&'static str, Node)] {
        &self.fields
    }

    /// Replace the value of one top-level field.
    pub fn set(&mut self, name: &str, value: LeafValue) -> Result<(), SchemaError> {
        let node = self
            .fields
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, node)| node)
            .ok_or_else(|| SchemaError::UnknownField {
                name: name.to_string(),
            })?;
        match node {
            Node::Leaf { value: slot, .. } => {
                *slot = value;
                Ok(())
            }
            Node::Group(_) => Err(SchemaError::NotALeaf {
                segment: name.to_string(),
            }),
        }
    }

    /// Convenience for scalar writes.
    pub fn set_scalar(&mut self, name: &str, value: u64) -> Result<(), SchemaError> {
        self.set(name, LeafValue::Scalar(value))
    }

    /// Convenience for verbatim byte writes.
    pub fn set_bytes(&mut self, name: &str, value: Vec<u8>) -> Result<(), SchemaError> {
        self.set(name, LeafValue::Bytes(value))
    }
}

/// A resolved field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Scalar leaves and multi-byte leaves up to 8 bytes wide.
    Scalar(u64),
    /// A single bit extracted via a numeric path segment.
    Bit(bool),
    /// A bit range extracted via a `lo-hi` path segment.
    Bits(u32),
    /// Raw stored bytes (a `name,` segment, or a leaf too wide for a scalar).
    Bytes(Vec<u8>),
    /// An embedded group sub-tree.
    Group(Node),
}

impl FieldValue {
    pub fn as_bit(&self) -> Option<bool> {
        match self {
            FieldValue::Bit(v) => Some(*v),
            _ => None,
        }
    }
}

/// Stored-order byte view of a leaf (reverse wire order). A scalar leaf is
/// rendered as its width-sized big-endian representation, matching what a
/// decode of its encoding would have stored.
pub(super) fn stored_bytes(width: usize, value: &LeafValue) -> Vec<u8> {
    match value {
        LeafValue::Bytes(bytes) => bytes.clone(),
        LeafValue::Scalar(v) => {
            let all = v.to_be_bytes();
            all[all.len().saturating_sub(width)..].to_vec()
        }
    }
}

/// Resolve a leaf to an unsigned scalar: single byte as-is, multi-byte as
/// the big-endian interpretation of the stored sequence.
pub(super) fn resolve_scalar(width: usize, value: &LeafValue) -> Option<u64> {
    if width > 8 {
        return None;
    }
    match value {
        LeafValue::Scalar(v) => Some(*v),
        LeafValue::Bytes(bytes) => {
            if bytes.len() > 8 {
                return None;
            }
            let mut out = 0u64;
            for b in bytes {
                out = (out << 8) | u64::from(*b);
            }
            Some(out)
        }
    }
}

pub(super) fn zeroed_node(field: &Field) -> (&'static str, Node) {
    match field {
        Field::Leaf { name, width } => {
            // Wide reserved areas stay byte sequences; narrow fields are
            // scalar so requests can be built with set_scalar.
            let value = if *width > 8 {
                LeafValue::Bytes(vec![0; *width])
            } else {
                LeafValue::Scalar(0)
            };
            (
                name,
                Node::Leaf {
                    width: *width,
                    value,
                },
            )
        }
        Field::Group { name, fields } => (name, Node::Group(fields.iter().map(zeroed_node).collect())),
    }
}

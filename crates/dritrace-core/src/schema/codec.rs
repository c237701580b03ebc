//! Wire codec and path-based field access for records.

use super::path::{FieldPath, Segment};
use super::value::{LeafValue, Node, stored_bytes, resolve_scalar};
use super::{Field, FieldValue, Record, Schema, SchemaError};

impl Schema {
    /// Decode a record from the front of `buf`.
    ///
    /// Multi-byte leaves arrive little-endian on the wire; their bytes are
    /// stored reversed, so the stored sequence reads big-endian. Trailing
    /// bytes beyond the schema length are ignored.
    pub fn decode(&self, buf: &[u8]) -> Result<Record, SchemaError> {
        if buf.len() < self.byte_len() {
            return Err(SchemaError::BufferTooShort {
                schema: self.name(),
                needed: self.byte_len(),
                actual: buf.len(),
            });
        }
        let mut offset = 0;
        let fields = self
            .fields()
            .iter()
            .map(|field| decode_field(field, buf, &mut offset))
            .collect();
        Ok(Record::new(fields))
    }

    /// Encode a record back into wire order.
    ///
    /// Scalar leaves are emitted little-endian; byte-sequence leaves are
    /// emitted in stored order reversed back to wire order.
    pub fn encode(&self, record: &Record) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for (_, node) in record.fields() {
            encode_node(node, &mut out);
        }
        debug_assert_eq!(out.len(), self.byte_len());
        out
    }
}

fn decode_field(field: &Field, buf: &[u8], offset: &mut usize) -> (&'static str, Node) {
    match field {
        Field::Leaf { name, width } => {
            let mut bytes: Vec<u8> = buf[*offset..*offset + width].to_vec();
            bytes.reverse();
            *offset += width;
            (
                name,
                Node::Leaf {
                    width: *width,
                    value: LeafValue::Bytes(bytes),
                },
            )
        }
        Field::Group { name, fields } => (
            name,
            Node::Group(
                fields
                    .iter()
                    .map(|f| decode_field(f, buf, offset))
                    .collect(),
            ),
        ),
    }
}

fn encode_node(node: &Node, out: &mut Vec<u8>) {
    match node {
        Node::Leaf { width, value } => match value {
            LeafValue::Scalar(v) => {
                let le = v.to_le_bytes();
                out.extend_from_slice(&le[..*width]);
            }
            LeafValue::Bytes(bytes) => {
                let mut wire = bytes.clone();
                wire.reverse();
                out.extend_from_slice(&wire);
            }
        },
        Node::Group(fields) => {
            for (_, child) in fields {
                encode_node(child, out);
            }
        }
    }
}

impl Record {
    /// Resolve a parsed path against this record.
    pub fn get(&self, path: &FieldPath) -> Result<FieldValue, SchemaError> {
        let mut fields = self.fields();
        let segments = path.segments();
        let mut leaf: Option<(&'static str, usize, &LeafValue)> = None;

        for (i, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Name(name) => {
                    let (field_name, node) = lookup(fields, name)?;
                    match node {
                        Node::Group(inner) => {
                            if i == segments.len() - 1 {
                                return Ok(FieldValue::Group(node.clone()));
                            }
                            fields = inner;
                        }
                        Node::Leaf { width, value } => {
                            leaf = Some((field_name, *width, value));
                        }
                    }
                }
                Segment::Raw(name) => {
                    let (_, node) = lookup(fields, name)?;
                    let Node::Leaf { width, value } = node else {
                        return Err(SchemaError::NotALeaf {
                            segment: name.clone(),
                        });
                    };
                    let mut bytes = stored_bytes(*width, value);
                    if path.reverse() {
                        bytes.reverse();
                    }
                    return Ok(FieldValue::Bytes(bytes));
                }
                Segment::BitIndex(bit) => {
                    let value = scalar_of(leaf.take())?;
                    return Ok(FieldValue::Bit((value >> bit) & 1 != 0));
                }
                Segment::BitRange(lo, hi) => {
                    // Bit positions index the 32-character binary rendering
                    // left to right, so position 0 is the most significant
                    // bit of the zero-extended 32-bit value.
                    let value = scalar_of(leaf.take())? as u32;
                    let width = u32::from(hi - lo) + 1;
                    let mask = if width == 32 { u32::MAX } else { (1 << width) - 1 };
                    return Ok(FieldValue::Bits((value >> (31 - hi)) & mask));
                }
            }
        }

        match leaf {
            Some((_, width, value)) => match resolve_scalar(width, value) {
                Some(v) => Ok(FieldValue::Scalar(v)),
                None => Ok(FieldValue::Bytes(stored_bytes(width, value))),
            },
            None => Err(SchemaError::InvalidPath {
                path: format!("{:?}", path.segments()),
            }),
        }
    }

    /// Resolve a path and require a scalar result.
    pub fn get_scalar(&self, path: &FieldPath) -> Result<u64, SchemaError> {
        match self.get(path)? {
            FieldValue::Scalar(v) => Ok(v),
            FieldValue::Bit(v) => Ok(u64::from(v)),
            FieldValue::Bits(v) => Ok(u64::from(v)),
            _ => Err(SchemaError::NotScalar {
                name: format!("{:?}", path.segments()),
            }),
        }
    }
}

fn lookup<'a>(
    fields: &'a [(&'static str, Node)],
    name: &str,
) -> Result<(&'static str, &'a Node), SchemaError> {
    fields
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(n, node)| (*n, node))
        .ok_or_else(|| SchemaError::UnknownPath {
            segment: name.to_string(),
        })
}

fn scalar_of(leaf: Option<(&'static str, usize, &LeafValue)>) -> Result<u64, SchemaError> {
    let (name, width, value) = leaf.ok_or_else(|| SchemaError::InvalidPath {
        path: "bit accessor without a leaf".to_string(),
    })?;
    resolve_scalar(width, value).ok_or_else(|| SchemaError::NotScalar {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::{FieldPath, FieldValue, Schema, group, leaf};

    fn sample() -> Schema {
        Schema::new(
            "sample",
            vec![
                group(
                    "hdr",
                    vec![leaf("status", 2), leaf("label", 1)],
                ),
                leaf("hr", 2),
            ],
            5,
        )
    }

    #[test]
    fn decode_rejects_short_buffers() {
        let err = sample().decode(&[0u8; 4]).unwrap_err();
        assert!(err.to_string().contains("need 5 bytes"));
    }

    #[test]
    fn multibyte_leaves_resolve_big_endian_from_wire() {
        // Wire is little-endian: 0x0116 arrives as 16 01.
        let record = sample().decode(&[0x16, 0x01, 0x07, 0x2C, 0x01]).unwrap();
        let status = FieldPath::parse("hdr:status").unwrap();
        assert_eq!(record.get(&status).unwrap(), FieldValue::Scalar(0x0116));
        let hr = FieldPath::parse("hr").unwrap();
        assert_eq!(record.get(&hr).unwrap(), FieldValue::Scalar(0x012C));
    }

    #[test]
    fn raw_access_returns_stored_and_wire_order() {
        let record = sample().decode(&[0x16, 0x01, 0x07, 0x2C, 0x01]).unwrap();
        let stored = FieldPath::parse("hdr:status,").unwrap();
        assert_eq!(
            record.get(&stored).unwrap(),
            FieldValue::Bytes(vec![0x01, 0x16])
        );
        let wire = FieldPath::parse("-hdr:status,").unwrap();
        assert_eq!(
            record.get(&wire).unwrap(),
            FieldValue::Bytes(vec![0x16, 0x01])
        );
    }

    #[test]
    fn bit_index_counts_from_the_least_significant_bit() {
        // status = 22 = 0b10110
        let record = sample().decode(&[22, 0x00, 0x00, 0x00, 0x00]).unwrap();
        let bit1 = FieldPath::parse("hdr:status:1").unwrap();
        assert_eq!(record.get(&bit1).unwrap(), FieldValue::Bit(true));
        let bit0 = FieldPath::parse("hdr:status:0").unwrap();
        assert_eq!(record.get(&bit0).unwrap(), FieldValue::Bit(false));
    }

    #[test]
    fn bit_range_indexes_the_32bit_rendering_left_to_right() {
        let record = sample().decode(&[22, 0x00, 0x00, 0x00, 0x00]).unwrap();
        // The high bits of the zero-extended value are all zero.
        let high = FieldPath::parse("hdr:status:1-4").unwrap();
        assert_eq!(record.get(&high).unwrap(), FieldValue::Bits(0));
        // Positions 27..=31 cover the low five bits: 22 itself.
        let low = FieldPath::parse("hdr:status:27-31").unwrap();
        assert_eq!(record.get(&low).unwrap(), FieldValue::Bits(22));
    }

    #[test]
    fn encode_emits_little_endian_wire_order() {
        let schema = sample();
        let mut record = schema.instantiate();
        record.set_scalar("hr", 300).unwrap();
        let wire = schema.encode(&record);
        assert_eq!(wire, vec![0x00, 0x00, 0x00, 0x2C, 0x01]);

        let back = schema.decode(&wire).unwrap();
        let hr = FieldPath::parse("hr").unwrap();
        assert_eq!(back.get(&hr).unwrap(), FieldValue::Scalar(300));
    }

    #[test]
    fn unknown_segment_is_reported() {
        let record = sample().decode(&[0u8; 5]).unwrap();
        let path = FieldPath::parse("hdr:nope").unwrap();
        assert!(record.get(&path).is_err());
    }
}

use super::SchemaError;

/// One parsed segment of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Descend into a named field.
    Name(String),
    /// Return the named leaf's raw stored bytes (final segment only).
    Raw(String),
    /// Test one bit of the preceding leaf, LSB-indexed (final segment only).
    BitIndex(u8),
    /// Extract bits `lo..=hi` of the preceding leaf, indexed left to right
    /// in the 32-bit binary-digit string (final segment only).
    BitRange(u8, u8),
}

/// A field path parsed once from its configuration string form.
///
/// Syntax, applied left to right with `:` separators:
///
/// - `basic:ecg:hr` — descend through groups to a leaf scalar
/// - `data,` — trailing comma: raw stored bytes instead of a scalar
/// - `-data,` — leading dash: reverse the returned bytes (wire order)
/// - `ecg:hdr:status:0` — purely numeric tail: boolean bit test
/// - `ecg:hdr:status:3-6` — `lo-hi` tail: unsigned bit-range extraction
///
/// # Examples
/// ```
/// use dritrace_core::schema::{FieldPath, Segment};
///
/// let path = FieldPath::parse("ecg:hdr:status:0").unwrap();
/// assert_eq!(path.segments().last(), Some(&Segment::BitIndex(0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    reverse: bool,
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, SchemaError> {
        let invalid = || SchemaError::InvalidPath {
            path: path.to_string(),
        };

        let (reverse, body) = match path.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, path),
        };
        if body.is_empty() {
            return Err(invalid());
        }

        let parts: Vec<&str> = body.split(':').collect();
        let last = parts.len() - 1;
        let mut segments = Vec::with_capacity(parts.len());

        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                return Err(invalid());
            }
            let segment = if let Some(name) = part.strip_suffix(',') {
                if name.is_empty() {
                    return Err(invalid());
                }
                Segment::Raw(name.to_string())
            } else if part.bytes().all(|b| b.is_ascii_digit()) {
                let bit: u8 = part.parse().map_err(|_| invalid())?;
                if bit > 31 {
                    return Err(invalid());
                }
                Segment::BitIndex(bit)
            } else if is_bit_range(part) {
                let (lo, hi) = part.split_once('-').ok_or_else(invalid)?;
                let lo: u8 = lo.parse().map_err(|_| invalid())?;
                let hi: u8 = hi.parse().map_err(|_| invalid())?;
                if lo > hi || hi > 31 {
                    return Err(invalid());
                }
                Segment::BitRange(lo, hi)
            } else {
                Segment::Name(part.to_string())
            };

            // Bit and raw accessors only make sense as the final segment,
            // and bit accessors need a field to address.
            match segment {
                Segment::Name(_) => {}
                _ if i != last => return Err(invalid()),
                Segment::BitIndex(_) | Segment::BitRange(..) if i == 0 => return Err(invalid()),
                _ => {}
            }
            segments.push(segment);
        }

        Ok(Self { reverse, segments })
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

fn is_bit_range(part: &str) -> bool {
    part.contains('-')
        && part
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b'-')
        && part.bytes().filter(|b| *b == b'-').count() == 1
        && !part.starts_with('-')
        && !part.ends_with('-')
}

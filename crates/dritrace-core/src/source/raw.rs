//! Raw capture file source.
//!
//! Reads a recorded serial byte stream exactly as captured, with no
//! container format around it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{ByteSource, SourceError};

const CHUNK_LEN: usize = 4096;

pub struct RawFileSource {
    file: File,
}

impl RawFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        Ok(Self {
            file: File::open(path)?,
        })
    }
}

impl ByteSource for RawFileSource {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        let mut buf = vec![0u8; CHUNK_LEN];
        let read = self.file.read(&mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        buf.truncate(read);
        Ok(Some(buf))
    }
}

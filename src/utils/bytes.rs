//! Byte buffer and reader cloning

use std::io::{self, Cursor, Read};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloneError {
    #[error("failed to copy to buffer: {0}")]
    BufferCopy(#[source] io::Error),
}

/// Independent copy of `buf`; `None` stays `None`.
pub fn clone_bytes(buf: Option<&[u8]>) -> Option<Vec<u8>> {
    buf.map(<[u8]>::to_vec)
}

/// Drain `reader` into memory and return the byte count plus a fresh reader
/// over the same content.
pub fn clone_reader<R: Read + ?Sized>(reader: &mut R) -> Result<(u64, Cursor<Vec<u8>>), CloneError> {
    let mut buffer = Vec::new();
    let copied = io::copy(reader, &mut buffer).map_err(CloneError::BufferCopy)?;
    Ok((copied, Cursor::new(buffer)))
}

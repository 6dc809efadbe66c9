//! RIFF container scanning.
//!
//! A RIFF/WAVE file starts with a 12-byte header (`"RIFF"`, a little-endian
//! size, `"WAVE"`) followed by sub-chunks, each a 4-byte tag, a 4-byte
//! little-endian length and the body. Bodies with an odd length are followed
//! by one pad byte.
//!
//! [`ChunkScanner`] walks the sub-chunk headers in file order without reading
//! any body unless asked to.

use std::borrow::Cow;
use std::io::{Read, Seek, SeekFrom};

use crate::error::HeaderError;

pub const RIFF_TAG: &[u8; 4] = b"RIFF";
pub const WAVE_TAG: &[u8; 4] = b"WAVE";
pub const FMT_TAG: &[u8; 4] = b"fmt ";
pub const DATA_TAG: &[u8; 4] = b"data";

/// Length of the `"RIFF" <size> "WAVE"` preamble.
pub const RIFF_HEADER_LEN: u64 = 12;

const CHUNK_HEADER_LEN: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiffHeader {
    /// Declared size of everything after the size field.
    pub size: u32,
    pub form_type: [u8; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: [u8; 4],
    pub len: u32,
    /// Absolute offset of the first body byte.
    pub offset: u64,
}

impl ChunkHeader {
    pub fn id_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.id)
    }

    pub fn is(&self, tag: &[u8; 4]) -> bool {
        &self.id == tag
    }

    fn end(&self) -> u64 {
        self.offset + u64::from(self.len)
    }
}

/// Read and check the 12-byte RIFF/WAVE preamble.
///
/// # Errors
///
/// [`HeaderError::Format`] when fewer than 12 bytes are available, the
/// stream does not start with `"RIFF"`, or the form type is not `"WAVE"`.
///
/// # Examples
///
/// ```rust
/// use wavinfo::riff::read_riff_header;
///
/// let header = read_riff_header(&mut &b"RIFF\x24\x00\x00\x00WAVE"[..])?;
/// assert_eq!(header.size, 36);
/// # Ok::<(), wavinfo::HeaderError>(())
/// ```
pub fn read_riff_header<R: Read>(reader: &mut R) -> Result<RiffHeader, HeaderError> {
    let mut buf = [0u8; RIFF_HEADER_LEN as usize];
    reader
        .read_exact(&mut buf)
        .map_err(|err| match err.kind() {
            std::io::ErrorKind::UnexpectedEof => {
                HeaderError::format("file is too short for a RIFF header")
            }
            _ => HeaderError::from(err),
        })?;

    if &buf[0..4] != RIFF_TAG {
        return Err(HeaderError::format("file does not start with RIFF id"));
    }

    let size = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);

    let mut form_type = [0u8; 4];
    form_type.copy_from_slice(&buf[8..12]);
    if &form_type != WAVE_TAG {
        return Err(HeaderError::format(format!(
            "not a WAVE file (form type {:?})",
            String::from_utf8_lossy(&form_type)
        )));
    }

    Ok(RiffHeader { size, form_type })
}

/// Sequential scanner over the sub-chunks of a RIFF/WAVE stream.
///
/// Each call to [`ChunkScanner::next_chunk`] seeks past the body of the
/// previously returned chunk, so bodies that are not read are skipped by
/// their declared length.
pub struct ChunkScanner<R> {
    reader: R,
    riff: RiffHeader,
    next: u64,
    end: u64,
    failed: bool,
}

impl<R: Read + Seek> ChunkScanner<R> {
    /// Read the RIFF preamble from the start of `reader` and position the
    /// scanner on the first sub-chunk.
    ///
    /// The stream length is taken from seeking to its end; chunk lengths are
    /// checked against it.
    ///
    /// # Errors
    ///
    /// Everything [`read_riff_header`] returns, plus [`HeaderError::Io`]
    /// when the stream cannot seek.
    pub fn new(mut reader: R) -> Result<Self, HeaderError> {
        let end = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let riff = read_riff_header(&mut reader)?;

        let declared_end = u64::from(riff.size) + CHUNK_HEADER_LEN;
        if declared_end != end {
            log::warn!(
                "RIFF size field says {} bytes but the file has {}",
                declared_end,
                end
            );
        }

        Ok(Self {
            reader,
            riff,
            next: RIFF_HEADER_LEN,
            end,
            failed: false,
        })
    }

    pub fn riff_header(&self) -> &RiffHeader {
        &self.riff
    }

    /// Return the next sub-chunk header, or `None` once fewer than eight
    /// bytes remain.
    ///
    /// # Errors
    ///
    /// [`HeaderError::Format`] when the chunk's declared length runs past
    /// the end of the stream, [`HeaderError::Io`] on a failed seek or read.
    pub fn next_chunk(&mut self) -> Result<Option<ChunkHeader>, HeaderError> {
        if self.end.saturating_sub(self.next) < CHUNK_HEADER_LEN {
            return Ok(None);
        }

        self.reader.seek(SeekFrom::Start(self.next))?;
        let mut buf = [0u8; CHUNK_HEADER_LEN as usize];
        self.reader.read_exact(&mut buf)?;

        let mut id = [0u8; 4];
        id.copy_from_slice(&buf[0..4]);
        let chunk = ChunkHeader {
            id,
            len: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            offset: self.next + CHUNK_HEADER_LEN,
        };

        if chunk.end() > self.end {
            return Err(HeaderError::format(format!(
                "chunk {:?} at offset {} declares {} bytes but only {} remain",
                chunk.id_str(),
                self.next,
                chunk.len,
                self.end - chunk.offset
            )));
        }

        log::debug!(
            "chunk {:?} at offset {} ({} bytes)",
            chunk.id_str(),
            self.next,
            chunk.len
        );

        // Odd-sized bodies carry a pad byte; a missing final pad is tolerated.
        self.next = chunk.end() + u64::from(chunk.len & 1);
        Ok(Some(chunk))
    }

    /// Read at most `max` bytes from the start of `chunk`'s body.
    ///
    /// # Errors
    ///
    /// [`HeaderError::Format`] if the stream ends inside the body,
    /// [`HeaderError::Io`] on a failed seek or read.
    pub fn read_body(
        &mut self,
        chunk: &ChunkHeader,
        max: usize,
    ) -> Result<Vec<u8>, HeaderError> {
        let len = (chunk.len as usize).min(max);
        let mut buf = vec![0u8; len];
        self.reader.seek(SeekFrom::Start(chunk.offset))?;
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> Iterator for ChunkScanner<R> {
    type Item = Result<ChunkHeader, HeaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_chunk().transpose();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

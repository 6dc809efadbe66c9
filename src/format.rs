//! Decoding of the `"fmt "` sub-chunk.

use std::fmt;

use serde::Serialize;

use crate::error::HeaderError;

pub const WAVE_FORMAT_PCM: u16 = 0x0001;
pub const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Bytes of the fixed `"fmt "` layout every WAV file carries.
pub const FMT_MIN_LEN: usize = 16;

/// Bytes needed to reach the sub-format GUID of an extensible header.
pub const FMT_EXTENSIBLE_LEN: usize = 26;

/// Compression tag declared by the `"fmt "` chunk.
///
/// The tag is kept opaque; only PCM gets a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    Pcm,
    /// `WAVE_FORMAT_EXTENSIBLE`, with the leading code of the sub-format GUID.
    Extensible { sub_format: u16 },
    Other(u16),
}

impl CompressionType {
    pub fn from_tag(tag: u16, sub_format: Option<u16>) -> Self {
        match (tag, sub_format) {
            (WAVE_FORMAT_PCM, _) => CompressionType::Pcm,
            (WAVE_FORMAT_EXTENSIBLE, Some(sub_format)) => {
                CompressionType::Extensible { sub_format }
            }
            (tag, _) => CompressionType::Other(tag),
        }
    }

    /// The raw tag from the file.
    pub fn tag(&self) -> u16 {
        match self {
            CompressionType::Pcm => WAVE_FORMAT_PCM,
            CompressionType::Extensible { .. } => WAVE_FORMAT_EXTENSIBLE,
            CompressionType::Other(tag) => *tag,
        }
    }

    pub fn is_uncompressed(&self) -> bool {
        matches!(
            self,
            CompressionType::Pcm
                | CompressionType::Extensible {
                    sub_format: WAVE_FORMAT_PCM
                }
        )
    }

    pub fn name(&self) -> &'static str {
        if self.is_uncompressed() {
            "not compressed"
        } else {
            "unknown"
        }
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_uncompressed() {
            f.write_str("NONE")
        } else {
            write!(f, "{:#06X}", self.tag())
        }
    }
}

impl Serialize for CompressionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fields of the `"fmt "` sub-chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtChunk {
    pub compression: CompressionType,
    pub num_channels: u16,
    pub frame_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl FmtChunk {
    /// Decode a `"fmt "` body.
    ///
    /// Only the first 16 bytes are required. For `WAVE_FORMAT_EXTENSIBLE`
    /// the sub-format code is read when the body reaches it, and the
    /// remaining extension bytes are ignored.
    ///
    /// # Errors
    ///
    /// [`HeaderError::Format`] when the body is shorter than 16 bytes, or
    /// declares zero channels, a zero frame rate or zero bits per sample.
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < FMT_MIN_LEN {
            return Err(HeaderError::format(format!(
                "fmt chunk is {} bytes, expected at least {}",
                bytes.len(),
                FMT_MIN_LEN
            )));
        }

        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };

        let tag = u16_at(0);
        let sub_format = if tag == WAVE_FORMAT_EXTENSIBLE && bytes.len() >= FMT_EXTENSIBLE_LEN {
            Some(u16_at(24))
        } else {
            None
        };

        let chunk = FmtChunk {
            compression: CompressionType::from_tag(tag, sub_format),
            num_channels: u16_at(2),
            frame_rate: u32_at(4),
            byte_rate: u32_at(8),
            block_align: u16_at(12),
            bits_per_sample: u16_at(14),
        };

        if chunk.num_channels == 0 {
            return Err(HeaderError::format("bad # of channels"));
        }
        if chunk.frame_rate == 0 {
            return Err(HeaderError::format("bad frame rate"));
        }
        if chunk.bits_per_sample == 0 {
            return Err(HeaderError::format("bad sample width"));
        }

        Ok(chunk)
    }

    /// Bytes per sample, rounding partial bytes up.
    pub fn sample_width(&self) -> u16 {
        self.bits_per_sample.div_ceil(8)
    }
}

//! Reading the descriptive header of a WAV file.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use serde::Serialize;

use crate::error::HeaderError;
use crate::format::{CompressionType, FmtChunk, FMT_EXTENSIBLE_LEN};
use crate::riff::{ChunkScanner, DATA_TAG, FMT_TAG};

/// Header metadata of one WAV file, built from a single successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavHeader {
    pub num_channels: u16,
    /// Bytes per sample.
    pub sample_width: u16,
    pub frame_rate: u32,
    pub compression: CompressionType,
    pub bits_per_sample: u16,
    pub byte_rate: u32,
    pub block_align: u16,
    /// Frames in the `"data"` chunk, if one was found.
    pub num_frames: Option<u32>,
}

impl WavHeader {
    /// Scan a RIFF/WAVE stream up to its `"data"` chunk.
    ///
    /// The reader is handed back so callers can keep owning the handle.
    ///
    /// # Errors
    ///
    /// Same as [`HeaderReader::from_reader`].
    pub fn parse<R: Read + Seek>(reader: R) -> Result<(Self, R), HeaderError> {
        let mut scanner = ChunkScanner::new(reader)?;
        let mut fmt: Option<FmtChunk> = None;
        let mut data_len = None;

        while let Some(chunk) = scanner.next_chunk()? {
            if chunk.is(FMT_TAG) {
                if fmt.is_some() {
                    log::debug!("ignoring repeated fmt chunk at offset {}", chunk.offset);
                    continue;
                }
                let body = scanner.read_body(&chunk, FMT_EXTENSIBLE_LEN)?;
                fmt = Some(FmtChunk::parse(&body)?);
            } else if chunk.is(DATA_TAG) {
                if fmt.is_none() {
                    return Err(HeaderError::format("data chunk before fmt chunk"));
                }
                data_len = Some(chunk.len);
                break;
            } else {
                log::trace!("skipping chunk {:?}", chunk.id_str());
            }
        }

        let fmt = fmt.ok_or_else(|| HeaderError::format("fmt chunk missing"))?;
        if data_len.is_none() {
            log::debug!("no data chunk before end of file");
        }

        let header = WavHeader {
            num_channels: fmt.num_channels,
            sample_width: fmt.sample_width(),
            frame_rate: fmt.frame_rate,
            compression: fmt.compression,
            bits_per_sample: fmt.bits_per_sample,
            byte_rate: fmt.byte_rate,
            block_align: fmt.block_align,
            num_frames: data_len.and_then(|len| len.checked_div(u32::from(fmt.block_align))),
        };

        Ok((header, scanner.into_inner()))
    }

    pub fn bit_depth(&self) -> u32 {
        u32::from(self.sample_width) * 8
    }
}

/// An open WAV file together with its parsed header.
///
/// The file handle is held from [`HeaderReader::open`] until
/// [`HeaderReader::close`] or until the reader is dropped, whichever comes
/// first. The parsed values stay readable after closing.
#[derive(Debug)]
pub struct HeaderReader<R = BufReader<File>> {
    inner: Option<R>,
    header: WavHeader,
}

impl HeaderReader {
    /// Open `path` and parse its header.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::File`] when the path cannot be opened,
    /// [`HeaderError::Read`] when reading it fails afterwards, and
    /// [`HeaderError::Format`] when the RIFF/WAVE structure is malformed,
    /// truncated or has no `"fmt "` chunk.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use wavinfo::HeaderReader;
    ///
    /// let mut reader = HeaderReader::open("test.wav")?;
    /// println!("{} channels at {} Hz", reader.num_channels(), reader.frame_rate());
    /// reader.close();
    /// # Ok::<(), wavinfo::HeaderError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HeaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HeaderError::File {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("opened {}", path.display());

        Self::from_reader(BufReader::new(file)).map_err(|err| err.in_file(path))
    }
}

impl<R: Read + Seek> HeaderReader<R> {
    /// Parse the header from any seekable source.
    ///
    /// The stream is scanned from its start, whatever its current position.
    ///
    /// # Errors
    ///
    /// [`HeaderError::Format`] for a missing RIFF/WAVE preamble, a missing
    /// or invalid `"fmt "` chunk, a `"data"` chunk ahead of `"fmt "`, or a
    /// chunk length running past the end of the stream.
    /// [`HeaderError::Io`] when the source fails to seek or read.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::io::Cursor;
    /// use wavinfo::HeaderReader;
    ///
    /// let err = HeaderReader::from_reader(Cursor::new(b"RIFF\x04\x00\x00\x00WAVE".to_vec()))
    ///     .unwrap_err();
    /// assert!(err.is_format());
    /// ```
    pub fn from_reader(reader: R) -> Result<Self, HeaderError> {
        let (header, inner) = WavHeader::parse(reader)?;
        Ok(Self {
            inner: Some(inner),
            header,
        })
    }
}

impl<R> HeaderReader<R> {
    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    pub fn num_channels(&self) -> u16 {
        self.header.num_channels
    }

    pub fn sample_width(&self) -> u16 {
        self.header.sample_width
    }

    pub fn bit_depth(&self) -> u32 {
        self.header.bit_depth()
    }

    pub fn frame_rate(&self) -> u32 {
        self.header.frame_rate
    }

    pub fn compression(&self) -> CompressionType {
        self.header.compression
    }

    pub fn compression_name(&self) -> &'static str {
        self.header.compression.name()
    }

    pub fn num_frames(&self) -> Option<u32> {
        self.header.num_frames
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Release the underlying handle. Calling this again does nothing.
    pub fn close(&mut self) {
        if self.inner.take().is_some() {
            log::debug!("closed reader");
        }
    }
}

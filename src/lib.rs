//! Read the descriptive header of RIFF/WAVE audio files.
//!
//! ```rust,no_run
//! use wavinfo::HeaderReader;
//!
//! let reader = HeaderReader::open("test.wav")?;
//! println!("bit depth = {}", reader.bit_depth());
//! println!("compression = {}", reader.compression());
//! # Ok::<(), wavinfo::HeaderError>(())
//! ```

pub mod error;
pub mod format;
pub mod reader;
pub mod riff;

pub use error::HeaderError;
pub use format::{CompressionType, FmtChunk};
pub use reader::{HeaderReader, WavHeader};

use std::io;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum HeaderError {
    #[error("cannot open {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
    #[error("malformed WAV file: {0}")]
    Format(String),
}

impl HeaderError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        HeaderError::Format(message.into())
    }

    /// Name the file an I/O failure happened in.
    pub(crate) fn in_file(self, path: &Path) -> Self {
        match self {
            HeaderError::Io(source) => HeaderError::Read {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }

    /// True for a missing or malformed RIFF/WAVE structure.
    pub fn is_format(&self) -> bool {
        matches!(self, HeaderError::Format(_))
    }

    /// True when the file itself could not be opened or read.
    pub fn is_file(&self) -> bool {
        matches!(
            self,
            HeaderError::File { .. } | HeaderError::Read { .. } | HeaderError::Io(_)
        )
    }
}

// A short read inside a header structure means the file is truncated.
impl From<io::Error> for HeaderError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            HeaderError::Format("unexpected end of file".to_string())
        } else {
            HeaderError::Io(err)
        }
    }
}

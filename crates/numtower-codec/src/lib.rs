//! Binary encoding of numtower values
//!
//! [`format`] implements the tagged big-endian wire format for a single
//! [`NumberValue`](numtower_value::NumberValue); [`store`] wraps a named set
//! of encoded values in a checksummed container that can be written to disk.

use thiserror::Error;

pub mod format;
pub mod store;

pub use format::{from_bytes, read_value, to_bytes, write_value, MAX_NESTING};
pub use store::{StoreHeader, ValueStore, STORE_MAGIC, STORE_VERSION};

/// Errors produced while encoding or decoding values
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Unknown kind tag {0}")]
    UnknownTag(u8),

    #[error("Unknown constant id {0}")]
    UnknownConstant(u32),

    #[error("Input ended before the value was complete")]
    Truncated,

    #[error("Matrix dimension {0} is out of range")]
    DimensionOutOfRange(usize),

    #[error("{0} unexpected bytes after the encoded data")]
    TrailingBytes(usize),

    #[error("Matrices nested deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("Entry name is {0} bytes long; at most 65535 are allowed")]
    NameTooLong(usize),

    #[error("Corrupted data: {0}")]
    Corrupted(String),

    #[error("Unsupported store version {found} (newest supported is {supported})")]
    VersionMismatch { found: u32, supported: u32 },

    #[error("Checksum mismatch: header says {expected:#010x}, payload hashes to {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("I/O error: {0}")]
    Io(std::io::Error),

    #[error("Header error: {0}")]
    Header(#[from] bincode::Error),
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            CodecError::Truncated
        } else {
            CodecError::Io(err)
        }
    }
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;

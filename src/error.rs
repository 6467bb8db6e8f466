use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while reflecting an ELF file.
///
/// Each stage of the decode fails fast with one of these; nothing is ever
/// replaced by a default value.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Could not open {}: {source}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Truncated input reading {what} at {offset:#x}: needed {needed:#x} bytes, {available:#x} available")]
    TruncatedInput {
        what: &'static str,
        offset: u64,
        needed: u64,
        available: u64,
    },

    #[error("Bad ELF magic: {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("Unknown ELF class byte: {0:#x}")]
    UnknownClass(u8),

    #[error("Unknown ELF data encoding byte: {0:#x}")]
    UnknownDataEncoding(u8),

    #[error("Cannot seek to {what} at {offset:#x}: input is only {len:#x} bytes long")]
    SeekError {
        what: &'static str,
        offset: u64,
        len: u64,
    },

    #[error("{what} entry size mismatch. Expected: {expected:#x} Got: {found:#x}")]
    EntrySizeMismatch {
        what: &'static str,
        expected: u16,
        found: u16,
    },

    #[error("{what} declares {count} entries, more than the limit of {limit}")]
    TooManyEntries {
        what: &'static str,
        count: usize,
        limit: usize,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ParseError>;

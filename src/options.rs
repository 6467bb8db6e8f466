use crate::endian::Endian;
use crate::error::{ParseError, Result};
use crate::header::Ident;
use crate::types::{ELFDATA2LSB, ELFDATA2MSB};

/// Where the byte order used for decoding comes from
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ByteOrderMode {
    /// Trust the data encoding byte (`EI_DATA`) of the identification block
    #[default]
    FromIdent,
    /// Assume the file was written on a machine like this one and ignore `EI_DATA`
    Native,
    Little,
    Big,
}

impl ByteOrderMode {
    /// Pick the byte order for a file with this identification block
    pub fn resolve(self, ident: &Ident) -> Result<Endian> {
        match self {
            ByteOrderMode::FromIdent => match ident.data() {
                ELFDATA2LSB => Ok(Endian::Little),
                ELFDATA2MSB => Ok(Endian::Big),
                other => Err(ParseError::UnknownDataEncoding(other.0)),
            },
            ByteOrderMode::Native => Ok(Endian::native()),
            ByteOrderMode::Little => Ok(Endian::Little),
            ByteOrderMode::Big => Ok(Endian::Big),
        }
    }
}

/// Knobs for a single decode.
///
/// Table entry counts come straight from the file, so they are capped by
/// `max_entries` before anything is allocated for them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub byte_order: ByteOrderMode,
    /// Reject headers whose declared header/entry sizes disagree with the class
    pub strict: bool,
    pub max_entries: usize,
}

impl ParseOptions {
    /// Largest count an `e_phnum`/`e_shnum` field can express
    pub const DEFAULT_MAX_ENTRIES: usize = u16::MAX as usize;

    /// Byte order from the file, lenient sizes, full `u16` entry range
    pub fn new() -> ParseOptions {
        ParseOptions {
            byte_order: ByteOrderMode::FromIdent,
            strict: false,
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    /// Choose where the byte order comes from
    pub fn byte_order(mut self, mode: ByteOrderMode) -> Self {
        self.byte_order = mode;
        self
    }

    /// Turn header and entry size validation on or off
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Cap the number of entries accepted per table
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

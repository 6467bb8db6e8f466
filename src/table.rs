//! Fixed-size record tables located by (offset, count) pairs.

use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};

use log::{debug, trace};

use crate::endian::{Endian, FieldReader, FieldWriter};
use crate::error::{ParseError, Result};

/// A fixed-layout structure with one on-disk size per ELF class.
pub trait Record: Sized {
    /// Size in bytes of one encoded record, also the stride between table entries
    const SIZE: usize;

    fn parse(fields: &mut FieldReader) -> Self;

    fn write_fields<W: Write>(&self, fields: &mut FieldWriter<W>) -> io::Result<()>;

    fn decode(buf: &[u8], endian: Endian) -> Self {
        debug_assert_eq!(buf.len(), Self::SIZE);
        Self::parse(&mut FieldReader::new(buf, endian))
    }

    fn write_to<W: Write>(&self, out: &mut W, endian: Endian) -> io::Result<()> {
        self.write_fields(&mut FieldWriter::new(out, endian))
    }
}

/// Read exactly `len` bytes, reporting how many were actually there if the
/// source runs dry.
pub(crate) fn read_bytes<S: Read>(
    reader: &mut S,
    what: &'static str,
    offset: u64,
    len: usize,
) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    let mut filled = 0;
    while filled < len {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(ParseError::TruncatedInput {
                    what,
                    offset,
                    needed: len as u64,
                    available: filled as u64,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(buf)
}

/// Reads whole tables out of one seekable source.
///
/// Every table read starts with an absolute seek, so nothing depends on
/// where a previous read left the cursor.
pub struct TableReader<'a, S> {
    reader: &'a mut S,
    stream_len: u64,
    endian: Endian,
    max_entries: usize,
}

impl<'a, S: Read + Seek> TableReader<'a, S> {
    /// Measure the stream once up front; tables are bounds checked against it
    pub fn new(reader: &'a mut S, endian: Endian, max_entries: usize) -> Result<Self> {
        let stream_len = reader.seek(SeekFrom::End(0))?;
        Ok(TableReader { reader, stream_len, endian, max_entries })
    }

    /// Read `count` records starting at `offset`
    pub fn read<R: Record>(&mut self, what: &'static str, offset: u64, count: usize) -> Result<Vec<R>> {
        if count == 0 {
            trace!(target: "table", "{what}: empty");
            return Ok(Vec::new());
        }
        if count > self.max_entries {
            return Err(ParseError::TooManyEntries { what, count, limit: self.max_entries });
        }
        if offset > self.stream_len {
            return Err(ParseError::SeekError { what, offset, len: self.stream_len });
        }

        // Bound the allocation by what the source can actually hold
        let needed = count as u64 * R::SIZE as u64;
        let available = self.stream_len - offset;
        if needed > available {
            return Err(ParseError::TruncatedInput { what, offset, needed, available });
        }

        debug!(target: "table", "{what}: {count} entries of {:#x} bytes at {offset:#x}", R::SIZE);
        self.reader.seek(SeekFrom::Start(offset))?;
        let buf = read_bytes(self.reader, what, offset, needed as usize)?;
        Ok(buf
            .chunks_exact(R::SIZE)
            .map(|chunk| R::decode(chunk, self.endian))
            .collect())
    }
}

//! Byte order handling for fixed-layout ELF records.

use std::io::{self, Write};

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

/// Byte order used to decode every multi-byte field of one file
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Byte order of the machine we are running on
    pub fn native() -> Endian {
        if cfg!(target_endian = "big") {
            Endian::Big
        } else {
            Endian::Little
        }
    }
}

/// Sequential field access over a single record that has already been read
/// in full. Callers hand in a buffer of exactly the record's size.
pub struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> FieldReader<'a> {
    /// Start reading fields from the beginning of `buf`
    pub fn new(buf: &'a [u8], endian: Endian) -> Self {
        FieldReader { buf, pos: 0, endian }
    }

    fn take(&mut self, len: usize) -> &'a [u8] {
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        bytes
    }

    /// Copy out the next `N` raw bytes
    pub fn bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N));
        out
    }

    /// Next single byte
    pub fn u8(&mut self) -> u8 {
        self.take(1)[0]
    }

    /// Next 16-bit field in the record's byte order
    pub fn u16(&mut self) -> u16 {
        let bytes = self.take(2);
        match self.endian {
            Endian::Little => LittleEndian::read_u16(bytes),
            Endian::Big => BigEndian::read_u16(bytes),
        }
    }

    /// Next 32-bit field in the record's byte order
    pub fn u32(&mut self) -> u32 {
        let bytes = self.take(4);
        match self.endian {
            Endian::Little => LittleEndian::read_u32(bytes),
            Endian::Big => BigEndian::read_u32(bytes),
        }
    }

    /// Next 64-bit field in the record's byte order
    pub fn u64(&mut self) -> u64 {
        let bytes = self.take(8);
        match self.endian {
            Endian::Little => LittleEndian::read_u64(bytes),
            Endian::Big => BigEndian::read_u64(bytes),
        }
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// The encoding counterpart of [`FieldReader`].
pub struct FieldWriter<'w, W: Write> {
    out: &'w mut W,
    endian: Endian,
}

impl<'w, W: Write> FieldWriter<'w, W> {
    /// Append fields to `out` in the given byte order
    pub fn new(out: &'w mut W, endian: Endian) -> Self {
        FieldWriter { out, endian }
    }

    /// Raw bytes, written as-is
    pub fn bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)
    }

    /// 16-bit field
    pub fn u16(&mut self, val: u16) -> io::Result<()> {
        match self.endian {
            Endian::Little => self.out.write_u16::<LittleEndian>(val),
            Endian::Big => self.out.write_u16::<BigEndian>(val),
        }
    }

    /// 32-bit field
    pub fn u32(&mut self, val: u32) -> io::Result<()> {
        match self.endian {
            Endian::Little => self.out.write_u32::<LittleEndian>(val),
            Endian::Big => self.out.write_u32::<BigEndian>(val),
        }
    }

    /// 64-bit field
    pub fn u64(&mut self, val: u64) -> io::Result<()> {
        match self.endian {
            Endian::Little => self.out.write_u64::<LittleEndian>(val),
            Endian::Big => self.out.write_u64::<BigEndian>(val),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fields_in_both_orders() {
        let buf = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0];

        let mut le = FieldReader::new(&buf, Endian::Little);
        assert_eq!(le.u16(), 0x3412);
        assert_eq!(le.u16(), 0x7856);
        assert_eq!(le.u32(), 0xf0debc9a);
        assert_eq!(le.position(), 8);

        let mut be = FieldReader::new(&buf, Endian::Big);
        assert_eq!(be.u64(), 0x123456789abcdef0);
    }

    #[test]
    fn writes_big_endian() {
        let mut out = Vec::new();
        {
            let mut w = FieldWriter::new(&mut out, Endian::Big);
            w.u16(0xbeef).unwrap();
            w.u32(0xdeadc0de).unwrap();
        }
        assert_eq!(out, [0xbe, 0xef, 0xde, 0xad, 0xc0, 0xde]);
    }
}

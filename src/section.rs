use std::fmt;
use std::io::{self, Write};

use crate::endian::{Endian, FieldReader, FieldWriter};
use crate::table::Record;
use crate::types::{SectionFlag, SectionType};

/// `Elf32_Shdr`. Flags are kept at their on-disk width.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SectionHeader32 {
    pub name: u32,
    pub shtype: SectionType,
    pub flags: u32,
    pub addr: u32,
    pub offset: u32,
    pub size: u32,
    pub link: u32,
    pub info: u32,
    pub addralign: u32,
    pub entsize: u32,
}

/// `Elf64_Shdr`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SectionHeader64 {
    pub name: u32,
    pub shtype: SectionType,
    pub flags: u64,
    pub addr: u64,
    pub offset: u64,
    pub size: u64,
    pub link: u32,
    pub info: u32,
    pub addralign: u64,
    pub entsize: u64,
}

// Field order is the same for both classes, only the widths differ.
macro_rules! section_header_record {
    ($ty:ident, $size:expr, $word:ident) => {
        impl Record for $ty {
            const SIZE: usize = $size;

            fn parse(fields: &mut FieldReader) -> Self {
                $ty {
                    name: fields.u32(),
                    shtype: SectionType(fields.u32()),
                    flags: fields.$word(),
                    addr: fields.$word(),
                    offset: fields.$word(),
                    size: fields.$word(),
                    link: fields.u32(),
                    info: fields.u32(),
                    addralign: fields.$word(),
                    entsize: fields.$word(),
                }
            }

            fn write_fields<W: Write>(&self, fields: &mut FieldWriter<W>) -> io::Result<()> {
                fields.u32(self.name)?;
                fields.u32(self.shtype.0)?;
                fields.$word(self.flags)?;
                fields.$word(self.addr)?;
                fields.$word(self.offset)?;
                fields.$word(self.size)?;
                fields.u32(self.link)?;
                fields.u32(self.info)?;
                fields.$word(self.addralign)?;
                fields.$word(self.entsize)
            }
        }
    };
}

section_header_record!(SectionHeader32, 40, u32);
section_header_record!(SectionHeader64, 64, u64);

/// Encapsulates the contents of an ELF Section Header
///
/// `name` is left as an offset into the section name string table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SectionHeader {
    Shdr32(SectionHeader32),
    Shdr64(SectionHeader64),
}

macro_rules! shdr_fields {
    ($($name:ident: $ty:ty),+ $(,)?) => {
        $(
            pub fn $name(&self) -> $ty {
                match self {
                    SectionHeader::Shdr32(s) => s.$name.into(),
                    SectionHeader::Shdr64(s) => s.$name.into(),
                }
            }
        )+
    };
}

impl SectionHeader {
    shdr_fields! {
        name: u32,
        shtype: SectionType,
        addr: u64,
        offset: u64,
        size: u64,
        link: u32,
        info: u32,
        addralign: u64,
        entsize: u64,
    }

    pub fn flags(&self) -> SectionFlag {
        match self {
            SectionHeader::Shdr32(s) => SectionFlag(s.flags.into()),
            SectionHeader::Shdr64(s) => SectionFlag(s.flags),
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W, endian: Endian) -> io::Result<()> {
        match self {
            SectionHeader::Shdr32(s) => s.write_to(out, endian),
            SectionHeader::Shdr64(s) => s.write_to(out, endian),
        }
    }
}

impl From<SectionHeader32> for SectionHeader {
    fn from(s: SectionHeader32) -> Self {
        SectionHeader::Shdr32(s)
    }
}

impl From<SectionHeader64> for SectionHeader {
    fn from(s: SectionHeader64) -> Self {
        SectionHeader::Shdr64(s)
    }
}

impl fmt::Display for SectionHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Section Header: Name: {:#x} Type: {} Flags: {} Addr: {:#010x} Offset: {:#06x} Size: {:#06x} Link: {} Info: {:#x} AddrAlign: {} EntSize: {}",
            self.name(), self.shtype(), self.flags(), self.addr(), self.offset(),
            self.size(), self.link(), self.info(), self.addralign(), self.entsize())
    }
}

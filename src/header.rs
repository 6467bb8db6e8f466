//! The identification block and the ELF file header.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Write};

use log::debug;

use crate::endian::{Endian, FieldReader, FieldWriter};
use crate::error::{ParseError, Result};
use crate::table::{read_bytes, Record};
use crate::types::*;

/// The 16 byte `e_ident` prefix of every ELF file
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Ident(pub [u8; EI_NIDENT]);

impl Ident {
    pub fn magic(&self) -> [u8; 4] {
        [self.0[0], self.0[1], self.0[2], self.0[3]]
    }

    pub fn class(&self) -> Class {
        Class(self.0[EI_CLASS])
    }

    pub fn data(&self) -> Data {
        Data(self.0[EI_DATA])
    }

    pub fn version(&self) -> Version {
        Version(self.0[EI_VERSION] as u32)
    }

    pub fn osabi(&self) -> OSABI {
        OSABI(self.0[EI_OSABI])
    }

    pub fn abiversion(&self) -> u8 {
        self.0[EI_ABIVERSION]
    }

    pub fn bytes(&self) -> &[u8; EI_NIDENT] {
        &self.0
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ident({:02x?})", self.0)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} ELF version {} for {} (ABI version {})",
            self.class(),
            self.data(),
            self.version(),
            self.osabi(),
            self.abiversion()
        )
    }
}

/// Read the identification block at the start of `reader` and decide which
/// layout the rest of the file uses.
///
/// The source is rewound to offset 0 afterwards; the block is read again as
/// the first field of the file header.
pub fn sniff<S: Read + Seek>(reader: &mut S) -> Result<Ident> {
    reader.seek(SeekFrom::Start(0))?;
    let buf = read_bytes(reader, "identification block", 0, EI_NIDENT)?;
    let mut raw = [0u8; EI_NIDENT];
    raw.copy_from_slice(&buf);
    let ident = Ident(raw);

    if ident.magic() != ELFMAG {
        return Err(ParseError::BadMagic(ident.magic()));
    }
    match ident.class() {
        ELFCLASS32 | ELFCLASS64 => {}
        other => return Err(ParseError::UnknownClass(other.0)),
    }
    debug!(target: "sniff", "{ident}");

    reader.seek(SeekFrom::Start(0))?;
    Ok(ident)
}

/// `Elf32_Ehdr`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FileHeader32 {
    pub ident: Ident,
    pub elftype: Type,
    pub machine: Machine,
    pub version: Version,
    pub entry: u32,
    pub phoff: u32,
    pub shoff: u32,
    pub flags: u32,
    pub ehsize: u16,
    pub phentsize: u16,
    pub phnum: u16,
    pub shentsize: u16,
    pub shnum: u16,
    pub shstrndx: u16,
}

/// `Elf64_Ehdr`, identical to the 32-bit header except for the widths of
/// `entry`, `phoff` and `shoff`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FileHeader64 {
    pub ident: Ident,
    pub elftype: Type,
    pub machine: Machine,
    pub version: Version,
    pub entry: u64,
    pub phoff: u64,
    pub shoff: u64,
    pub flags: u32,
    pub ehsize: u16,
    pub phentsize: u16,
    pub phnum: u16,
    pub shentsize: u16,
    pub shnum: u16,
    pub shstrndx: u16,
}

// Both layouts share everything but the three address-sized fields.
macro_rules! file_header_record {
    ($ty:ident, $size:expr, $addr:ident) => {
        impl Record for $ty {
            const SIZE: usize = $size;

            fn parse(fields: &mut FieldReader) -> Self {
                $ty {
                    ident: Ident(fields.bytes()),
                    elftype: Type(fields.u16()),
                    machine: Machine(fields.u16()),
                    version: Version(fields.u32()),
                    entry: fields.$addr(),
                    phoff: fields.$addr(),
                    shoff: fields.$addr(),
                    flags: fields.u32(),
                    ehsize: fields.u16(),
                    phentsize: fields.u16(),
                    phnum: fields.u16(),
                    shentsize: fields.u16(),
                    shnum: fields.u16(),
                    shstrndx: fields.u16(),
                }
            }

            fn write_fields<W: Write>(&self, fields: &mut FieldWriter<W>) -> io::Result<()> {
                fields.bytes(&self.ident.0)?;
                fields.u16(self.elftype.0)?;
                fields.u16(self.machine.0)?;
                fields.u32(self.version.0)?;
                fields.$addr(self.entry)?;
                fields.$addr(self.phoff)?;
                fields.$addr(self.shoff)?;
                fields.u32(self.flags)?;
                fields.u16(self.ehsize)?;
                fields.u16(self.phentsize)?;
                fields.u16(self.phnum)?;
                fields.u16(self.shentsize)?;
                fields.u16(self.shnum)?;
                fields.u16(self.shstrndx)
            }
        }
    };
}

file_header_record!(FileHeader32, 52, u32);
file_header_record!(FileHeader64, 64, u64);

/// Encapsulates the contents of the ELF File Header
///
/// The ELF File Header starts off every ELF file and both identifies the
/// file contents and informs how to interpret said contents. The variant is
/// picked by the class byte of the identification block; accessors widen the
/// class dependent fields to `u64`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileHeader {
    Header32(FileHeader32),
    Header64(FileHeader64),
}

macro_rules! common_fields {
    ($($name:ident: $ty:ty),+ $(,)?) => {
        $(
            pub fn $name(&self) -> $ty {
                match self {
                    FileHeader::Header32(h) => h.$name.into(),
                    FileHeader::Header64(h) => h.$name.into(),
                }
            }
        )+
    };
}

impl FileHeader {
    common_fields! {
        ident: Ident,
        elftype: Type,
        machine: Machine,
        version: Version,
        entry: u64,
        phoff: u64,
        shoff: u64,
        flags: u32,
        ehsize: u16,
        phentsize: u16,
        phnum: u16,
        shentsize: u16,
        shnum: u16,
        shstrndx: u16,
    }

    pub fn class(&self) -> Class {
        match self {
            FileHeader::Header32(_) => ELFCLASS32,
            FileHeader::Header64(_) => ELFCLASS64,
        }
    }

    /// Size of the header layout for this class
    pub fn size(&self) -> usize {
        match self {
            FileHeader::Header32(_) => FileHeader32::SIZE,
            FileHeader::Header64(_) => FileHeader64::SIZE,
        }
    }

    /// Read the class appropriate header from offset 0 of `reader`.
    ///
    /// Field values are taken as-is; only the class was validated by [`sniff`].
    pub fn read<S: Read + Seek>(reader: &mut S, ident: &Ident, endian: Endian) -> Result<FileHeader> {
        reader.seek(SeekFrom::Start(0))?;
        let header = match ident.class() {
            ELFCLASS32 => {
                let buf = read_bytes(reader, "file header", 0, FileHeader32::SIZE)?;
                FileHeader::Header32(FileHeader32::decode(&buf, endian))
            }
            ELFCLASS64 => {
                let buf = read_bytes(reader, "file header", 0, FileHeader64::SIZE)?;
                FileHeader::Header64(FileHeader64::decode(&buf, endian))
            }
            other => return Err(ParseError::UnknownClass(other.0)),
        };
        debug!(
            target: "header",
            "{} {} {}: phnum={} at {:#x}, shnum={} at {:#x}",
            header.class(),
            header.elftype(),
            header.machine(),
            header.phnum(),
            header.phoff(),
            header.shnum(),
            header.shoff()
        );
        Ok(header)
    }

    /// Compare the declared header and entry sizes against this class's
    /// layouts. Entry sizes are only checked for non-empty tables.
    pub fn check_sizes(&self) -> Result<()> {
        let (phdr_size, shdr_size) = match self {
            FileHeader::Header32(_) => (crate::segment::ProgramHeader32::SIZE, crate::section::SectionHeader32::SIZE),
            FileHeader::Header64(_) => (crate::segment::ProgramHeader64::SIZE, crate::section::SectionHeader64::SIZE),
        };
        let checks = [
            ("file header", true, self.size(), self.ehsize()),
            ("program header", self.phnum() > 0, phdr_size, self.phentsize()),
            ("section header", self.shnum() > 0, shdr_size, self.shentsize()),
        ];
        for (what, applies, expected, found) in checks {
            if applies && expected != found as usize {
                return Err(ParseError::EntrySizeMismatch { what, expected: expected as u16, found });
            }
        }
        Ok(())
    }

    pub fn write_to<W: Write>(&self, out: &mut W, endian: Endian) -> io::Result<()> {
        match self {
            FileHeader::Header32(h) => h.write_to(out, endian),
            FileHeader::Header64(h) => h.write_to(out, endian),
        }
    }
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ident = self.ident();
        write!(
            f,
            "File Header for {} {} Elf {} for {} {}",
            ident.class(),
            ident.data(),
            self.elftype(),
            ident.osabi(),
            self.machine()
        )
    }
}

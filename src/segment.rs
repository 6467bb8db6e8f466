use std::fmt;
use std::io::{self, Write};

use crate::endian::{Endian, FieldReader, FieldWriter};
use crate::table::Record;
use crate::types::{ProgFlag, ProgType};

/// `Elf32_Phdr`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProgramHeader32 {
    pub progtype: ProgType,
    pub offset: u32,
    pub vaddr: u32,
    pub paddr: u32,
    pub filesz: u32,
    pub memsz: u32,
    pub flags: ProgFlag,
    pub align: u32,
}

impl Record for ProgramHeader32 {
    const SIZE: usize = 32;

    fn parse(fields: &mut FieldReader) -> Self {
        ProgramHeader32 {
            progtype: ProgType(fields.u32()),
            offset: fields.u32(),
            vaddr: fields.u32(),
            paddr: fields.u32(),
            filesz: fields.u32(),
            memsz: fields.u32(),
            flags: ProgFlag(fields.u32()),
            align: fields.u32(),
        }
    }

    fn write_fields<W: Write>(&self, fields: &mut FieldWriter<W>) -> io::Result<()> {
        fields.u32(self.progtype.0)?;
        fields.u32(self.offset)?;
        fields.u32(self.vaddr)?;
        fields.u32(self.paddr)?;
        fields.u32(self.filesz)?;
        fields.u32(self.memsz)?;
        fields.u32(self.flags.0)?;
        fields.u32(self.align)
    }
}

/// `Elf64_Phdr`. Note that `flags` moves up next to the type so the 64-bit
/// fields stay naturally aligned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProgramHeader64 {
    pub progtype: ProgType,
    pub flags: ProgFlag,
    pub offset: u64,
    pub vaddr: u64,
    pub paddr: u64,
    pub filesz: u64,
    pub memsz: u64,
    pub align: u64,
}

impl Record for ProgramHeader64 {
    const SIZE: usize = 56;

    fn parse(fields: &mut FieldReader) -> Self {
        ProgramHeader64 {
            progtype: ProgType(fields.u32()),
            flags: ProgFlag(fields.u32()),
            offset: fields.u64(),
            vaddr: fields.u64(),
            paddr: fields.u64(),
            filesz: fields.u64(),
            memsz: fields.u64(),
            align: fields.u64(),
        }
    }

    fn write_fields<W: Write>(&self, fields: &mut FieldWriter<W>) -> io::Result<()> {
        fields.u32(self.progtype.0)?;
        fields.u32(self.flags.0)?;
        fields.u64(self.offset)?;
        fields.u64(self.vaddr)?;
        fields.u64(self.paddr)?;
        fields.u64(self.filesz)?;
        fields.u64(self.memsz)?;
        fields.u64(self.align)
    }
}

/// Encapsulates the contents of an ELF Program Header
///
/// The program header table is an array of program header structures describing
/// the various segments for program execution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProgramHeader {
    Phdr32(ProgramHeader32),
    Phdr64(ProgramHeader64),
}

macro_rules! phdr_fields {
    ($($name:ident: $ty:ty),+ $(,)?) => {
        $(
            pub fn $name(&self) -> $ty {
                match self {
                    ProgramHeader::Phdr32(p) => p.$name.into(),
                    ProgramHeader::Phdr64(p) => p.$name.into(),
                }
            }
        )+
    };
}

impl ProgramHeader {
    phdr_fields! {
        progtype: ProgType,
        offset: u64,
        vaddr: u64,
        paddr: u64,
        filesz: u64,
        memsz: u64,
        flags: ProgFlag,
        align: u64,
    }

    pub fn write_to<W: Write>(&self, out: &mut W, endian: Endian) -> io::Result<()> {
        match self {
            ProgramHeader::Phdr32(p) => p.write_to(out, endian),
            ProgramHeader::Phdr64(p) => p.write_to(out, endian),
        }
    }
}

impl From<ProgramHeader32> for ProgramHeader {
    fn from(p: ProgramHeader32) -> Self {
        ProgramHeader::Phdr32(p)
    }
}

impl From<ProgramHeader64> for ProgramHeader {
    fn from(p: ProgramHeader64) -> Self {
        ProgramHeader::Phdr64(p)
    }
}

impl fmt::Display for ProgramHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Program Header: Type: {} Offset: {:#010x} VirtAddr: {:#010x} PhysAddr: {:#010x} FileSize: {:#06x} MemSize: {:#06x} Flags: {} Align: {:#x}",
            self.progtype(), self.offset(), self.vaddr(), self.paddr(), self.filesz(),
            self.memsz(), self.flags(), self.align())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PF_R, PF_X, PT_LOAD};

    #[test]
    fn phdr64_layout() {
        let mut raw = vec![0u8; ProgramHeader64::SIZE];
        raw[0] = 1; // p_type
        raw[4] = 5; // p_flags
        raw[8..16].copy_from_slice(&0x1000u64.to_le_bytes());
        raw[16..24].copy_from_slice(&0x40_1000u64.to_le_bytes());
        raw[48..56].copy_from_slice(&0x1000u64.to_le_bytes());

        let phdr = ProgramHeader::from(ProgramHeader64::decode(&raw, Endian::Little));
        assert_eq!(phdr.progtype(), PT_LOAD);
        assert_eq!(phdr.flags(), ProgFlag(PF_R.0 | PF_X.0));
        assert_eq!(phdr.offset(), 0x1000);
        assert_eq!(phdr.vaddr(), 0x40_1000);
        assert_eq!(phdr.align(), 0x1000);
        assert_eq!(
            phdr.to_string(),
            "Program Header: Type: LOAD Offset: 0x00001000 VirtAddr: 0x00401000 PhysAddr: 0x00000000 FileSize: 0x0000 MemSize: 0x0000 Flags: R E Align: 0x1000"
        );
    }

    #[test]
    fn phdr32_flags_come_last() {
        let mut raw = vec![0u8; ProgramHeader32::SIZE];
        raw[3] = 1; // p_type, big endian
        raw[27] = 6; // p_flags
        raw[28..32].copy_from_slice(&4u32.to_be_bytes());

        let phdr = ProgramHeader32::decode(&raw, Endian::Big);
        assert_eq!(phdr.progtype, PT_LOAD);
        assert_eq!(phdr.flags, ProgFlag(6));
        assert_eq!(phdr.align, 4);

        let mut out = Vec::new();
        phdr.write_to(&mut out, Endian::Big).unwrap();
        assert_eq!(out, raw);
    }
}

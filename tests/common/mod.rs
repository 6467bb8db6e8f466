//! Hand laid-out ELF images, written field by field without going through
//! the crate's own encoders.
#![allow(dead_code)]

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

pub const EHDR64: usize = 64;
pub const PHDR64: usize = 56;
pub const SHDR64: usize = 64;
pub const EHDR32: usize = 52;
pub const PHDR32: usize = 32;
pub const SHDR32: usize = 40;

pub const ENTRY: u64 = 0x40_1000;

pub fn ident(class: u8, data: u8) -> Vec<u8> {
    let mut raw = vec![0x7f, b'E', b'L', b'F', class, data, 1, 0];
    raw.resize(16, 0);
    raw
}

/// Program header `i`: (type, flags, offset, vaddr, paddr, filesz, memsz, align)
pub fn phdr_values(i: u64) -> (u32, u32, u64, u64, u64, u64, u64, u64) {
    (1 + i as u32, 4 | i as u32, 0x1000 * i, 0x40_0000 + 0x1000 * i, 0x40_0000 + 0x1000 * i, 0x100 + i, 0x200 + i, 0x1000)
}

/// Section header `i`: (name, type, flags, addr, offset, size, link, info, addralign, entsize)
pub fn shdr_values(i: u64) -> (u32, u32, u64, u64, u64, u64, u32, u32, u64, u64) {
    (8 * i as u32, i as u32, i, 0x60_0000 + i, 0x2000 + i, 0x30 + i, i as u32, i as u32 + 1, 8, 16 * i)
}

/// 64-bit image: header at 0, program headers right after it, section
/// headers right after those.
pub fn elf64<B: ByteOrder>(data: u8, phnum: u16, shnum: u16) -> Vec<u8> {
    let phoff = EHDR64 as u64;
    let shoff = phoff + phnum as u64 * PHDR64 as u64;
    let mut buf = ident(2, data);
    buf.write_u16::<B>(2).unwrap(); // ET_EXEC
    buf.write_u16::<B>(62).unwrap(); // EM_X86_64
    buf.write_u32::<B>(1).unwrap();
    buf.write_u64::<B>(ENTRY).unwrap();
    buf.write_u64::<B>(phoff).unwrap();
    buf.write_u64::<B>(shoff).unwrap();
    buf.write_u32::<B>(0).unwrap();
    buf.write_u16::<B>(EHDR64 as u16).unwrap();
    buf.write_u16::<B>(PHDR64 as u16).unwrap();
    buf.write_u16::<B>(phnum).unwrap();
    buf.write_u16::<B>(SHDR64 as u16).unwrap();
    buf.write_u16::<B>(shnum).unwrap();
    buf.write_u16::<B>(shnum.saturating_sub(1)).unwrap();
    assert_eq!(buf.len(), EHDR64);

    for i in 0..phnum as u64 {
        let (ty, flags, offset, vaddr, paddr, filesz, memsz, align) = phdr_values(i);
        buf.write_u32::<B>(ty).unwrap();
        buf.write_u32::<B>(flags).unwrap();
        for val in [offset, vaddr, paddr, filesz, memsz, align] {
            buf.write_u64::<B>(val).unwrap();
        }
    }
    assert_eq!(buf.len() as u64, shoff);

    for i in 0..shnum as u64 {
        let (name, ty, flags, addr, offset, size, link, info, addralign, entsize) = shdr_values(i);
        buf.write_u32::<B>(name).unwrap();
        buf.write_u32::<B>(ty).unwrap();
        for val in [flags, addr, offset, size] {
            buf.write_u64::<B>(val).unwrap();
        }
        buf.write_u32::<B>(link).unwrap();
        buf.write_u32::<B>(info).unwrap();
        buf.write_u64::<B>(addralign).unwrap();
        buf.write_u64::<B>(entsize).unwrap();
    }
    buf
}

pub fn elf64_le(phnum: u16, shnum: u16) -> Vec<u8> {
    elf64::<LittleEndian>(1, phnum, shnum)
}

pub fn elf64_be(phnum: u16, shnum: u16) -> Vec<u8> {
    elf64::<BigEndian>(2, phnum, shnum)
}

/// 32-bit little-endian image with the section headers placed *before* the
/// program headers.
pub fn elf32_le(phnum: u16, shnum: u16) -> Vec<u8> {
    let shoff = EHDR32 as u64;
    let phoff = shoff + shnum as u64 * SHDR32 as u64;
    let mut buf = ident(1, 1);
    buf.write_u16::<LittleEndian>(2).unwrap();
    buf.write_u16::<LittleEndian>(40).unwrap(); // EM_ARM
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u32::<LittleEndian>(0xffff_0000).unwrap();
    buf.write_u32::<LittleEndian>(phoff as u32).unwrap();
    buf.write_u32::<LittleEndian>(shoff as u32).unwrap();
    buf.write_u32::<LittleEndian>(0x0500_0200).unwrap();
    for val in [EHDR32 as u16, PHDR32 as u16, phnum, SHDR32 as u16, shnum, 0] {
        buf.write_u16::<LittleEndian>(val).unwrap();
    }
    assert_eq!(buf.len(), EHDR32);

    for i in 0..shnum as u64 {
        let (name, ty, flags, addr, offset, size, link, info, addralign, entsize) = shdr_values(i);
        for val in [name, ty, flags as u32, addr as u32, offset as u32, size as u32, link, info, addralign as u32, entsize as u32] {
            buf.write_u32::<LittleEndian>(val).unwrap();
        }
    }
    assert_eq!(buf.len() as u64, phoff);

    for i in 0..phnum as u64 {
        let (ty, flags, offset, vaddr, paddr, filesz, memsz, align) = phdr_values(i);
        for val in [ty, offset as u32, vaddr as u32, paddr as u32, filesz as u32, memsz as u32, flags, align as u32] {
            buf.write_u32::<LittleEndian>(val).unwrap();
        }
    }
    buf
}

pub fn le_u16(buf: &[u8], at: usize) -> u16 {
    LittleEndian::read_u16(&buf[at..])
}

pub fn le_u32(buf: &[u8], at: usize) -> u32 {
    LittleEndian::read_u32(&buf[at..])
}

pub fn le_u64(buf: &[u8], at: usize) -> u64 {
    LittleEndian::read_u64(&buf[at..])
}

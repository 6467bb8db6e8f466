//! Plain text rendering of a decoded file.
//!
//! One `name = value` pair per header field, one line per table entry.
//! Values are lowercase hex without a prefix.

use std::fmt::Display;
use std::io::{self, Write};

use crate::file::ElfFile;
use crate::header::FileHeader;
use crate::section::SectionHeader;
use crate::segment::ProgramHeader;

/// Which parts of the file get printed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Parts {
    pub header: bool,
    pub segments: bool,
    pub sections: bool,
}

impl Parts {
    /// Header, segments and sections
    pub fn all() -> Parts {
        Parts { header: true, segments: true, sections: true }
    }

    /// Nothing, a base for struct update syntax
    pub fn none() -> Parts {
        Parts { header: false, segments: false, sections: false }
    }
}

impl Default for Parts {
    fn default() -> Self {
        Self::all()
    }
}

/// Streams a decoded [`ElfFile`] to a writer as text
pub struct Reflector<W: Write> {
    out: W,
    annotate: bool,
    parts: Parts,
}

impl<W: Write> Reflector<W> {
    /// Plain listing of every part to `out`
    pub fn new(out: W) -> Self {
        Reflector { out, annotate: false, parts: Parts::all() }
    }

    /// Follow selected values with their symbolic name, e.g. `e_type = 2 (Executable file)`
    pub fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Restrict output to the selected parts
    pub fn parts(mut self, parts: Parts) -> Self {
        self.parts = parts;
        self
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the selected parts of `elf` and flush
    pub fn reflect(&mut self, elf: &ElfFile) -> io::Result<()> {
        if self.parts.header {
            self.file_header(&elf.ehdr)?;
        }
        if self.parts.segments {
            for phdr in &elf.phdrs {
                self.program_header(phdr)?;
            }
        }
        if self.parts.sections {
            for shdr in &elf.shdrs {
                self.section_header(shdr)?;
            }
        }
        self.out.flush()
    }

    fn note(&self, name: impl Display) -> String {
        if self.annotate {
            format!(" ({name})")
        } else {
            String::new()
        }
    }

    /// The 16 ident bytes, then one line per header field
    pub fn file_header(&mut self, ehdr: &FileHeader) -> io::Result<()> {
        for (i, byte) in ehdr.ident().bytes().iter().enumerate() {
            writeln!(self.out, "e_ident[{i}] = {byte:x}")?;
        }
        let elftype = self.note(ehdr.elftype());
        let machine = self.note(ehdr.machine());
        let version = self.note(ehdr.version());
        writeln!(self.out, "e_type = {:x}{elftype}", ehdr.elftype().0)?;
        writeln!(self.out, "e_machine = {:x}{machine}", ehdr.machine().0)?;
        writeln!(self.out, "e_version = {:x}{version}", ehdr.version().0)?;
        writeln!(self.out, "e_entry = {:x}", ehdr.entry())?;
        writeln!(self.out, "e_phoff = {:x}", ehdr.phoff())?;
        writeln!(self.out, "e_shoff = {:x}", ehdr.shoff())?;
        writeln!(self.out, "e_flags = {:x}", ehdr.flags())?;
        writeln!(self.out, "e_ehsize = {:x}", ehdr.ehsize())?;
        writeln!(self.out, "e_phentsize = {:x}", ehdr.phentsize())?;
        writeln!(self.out, "e_phnum = {:x}", ehdr.phnum())?;
        writeln!(self.out, "e_shentsize = {:x}", ehdr.shentsize())?;
        writeln!(self.out, "e_shnum = {:x}", ehdr.shnum())?;
        writeln!(self.out, "e_shstrndx = {:x}", ehdr.shstrndx())
    }

    /// One line for a program header entry
    pub fn program_header(&mut self, phdr: &ProgramHeader) -> io::Result<()> {
        let progtype = self.note(phdr.progtype());
        let flags = self.note(phdr.flags());
        writeln!(
            self.out,
            "p_type = {:x}{progtype} p_offset = {:x} p_vaddr = {:x} p_paddr = {:x} p_filesz = {:x} p_memsz = {:x} p_flags = {:x}{flags} p_align = {:x}",
            phdr.progtype().0,
            phdr.offset(),
            phdr.vaddr(),
            phdr.paddr(),
            phdr.filesz(),
            phdr.memsz(),
            phdr.flags().0,
            phdr.align()
        )
    }

    /// One line for a section header entry
    pub fn section_header(&mut self, shdr: &SectionHeader) -> io::Result<()> {
        let shtype = self.note(shdr.shtype());
        let flags = self.note(shdr.flags());
        writeln!(
            self.out,
            "sh_name = {:x} sh_type = {:x}{shtype} sh_flags = {:x}{flags} sh_addr = {:x} sh_offset = {:x} sh_size = {:x} sh_link = {:x} sh_info = {:x} sh_addralign = {:x} sh_entsize = {:x}",
            shdr.name(),
            shdr.shtype().0,
            shdr.flags().0,
            shdr.addr(),
            shdr.offset(),
            shdr.size(),
            shdr.link(),
            shdr.info(),
            shdr.addralign(),
            shdr.entsize()
        )
    }
}

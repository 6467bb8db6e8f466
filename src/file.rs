use std::fs;
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, trace};

use crate::endian::Endian;
use crate::error::{ParseError, Result};
use crate::header::{sniff, FileHeader};
use crate::options::ParseOptions;
use crate::section::{SectionHeader, SectionHeader32, SectionHeader64};
use crate::segment::{ProgramHeader, ProgramHeader32, ProgramHeader64};
use crate::table::TableReader;
use crate::types::Class;

/// The three structural regions of one ELF file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElfFile {
    pub ehdr: FileHeader,
    /// Byte order every field was decoded with
    pub endian: Endian,
    pub phdrs: Vec<ProgramHeader>,
    pub shdrs: Vec<SectionHeader>,
}

impl ElfFile {
    pub fn open<P: AsRef<Path>>(path: P, opts: &ParseOptions) -> Result<ElfFile> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| ParseError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(target: "file", "opened {}", path.display());
        Self::open_stream(&mut BufReader::new(file), opts)
    }

    /// Decode the header and both tables from `reader`, failing on the first
    /// problem found.
    pub fn open_stream<S: Read + Seek>(reader: &mut S, opts: &ParseOptions) -> Result<ElfFile> {
        let ident = sniff(reader)?;
        let endian = opts.byte_order.resolve(&ident)?;
        debug!(target: "file", "decoding as {endian:?} ({:?})", opts.byte_order);

        let ehdr = FileHeader::read(reader, &ident, endian)?;
        if opts.strict {
            ehdr.check_sizes()?;
        }

        let mut tables = TableReader::new(reader, endian, opts.max_entries)?;
        let phoff = ehdr.phoff();
        let phnum = ehdr.phnum() as usize;
        let shoff = ehdr.shoff();
        let shnum = ehdr.shnum() as usize;
        let (phdrs, shdrs): (Vec<ProgramHeader>, Vec<SectionHeader>) = match ehdr {
            FileHeader::Header32(_) => (
                collect(tables.read::<ProgramHeader32>("program header table", phoff, phnum)?),
                collect(tables.read::<SectionHeader32>("section header table", shoff, shnum)?),
            ),
            FileHeader::Header64(_) => (
                collect(tables.read::<ProgramHeader64>("program header table", phoff, phnum)?),
                collect(tables.read::<SectionHeader64>("section header table", shoff, shnum)?),
            ),
        };

        for phdr in &phdrs {
            trace!(target: "table", "{phdr}");
        }
        for shdr in &shdrs {
            trace!(target: "table", "{shdr}");
        }

        Ok(ElfFile { ehdr, endian, phdrs, shdrs })
    }

    pub fn class(&self) -> Class {
        self.ehdr.class()
    }

    /// Encode the header and both tables back at the offsets the header
    /// declares. Bytes in between are left untouched.
    pub fn write_to<W: Write + Seek>(&self, out: &mut W) -> io::Result<()> {
        out.seek(SeekFrom::Start(0))?;
        self.ehdr.write_to(out, self.endian)?;
        if !self.phdrs.is_empty() {
            out.seek(SeekFrom::Start(self.ehdr.phoff()))?;
            for phdr in &self.phdrs {
                phdr.write_to(out, self.endian)?;
            }
        }
        if !self.shdrs.is_empty() {
            out.seek(SeekFrom::Start(self.ehdr.shoff()))?;
            for shdr in &self.shdrs {
                shdr.write_to(out, self.endian)?;
            }
        }
        Ok(())
    }
}

fn collect<T, U: From<T>>(raw: Vec<T>) -> Vec<U> {
    raw.into_iter().map(U::from).collect()
}

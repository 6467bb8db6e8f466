//! A read-only reflector for the structural metadata of ELF files.
//!
//! Decoding is a single straight pass over a seekable byte source:
//!
//! 1. [`header::sniff`] checks the magic and the class byte,
//! 2. [`FileHeader::read`] decodes the class specific file header,
//! 3. [`table::TableReader`] pulls in the program and section header tables,
//!
//! after which [`reflect::Reflector`] can render everything as text.
//!
//! ```no_run
//! use elfreflect::{ElfFile, ParseOptions, Reflector};
//!
//! let elf = ElfFile::open("/bin/true", &ParseOptions::default())?;
//! Reflector::new(std::io::stdout().lock()).reflect(&elf)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod endian;
pub mod error;
pub mod file;
pub mod header;
pub mod options;
pub mod reflect;
pub mod section;
pub mod segment;
pub mod table;
pub mod types;

pub use endian::Endian;
pub use error::{ParseError, Result};
pub use file::ElfFile;
pub use header::{FileHeader, Ident};
pub use options::{ByteOrderMode, ParseOptions};
pub use reflect::{Parts, Reflector};
pub use section::SectionHeader;
pub use segment::ProgramHeader;

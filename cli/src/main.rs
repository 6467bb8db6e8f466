use clap::{Parser, ValueEnum};
use log::{debug, error, LevelFilter};

use elfreflect::{ByteOrderMode, ElfFile, ParseError, ParseOptions, Parts, Reflector};

use std::io;
use std::path::PathBuf;
use std::process;

/// User-specified byte order handling.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ByteOrder {
    /// Use the data encoding byte of the file
    Ident,
    /// Assume the host byte order
    Native,
    Little,
    Big,
}

impl From<ByteOrder> for ByteOrderMode {
    fn from(order: ByteOrder) -> Self {
        match order {
            ByteOrder::Ident => ByteOrderMode::FromIdent,
            ByteOrder::Native => ByteOrderMode::Native,
            ByteOrder::Little => ByteOrderMode::Little,
            ByteOrder::Big => ByteOrderMode::Big,
        }
    }
}

/// A part of the file to print.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Part {
    Header,
    Segments,
    Sections,
}

#[derive(Parser, Debug)]
#[clap(version, about = "Print the file header, program headers and section headers of an ELF file")]
struct Args {
    /// Path to the ELF file
    file: PathBuf,
    /// Where to take the byte order from
    #[clap(short, long, value_enum, default_value = "ident")]
    byte_order: ByteOrder,
    /// Reject headers whose declared entry sizes do not match the ELF class
    #[clap(short, long)]
    strict: bool,
    /// Largest program/section header count accepted from the file
    #[clap(long, default_value_t = ParseOptions::DEFAULT_MAX_ENTRIES)]
    max_entries: usize,
    /// Follow type, machine and flag values with their names
    #[clap(short, long)]
    annotate: bool,
    /// Only print these parts (may be repeated)
    #[clap(short, long, value_enum)]
    only: Vec<Part>,
    /// More logging, may be repeated
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[clap(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions::new()
            .byte_order(self.byte_order.into())
            .strict(self.strict)
            .max_entries(self.max_entries)
    }

    fn parts(&self) -> Parts {
        if self.only.is_empty() {
            return Parts::all();
        }
        Parts {
            header: self.only.contains(&Part::Header),
            segments: self.only.contains(&Part::Segments),
            sections: self.only.contains(&Part::Sections),
        }
    }

    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn setup_logger(level: LevelFilter) -> anyhow::Result<()> {
    let colors = fern::colors::ColoredLevelConfig::new()
        .error(fern::colors::Color::Red)
        .warn(fern::colors::Color::Yellow)
        .debug(fern::colors::Color::Cyan)
        .trace(fern::colors::Color::BrightBlack);
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

/// Exit status for a failed run, one per error class.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ParseError>() {
        Some(ParseError::InputUnavailable { .. }) => 2,
        Some(ParseError::TruncatedInput { .. }) => 3,
        Some(ParseError::BadMagic(_)) => 4,
        Some(ParseError::UnknownClass(_)) => 5,
        Some(ParseError::UnknownDataEncoding(_)) => 6,
        Some(ParseError::SeekError { .. }) => 7,
        Some(ParseError::EntrySizeMismatch { .. }) => 8,
        Some(ParseError::TooManyEntries { .. }) => 9,
        Some(ParseError::Io(_)) | None => 1,
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    // Decode everything before printing anything
    let elf = ElfFile::open(&args.file, &args.parse_options())?;
    debug!(target: "main", "{}", elf.ehdr);
    debug!(target: "main", "{} program headers, {} section headers", elf.phdrs.len(), elf.shdrs.len());

    let stdout = io::stdout();
    Reflector::new(stdout.lock())
        .annotate(args.annotate)
        .parts(args.parts())
        .reflect(&elf)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(reason) = setup_logger(args.log_level()) {
        eprintln!("Failed to set up logging: {reason}");
    }

    if let Err(reason) = run(&args) {
        error!(target: "main", "{}: {reason}", args.file.display());
        process::exit(exit_code(&reason));
    }
}

use std::fmt;

/// Length of ELF file header platform-independent identification fields
pub const EI_NIDENT: usize = 16;
/// The four signature bytes every ELF file starts with
pub const ELFMAG: [u8; 4] = [0x7f, b'E', b'L', b'F'];
/// Location of ELF class field in ELF file header ident array
pub const EI_CLASS: usize = 4;
/// Location of data format field in ELF file header ident array
pub const EI_DATA: usize = 5;
/// Location of ELF version field in ELF file header ident array
pub const EI_VERSION: usize = 6;
/// Location of OS ABI field in ELF file header ident array
pub const EI_OSABI: usize = 7;
/// Location of ABI version field in ELF file header ident array
pub const EI_ABIVERSION: usize = 8;

/// Declares a set of named values for a newtype, plus the `Debug` (raw hex)
/// and `Display` (human name) impls shared by all of them.
macro_rules! named_values {
    ($ty:ident { $($nam:ident = $num:expr, $desc:expr;)+ }) => {
        $(
            #[doc=$desc]
            pub const $nam: $ty = $ty($num);
        )+

        impl $ty {
            /// Human readable name, `None` for values outside the known set
            #[allow(unreachable_patterns)]
            pub fn name(&self) -> Option<&'static str> {
                match *self {
                    $($nam => Some($desc),)+
                    _ => None,
                }
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{:#x}", self.0)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.name().unwrap_or("Unknown"))
            }
        }
    };
}

/// Represents the ELF file class (32-bit vs 64-bit)
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Class(pub u8);

named_values! { Class {
    ELFCLASSNONE = 0, "Invalid";
    ELFCLASS32 = 1, "32-bit";
    ELFCLASS64 = 2, "64-bit";
}}

/// Represents the ELF file data format (little-endian vs big-endian)
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Data(pub u8);

named_values! { Data {
    ELFDATANONE = 0, "Invalid";
    ELFDATA2LSB = 1, "2's complement, little endian";
    ELFDATA2MSB = 2, "2's complement, big endian";
}}

/// Represents the ELF file version
///
/// This field represents the values both found in the e_ident byte array and the e_version field.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Version(pub u32);

named_values! { Version {
    EV_NONE = 0, "Invalid";
    EV_CURRENT = 1, "1 (Current)";
}}

/// Represents the ELF file OS ABI
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct OSABI(pub u8);

named_values! { OSABI {
    ELFOSABI_SYSV = 0, "UNIX System V";
    ELFOSABI_HPUX = 1, "HP-UX";
    ELFOSABI_NETBSD = 2, "NetBSD";
    ELFOSABI_LINUX = 3, "Linux with GNU extensions";
    ELFOSABI_SOLARIS = 6, "Solaris";
    ELFOSABI_AIX = 7, "AIX";
    ELFOSABI_IRIX = 8, "SGI Irix";
    ELFOSABI_FREEBSD = 9, "FreeBSD";
    ELFOSABI_OPENBSD = 12, "OpenBSD";
    ELFOSABI_STANDALONE = 255, "Standalone (embedded) application";
}}

/// Represents the ELF file type (object, executable, shared lib, core)
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Type(pub u16);

named_values! { Type {
    ET_NONE = 0, "No file type";
    ET_REL = 1, "Relocatable file";
    ET_EXEC = 2, "Executable file";
    ET_DYN = 3, "Shared object file";
    ET_CORE = 4, "Core file";
}}

/// Represents the ELF file machine architecture
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Machine(pub u16);

named_values! { Machine {
    EM_NONE = 0, "No machine";
    EM_SPARC = 2, "SPARC";
    EM_386 = 3, "Intel 80386";
    EM_68K = 4, "Motorola 68000";
    EM_MIPS = 8, "MIPS I Architecture";
    EM_PARISC = 15, "Hewlett-Packard PA-RISC";
    EM_PPC = 20, "PowerPC";
    EM_PPC64 = 21, "64-bit PowerPC";
    EM_S390 = 22, "IBM System/390 Processor";
    EM_ARM = 40, "ARM 32-bit architecture (AARCH32)";
    EM_SH = 42, "Hitachi SH";
    EM_SPARCV9 = 43, "SPARC Version 9";
    EM_IA_64 = 50, "Intel IA-64 processor architecture";
    EM_X86_64 = 62, "AMD x86-64 architecture";
    EM_AVR = 83, "Atmel AVR 8-bit microcontroller";
    EM_XTENSA = 94, "Tensilica Xtensa Architecture";
    EM_AARCH64 = 183, "ARM 64-bit architecture (AARCH64)";
    EM_AMDGPU = 224, "AMD GPU architecture";
    EM_RISCV = 243, "RISC-V";
    EM_BPF = 247, "Linux BPF";
    EM_LOONGARCH = 258, "LoongArch";
}}

/// Represents ELF Program Header type
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct ProgType(pub u32);

named_values! { ProgType {
    PT_NULL = 0, "NULL";
    PT_LOAD = 1, "LOAD";
    PT_DYNAMIC = 2, "DYNAMIC";
    PT_INTERP = 3, "INTERP";
    PT_NOTE = 4, "NOTE";
    PT_SHLIB = 5, "SHLIB";
    PT_PHDR = 6, "PHDR";
    PT_TLS = 7, "TLS";
    PT_GNU_EH_FRAME = 0x6474e550, "GNU_EH_FRAME";
    PT_GNU_STACK = 0x6474e551, "GNU_STACK";
    PT_GNU_RELRO = 0x6474e552, "GNU_RELRO";
    PT_GNU_PROPERTY = 0x6474e553, "GNU_PROPERTY";
}}

/// Represents ELF Program Header flags
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct ProgFlag(pub u32);
pub const PF_NONE: ProgFlag = ProgFlag(0);
/// Executable program segment
pub const PF_X: ProgFlag = ProgFlag(1);
/// Writable program segment
pub const PF_W: ProgFlag = ProgFlag(2);
/// Readable program segment
pub const PF_R: ProgFlag = ProgFlag(4);

impl ProgFlag {
    pub fn contains(&self, other: ProgFlag) -> bool {
        self.0 & other.0 == other.0
    }
}

impl fmt::Debug for ProgFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for ProgFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (flag, c) in [(PF_R, 'R'), (PF_W, 'W'), (PF_X, 'E')] {
            write!(f, "{}", if self.contains(flag) { c } else { ' ' })?;
        }
        Ok(())
    }
}

/// Represens ELF Section type
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct SectionType(pub u32);

named_values! { SectionType {
    SHT_NULL = 0, "SHT_NULL";
    SHT_PROGBITS = 1, "SHT_PROGBITS";
    SHT_SYMTAB = 2, "SHT_SYMTAB";
    SHT_STRTAB = 3, "SHT_STRTAB";
    SHT_RELA = 4, "SHT_RELA";
    SHT_HASH = 5, "SHT_HASH";
    SHT_DYNAMIC = 6, "SHT_DYNAMIC";
    SHT_NOTE = 7, "SHT_NOTE";
    SHT_NOBITS = 8, "SHT_NOBITS";
    SHT_REL = 9, "SHT_REL";
    SHT_SHLIB = 10, "SHT_SHLIB";
    SHT_DYNSYM = 11, "SHT_DYNSYM";
    SHT_INIT_ARRAY = 14, "SHT_INIT_ARRAY";
    SHT_FINI_ARRAY = 15, "SHT_FINI_ARRAY";
    SHT_PREINIT_ARRAY = 16, "SHT_PREINIT_ARRAY";
    SHT_GROUP = 17, "SHT_GROUP";
    SHT_SYMTAB_SHNDX = 18, "SHT_SYMTAB_SHNDX";
    SHT_GNU_ATTRIBUTES = 0x6ffffff5, "SHT_GNU_ATTRIBUTES";
    SHT_GNU_HASH = 0x6ffffff6, "SHT_GNU_HASH";
    SHT_GNU_VERDEF = 0x6ffffffd, "SHT_GNU_VERDEF";
    SHT_GNU_VERNEED = 0x6ffffffe, "SHT_GNU_VERNEED";
    SHT_GNU_VERSYM = 0x6fffffff, "SHT_GNU_VERSYM";
}}

///
/// Wrapper type for SectionFlag
///
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct SectionFlag(pub u64);
/// Writable
pub const SHF_WRITE: SectionFlag = SectionFlag(1);
/// Occupies memory during execution
pub const SHF_ALLOC: SectionFlag = SectionFlag(2);
/// Executable
pub const SHF_EXECINSTR: SectionFlag = SectionFlag(4);
/// Might be merged
pub const SHF_MERGE: SectionFlag = SectionFlag(16);
/// Contains nul-terminated strings
pub const SHF_STRINGS: SectionFlag = SectionFlag(32);
/// `sh_info' contains SHT index
pub const SHF_INFO_LINK: SectionFlag = SectionFlag(64);
/// Preserve order after combining
pub const SHF_LINK_ORDER: SectionFlag = SectionFlag(128);
/// Section is member of a group
pub const SHF_GROUP: SectionFlag = SectionFlag(512);
/// Section hold thread-local data
pub const SHF_TLS: SectionFlag = SectionFlag(1024);

impl fmt::Debug for SectionFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Renders the readelf style key letters, e.g. `WA` or `AX`.
impl fmt::Display for SectionFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let keys = [
            (SHF_WRITE, 'W'),
            (SHF_ALLOC, 'A'),
            (SHF_EXECINSTR, 'X'),
            (SHF_MERGE, 'M'),
            (SHF_STRINGS, 'S'),
            (SHF_INFO_LINK, 'I'),
            (SHF_LINK_ORDER, 'L'),
            (SHF_GROUP, 'G'),
            (SHF_TLS, 'T'),
        ];
        for (flag, c) in keys {
            if self.0 & flag.0 != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

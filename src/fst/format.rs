#![forbid(unsafe_code)]

use serde::Serialize;

/// Absolute offset of the big-endian pointer to the disc's own FST.
pub const FST_POINTER_OFFSET: u64 = 0x0424;

/// Size of one FST record.
pub const RECORD_LEN: usize = 0x0C;

/// Signature at the start of an embedded container.
pub const CONTAINER_MAGIC: [u8; 4] = [0xAE, 0x0F, 0x38, 0xA2];

/// File extension that marks a file as a candidate container.
pub const CONTAINER_EXT: &str = ".tgc";

/// Container header: FST start, relative to the container.
pub const CONTAINER_FST_START: u64 = 0x10;
/// Container header: file area base.
pub const CONTAINER_FILE_AREA: u64 = 0x24;
/// Container header: virtual file area base.
pub const CONTAINER_VIRTUAL_FILE_AREA: u64 = 0x34;

/// Recursion guard for containers nested inside containers.
pub const MAX_CONTAINER_DEPTH: usize = 8;

/// Longest name accepted from a string table.
pub const MAX_NAME_LEN: usize = 0x400;

/// Known payloads and the file names they are extracted under.
pub const WELL_KNOWN: &[(&str, &str)] = &[
    ("zlp_f.n64", "TLoZ-OoT-GC.z64"),
    ("urazlp_f.n64", "TLoZ-OoT-MQ-GC.z64"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EntryKind {
    File = 0,
    Directory = 1,
}

/// One decoded FST record.
///
/// `pos` is the 1-based record index; `parent_dir_pos` points at an earlier
/// record (0 is the table root). `file_offset` is already shifted into the
/// coordinate space of the outermost stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub pos: u32,
    pub kind: EntryKind,
    pub name_offset: u32,
    pub name: String,
    pub file_offset: u64,
    pub size: u32,
    pub parent_dir_pos: u32,
    /// Full name of the enclosing container, empty for the disc itself.
    pub owner: String,
    pub path: String,
    pub full_name: String,
}

impl Entry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Public view of a file entry, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListedEntry {
    pub file_offset: u64,
    pub size: u32,
    pub name: String,
    pub full_name: String,
}

#![forbid(unsafe_code)]

use std::io::{Read, Seek, SeekFrom};

use crate::fst::error::{FstError, FstResult};
use crate::fst::format::{Entry, EntryKind, MAX_NAME_LEN, RECORD_LEN};
use crate::fst::io::{be_u24, be_u32, read_cstr, read_exact};

/// Decodes the FST whose root record starts at `fst_start`.
///
/// Record layout (12 bytes, big-endian):
/// - `[0]` kind: 0 = file, 1 = directory
/// - `[1..4]` name offset into the string table (24-bit)
/// - `[4..8]` file offset, or parent directory position for directories
/// - `[8..12]` file size, or next-directory position (ignored)
///
/// The root record's last field is the entry count including the root.
/// The string table follows the last record directly.
///
/// Files belong to the most recent directory record seen before them.
/// `offset_shift` is added to every file offset; `owner` is carried into
/// each entry so the resolver can prefix full names.
///
/// Names are resolved, paths are not.
pub(crate) fn read_table<R: Read + Seek>(
    stream: &mut R,
    fst_start: u64,
    offset_shift: i64,
    owner: &str,
) -> FstResult<Vec<Entry>> {
    stream.seek(SeekFrom::Start(fst_start))?;
    let root = read_exact::<RECORD_LEN>(stream, "fst root record")?;
    let count = be_u32([root[8], root[9], root[10], root[11]]);
    if count == 0 {
        return Err(FstError::Invalid(format!("entry count is zero at {fst_start:#x}")));
    }

    let mut entries: Vec<Entry> = Vec::with_capacity(count.min(0x1_0000) as usize - 1);
    let mut current_dir = 0u32;

    for pos in 1..count {
        let rec = read_exact::<RECORD_LEN>(stream, "fst record")?;
        let name_offset = be_u24([rec[1], rec[2], rec[3]]);
        let a = be_u32([rec[4], rec[5], rec[6], rec[7]]);
        let b = be_u32([rec[8], rec[9], rec[10], rec[11]]);

        let entry = match rec[0] {
            0 => Entry {
                pos,
                kind: EntryKind::File,
                name_offset,
                name: String::new(),
                file_offset: shifted(a, offset_shift),
                size: b,
                parent_dir_pos: current_dir,
                owner: owner.to_string(),
                path: String::new(),
                full_name: String::new(),
            },
            1 => {
                if a >= pos {
                    return Err(FstError::Invalid(format!(
                        "directory {pos} has parent {a}, which is not an earlier entry"
                    )));
                }
                current_dir = pos;
                Entry {
                    pos,
                    kind: EntryKind::Directory,
                    name_offset,
                    name: String::new(),
                    file_offset: 0,
                    size: 0,
                    parent_dir_pos: a,
                    owner: owner.to_string(),
                    path: String::new(),
                    full_name: String::new(),
                }
            }
            other => {
                return Err(FstError::Invalid(format!("entry {pos} has unknown kind {other}")));
            }
        };
        entries.push(entry);
    }

    let string_table = stream.stream_position()?;

    for e in entries.iter_mut() {
        stream.seek(SeekFrom::Start(string_table + u64::from(e.name_offset)))?;
        e.name = read_cstr(stream, MAX_NAME_LEN)?;
    }

    log::debug!(
        "fst at {fst_start:#x}: {} entries, string table at {string_table:#x}, shift {offset_shift}",
        entries.len()
    );

    Ok(entries)
}

/// Disc offsets are 32-bit; a shifted offset wraps within that space.
fn shifted(raw: u32, shift: i64) -> u64 {
    let v = i64::from(raw) + shift;
    if !(0..=i64::from(u32::MAX)).contains(&v) {
        log::debug!("file offset {raw:#x} shifted by {shift} leaves the disc, wrapping");
    }
    u64::from(v as u32)
}

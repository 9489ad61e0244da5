#![forbid(unsafe_code)]

use std::io::{Read, Seek, SeekFrom};

use crate::fst::error::{FstError, FstResult};
use crate::fst::format::{
    Entry, CONTAINER_EXT, CONTAINER_FILE_AREA, CONTAINER_FST_START, CONTAINER_MAGIC,
    CONTAINER_VIRTUAL_FILE_AREA, FST_POINTER_OFFSET, MAX_CONTAINER_DEPTH,
};
use crate::fst::io::{read_exact, read_u32_be};
use crate::fst::path::resolve_paths;
use crate::fst::read::read_table;

/// Smallest file that can hold a full container header.
const CONTAINER_HEADER_LEN: u64 = CONTAINER_VIRTUAL_FILE_AREA + 4;

/// Header of an embedded container, in absolute stream coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub fst_start: u64,
    pub file_area: u32,
    pub virtual_file_area: u32,
}

impl ContainerHeader {
    /// Amount added to nested file offsets to make them absolute.
    pub fn offset_shift(&self, container_offset: u64) -> FstResult<i64> {
        let base = i64::try_from(container_offset)
            .map_err(|_| FstError::Invalid(format!("container offset {container_offset:#x} out of range")))?;
        Ok(i64::from(self.file_area) - i64::from(self.virtual_file_area) + base)
    }
}

pub fn is_container_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(CONTAINER_EXT)
}

/// Reads the container header at `offset`, or `None` when the magic is absent.
pub(crate) fn read_container_header<R: Read + Seek>(stream: &mut R, offset: u64) -> FstResult<Option<ContainerHeader>> {
    stream.seek(SeekFrom::Start(offset))?;
    let magic = read_exact::<4>(stream, "container magic")?;
    if magic != CONTAINER_MAGIC {
        return Ok(None);
    }

    stream.seek(SeekFrom::Start(offset + CONTAINER_FST_START))?;
    let fst_rel = read_u32_be(stream, "container header")?;
    stream.seek(SeekFrom::Start(offset + CONTAINER_FILE_AREA))?;
    let file_area = read_u32_be(stream, "container header")?;
    stream.seek(SeekFrom::Start(offset + CONTAINER_VIRTUAL_FILE_AREA))?;
    let virtual_file_area = read_u32_be(stream, "container header")?;

    Ok(Some(ContainerHeader {
        fst_start: offset + u64::from(fst_rel),
        file_area,
        virtual_file_area,
    }))
}

/// Decodes the table nested inside `container` and returns its files,
/// offsets already shifted into the outer stream and names prefixed with
/// the container's full name. Non-containers contribute nothing.
pub(crate) fn expand_container<R: Read + Seek>(stream: &mut R, container: &Entry, depth: usize) -> FstResult<Vec<Entry>> {
    if u64::from(container.size) < CONTAINER_HEADER_LEN {
        return Ok(Vec::new());
    }

    let header = match read_container_header(stream, container.file_offset)? {
        Some(h) => h,
        None => {
            log::debug!("{}: no container magic, treating as a plain file", container.full_name);
            return Ok(Vec::new());
        }
    };

    if depth >= MAX_CONTAINER_DEPTH {
        return Err(FstError::TooDeep(MAX_CONTAINER_DEPTH));
    }

    let shift = header.offset_shift(container.file_offset)?;
    log::info!(
        "{}: nested fst at {:#x}, file area {:#x}, virtual {:#x}, shift {shift}",
        container.full_name,
        header.fst_start,
        header.file_area,
        header.virtual_file_area
    );

    let mut nested = read_table(stream, header.fst_start, shift, &container.full_name)?;
    resolve_paths(&mut nested)?;
    flatten(stream, nested, depth + 1)
}

/// Keeps the files of one resolved table, replacing each container by its
/// nested files followed by the container itself.
pub(crate) fn flatten<R: Read + Seek>(stream: &mut R, entries: Vec<Entry>, depth: usize) -> FstResult<Vec<Entry>> {
    let mut out = Vec::with_capacity(entries.len());
    for e in entries.into_iter().filter(Entry::is_file) {
        if is_container_name(&e.name) {
            let inner = expand_container(stream, &e, depth)?;
            out.extend(inner);
        }
        out.push(e);
    }
    Ok(out)
}

/// Flat file list of a whole disc image, containers expanded.
pub fn read_disc<R: Read + Seek>(stream: &mut R) -> FstResult<Vec<Entry>> {
    stream.seek(SeekFrom::Start(FST_POINTER_OFFSET))?;
    let fst_start = read_u32_be(stream, "fst pointer")?;

    let mut entries = read_table(stream, u64::from(fst_start), 0, "")?;
    resolve_paths(&mut entries)?;
    let files = flatten(stream, entries, 0)?;

    log::info!("disc fst at {fst_start:#x}: {} files", files.len());
    Ok(files)
}

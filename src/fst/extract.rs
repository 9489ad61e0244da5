#![forbid(unsafe_code)]

use blake3::Hasher;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::fst::error::{FstError, FstResult};
use crate::fst::format::{Entry, WELL_KNOWN};
use crate::fst::io::hex32;

/// Copy buffer size.
pub const COPY_CHUNK: usize = 0x20000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    pub path: PathBuf,
    pub size: u64,
    /// Blake3 hash (hex) of the written bytes.
    pub blake3_hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Written(Vec<ExtractedFile>),
    NoMatch,
}

/// Extracts every file whose full name contains `filter`, named after its
/// base name inside `output`.
pub fn extract_matching<R: Read + Seek>(
    stream: &mut R,
    files: &[Entry],
    output: &Path,
    filter: &str,
) -> FstResult<Extraction> {
    let targets: Vec<(&Entry, &str)> = files
        .iter()
        .filter(|e| e.is_file() && e.full_name.contains(filter))
        .map(|e| (e, e.name.as_str()))
        .collect();
    write_targets(stream, &targets, output)
}

/// Extracts the well-known payloads under their fixed output names.
pub fn extract_well_known<R: Read + Seek>(stream: &mut R, files: &[Entry], output: &Path) -> FstResult<Extraction> {
    let targets: Vec<(&Entry, &str)> = files
        .iter()
        .filter(|e| e.is_file())
        .filter_map(|e| {
            WELL_KNOWN
                .iter()
                .find(|(name, _)| *name == e.name)
                .map(|(_, out)| (e, *out))
        })
        .collect();
    write_targets(stream, &targets, output)
}

fn write_targets<R: Read + Seek>(stream: &mut R, targets: &[(&Entry, &str)], output: &Path) -> FstResult<Extraction> {
    if targets.is_empty() {
        return Ok(Extraction::NoMatch);
    }

    std::fs::create_dir_all(output)?;

    let mut written = Vec::with_capacity(targets.len());
    for (entry, out_name) in targets {
        check_file_name(out_name)?;
        let out_path = output.join(out_name);
        let done = split_file(stream, &out_path, entry.file_offset, u64::from(entry.size))?;
        log::info!("{} -> {} ({} bytes)", entry.full_name, done.path.display(), done.size);
        written.push(done);
    }
    Ok(Extraction::Written(written))
}

fn check_file_name(name: &str) -> FstResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(FstError::Invalid(format!("unusable output file name {name:?}")));
    }
    Ok(())
}

/// Copies `[start, start + size)` of `stream` into a new file at `out_path`.
///
/// Never overwrites. If the source runs out before `size` bytes, or the
/// copy fails midway, the new file is removed again.
pub(crate) fn split_file<R: Read + Seek>(
    stream: &mut R,
    out_path: &Path,
    start: u64,
    size: u64,
) -> FstResult<ExtractedFile> {
    if out_path.exists() {
        return Err(FstError::Exists(out_path.to_path_buf()));
    }
    let mut out = match OpenOptions::new().write(true).create_new(true).open(out_path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(FstError::Exists(out_path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut hasher = Hasher::new();
    let copied = copy_range(stream, &mut out, &mut hasher, start, size);
    drop(out);

    match copied {
        Ok(n) if n == size => {
            let hash: [u8; 32] = hasher.finalize().into();
            Ok(ExtractedFile {
                path: out_path.to_path_buf(),
                size,
                blake3_hex: hex32(&hash),
            })
        }
        Ok(n) => {
            std::fs::remove_file(out_path)?;
            Err(FstError::ShortCopy {
                path: out_path.to_path_buf(),
                expected: size,
                copied: n,
            })
        }
        Err(e) => {
            let _ = std::fs::remove_file(out_path);
            Err(e)
        }
    }
}

/// Returns the number of bytes copied; less than `size` when the source ends.
fn copy_range<R: Read + Seek>(
    stream: &mut R,
    out: &mut File,
    hasher: &mut Hasher,
    start: u64,
    size: u64,
) -> FstResult<u64> {
    stream.seek(SeekFrom::Start(start))?;

    let mut buf = vec![0u8; size.min(COPY_CHUNK as u64) as usize];
    let mut remaining = size;

    while remaining > 0 {
        let want = remaining.min(buf.len() as u64) as usize;
        let n = match stream.read(&mut buf[..want]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        out.write_all(&buf[..n])?;
        hasher.update(&buf[..n]);
        remaining -= n as u64;
    }

    out.flush()?;
    Ok(size - remaining)
}

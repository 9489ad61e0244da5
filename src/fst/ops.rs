#![forbid(unsafe_code)]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::fst::container::read_disc;
use crate::fst::error::FstResult;
use crate::fst::extract::{extract_matching, extract_well_known, Extraction};
use crate::fst::format::{Entry, ListedEntry};
use crate::fst::list::{listing, render, ListFormat};

fn open(iso: &Path) -> FstResult<BufReader<File>> {
    Ok(BufReader::new(File::open(iso)?))
}

/// Flat file list of a disc image (containers expanded).
pub fn files(iso: &Path) -> FstResult<Vec<Entry>> {
    let mut f = open(iso)?;
    read_disc(&mut f)
}

/// Files of a disc image in listing order.
pub fn entries(iso: &Path) -> FstResult<Vec<ListedEntry>> {
    Ok(listing(&files(iso)?))
}

/// Prints the listing, or writes it as `FileList.txt`/`FileList.json` into `output`.
pub fn list(iso: &Path, format: ListFormat, output: Option<&Path>) -> FstResult<()> {
    let rendered = render(&entries(iso)?, format)?;

    match output {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(format.file_name());
            std::fs::write(&path, rendered)?;
            println!("wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

pub fn extract(iso: &Path, output: &Path, filter: &str) -> FstResult<Extraction> {
    let mut f = open(iso)?;
    let files = read_disc(&mut f)?;
    extract_matching(&mut f, &files, output, filter)
}

pub fn extract_roms(iso: &Path, output: &Path) -> FstResult<Extraction> {
    let mut f = open(iso)?;
    let files = read_disc(&mut f)?;
    extract_well_known(&mut f, &files, output)
}

/// Prints what an extraction wrote, or `none_msg` when nothing matched.
pub fn print_extraction(outcome: &Extraction, none_msg: &str) {
    match outcome {
        Extraction::Written(files) => {
            for f in files {
                println!("{}  {} bytes  blake3={}", f.path.display(), f.size, f.blake3_hex);
            }
        }
        Extraction::NoMatch => println!("{none_msg}"),
    }
}

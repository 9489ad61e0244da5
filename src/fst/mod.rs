#![forbid(unsafe_code)]

mod container;
mod error;
mod extract;
mod format;
mod io;
mod list;
mod ops;
mod path;
mod read;
#[cfg(test)]
mod testutil;

pub use error::{FstError, FstResult};
pub use list::ListFormat;

pub use ops::{extract, extract_roms, list, print_extraction};

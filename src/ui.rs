#![forbid(unsafe_code)]

use inquire::{InquireError, Select, Text};
use std::path::PathBuf;

use crate::fst::{FstError, FstResult, ListFormat};

const ACTION_LIST: &str = "List files";
const ACTION_EXTRACT: &str = "Extract files matching a substring";
const ACTION_ROMS: &str = "Extract the PAL OoT / MQ ROMs";

fn prompt_err(e: InquireError) -> FstError {
    FstError::Io(std::io::Error::other(e))
}

/// Strips whitespace and one pair of enclosing double quotes.
fn trim_path(s: &str) -> String {
    let s = s.trim();
    match s.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        Some(inner) => inner.to_string(),
        None => s.to_string(),
    }
}

fn prompt_iso() -> FstResult<PathBuf> {
    loop {
        let raw = Text::new("Disc image path").prompt().map_err(prompt_err)?;
        let p = PathBuf::from(trim_path(&raw));
        if p.is_file() {
            return Ok(p);
        }
        println!("Not a file: {}", p.display());
    }
}

fn prompt_output() -> FstResult<PathBuf> {
    Text::new("Output directory")
        .with_default(".")
        .prompt()
        .map(|s| PathBuf::from(trim_path(&s)))
        .map_err(prompt_err)
}

pub fn run() -> FstResult<()> {
    println!("GameCube FST extractor\n");

    let iso = prompt_iso()?;

    let action = Select::new("Action", vec![ACTION_LIST, ACTION_EXTRACT, ACTION_ROMS])
        .prompt()
        .map_err(prompt_err)?;

    match action {
        ACTION_LIST => {
            let format = Select::new("Format", vec!["text", "json"])
                .prompt()
                .map_err(prompt_err)?;
            let format = if format == "json" { ListFormat::Json } else { ListFormat::Text };
            let output = prompt_output()?;
            crate::run_list(&iso, format, Some(output.as_path()))
        }
        ACTION_EXTRACT => {
            let filter = Text::new("Substring of the full name")
                .prompt()
                .map_err(prompt_err)?;
            let output = prompt_output()?;
            crate::run_extract(&iso, &output, &filter)
        }
        _ => {
            let output = prompt_output()?;
            crate::run_roms(&iso, &output)
        }
    }
}

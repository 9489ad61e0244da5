#![forbid(unsafe_code)]

mod fst;
mod ui;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::fst::{FstResult, ListFormat};

/// Printed when `extract` finds nothing.
pub const NO_MATCH: &str = "Couldn't find any file or path matching";
/// Printed when `roms` finds nothing.
pub const NO_ROMS: &str = "Couldn't find any PAL OoT or MQ ROM.";

#[derive(Debug, Parser)]
#[command(name = "gcfst", version, about = "GameCube disc FST lister and extractor")]
struct Cli {
    /// Debug logging (RUST_LOG still wins when set).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive wizard (terminal).
    Ui,

    /// List every file on the disc, nested containers included, by offset.
    List {
        /// Disc image.
        #[arg(long)]
        iso: PathBuf,
        #[arg(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
        /// Write FileList.txt / FileList.json here instead of printing.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Extract files whose full name contains a substring.
    Extract {
        #[arg(long)]
        iso: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        filter: String,
    },

    /// Extract the PAL OoT / Master Quest ROMs.
    Roms {
        #[arg(long)]
        iso: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

pub fn run_extract(iso: &Path, output: &Path, filter: &str) -> FstResult<()> {
    let output = std::path::absolute(output)?;
    let outcome = fst::extract(iso, &output, filter)?;
    fst::print_extraction(&outcome, &format!("{NO_MATCH} '{filter}'."));
    Ok(())
}

pub fn run_roms(iso: &Path, output: &Path) -> FstResult<()> {
    let output = std::path::absolute(output)?;
    let outcome = fst::extract_roms(iso, &output)?;
    fst::print_extraction(&outcome, NO_ROMS);
    Ok(())
}

pub fn run_list(iso: &Path, format: ListFormat, output: Option<&Path>) -> FstResult<()> {
    let output = output.map(std::path::absolute).transpose()?;
    fst::list(iso, format, output.as_deref())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let res = match cli.cmd {
        Command::Ui => ui::run(),
        Command::List { iso, format, output } => run_list(&iso, format, output.as_deref()),
        Command::Extract { iso, output, filter } => run_extract(&iso, &output, &filter),
        Command::Roms { iso, output } => run_roms(&iso, &output),
    };

    if let Err(e) = res {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

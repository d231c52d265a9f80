use bibmeta_config::Overrides;
use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

/// Extract bibliographic metadata for corpus files from the bibliography database.
#[derive(Debug, Parser)]
#[command(version, about)]
// Passing both --filename and --outfile is rejected instead of one winning.
#[command(group(ArgGroup::new("mode").required(true).args(["filename", "outfile"])))]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// SQLite bibliography database
    #[arg(short, long, visible_alias = "db", value_name = "FILE")]
    pub dbfile: Option<PathBuf>,
    /// Genre table (headerless CSV: category, subcategory, genre)
    #[arg(short, long, value_name = "FILE")]
    pub genres: Option<PathBuf>,
    /// Print the metadata header of a single file
    #[arg(short, long, value_name = "NAME")]
    pub filename: Option<String>,
    /// Export metadata of every file in the database as CSV
    #[arg(short, long, value_name = "FILE")]
    pub outfile: Option<PathBuf>,
    /// Increase log verbosity (repeatable); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What a run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Header(String),
    Export(PathBuf),
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides { database: self.dbfile.clone(), genres: self.genres.clone() }
    }

    pub fn mode(&self) -> Mode {
        // The argument group guarantees exactly one of them is set.
        match (&self.filename, &self.outfile) {
            (Some(filename), _) => Mode::Header(filename.clone()),
            (None, Some(outfile)) => Mode::Export(outfile.clone()),
            (None, None) => unreachable!("clap requires --filename or --outfile"),
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

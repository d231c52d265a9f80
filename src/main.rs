mod cli;
mod error;

use crate::cli::{Cli, Mode};
use crate::error::{ErrorKind, Result};
use bibmeta_config::Config;
use bibmeta_format::{export, format_header};
use bibmeta_resolve::{Genres, Resolver};
use bibmeta_store::{Database, Repository};
use clap::Parser;
use exn::ResultExt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// Resolution is strictly sequential; one thread is all it needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level());
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Stdout carries the doc header.
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref(), &cli.overrides()).or_raise(|| ErrorKind::Config)?;
    let patterns = config.patterns.compile().or_raise(|| ErrorKind::Config)?;
    let genres = Genres::load(&config.genres).or_raise(|| ErrorKind::Genres)?;
    let db = Database::connect(&config.database).await.or_raise(|| ErrorKind::Database)?;
    let resolver = Resolver::new(Repository::from(&db), genres, patterns);
    let result = match cli.mode() {
        Mode::Header(filename) => print_header(&resolver, &filename).await,
        Mode::Export(path) => export_csv(&resolver, &path).await,
    };
    db.close().await;
    result
}

async fn print_header(resolver: &Resolver, filename: &str) -> Result<()> {
    let record = resolver.resolve(filename).await.or_raise(|| ErrorKind::Resolve(filename.to_string()))?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", format_header(&record)).or_raise(|| ErrorKind::Output)
}

async fn export_csv(resolver: &Resolver, path: &Path) -> Result<()> {
    let file = File::create(path).or_raise(|| ErrorKind::Export(path.to_path_buf()))?;
    let rows = export(resolver, BufWriter::new(file)).await.or_raise(|| ErrorKind::Export(path.to_path_buf()))?;
    tracing::info!(rows, path = %path.display(), "metadata exported");
    Ok(())
}

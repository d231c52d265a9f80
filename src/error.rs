//! Top-level Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not load genre table")]
    Genres,
    #[display("could not open bibliography database")]
    Database,
    #[display("could not resolve metadata for {_0}")]
    Resolve(#[error(not(source))] String),
    #[display("could not write output")]
    Output,
    #[display("export to {} failed", _0.display())]
    Export(#[error(not(source))] PathBuf),
}

use snafu::prelude::*;

pub mod finder;
pub mod output;
pub mod parser;
pub mod query;
pub mod repl;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not walk {root:?}: {source}"))]
    Walk {
        root: std::path::PathBuf,
        source: ignore::Error,
    },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    #[snafu(display("Could not serialize TODOs: {source}"))]
    Json { source: serde_json::Error },

    #[snafu(display("Invalid date {input:?}, expected yyyy, yyyy-mm or yyyy-mm-dd"))]
    InvalidDate { input: String },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

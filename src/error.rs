use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source table could not be opened or parsed.
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// The year key is missing from a dataset or a median age table.
    #[error("no such year: {0}")]
    UnknownYear(String),

    #[error("invalid median age {value:?} for year {year}")]
    InvalidMedianAge { year: String, value: String },

    #[error("loader thread panicked while reading {}", .0.display())]
    Thread(PathBuf),
}

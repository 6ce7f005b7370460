//! Error enum
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Serde(serde_json::Error),
    Csv(csv::Error),
    ThreadPool(rayon::ThreadPoolBuildError),
    UnknownLang(String),
    /// Corpus directory for the requested (dataset, language) pair is missing.
    ResourceNotFound(PathBuf),
    /// Corpus directory exists but holds no file matching `<lang>.*`.
    NoResourceFiles(String),
    /// The configured chunk size would fragment the corpus past the ceiling.
    TooManyPartitions { expected: u64, limit: u64 },
    /// Every numbered partition slot is taken.
    PartitionSlotExhausted { slots: usize },
    InvalidConfig(String),
    Custom(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Error {
        Error::ThreadPool(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

use flams::core::io::fasta::FastaError;
use flams::core::io::report::ReportError;
use flams::core::io::tabular::SearchFileError;
use flams::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    FlamsCore(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data management error: {0}")]
    Data(String),

    #[error("Invalid query: {0}")]
    Query(String),

    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn parsing(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        CliError::FileParsing {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<FastaError> for CliError {
    fn from(e: FastaError) -> Self {
        match e {
            FastaError::Io(io) => CliError::Io(io),
            other => CliError::Query(other.to_string()),
        }
    }
}

impl From<SearchFileError> for CliError {
    fn from(e: SearchFileError) -> Self {
        CliError::Other(anyhow::Error::new(e).context("Could not decode blastp output"))
    }
}

impl From<ReportError> for CliError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::Io(io) => CliError::Io(io),
            other => CliError::Other(other.into()),
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid FLAPPY_OS_SEED {0:?}, expected an unsigned integer")]
    Seed(String),
}

pub type Result<T> = std::result::Result<T, Error>;

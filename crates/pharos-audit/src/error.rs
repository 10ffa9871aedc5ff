use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("audit error: {0}")]
    Audit(String),

    #[error("score extraction error: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

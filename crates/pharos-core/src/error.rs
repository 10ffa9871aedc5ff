use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("report workbook error: {0}")]
    ReportWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::ReportWrite(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

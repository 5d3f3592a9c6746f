use std::io;

#[derive(Debug, thiserror::Error)]
pub enum HeatsiteError {
    #[error("invalid argument table: {0}")]
    Spec(#[from] heatargs::SpecError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HeatsiteError>;

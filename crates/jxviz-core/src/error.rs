use crate::files::ImportError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Content is empty")]
    EmptyContent,

    #[error("Conversion error: {message}")]
    Conversion { message: String },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported document mode: {mode}")]
    UnknownMode { mode: String },

    #[error("Unsupported orientation: {orientation}")]
    UnknownOrientation { orientation: String },
}

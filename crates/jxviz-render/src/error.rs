#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported theme: {theme} (expected `light` or `dark`)")]
    UnknownTheme { theme: String },
    #[error("invalid font specification: {font}")]
    InvalidFont { font: String },
    #[error("invalid config value at `{path}`: {message}")]
    InvalidConfig { path: String, message: String },
    /// Conversion failure reported by the conversion service, message kept verbatim.
    #[error("{message}")]
    Conversion { message: String },
    #[error(transparent)]
    Core(#[from] jxviz_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

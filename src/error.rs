//! Error types shared by palettes, loaders and color parsing.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("wrong palette size: expected {expected} bytes, got {actual}")]
    WrongSize { expected: usize, actual: usize },

    #[error("invalid palette mode: {0:?}")]
    InvalidMode(String),

    #[error("palette contains raw palette data")]
    RawData,

    #[error("cannot allocate more than 256 colors")]
    CapacityExceeded,

    #[error("unknown color specifier: {0:?}")]
    UnknownColorSpecifier(Vec<u8>),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("unknown color: {0:?}")]
    UnknownColor(String),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("value error: {0}")]
    Value(String),

    #[error("unsupported raw mode: {0:?}")]
    UnsupportedRawMode(String),

    #[error("cannot load palette ({})", .attempts.join("; "))]
    CannotLoad { attempts: Vec<String> },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PaletteError {
    /// Whether a loader failed on the file contents, as opposed to I/O.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, PaletteError::Syntax(_) | PaletteError::Value(_))
    }
}

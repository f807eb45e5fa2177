use std::path::PathBuf;

pub type ScResult<T> = Result<T, ScError>;

#[derive(Debug, thiserror::Error)]
pub enum ScError {
    #[error("[Concurrent Error] {0}")]
    ConcurrentError(#[from] ::tokio::task::JoinError),

    #[error("[CSV Error] {0}")]
    CsvError(#[from] ::csv::Error),

    #[error("[Invalid] {message}")]
    Invalid { code: &'static str, message: String },

    #[error("[IO Error] {0}")]
    IoError(#[from] std::io::Error),

    #[error("[Lock Error] {0}")]
    LockError(String),

    #[error("[No Data] {message}")]
    NoData { code: &'static str, message: String },

    #[error("[Not Exists] {message}")]
    NotExists { code: &'static str, message: String },

    #[error("[Parse Config Error] {0}")]
    ParseConfigError(#[from] ::confy::ConfyError),

    #[error("[Parse DataTime Error] {0}")]
    ParseDataTimeError(#[from] chrono::ParseError),

    #[error("[Parse Enum Error] {0}")]
    ParseEnumError(#[from] ::strum::ParseError),

    #[error("[Serde JSON Error] {0}")]
    SerdeJsonError(#[from] ::serde_json::Error),
}

impl From<std::sync::PoisonError<std::sync::RwLockReadGuard<'_, PathBuf>>> for ScError {
    fn from(err: std::sync::PoisonError<std::sync::RwLockReadGuard<'_, PathBuf>>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl ScError {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { code, .. } | Self::NoData { code, .. } | Self::NotExists { code, .. } => {
                Some(code)
            }
            _ => None,
        }
    }
}

use thiserror::Error;

/// Reasons a settings string could not be turned into a compression method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseMethodError {
    #[error("empty settings string")]
    Empty,

    #[error("settings string too short: {0:?}")]
    TooShort(String),

    #[error("unrecognised compression method: {0:?}")]
    UnknownKey(String),
}

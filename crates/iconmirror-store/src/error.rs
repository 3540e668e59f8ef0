#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] iconmirror_fs::Error),

    #[error("invalid asset extension {0:?}")]
    InvalidExtension(String),
}

pub type Result<T> = std::result::Result<T, Error>;

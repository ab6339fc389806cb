#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout option `{name}`: {value}")]
    InvalidOption { name: &'static str, value: String },

    #[error("layout produced a non-finite position for node `{id}`")]
    NonFinitePosition { id: String },

    #[error("internal layout error: {message}")]
    Internal { message: String },

    #[error("layout worker ended without producing a result")]
    WorkerLost,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("api error: {0}")]
    Api(#[from] komik_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

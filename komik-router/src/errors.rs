#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Api(#[from] komik_core::Error),

    #[error("loader aborted: {0}")]
    Aborted(String),
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;

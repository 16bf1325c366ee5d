#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{context}: unexpected status {status}")]
    Status {
        context: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{0}: api returned unsuccessful")]
    Unsuccessful(&'static str),

    #[error("{0} not found")]
    NotFound(String),

    #[error("error decoding {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("url parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("base url {0} cannot carry path segments")]
    BaseUrl(String),
}

impl Error {
    /// Network unreachable or a non-success status code.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

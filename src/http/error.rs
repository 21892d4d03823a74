use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Used by transports that are not backed by reqwest (e.g. the fake transport)
    #[error("Connection failed: {0}")]
    Connection(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// The transport failed before any response was received (offline, DNS, connection reset)
    #[error(transparent)]
    Network(#[from] TransportError),

    /// The API answered with a non 2xx status. `message` is the response body, or the fallback
    /// message when the body is empty
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The API answered with a 2xx status but the body is not the expected JSON
    #[error("Unable to decode response body: {0}")]
    Decode(serde_json::Error),

    #[error("Unable to encode request body: {0}")]
    Encode(serde_json::Error),

    #[error("Unable to build HTTP transport: {0}")]
    Build(TransportError),
}

impl ClientError {
    /// Status code of an API error, `None` for every other kind of failure
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Network(_)
            | ClientError::Decode(_)
            | ClientError::Encode(_)
            | ClientError::Build(_) => None,
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Neither a redirect nor a JSON body; usually an expired session answered with HTML.
    #[error("not signed in or the server returned a non-JSON response")]
    UnexpectedResponse,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

use thiserror::Error;

/// Errors shared by the picofaas client and server.
///
/// The client-facing taxonomy is deliberately small: transport failures
/// propagate as [`FaasError::Transport`], a non-200 status becomes
/// [`FaasError::Http`] whose message embeds the raw response body text, and
/// a 200 response without a usable `result` field becomes
/// [`FaasError::MalformedResponse`]. There is no retry or recovery; every
/// failure is terminal for that call.
#[derive(Error, Debug)]
pub enum FaasError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("function not found: {0}")]
    FunctionNotFound(String),

    #[error("no such route: {0}")]
    RouteNotFound(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("execution error: {0}")]
    Execution(String),
}

pub type Result<T> = std::result::Result<T, FaasError>;

//! Client error types for the lockd SDK

/// Error type for lockd HTTP client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered 409: a different owner holds a live lease.
    /// Retrying with backoff is a caller policy decision; the message
    /// carries the server's remaining-time diagnostic.
    #[error("lock is already held: {0}")]
    AlreadyLocked(String),

    /// The server refused a release because the lock belongs to a
    /// different owner. The table was left unmodified.
    #[error("wrong owner: {0}")]
    WrongOwner(String),

    /// The server rejected the request with 400 for a missing or
    /// malformed field.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The call to the server could not complete at all.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: status code {status}, contents: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// True when the failure means another owner holds the lock, as
    /// opposed to a transport or protocol problem.
    pub fn is_already_locked(&self) -> bool {
        matches!(self, ClientError::AlreadyLocked(_))
    }
}

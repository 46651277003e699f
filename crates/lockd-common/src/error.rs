//! Error types shared across lockd components.
//!
//! Denied acquires and wrong-owner releases are *not* errors: they are
//! ordinary outcomes of the lock manager and are modeled as enum variants
//! in `lockd-core`. Only conditions that reject a request before it
//! reaches the manager live here.

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum LockdError {
    /// A required field is absent or malformed. Detected at the boundary
    /// before any lock state is touched.
    #[error("{0}")]
    IllegalArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_argument_display() {
        let err = LockdError::IllegalArgument("lock name is required".to_string());
        assert_eq!(err.to_string(), "lock name is required");
    }
}

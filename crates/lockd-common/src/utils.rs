//! Small utilities shared across lockd components.

use std::process;

/// Owner identity for this process, formatted as `hostname:pid`.
///
/// This is the default owner token client-mode sends with acquire and
/// release requests. Two processes on the same host get distinct owners
/// through the pid; two hosts get distinct owners through the hostname.
pub fn local_owner() -> String {
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string());
    format!("{}:{}", host, process::id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_owner_format() {
        let owner = local_owner();
        let (host, pid) = owner.rsplit_once(':').expect("owner should be host:pid");
        assert!(!host.is_empty());
        assert_eq!(pid, process::id().to_string());
    }

    #[test]
    fn test_local_owner_stable_within_process() {
        assert_eq!(local_owner(), local_owner());
    }
}

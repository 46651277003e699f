//! Lock API handlers
//!
//! Implements the three wire operations:
//! - GET /acquire-lock?name=&owner=&timeout= - acquire or renew a lease
//! - GET /release-lock?name=&owner= - release a held lease
//! - GET / - list active locks, sorted by name
//!
//! Responses are plain text. Field validation happens here, before the
//! lock manager is touched; the manager's outcomes map to 200/409/400.

use std::fmt::Write as _;
use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, web};
use lockd_common::LockdError;
use lockd_core::{AcquireOutcome, ReleaseOutcome};
use serde::Deserialize;

use crate::model::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct AcquireParam {
    name: Option<String>,
    owner: Option<String>,
    timeout: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseParam {
    name: Option<String>,
    owner: Option<String>,
}

fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, LockdError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(LockdError::IllegalArgument(message.to_string())),
    }
}

fn parse_timeout(value: &Option<String>) -> Result<Duration, LockdError> {
    let raw = required(value, "timeout in seconds is required")?;
    let secs: i64 = raw
        .parse()
        .map_err(|_| LockdError::IllegalArgument("timeout must be an integer".to_string()))?;
    if secs < 0 {
        return Err(LockdError::IllegalArgument(
            "timeout must not be negative".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs as u64))
}

/// Remaining lease time in whole seconds, rounded up so a live lease
/// never reports `0s`.
fn remaining_secs(remaining: Duration) -> u64 {
    let secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 { secs + 1 } else { secs }
}

/// Acquire or renew a named lock.
#[get("/acquire-lock")]
pub async fn acquire(
    data: web::Data<AppState>,
    params: web::Query<AcquireParam>,
) -> impl Responder {
    let name = match required(&params.name, "lock name is required") {
        Ok(v) => v,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };
    let owner = match required(&params.owner, "lock owner is required") {
        Ok(v) => v,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };
    let lease = match parse_timeout(&params.timeout) {
        Ok(v) => v,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    match data.lock_manager.try_acquire(name, owner, lease) {
        AcquireOutcome::Granted => {
            tracing::info!(name, owner, lease_secs = lease.as_secs(), "lock granted");
            HttpResponse::Ok().body("Success")
        }
        AcquireOutcome::Denied { remaining } => {
            let left = remaining_secs(remaining);
            tracing::info!(name, owner, remaining_secs = left, "lock denied, already active");
            HttpResponse::Conflict().body(format!("lock is already active, {}s left", left))
        }
    }
}

/// Release a named lock held by the requesting owner.
#[get("/release-lock")]
pub async fn release(
    data: web::Data<AppState>,
    params: web::Query<ReleaseParam>,
) -> impl Responder {
    let name = match required(&params.name, "lock name is required") {
        Ok(v) => v,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };
    let owner = match required(&params.owner, "lock owner is required") {
        Ok(v) => v,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    match data.lock_manager.release(name, owner) {
        ReleaseOutcome::Released => {
            tracing::info!(name, owner, "lock released");
            HttpResponse::Ok().body("Success releasing lock")
        }
        ReleaseOutcome::Forbidden { owner: holder } => {
            tracing::info!(name, owner, holder = %holder, "release refused, wrong owner");
            HttpResponse::BadRequest().body(format!("lock has another owner {:?}", holder))
        }
    }
}

/// List all active locks, one per line, sorted by name.
#[get("/")]
pub async fn list(data: web::Data<AppState>) -> impl Responder {
    let mut body = String::new();
    for lock in data.lock_manager.list_active() {
        let _ = writeln!(
            body,
            "{}: owner={:?}, expires in {}s",
            lock.name,
            lock.owner,
            remaining_secs(lock.remaining)
        );
    }
    HttpResponse::Ok().body(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_missing_and_empty() {
        assert!(required(&None, "missing").is_err());
        assert!(required(&Some(String::new()), "missing").is_err());
        assert_eq!(required(&Some("x".to_string()), "missing").unwrap(), "x");
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(
            parse_timeout(&Some("60".to_string())).unwrap(),
            Duration::from_secs(60)
        );
        assert_eq!(parse_timeout(&Some("0".to_string())).unwrap(), Duration::ZERO);

        assert!(parse_timeout(&None).is_err());
        assert!(parse_timeout(&Some("abc".to_string())).is_err());
        assert!(parse_timeout(&Some("1.5".to_string())).is_err());
        assert!(parse_timeout(&Some("-1".to_string())).is_err());
    }

    #[test]
    fn test_remaining_secs_rounds_up() {
        assert_eq!(remaining_secs(Duration::from_secs(60)), 60);
        assert_eq!(remaining_secs(Duration::from_millis(59_200)), 60);
        assert_eq!(remaining_secs(Duration::from_millis(400)), 1);
        assert_eq!(remaining_secs(Duration::ZERO), 0);
    }
}

//! API error types and mapping into the core taxonomy.

use luxe_core::BackendError;

/// Transport-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<ApiError> for BackendError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(e) => BackendError::Network(e.to_string()),
        }
    }
}

/// Best-effort extraction of a human-readable message from a GoTrue or
/// PostgREST error body. The services disagree on the field name.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["msg", "message", "error_description", "error"] {
        if let Some(s) = value.get(key).and_then(|v| v.as_str()) {
            if !s.is_empty() {
                return Some(s.to_string());
            }
        }
    }
    None
}

/// Map a non-success HTTP response into the core error taxonomy.
///
/// A 400 carrying the GoTrue invalid-grant body is the one case callers
/// branch on; everything else is carried through with its status and
/// message for display.
pub(crate) fn error_from_response(status: u16, body: &str) -> BackendError {
    let message = error_message(body).unwrap_or_else(|| format!("HTTP {status}"));

    match status {
        400 if message.contains("Invalid login credentials")
            || message.contains("invalid_grant") =>
        {
            BackendError::InvalidCredentials { message }
        }
        422 => BackendError::Validation { message },
        429 => BackendError::RateLimited,
        _ => BackendError::Remote { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_grant_maps_to_invalid_credentials() {
        let err = error_from_response(400, r#"{"error_description":"Invalid login credentials"}"#);
        assert!(err.is_invalid_credentials());

        let err = error_from_response(400, r#"{"error":"invalid_grant"}"#);
        assert!(err.is_invalid_credentials());
    }

    #[test]
    fn other_bad_requests_stay_remote_errors() {
        let err = error_from_response(400, r#"{"msg":"Signups not allowed for this instance"}"#);
        assert!(matches!(err, BackendError::Remote { status: 400, .. }));
    }

    #[test]
    fn validation_and_rate_limit_statuses() {
        let err = error_from_response(422, r#"{"msg":"Password should be at least 6 characters"}"#);
        assert!(matches!(err, BackendError::Validation { .. }));

        let err = error_from_response(429, "{}");
        assert!(matches!(err, BackendError::RateLimited));
    }

    #[test]
    fn unreadable_body_falls_back_to_status() {
        let err = error_from_response(502, "<html>bad gateway</html>");
        match err {
            BackendError::Remote { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "HTTP 502");
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }
}

//! Error handlers
//!
//! Maps handler errors onto control protocol replies.

use crate::error::types::HandlerError;
use log::warn;

/// Reply code reported to the client for a handler error
pub fn error_to_reply_code(err: &HandlerError) -> u16 {
    match err {
        HandlerError::StoreQueryFailed(_) => 451,
        HandlerError::Unsupported(_) => 502,
        HandlerError::PermissionDenied(_) => 550,
        HandlerError::StatUnavailable(_) => 550,
    }
}

/// Short reply text for a handler error. Store internals are not echoed back.
pub fn error_reply_text(err: &HandlerError) -> &'static str {
    match err {
        HandlerError::StoreQueryFailed(_) => "Requested action aborted: listing failed",
        HandlerError::Unsupported(_) => "Command not implemented",
        HandlerError::PermissionDenied(_) => "Permission denied",
        HandlerError::StatUnavailable(_) => "Requested action not taken: lookup failed",
    }
}

/// Log a handler error and render the full reply line
pub fn handle_error(err: &HandlerError) -> String {
    warn!("Request failed: {}", err);
    format!("{} {}\r\n", error_to_reply_code(err), error_reply_text(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn test_reply_codes() {
        let err = HandlerError::StoreQueryFailed(StoreError::Query("timeout".into()));
        assert_eq!(error_to_reply_code(&err), 451);
        assert_eq!(
            error_to_reply_code(&HandlerError::Unsupported("read".into())),
            502
        );
        assert_eq!(
            error_to_reply_code(&HandlerError::PermissionDenied("a.txt".into())),
            550
        );
        assert_eq!(
            error_to_reply_code(&HandlerError::StatUnavailable("/".into())),
            550
        );
    }

    #[test]
    fn test_reply_does_not_leak_store_detail() {
        let err = HandlerError::StoreQueryFailed(StoreError::Query("secret-endpoint".into()));
        let reply = handle_error(&err);
        assert!(reply.starts_with("451 "));
        assert!(reply.ends_with("\r\n"));
        assert!(!reply.contains("secret-endpoint"));
    }
}

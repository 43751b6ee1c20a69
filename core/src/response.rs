//! Interpreting responses from the accounts API.

use tracing::debug;

use crate::error::ApiError;
use crate::types::{Account, Envelope};

/// Outcome of one client call.
///
/// `success` compares the received status against the one the operation
/// expects. A mismatch is reported here, not as an `ApiError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientResponse {
    pub account: Option<Account>,
    pub status_code: u16,
    pub success: bool,
}

impl ClientResponse {
    pub fn success(status_code: u16, account: Option<Account>) -> Self {
        Self {
            account,
            status_code,
            success: true,
        }
    }

    pub fn failure(status_code: u16) -> Self {
        Self {
            account: None,
            status_code,
            success: false,
        }
    }
}

pub fn classify_outcome(expected: u16, actual: u16) -> bool {
    actual == expected
}

/// Decodes an envelope-wrapped account. With `log_body` set the raw body is
/// logged first.
pub fn decode_account(body: &str, log_body: bool) -> Result<Account, ApiError> {
    if log_body {
        debug!(body = body, "received raw account body");
    }
    let account = Envelope::<Account>::decode(body)?.into_inner();
    debug!(id = %account.id, "decoded account");
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_requires_exact_match() {
        assert!(classify_outcome(201, 201));
        assert!(!classify_outcome(201, 200));
        assert!(!classify_outcome(204, 200));
        assert!(!classify_outcome(200, 404));
    }

    #[test]
    fn decodes_wrapped_account() {
        let body = r#"{"data":{"id":"456e4567-e89b-12d3-a456-426614174100","organisation_id":"456e4567-e89b-12d3-a456-426614174100","type":"accounts"}}"#;
        for log_body in [false, true] {
            let account = decode_account(body, log_body).unwrap();
            assert_eq!(account.id, "456e4567-e89b-12d3-a456-426614174100");
            assert_eq!(account.attributes, None);
        }
    }

    #[test]
    fn empty_body_is_a_decode_error() {
        let err = decode_account("", false).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn failure_has_no_account() {
        let response = ClientResponse::failure(409);
        assert!(!response.success);
        assert_eq!(response.status_code, 409);
        assert!(response.account.is_none());
    }
}

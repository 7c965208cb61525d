pub mod failure;
pub mod mapping;

use failure::Failure;

/// Application-level category of a failed remote call.
///
/// UI state matches on this instead of raw transport errors or status codes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorStatus {
    ErrorConnection,
    Timeout,
    AuthorizationOnAnother,
    Unauthorized,
    Attention,
    BadResponse,
    NotFound,
    TooManyRequests,
    HttpOther,
    Other,
}

impl ErrorStatus {
    /// Session is no longer valid and the user has to sign in again.
    pub fn requires_reauth(self) -> bool {
        matches!(self, Self::AuthorizationOnAnother | Self::Unauthorized)
    }

    /// No response was obtained; repeating the same call may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::ErrorConnection | Self::Timeout)
    }
}

/// Maps a failure onto exactly one [`ErrorStatus`].
///
/// First match wins: host resolution, timeout, HTTP response, generic I/O, then
/// everything else. An HTTP response is always checked before the I/O fallback.
pub fn classify(failure: &Failure) -> ErrorStatus {
    match failure {
        Failure::HostResolution(_) => ErrorStatus::ErrorConnection,
        Failure::Timeout(_) => ErrorStatus::Timeout,
        Failure::Http(http) => mapping::status_for_http_code(http.status),
        Failure::Io(_) => ErrorStatus::ErrorConnection,
        Failure::Other(_) => ErrorStatus::Other,
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use bytes::Bytes;
    use strum::IntoEnumIterator;

    use super::failure::{Failure, HttpFailure};
    use super::{ErrorStatus, classify};

    fn http(status: u16) -> Failure {
        Failure::Http(HttpFailure {
            status,
            body: Bytes::new(),
        })
    }

    fn sample_failures() -> Vec<Failure> {
        vec![
            Failure::HostResolution("dns error: no such host".into()),
            Failure::Timeout("operation timed out".into()),
            http(401),
            http(418),
            Failure::Io(io::Error::from(io::ErrorKind::ConnectionReset).into()),
            Failure::Other("unexpected".into()),
        ]
    }

    #[test]
    fn status_string_roundtrip() {
        assert_eq!(ErrorStatus::ErrorConnection.to_string(), "ERROR_CONNECTION");
        assert_eq!(
            ErrorStatus::AuthorizationOnAnother.as_ref(),
            "AUTHORIZATION_ON_ANOTHER"
        );
        for status in ErrorStatus::iter() {
            assert_eq!(status.to_string().parse::<ErrorStatus>().ok(), Some(status));
        }
        assert_eq!("NOPE".parse::<ErrorStatus>().ok(), None);
    }

    #[test]
    fn status_serializes_with_wire_names() {
        let json = serde_json::to_string(&ErrorStatus::TooManyRequests).ok();
        assert_eq!(json.as_deref(), Some("\"TOO_MANY_REQUESTS\""));
    }

    #[test]
    fn transport_failures_classify_before_http() {
        assert_eq!(
            classify(&Failure::HostResolution("lookup".into())),
            ErrorStatus::ErrorConnection
        );
        assert_eq!(
            classify(&Failure::Timeout("read".into())),
            ErrorStatus::Timeout
        );
        assert_eq!(
            classify(&Failure::Io("broken pipe".into())),
            ErrorStatus::ErrorConnection
        );
        assert_eq!(classify(&Failure::Other("?".into())), ErrorStatus::Other);
    }

    #[test]
    fn http_failures_dispatch_on_status_code() {
        assert_eq!(classify(&http(401)), ErrorStatus::AuthorizationOnAnother);
        assert_eq!(classify(&http(404)), ErrorStatus::NotFound);
        assert_eq!(classify(&http(500)), ErrorStatus::HttpOther);
    }

    #[test]
    fn classification_is_idempotent() {
        for failure in sample_failures() {
            assert_eq!(classify(&failure), classify(&failure));
        }
    }

    #[test]
    fn reauth_and_retry_partition() {
        let reauth: Vec<_> = ErrorStatus::iter().filter(|s| s.requires_reauth()).collect();
        assert_eq!(
            reauth,
            vec![ErrorStatus::AuthorizationOnAnother, ErrorStatus::Unauthorized]
        );
        let retry: Vec<_> = ErrorStatus::iter().filter(|s| s.is_retryable()).collect();
        assert_eq!(retry, vec![ErrorStatus::ErrorConnection, ErrorStatus::Timeout]);
        assert!(ErrorStatus::iter().all(|s| !(s.requires_reauth() && s.is_retryable())));
    }
}

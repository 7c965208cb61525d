use std::error::Error as StdError;
use std::io;

use bytes::Bytes;

use crate::classify::{ErrorStatus, classify};

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Substrings the resolvers behind hyper and std report on a failed lookup.
const DNS_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
    "temporary failure in name resolution",
];

/// A response that arrived but whose status code rejects the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("server responded with HTTP {status}")]
pub struct HttpFailure {
    pub status: u16,
    /// Raw error body; empty when the server sent none or it could not be read.
    pub body: Bytes,
}

impl HttpFailure {
    /// Captures the status and drains the body of a rejecting response.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(status, error = %err, "failed to read error body");
                Bytes::new()
            }
        };
        Self { status, body }
    }
}

/// Everything a remote call can fail with, reduced to the shapes classification
/// cares about.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error("host resolution failed: {0}")]
    HostResolution(#[source] BoxError),

    #[error("timed out: {0}")]
    Timeout(#[source] BoxError),

    #[error(transparent)]
    Http(#[from] HttpFailure),

    #[error("connection error: {0}")]
    Io(#[source] BoxError),

    #[error("{0}")]
    Other(#[source] BoxError),
}

impl Failure {
    pub fn other(err: impl Into<BoxError>) -> Self {
        Self::Other(err.into())
    }

    pub fn status(&self) -> ErrorStatus {
        classify(self)
    }

    pub fn http_code(&self) -> Option<u16> {
        match self {
            Self::Http(http) => Some(http.status),
            _ => None,
        }
    }

    pub fn error_body(&self) -> Option<&[u8]> {
        match self {
            Self::Http(http) if !http.body.is_empty() => Some(&http.body[..]),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() && is_dns_failure(&err) {
            return Self::HostResolution(Box::new(err));
        }
        if err.is_timeout() {
            return Self::Timeout(Box::new(err));
        }
        // A status error is an I/O error too; the response wins.
        if err.is_status()
            && let Some(status) = err.status()
        {
            return Self::Http(HttpFailure {
                status: status.as_u16(),
                body: Bytes::new(),
            });
        }
        if err.is_connect() || err.is_request() || err.is_body() {
            return Self::Io(Box::new(err));
        }
        Self::Other(Box::new(err))
    }
}

impl From<io::Error> for Failure {
    fn from(err: io::Error) -> Self {
        if is_dns_failure(&err) {
            return Self::HostResolution(Box::new(err));
        }
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Self::Timeout(Box::new(err)),
            _ => Self::Io(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<tokio::task::JoinError> for Failure {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Other(Box::new(err))
    }
}

/// Walks the source chain looking for a resolver failure.
pub fn is_dns_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        let text = e.to_string().to_ascii_lowercase();
        if DNS_MARKERS.iter().any(|marker| text.contains(marker)) {
            return true;
        }
        current = e.source();
    }
    false
}

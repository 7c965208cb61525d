pub mod decoder;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::classify::failure::Failure;
use crate::classify::{ErrorStatus, classify, mapping};
use crate::types::ApiErrorBody;
use decoder::{ErrorBodyDecoder, JsonBodyDecoder};

/// Uniform error returned by every call made through [`SafeCaller`].
///
/// Built once per failure and never mutated. The original failure is kept for
/// logging and as the [`std::error::Error::source`] of this error.
#[derive(Debug, thiserror::Error)]
#[error("{status}: {cause}")]
pub struct CommonError<B = ApiErrorBody> {
    #[source]
    cause: Failure,
    status: ErrorStatus,
    http_code: Option<u16>,
    body: Option<B>,
}

impl<B> CommonError<B> {
    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    pub fn http_code(&self) -> Option<u16> {
        self.http_code
    }

    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    pub fn cause(&self) -> &Failure {
        &self.cause
    }

    pub fn into_cause(self) -> Failure {
        self.cause
    }

    pub fn into_body(self) -> Option<B> {
        self.body
    }
}

impl CommonError<ApiErrorBody> {
    /// Server-supplied message when present, otherwise the default text for the status.
    pub fn display_message(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|body| body.message.as_deref())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| mapping::default_message(self.status))
    }
}

/// Runs remote work and converts any failure into a classified [`CommonError`].
///
/// Holds the error-body decoder so it is built once and shared by every call.
/// Nothing is retried here; retry policy belongs to the caller.
pub struct SafeCaller<D = JsonBodyDecoder> {
    decoder: Arc<D>,
}

impl<D> Clone for SafeCaller<D> {
    fn clone(&self) -> Self {
        Self {
            decoder: Arc::clone(&self.decoder),
        }
    }
}

impl<D: Default> Default for SafeCaller<D> {
    fn default() -> Self {
        Self {
            decoder: Arc::new(D::default()),
        }
    }
}

impl<D> fmt::Debug for SafeCaller<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeCaller")
            .field("decoder", &std::any::type_name::<D>())
            .finish()
    }
}

impl<D: ErrorBodyDecoder> SafeCaller<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder: Arc::new(decoder),
        }
    }

    /// Awaits `work` on the current runtime.
    ///
    /// Dropping the returned future abandons `work` without producing an error.
    pub async fn run<T, E, F, Fut>(&self, work: F) -> Result<T, CommonError<D::Body>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Failure>,
    {
        work().await.map_err(|err| self.convert(err.into()))
    }

    /// Runs blocking `work` on the blocking thread pool.
    ///
    /// A panic inside `work` is classified as [`ErrorStatus::Other`].
    pub async fn run_blocking<T, E, F>(&self, work: F) -> Result<T, CommonError<D::Body>>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<Failure> + Send + 'static,
    {
        match tokio::task::spawn_blocking(work).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(self.convert(err.into())),
            Err(join) => Err(self.convert(Failure::from(join))),
        }
    }

    /// Logs, classifies and wraps a failure. Body decoding is best-effort.
    pub fn convert(&self, failure: Failure) -> CommonError<D::Body> {
        let status = classify(&failure);
        let http_code = failure.http_code();
        tracing::error!(%status, ?http_code, error = %failure, "remote call failed");

        let body = failure
            .error_body()
            .and_then(|raw| match self.decoder.decode(raw) {
                Ok(body) => Some(body),
                Err(err) => {
                    tracing::debug!(%status, error = %err, "discarding undecodable error body");
                    None
                }
            });

        CommonError {
            cause: failure,
            status,
            http_code,
            body,
        }
    }
}

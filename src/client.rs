use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::call::{CommonError, SafeCaller};
use crate::classify::failure::{Failure, HttpFailure};
use crate::error::Error;
use crate::types::ApiResult;

/// Configuration for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the intercom API; request paths are joined onto it.
    pub base_url: String,

    /// Connection establishment timeout (default: 10s)
    pub connect_timeout: Duration,

    /// Total request timeout (default: 30s)
    pub request_timeout: Duration,

    /// Idle timeout for pooled connections (default: 90s)
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host (default: 10)
    pub pool_max_idle_per_host: usize,

    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// JSON client for the intercom API. Every call goes through a [`SafeCaller`],
/// so every error comes back as a classified [`CommonError`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    caller: SafeCaller,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| Error::InvalidUrl {
            reason: format!("{}: {e}", config.base_url),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                reason: format!("{} cannot be a base url", config.base_url),
            });
        }
        // Url::join drops the last segment unless the path ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: None,
            caller: SafeCaller::default(),
        })
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CommonError> {
        self.caller
            .run(|| async {
                let request = self.http.get(self.endpoint(path)?);
                let bytes = self.send(request).await?;
                Ok::<_, Failure>(serde_json::from_slice(&bytes)?)
            })
            .await
    }

    /// Unwraps the `data` field of the API envelope.
    pub async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, CommonError> {
        let envelope: ApiResult<T> = self.get(path).await?;
        Ok(envelope.data)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, CommonError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.caller
            .run(|| async {
                let request = self.http.post(self.endpoint(path)?).json(body);
                let bytes = self.send(request).await?;
                Ok::<_, Failure>(serde_json::from_slice(&bytes)?)
            })
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<(), CommonError> {
        self.caller
            .run(|| async {
                let request = self.http.delete(self.endpoint(path)?);
                self.send(request).await.map(drop)
            })
            .await
    }

    fn endpoint(&self, path: &str) -> Result<Url, Failure> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(Failure::other)
    }

    /// Sends the request and returns the body of a successful response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<bytes::Bytes, Failure> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(HttpFailure::from_response(response).await.into());
        }
        Ok(response.bytes().await?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authorized", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

/// Error envelope returned by the intercom API alongside a rejecting status code.
///
/// Every field is optional: the server omits whatever it has nothing to say about,
/// and some proxies answer with a bare `{"message": ".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub struct ApiErrorBody {
    /// Application-level error code, usually mirroring the HTTP status.
    #[serde(default)]
    pub code: Option<i64>,
    /// Short machine-readable error name (e.g. `"Not Found"`).
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable message suitable for display.
    #[serde(default)]
    pub message: Option<String>,
}

/// Success envelope wrapping every payload the intercom API returns.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ApiResult<T> {
    pub code: Option<i64>,
    pub name: Option<String>,
    pub message: Option<String>,
    /// The payload itself; absent when the server has nothing to return.
    pub data: Option<T>,
}

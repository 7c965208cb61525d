#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid url: {reason}")]
    InvalidUrl { reason: String },

    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

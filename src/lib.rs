#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod call;
pub mod classify;
pub mod client;
pub mod error;
pub mod types;

pub use call::decoder::{ErrorBodyDecoder, JsonBodyDecoder};
pub use call::{CommonError, SafeCaller};
pub use classify::failure::{BoxError, Failure, HttpFailure, is_dns_failure};
pub use classify::mapping::{default_message, status_for_http_code};
pub use classify::{ErrorStatus, classify};
pub use client::{ApiClient, ClientConfig};
pub use error::Error;
pub use types::{ApiErrorBody, ApiResult};

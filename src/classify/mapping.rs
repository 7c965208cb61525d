use crate::classify::ErrorStatus;

/// Canonical mapping from a rejecting HTTP status code to [`ErrorStatus`].
///
/// 401 means the session was taken over by another device, which the UI treats
/// differently from the 406/410/424 family of plain authorization failures.
pub fn status_for_http_code(code: u16) -> ErrorStatus {
    match code {
        401 => ErrorStatus::AuthorizationOnAnother,
        406 | 410 | 424 => ErrorStatus::Unauthorized,
        425 => ErrorStatus::Attention,
        400 | 422 => ErrorStatus::BadResponse,
        404 => ErrorStatus::NotFound,
        429 => ErrorStatus::TooManyRequests,
        _ => ErrorStatus::HttpOther,
    }
}

/// Fallback user-facing text for a status, used when the server sent no message.
pub fn default_message(status: ErrorStatus) -> &'static str {
    match status {
        ErrorStatus::ErrorConnection => "No connection to the server",
        ErrorStatus::Timeout => "The server took too long to respond",
        ErrorStatus::AuthorizationOnAnother => "This account was signed in on another device",
        ErrorStatus::Unauthorized => "Authorization required",
        ErrorStatus::Attention => "Attention required",
        ErrorStatus::BadResponse => "The request was rejected by the server",
        ErrorStatus::NotFound => "Not found",
        ErrorStatus::TooManyRequests => "Too many requests, try again later",
        ErrorStatus::HttpOther => "Server error",
        ErrorStatus::Other => "Something went wrong",
    }
}

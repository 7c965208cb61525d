use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::types::ApiErrorBody;

/// Turns the raw body of a rejected response into a structured payload.
///
/// One decoder is built up front and shared by every call made through a
/// [`SafeCaller`](crate::call::SafeCaller).
pub trait ErrorBodyDecoder: Send + Sync {
    type Body;

    fn decode(&self, body: &[u8]) -> Result<Self::Body, Error>;
}

/// JSON decoder backed by `serde_json`.
pub struct JsonBodyDecoder<B = ApiErrorBody> {
    _body: PhantomData<fn() -> B>,
}

impl<B> JsonBodyDecoder<B> {
    pub fn new() -> Self {
        Self { _body: PhantomData }
    }
}

impl<B> Default for JsonBodyDecoder<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for JsonBodyDecoder<B> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<B> fmt::Debug for JsonBodyDecoder<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonBodyDecoder")
            .field("body", &std::any::type_name::<B>())
            .finish()
    }
}

impl<B: DeserializeOwned> ErrorBodyDecoder for JsonBodyDecoder<B> {
    type Body = B;

    fn decode(&self, body: &[u8]) -> Result<B, Error> {
        Ok(serde_json::from_slice(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Rejection {
        reason: String,
    }

    #[test]
    fn decodes_default_error_envelope() {
        let decoder = JsonBodyDecoder::<ApiErrorBody>::new();
        let body = decoder
            .decode(br#"{"code":404,"name":"Not Found","message":"not found"}"#)
            .ok();
        assert_eq!(
            body,
            Some(ApiErrorBody {
                code: Some(404),
                name: Some("Not Found".to_string()),
                message: Some("not found".to_string()),
            })
        );
    }

    #[test]
    fn decodes_application_defined_shapes() {
        let decoder = JsonBodyDecoder::<Rejection>::default();
        let body = decoder.decode(br#"{"reason":"flat not linked"}"#).ok();
        assert_eq!(
            body,
            Some(Rejection {
                reason: "flat not linked".to_string()
            })
        );
    }

    #[test]
    fn malformed_bodies_are_reported_as_json_errors() {
        let decoder = JsonBodyDecoder::<ApiErrorBody>::new();
        assert!(matches!(decoder.decode(b"<html>502</html>"), Err(Error::Json(_))));
        assert!(matches!(decoder.decode(b""), Err(Error::Json(_))));
    }
}

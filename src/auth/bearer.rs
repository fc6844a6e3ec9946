use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};

/// Bearer token taken from the incoming request and forwarded untouched to
/// the backend. The backend alone decides whether it is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerToken(Option<String>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        BearerToken(Some(token.into()))
    }

    pub fn anonymous() -> Self {
        BearerToken(None)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Parse an `Authorization` header value. Anything but a non-empty
    /// `Bearer` credential is treated as absent.
    pub fn from_header(value: &str) -> Self {
        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());
        BearerToken(token.map(String::from))
    }
}

impl FromRequest for BearerToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(BearerToken::from_header)
            .unwrap_or_default();
        ready(Ok(token))
    }
}

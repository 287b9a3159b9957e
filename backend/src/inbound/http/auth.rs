//! Bearer-token extraction for HTTP handlers.
//!
//! Concentrates credential plumbing here so handlers only see a validated
//! token string. Verification itself happens behind the
//! [`IdTokenVerifier`](crate::domain::ports::IdTokenVerifier) port.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Raw bearer token lifted from the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Access the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn extract_bearer(req: &HttpRequest) -> Result<BearerToken, Error> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing authorization header"))?;
    let raw = header_value
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid ASCII"))?;
    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))?;
    if token.is_empty() {
        return Err(Error::unauthorized("bearer token is empty"));
    }
    Ok(BearerToken(token.to_owned()))
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_bearer(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[test]
    fn extracts_token_from_bearer_header() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        let token = extract_bearer(&req).expect("bearer header present");
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    #[rstest]
    #[case::basic_scheme("Basic dXNlcjpwYXNz")]
    #[case::lowercase_scheme("bearer abc")]
    #[case::bare_token("abc.def.ghi")]
    #[case::empty_token("Bearer ")]
    fn rejects_non_bearer_headers(#[case] value: &str) {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, value))
            .to_http_request();
        let error = extract_bearer(&req).expect_err("should reject");
        assert_eq!(error.code(), crate::domain::ErrorCode::Unauthorized);
    }

    #[test]
    fn rejects_missing_header() {
        let req = TestRequest::default().to_http_request();
        let error = extract_bearer(&req).expect_err("should reject");
        assert_eq!(error.code(), crate::domain::ErrorCode::Unauthorized);
    }
}

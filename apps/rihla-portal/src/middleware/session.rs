//! Session cookie extractor.

use std::convert::Infallible;
use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use rihla_core::auth::AUTH_TOKEN_KEY;

/// The request's auth cookie, if any. Extraction never fails; a missing or
/// empty cookie is simply `None`.
#[derive(Debug, Clone, Default)]
pub struct SessionCookie(pub Option<String>);

impl SessionCookie {
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for SessionCookie {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = req
            .cookie(AUTH_TOKEN_KEY)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty());
        ready(Ok(SessionCookie(token)))
    }
}

//! Body extractor accepting JSON or URL-encoded form payloads.
//!
//! The landing page posts HTML forms while API clients send JSON; both reach
//! handlers as the same DTO. Extraction failures become `invalid_request`
//! errors so clients always receive the JSON error body.

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::Error;
use crate::inbound::http::validation::invalid_body_error;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request body deserialised from JSON or `application/x-www-form-urlencoded`.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

impl<T> JsonOrForm<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn is_form(req: &HttpRequest) -> bool {
    req.content_type().eq_ignore_ascii_case(FORM_CONTENT_TYPE)
}

fn reject(kind: &'static str, error: &actix_web::Error) -> Error {
    debug!(%error, kind, "request body rejected");
    invalid_body_error(format!("request body is not a valid {kind} payload: {error}"))
}

impl<T> FromRequest for JsonOrForm<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_form(req) {
            let fut = web::Form::<T>::from_request(req, payload);
            Box::pin(async move {
                fut.await
                    .map(|form| Self(form.into_inner()))
                    .map_err(|err| reject("form", &err))
            })
        } else {
            let fut = web::Json::<T>::from_request(req, payload);
            Box::pin(async move {
                fut.await
                    .map(|json| Self(json.into_inner()))
                    .map_err(|err| reject("JSON", &err))
            })
        }
    }
}

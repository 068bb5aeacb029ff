//! HTTP adapter mapping for domain errors.
//!
//! Every failure leaves the service as a failed result envelope,
//! `{ "value": false, "message": ..., "data": <details or null> }`, with a
//! status code derived from the [`ErrorCode`].

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize)]
struct FailureEnvelope<'a> {
    value: bool,
    message: &'a str,
    data: Option<&'a Value>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(REDACTED_MESSAGE);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        let visible = redact_if_internal(self);
        builder.json(FailureEnvelope {
            value: false,
            message: visible.message(),
            data: visible.details(),
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

/// Rejection handler for `Json`, `Query` and `Path` extractors.
///
/// Turns deserialisation failures into `400` envelopes instead of Actix's
/// plain-text defaults.
pub fn extractor_rejection<E: std::fmt::Display>(
    source: &'static str,
) -> impl Fn(E, &HttpRequest) -> actix_web::Error + Send + Sync + 'static {
    move |err, _req| {
        Error::invalid_request(format!("invalid {source}: {err}"))
            .with_details(json!({ "source": source, "code": "malformed" }))
            .into()
    }
}

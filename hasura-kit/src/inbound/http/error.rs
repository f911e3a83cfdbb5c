//! HTTP adapter mapping for the Hasura error payload.
//!
//! Keeps [`Error`] transport agnostic while letting actix handlers turn
//! failures into the `{"message", "code"}` body Hasura expects, with a status
//! derived from the error code.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError};
use serde::Serialize;
use tracing::{error, warn};

use super::WebhookSettings;
use crate::domain::{Error, ErrorCode};

/// Convenient result alias for webhook handlers.
///
/// `Err` values are written verbatim by [`ResponseError`]; wrap the app in
/// [`super::RedactErrors`] to apply [`WebhookSettings::redact_internal_errors`].
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

/// Map an error code onto a response status.
///
/// Codes that are HTTP error statuses (`400..=599`) are used as is; no code,
/// or any other code, maps to `500 Internal Server Error`.
#[must_use]
pub fn status_for(code: Option<&ErrorCode>) -> StatusCode {
    code.and_then(ErrorCode::http_status)
        .and_then(|status| StatusCode::from_u16(status).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Capability that writes a JSON response with a given status.
pub trait ResponseWriter {
    /// What writing produces, e.g. an [`HttpResponse`].
    type Output;

    /// Write `body` as JSON with `status`.
    fn write_json<T: Serialize>(self, status: StatusCode, body: &T) -> Self::Output;
}

impl ResponseWriter for HttpResponseBuilder {
    type Output = HttpResponse;

    fn write_json<T: Serialize>(mut self, status: StatusCode, body: &T) -> Self::Output {
        self.status(status).json(body)
    }
}

/// Writes errors, optionally redacting server-side failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorResponder {
    redact_internal: bool,
}

impl ErrorResponder {
    /// Responder that writes every error verbatim.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            redact_internal: false,
        }
    }

    /// Responder configured from [`WebhookSettings`].
    #[must_use]
    pub const fn from_settings(settings: &WebhookSettings) -> Self {
        Self {
            redact_internal: settings.redact_internal_errors,
        }
    }

    /// Replace 5xx messages with a generic one, keeping the code.
    #[must_use]
    pub const fn redacting(mut self, redact: bool) -> Self {
        self.redact_internal = redact;
        self
    }

    /// The redacted copy of `error`, when this responder hides its message.
    ///
    /// Only errors mapping to a 5xx status are redacted; the code is kept.
    #[must_use]
    pub fn redact(&self, error: &Error) -> Option<Error> {
        (self.redact_internal && status_for(error.code()).is_server_error())
            .then(|| Error::new(REDACTED_MESSAGE, error.code().cloned()))
    }

    /// Write `error` with the status derived from its code.
    #[must_use]
    pub fn respond<W: ResponseWriter>(&self, writer: W, error: &Error) -> W::Output {
        let status = status_for(error.code());
        log_error(status, error);
        match self.redact(error) {
            Some(redacted) => writer.write_json(status, &redacted),
            None => writer.write_json(status, error),
        }
    }
}

/// Write `error` verbatim with the status derived from its code.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use actix_web::http::StatusCode;
/// use hasura_kit::domain::Error;
/// use hasura_kit::inbound::http::respond_with_error;
///
/// let response = respond_with_error(HttpResponse::Ok(), &Error::not_found("missing"));
/// assert_eq!(response.status(), StatusCode::NOT_FOUND);
/// ```
#[must_use]
pub fn respond_with_error<W: ResponseWriter>(writer: W, error: &Error) -> W::Output {
    ErrorResponder::new().respond(writer, error)
}

fn log_error(status: StatusCode, err: &Error) {
    let code = err.code().map(ToString::to_string);
    if status.is_server_error() {
        error!(status = status.as_u16(), code = ?code, error = %err, "webhook failed");
    } else {
        warn!(status = status.as_u16(), code = ?code, error = %err, "webhook rejected");
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        respond_with_error(HttpResponse::build(self.status_code()), self)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        let status = err.as_response_error().status_code();
        warn!(status = status.as_u16(), error = %err, "actix error promoted to webhook error");
        Self::from_error(Some(&err), Some(ErrorCode::Numeric(status.as_u16())))
    }
}

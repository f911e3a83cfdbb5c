//! Middleware applying [`WebhookSettings`] to handler errors.
//!
//! Handlers returning `Err(Error)` are rendered by [`actix_web::ResponseError`],
//! which has no access to application data. This middleware inspects the
//! finished response and, when the registered settings ask for it, rewrites
//! 5xx error bodies through [`ErrorResponder::redact`].

use std::task::{Context, Poll};

use actix_web::HttpResponse;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::web::Data;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use super::{ErrorResponder, ResponseWriter, WebhookSettings};
use crate::domain::Error;

/// Redacts 5xx handler errors when `redact_internal_errors` is set.
///
/// Reads `web::Data<WebhookSettings>`; without it, responses pass through.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use hasura_kit::inbound::http::{RedactErrors, WebhookSettings};
///
/// let settings = WebhookSettings {
///     redact_internal_errors: true,
///     ..WebhookSettings::defaults()
/// };
/// let _app = App::new()
///     .app_data(web::Data::new(settings))
///     .wrap(RedactErrors);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactErrors;

impl<S, B> Transform<S, ServiceRequest> for RedactErrors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RedactErrorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RedactErrorsMiddleware { service }))
    }
}

/// Service wrapper produced by [`RedactErrors`].
pub struct RedactErrorsMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RedactErrorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let responder = req
            .app_data::<Data<WebhookSettings>>()
            .map_or_else(ErrorResponder::new, |settings| {
                ErrorResponder::from_settings(settings)
            });
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            let redacted = res
                .response()
                .error()
                .and_then(actix_web::Error::as_error::<Error>)
                .and_then(|error| responder.redact(error));
            Ok(match redacted {
                Some(body) => {
                    let status = res.status();
                    debug!(status = status.as_u16(), "redacted handler error");
                    let response = HttpResponse::build(status).write_json(status, &body);
                    res.into_response(response).map_into_right_body()
                }
                None => res.map_into_left_body(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    //! Redaction middleware tests.

    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
    use actix_web::{App, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::ApiResult;

    async fn failing() -> ApiResult<HttpResponse> {
        Err(Error::internal("pool exhausted"))
    }

    async fn rejecting() -> ApiResult<HttpResponse> {
        Err(Error::bad_request("name is required"))
    }

    #[rstest]
    #[case::redacted_server_error(
        true,
        "/fail",
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error"
    )]
    #[case::verbatim_server_error(
        false,
        "/fail",
        StatusCode::INTERNAL_SERVER_ERROR,
        "pool exhausted"
    )]
    #[case::client_error_untouched(true, "/reject", StatusCode::BAD_REQUEST, "name is required")]
    #[actix_web::test]
    async fn handler_errors_follow_the_redaction_setting(
        #[case] redact: bool,
        #[case] uri: &str,
        #[case] expected_status: StatusCode,
        #[case] expected_message: &str,
    ) {
        let settings = WebhookSettings {
            redact_internal_errors: redact,
            ..WebhookSettings::defaults()
        };
        let app = init_service(
            App::new()
                .app_data(web::Data::new(settings))
                .wrap(RedactErrors)
                .route("/fail", web::get().to(failing))
                .route("/reject", web::get().to(rejecting)),
        )
        .await;

        let response = call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), expected_status);
        let body: Value = read_body_json(response).await;
        assert_eq!(body["message"], expected_message);
        assert_eq!(body["code"], json!(expected_status.as_u16().to_string()));
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_settings_leave_errors_untouched() {
        let app = init_service(
            App::new()
                .wrap(RedactErrors)
                .route("/fail", web::get().to(failing)),
        )
        .await;

        let response = call_service(&app, TestRequest::get().uri("/fail").to_request()).await;
        let body: Value = read_body_json(response).await;
        assert_eq!(body, json!({"message": "pool exhausted", "code": "500"}));
    }
}

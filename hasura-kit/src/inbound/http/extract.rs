//! Request extractors decoding Hasura webhook bodies.
//!
//! Each extractor buffers the body, applies the size limit from a registered
//! `web::Data<WebhookSettings>` (or the defaults) and rejects mismatching
//! bodies with a Hasura error (`413` when too large, `400` otherwise).

use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::web::{self, Data};
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{JsonBody, WebhookSettings};
use crate::domain::{Error, ErrorCode};
use crate::domain::envelope::{
    Action, ChangeEvent, Target, decode_action, decode_change_event, decode_scheduled_event,
};

/// Decoded action invocation.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use hasura_kit::inbound::http::{ApiResult, HasuraAction};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct CreateUser {
///     name: String,
/// }
///
/// async fn create_user(action: HasuraAction<CreateUser>) -> ApiResult<HttpResponse> {
///     Ok(HttpResponse::Ok().json(serde_json::json!({
///         "owner": action.user_id,
///         "name": action.params.name,
///     })))
/// }
/// ```
#[derive(Debug)]
pub struct HasuraAction<T>(pub Action<T>);

/// Decoded change event with both row images decoded.
///
/// Use `Option<_>` row types for images that may be `null`, or
/// `serde::de::IgnoredAny` for an image the handler does not need.
#[derive(Debug)]
pub struct HasuraChangeEvent<N, O>(pub ChangeEvent<N, O>);

/// Decoded scheduled event payload.
#[derive(Debug)]
pub struct HasuraScheduledEvent<T>(pub T);

impl<T> HasuraAction<T> {
    /// Unwrap into the decoded action.
    #[must_use]
    pub fn into_inner(self) -> Action<T> {
        self.0
    }
}

impl<N, O> HasuraChangeEvent<N, O> {
    /// Unwrap into the decoded event.
    #[must_use]
    pub fn into_inner(self) -> ChangeEvent<N, O> {
        self.0
    }
}

impl<T> HasuraScheduledEvent<T> {
    /// Unwrap into the decoded payload.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for HasuraAction<T> {
    type Target = Action<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<N, O> Deref for HasuraChangeEvent<N, O> {
    type Target = ChangeEvent<N, O>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> Deref for HasuraScheduledEvent<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn body_limit(req: &HttpRequest) -> usize {
    req.app_data::<Data<WebhookSettings>>().map_or_else(
        || WebhookSettings::defaults().max_body_bytes(),
        |settings| settings.max_body_bytes(),
    )
}

fn too_large(limit: usize) -> Error {
    Error::new(
        format!("request body exceeds the {limit} byte limit"),
        Some(ErrorCode::Numeric(413)),
    )
}

/// Buffer the body, then hand it to `decode` under the configured limit.
fn extract_with<R, F>(
    req: &HttpRequest,
    payload: &mut Payload,
    decode: F,
) -> LocalBoxFuture<'static, Result<R, Error>>
where
    R: 'static,
    F: FnOnce(JsonBody<'_>) -> Result<R, Error> + 'static,
{
    let limit = body_limit(req);
    let path = req.path().to_owned();
    let body = web::Payload::from_request(req, payload);
    Box::pin(async move {
        let bytes = body
            .await
            .map_err(Error::from)?
            .to_bytes_limited(limit)
            .await
            .map_err(|_| too_large(limit))?
            .map_err(Error::from)?;
        decode(JsonBody::new(&bytes).with_limit(limit))
            .inspect_err(|error| debug!(path = %path, %error, "webhook body rejected"))
    })
}

impl<T> FromRequest for HasuraAction<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        extract_with(req, payload, |body| {
            decode_action(&body).map(Self).map_err(Error::from)
        })
    }
}

impl<N, O> FromRequest for HasuraChangeEvent<N, O>
where
    N: DeserializeOwned + 'static,
    O: DeserializeOwned + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        extract_with(req, payload, |body| {
            decode_change_event(&body, Target::decode(), Target::decode())
                .map(Self)
                .map_err(Error::from)
        })
    }
}

impl<T> FromRequest for HasuraScheduledEvent<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        extract_with(req, payload, |body| {
            decode_scheduled_event(&body).map(Self).map_err(Error::from)
        })
    }
}

#[cfg(test)]
mod tests {
    //! Extractor tests driven through `TestRequest`.

    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct Greeting {
        name: String,
    }

    #[rstest]
    #[actix_web::test]
    async fn action_extractor_decodes_user_and_params() {
        let (req, mut payload) = TestRequest::post()
            .set_json(serde_json::json!({
                "session_variables": {"x-hasura-user-id": "u1"},
                "input": {"params": {"name": "ada"}}
            }))
            .to_http_parts();

        let action = HasuraAction::<Greeting>::from_request(&req, &mut payload)
            .await
            .expect("action decodes");
        assert_eq!(action.user_id, "u1");
        assert_eq!(action.into_inner().params.name, "ada");
    }

    #[rstest]
    #[actix_web::test]
    async fn change_event_extractor_decodes_both_images() {
        let (req, mut payload) = TestRequest::post()
            .set_payload(
                r#"{"event":{"op":"DELETE","data":{"old":{"name":"ada"},"new":null}}}"#,
            )
            .to_http_parts();

        let event =
            HasuraChangeEvent::<Option<Greeting>, Greeting>::from_request(&req, &mut payload)
                .await
                .expect("event decodes");
        assert_eq!(event.op, "DELETE");
        assert_eq!(event.new, Some(None));
        let old = event.into_inner().old.expect("old image is decoded");
        assert_eq!(old.name, "ada");
    }

    #[rstest]
    #[actix_web::test]
    async fn scheduled_event_extractor_rejects_mismatched_payloads() {
        let (req, mut payload) = TestRequest::post()
            .set_payload(r#"{"payload":{"name":7}}"#)
            .to_http_parts();

        let error = HasuraScheduledEvent::<Greeting>::from_request(&req, &mut payload)
            .await
            .expect_err("name must be a string");
        assert_eq!(error.code(), Some(&ErrorCode::Numeric(400)));
    }

    #[rstest]
    #[actix_web::test]
    async fn registered_settings_limit_the_body() {
        let settings = WebhookSettings {
            max_body_bytes: Some(8),
            ..WebhookSettings::defaults()
        };
        let (req, mut payload) = TestRequest::post()
            .app_data(Data::new(settings))
            .set_payload(r#"{"payload":{"name":"ada"}}"#)
            .to_http_parts();

        let error = HasuraScheduledEvent::<Greeting>::from_request(&req, &mut payload)
            .await
            .expect_err("body exceeds the limit");
        assert_eq!(error.code(), Some(&ErrorCode::Numeric(413)));
    }
}

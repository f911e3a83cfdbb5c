//! Action invocation envelope.
//!
//! Actions are expected to be declared with a single argument named `params`;
//! its value is what gets decoded into the caller's type.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    Binder, EnvelopeError, EnvelopeFailure, EnvelopeKind, SessionVariables, bind_envelope,
    decode_payload,
};

/// Outer action envelope with the `params` payload still undecoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActionEnvelope {
    #[serde(default)]
    action: Option<ActionName>,
    #[serde(default)]
    session_variables: Option<SessionVariables>,
    #[serde(default)]
    input: Option<ActionInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ActionName {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ActionInput {
    #[serde(default)]
    params: Value,
}

impl ActionEnvelope {
    /// Bind the outer envelope from a request body.
    ///
    /// # Errors
    /// Returns [`EnvelopeError::Bind`] when the body does not match.
    pub fn bind<B: Binder + ?Sized>(binder: &B) -> Result<Self, EnvelopeError> {
        bind_envelope(binder, EnvelopeKind::Action)
    }

    /// Session user id; empty for unauthenticated calls.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.session_variables
            .as_ref()
            .map_or("", SessionVariables::user_id)
    }

    /// All forwarded session variables.
    #[must_use]
    pub fn session_variables(&self) -> Option<&SessionVariables> {
        self.session_variables.as_ref()
    }

    /// Name of the invoked action, when Hasura included it.
    #[must_use]
    pub fn action_name(&self) -> Option<&str> {
        self.action
            .as_ref()
            .map(|action| action.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Raw `input.params` value; `null` when absent.
    #[must_use]
    pub fn raw_params(&self) -> &Value {
        self.input.as_ref().map_or(&Value::Null, |input| &input.params)
    }

    /// Decode `input.params` into `T`.
    ///
    /// # Errors
    /// Returns [`EnvelopeError::Decode`] when the payload does not fit `T`.
    pub fn params<T: DeserializeOwned>(&self) -> Result<T, EnvelopeError> {
        decode_payload("input.params", self.raw_params())
    }
}

/// A decoded action invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action<T> {
    /// Session user id; empty for unauthenticated calls.
    pub user_id: String,
    /// Decoded `params` argument.
    pub params: T,
}

/// Decode an action invocation into its user id and typed `params`.
///
/// On failure the user id read so far travels with the error: empty when
/// the outer envelope did not bind, the session value when only `params`
/// failed to decode.
///
/// # Errors
/// Returns an [`EnvelopeFailure`] carrying the user id.
///
/// # Examples
/// ```
/// use hasura_kit::domain::envelope::decode_action;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Params {
///     x: i32,
/// }
///
/// let body = r#"{"session_variables":{"x-hasura-user-id":"u1"},"input":{"params":{"x":1}}}"#;
/// let action = decode_action::<Params, _>(body).expect("valid action");
/// assert_eq!(action.user_id, "u1");
/// assert_eq!(action.params.x, 1);
/// ```
pub fn decode_action<T, B>(binder: &B) -> Result<Action<T>, EnvelopeFailure<String>>
where
    T: DeserializeOwned,
    B: Binder + ?Sized,
{
    let envelope = ActionEnvelope::bind(binder)
        .map_err(|error| EnvelopeFailure::new(String::new(), error))?;
    let user_id = envelope.user_id().to_owned();
    match envelope.params() {
        Ok(params) => Ok(Action { user_id, params }),
        Err(error) => Err(EnvelopeFailure::new(user_id, error)),
    }
}

//! Decoding of Hasura action and event webhook envelopes.
//!
//! Hasura wraps every payload in a fixed outer envelope. Decoding happens in
//! two steps: the request body is bound to the outer envelope through a
//! [`Binder`], then the caller-typed inner payload is decoded from the raw
//! JSON held by that envelope. The first step fails with
//! [`EnvelopeError::Bind`], the second with [`EnvelopeError::Decode`].
//!
//! ```text
//! action:          {"session_variables": {"x-hasura-user-id": "<id>"}, "input": {"params": <any>}}
//! change event:    {"event": {"op": "<op>", "data": {"old": <any|null>, "new": <any|null>}}}
//! scheduled event: {"payload": <any>}
//! ```

mod action;
mod change_event;
mod scheduled_event;
mod session;

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::{Error, ErrorCode};

pub use action::{Action, ActionEnvelope, decode_action};
pub use change_event::{
    ChangeEvent, ChangeEventEnvelope, Operation, OperationKind, TableRef, Target,
    decode_change_event,
};
pub use scheduled_event::{ScheduledEventEnvelope, decode_scheduled_event};
pub use session::{SessionVariables, USER_ID_SESSION_VARIABLE};

/// Capability that populates a value from an already-received request body.
///
/// Implemented for in-memory JSON (`str`, `String`, `[u8]`, [`Value`]) here
/// and for actix request bodies in `inbound::http`.
pub trait Binder {
    /// Deserialize the whole body into `T`.
    ///
    /// # Errors
    /// Returns [`BindError`] when the body does not fit `T`.
    fn bind<T: DeserializeOwned>(&self) -> Result<T, BindError>;
}

impl Binder for str {
    fn bind<T: DeserializeOwned>(&self) -> Result<T, BindError> {
        Ok(serde_json::from_str(self)?)
    }
}

impl Binder for String {
    fn bind<T: DeserializeOwned>(&self) -> Result<T, BindError> {
        self.as_str().bind()
    }
}

impl Binder for [u8] {
    fn bind<T: DeserializeOwned>(&self) -> Result<T, BindError> {
        Ok(serde_json::from_slice(self)?)
    }
}

impl Binder for Value {
    fn bind<T: DeserializeOwned>(&self) -> Result<T, BindError> {
        Ok(T::deserialize(self)?)
    }
}

/// Failures raised by a [`Binder`].
#[derive(Debug, Error)]
pub enum BindError {
    /// The body is not JSON or does not match the requested shape.
    #[error("request body does not match the envelope: {0}")]
    Json(#[from] serde_json::Error),

    /// The body exceeds the configured size limit.
    #[error("request body of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// Observed body size.
        size: usize,
        /// Configured limit.
        limit: usize,
    },
}

/// Envelope flavour, used to label bind failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeKind {
    /// Action invocation.
    Action,
    /// Database change event.
    ChangeEvent,
    /// Scheduled (cron or one-off) event.
    ScheduledEvent,
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Action => "action",
            Self::ChangeEvent => "change event",
            Self::ScheduledEvent => "scheduled event",
        })
    }
}

/// Failure to decode an envelope or its inner payload.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The outer envelope did not bind.
    #[error("failed to bind {kind} envelope: {source}")]
    Bind {
        /// Envelope that was being bound.
        kind: EnvelopeKind,
        /// Binder failure.
        #[source]
        source: BindError,
    },

    /// An inner payload did not match the caller's target type.
    #[error("failed to decode `{field}`: {source}")]
    Decode {
        /// Dotted path of the payload within the envelope.
        field: &'static str,
        /// Deserializer failure.
        #[source]
        source: serde_json::Error,
    },
}

impl EnvelopeError {
    /// Whether the outer envelope failed to bind.
    #[must_use]
    pub const fn is_bind(&self) -> bool {
        matches!(self, Self::Bind { .. })
    }
}

/// Envelope failure paired with the metadata extracted before it occurred.
///
/// For actions the metadata is the session user id, for change events the
/// [`Operation`]. Both are empty when the outer envelope failed to bind.
#[derive(Debug)]
pub struct EnvelopeFailure<M> {
    metadata: M,
    error: EnvelopeError,
}

impl<M> EnvelopeFailure<M> {
    pub(crate) const fn new(metadata: M, error: EnvelopeError) -> Self {
        Self { metadata, error }
    }

    /// Metadata recovered from the envelope.
    #[must_use]
    pub const fn metadata(&self) -> &M {
        &self.metadata
    }

    /// The underlying failure.
    #[must_use]
    pub const fn error(&self) -> &EnvelopeError {
        &self.error
    }

    /// Split into metadata and failure.
    #[must_use]
    pub fn into_parts(self) -> (M, EnvelopeError) {
        (self.metadata, self.error)
    }
}

impl<M> fmt::Display for EnvelopeFailure<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<M: fmt::Debug> std::error::Error for EnvelopeFailure<M> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.error)
    }
}

impl From<EnvelopeError> for Error {
    fn from(value: EnvelopeError) -> Self {
        match value {
            EnvelopeError::Bind {
                source: BindError::PayloadTooLarge { .. },
                ..
            } => Self::new(value.to_string(), Some(ErrorCode::Numeric(413))),
            _ => Self::bad_request(value.to_string()),
        }
    }
}

impl<M> From<EnvelopeFailure<M>> for Error {
    fn from(value: EnvelopeFailure<M>) -> Self {
        value.error.into()
    }
}

fn bind_envelope<E, B>(binder: &B, kind: EnvelopeKind) -> Result<E, EnvelopeError>
where
    E: DeserializeOwned,
    B: Binder + ?Sized,
{
    binder
        .bind()
        .map_err(|source| EnvelopeError::Bind { kind, source })
}

fn decode_payload<T>(field: &'static str, raw: &Value) -> Result<T, EnvelopeError>
where
    T: DeserializeOwned,
{
    T::deserialize(raw).map_err(|source| EnvelopeError::Decode { field, source })
}

//! Database change event envelope.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    Binder, EnvelopeError, EnvelopeFailure, EnvelopeKind, SessionVariables, bind_envelope,
    decode_payload,
};

/// Operation that fired the event, kept verbatim from the payload.
///
/// Unknown values are preserved rather than rejected; [`Operation::kind`]
/// classifies the ones Hasura documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Operation(String);

impl Operation {
    /// Wrap an operation string.
    #[must_use]
    pub fn new(op: impl Into<String>) -> Self {
        Self(op.into())
    }

    /// The operation as sent by Hasura, e.g. `UPDATE`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Classify the operation; `None` for values Hasura does not document.
    #[must_use]
    pub fn kind(&self) -> Option<OperationKind> {
        OperationKind::from_op(&self.0)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Operation {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Operation {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Documented Hasura event operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Row inserted; only `data.new` is set.
    Insert,
    /// Row updated; both `data.old` and `data.new` are set.
    Update,
    /// Row deleted; only `data.old` is set.
    Delete,
    /// Event invoked from the console; only `data.new` is set.
    Manual,
}

impl OperationKind {
    fn from_op(op: &str) -> Option<Self> {
        [Self::Insert, Self::Update, Self::Delete, Self::Manual]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(op))
    }

    /// Wire spelling of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Manual => "MANUAL",
        }
    }
}

/// Schema-qualified table that produced the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct TableRef {
    /// Postgres schema, e.g. `public`.
    #[serde(default)]
    pub schema: String,
    /// Table name.
    #[serde(default)]
    pub name: String,
}

/// Whether a row image should be decoded or left alone.
///
/// A skipped image is never decoded into `T`, so it cannot fail even when its
/// JSON does not fit `T` or is missing entirely. The outer bind still reads
/// both images as untyped JSON, so the body as a whole must be valid JSON.
pub struct Target<T> {
    decode: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Target<T> {
    /// Decode the row image into `T`.
    #[must_use]
    pub const fn decode() -> Self {
        Self {
            decode: true,
            _marker: PhantomData,
        }
    }

    /// Leave the row image undecoded.
    #[must_use]
    pub const fn skip() -> Self {
        Self {
            decode: false,
            _marker: PhantomData,
        }
    }

    /// Whether this target skips decoding.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        !self.decode
    }
}

impl<T: DeserializeOwned> Target<T> {
    fn resolve(&self, field: &'static str, raw: &Value) -> Result<Option<T>, EnvelopeError> {
        if self.is_skip() {
            return Ok(None);
        }
        decode_payload(field, raw).map(Some)
    }
}

impl<T> Clone for Target<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Target<T> {}

impl<T> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("decode", &self.decode)
            .finish()
    }
}

/// Outer change event envelope with the row images still undecoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChangeEventEnvelope {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    trigger: Option<TriggerRef>,
    #[serde(default)]
    table: Option<TableRef>,
    #[serde(default)]
    event: Option<EventBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct TriggerRef {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct EventBody {
    #[serde(default)]
    op: Operation,
    #[serde(default)]
    session_variables: Option<SessionVariables>,
    #[serde(default)]
    data: Option<RowImages>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct RowImages {
    #[serde(default)]
    old: Value,
    #[serde(default)]
    new: Value,
}

impl ChangeEventEnvelope {
    /// Bind the outer envelope from a request body.
    ///
    /// # Errors
    /// Returns [`EnvelopeError::Bind`] when the body does not match.
    pub fn bind<B: Binder + ?Sized>(binder: &B) -> Result<Self, EnvelopeError> {
        bind_envelope(binder, EnvelopeKind::ChangeEvent)
    }

    /// Operation that fired the event; empty when absent.
    #[must_use]
    pub fn op(&self) -> Operation {
        self.event
            .as_ref()
            .map(|event| event.op.clone())
            .unwrap_or_default()
    }

    /// Event id assigned by Hasura.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Creation time exactly as Hasura formatted it.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    /// Name of the event trigger.
    #[must_use]
    pub fn trigger_name(&self) -> Option<&str> {
        self.trigger.as_ref().map(|trigger| trigger.name.as_str())
    }

    /// Table the trigger is attached to.
    #[must_use]
    pub fn table(&self) -> Option<&TableRef> {
        self.table.as_ref()
    }

    /// Session variables of the mutation that caused the change.
    #[must_use]
    pub fn session_variables(&self) -> Option<&SessionVariables> {
        self.event
            .as_ref()
            .and_then(|event| event.session_variables.as_ref())
    }

    /// Raw `data.new` image; `null` when absent.
    #[must_use]
    pub fn raw_new(&self) -> &Value {
        self.images().map_or(&Value::Null, |images| &images.new)
    }

    /// Raw `data.old` image; `null` when absent.
    #[must_use]
    pub fn raw_old(&self) -> &Value {
        self.images().map_or(&Value::Null, |images| &images.old)
    }

    fn images(&self) -> Option<&RowImages> {
        self.event.as_ref().and_then(|event| event.data.as_ref())
    }
}

/// A decoded change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent<N, O> {
    /// Operation that fired the event.
    pub op: Operation,
    /// Decoded `data.new`; `None` when skipped.
    pub new: Option<N>,
    /// Decoded `data.old`; `None` when skipped.
    pub old: Option<O>,
    /// Name of the event trigger, when present.
    pub trigger_name: Option<String>,
    /// Table the trigger is attached to, when present.
    pub table: Option<TableRef>,
}

/// Decode a change event, optionally decoding each row image.
///
/// `data.new` is decoded before `data.old`; decoding stops at the first
/// failure. The operation travels with the error once the outer envelope has
/// bound, and is empty otherwise.
///
/// Use an `Option<_>` target type when the image may be `null` (the new
/// image of a delete, the old image of an insert).
///
/// # Errors
/// Returns an [`EnvelopeFailure`] carrying the operation.
///
/// # Examples
/// ```
/// use hasura_kit::domain::envelope::{ChangeEvent, Target, decode_change_event};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     a: i32,
/// }
///
/// let body = r#"{"event":{"op":"UPDATE","data":{"old":{"a":1},"new":{"a":2}}}}"#;
/// let event: ChangeEvent<Row, Row> =
///     decode_change_event(body, Target::decode(), Target::skip()).expect("valid event");
/// assert_eq!(event.op, "UPDATE");
/// assert_eq!(event.new.map(|row| row.a), Some(2));
/// assert!(event.old.is_none());
/// ```
pub fn decode_change_event<N, O, B>(
    binder: &B,
    new_image: Target<N>,
    old_image: Target<O>,
) -> Result<ChangeEvent<N, O>, EnvelopeFailure<Operation>>
where
    N: DeserializeOwned,
    O: DeserializeOwned,
    B: Binder + ?Sized,
{
    let envelope = ChangeEventEnvelope::bind(binder)
        .map_err(|error| EnvelopeFailure::new(Operation::default(), error))?;
    let op = envelope.op();

    let new = match new_image.resolve("event.data.new", envelope.raw_new()) {
        Ok(decoded) => decoded,
        Err(error) => return Err(EnvelopeFailure::new(op, error)),
    };
    let old = match old_image.resolve("event.data.old", envelope.raw_old()) {
        Ok(decoded) => decoded,
        Err(error) => return Err(EnvelopeFailure::new(op, error)),
    };

    Ok(ChangeEvent {
        op,
        new,
        old,
        trigger_name: envelope.trigger_name().map(str::to_owned),
        table: envelope.table().cloned(),
    })
}

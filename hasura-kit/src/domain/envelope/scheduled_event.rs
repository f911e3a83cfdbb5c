//! Scheduled (cron and one-off) event envelope.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Binder, EnvelopeError, EnvelopeKind, bind_envelope, decode_payload};

/// Outer scheduled event envelope with `payload` still undecoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScheduledEventEnvelope {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    scheduled_time: Option<String>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    payload: Value,
}

impl ScheduledEventEnvelope {
    /// Bind the outer envelope from a request body.
    ///
    /// # Errors
    /// Returns [`EnvelopeError::Bind`] when the body does not match.
    pub fn bind<B: Binder + ?Sized>(binder: &B) -> Result<Self, EnvelopeError> {
        bind_envelope(binder, EnvelopeKind::ScheduledEvent)
    }

    /// Event id assigned by Hasura.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Cron trigger name; absent for one-off events.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Time the event was scheduled for, exactly as Hasura formatted it.
    #[must_use]
    pub fn scheduled_time(&self) -> Option<&str> {
        self.scheduled_time.as_deref()
    }

    /// Free-form comment attached to the trigger.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Raw `payload` value; `null` when absent.
    #[must_use]
    pub const fn raw_payload(&self) -> &Value {
        &self.payload
    }

    /// Decode `payload` into `T`.
    ///
    /// # Errors
    /// Returns [`EnvelopeError::Decode`] when the payload does not fit `T`.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, EnvelopeError> {
        decode_payload("payload", &self.payload)
    }
}

/// Decode a scheduled event's `payload` into `T`.
///
/// # Errors
/// Returns [`EnvelopeError::Bind`] when the outer envelope does not bind and
/// [`EnvelopeError::Decode`] when the payload does not fit `T`.
pub fn decode_scheduled_event<T, B>(binder: &B) -> Result<T, EnvelopeError>
where
    T: DeserializeOwned,
    B: Binder + ?Sized,
{
    ScheduledEventEnvelope::bind(binder)?.payload()
}

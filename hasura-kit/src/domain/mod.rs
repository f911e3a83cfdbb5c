//! Transport-agnostic core: the Hasura error payload and envelope decoding.
//!
//! Inbound adapters turn request bodies into [`envelope::Binder`]s and map
//! [`Error`] values onto protocol responses.

pub mod envelope;
pub mod error;

pub use self::envelope::{BindError, Binder, EnvelopeError, EnvelopeFailure, EnvelopeKind};
pub use self::error::{Error, ErrorCode, err, err_from};

//! Error types for scalar construction.
//!
//! The plain constructors never fail. These errors only surface from the
//! validating entry points (`Uuid::parse_strict`, `Timestamptz::parse`,
//! `Jsonb::try_from`) and from variable serialization in [`crate::Vars`].

use thiserror::Error;

/// Errors raised when a raw value cannot be turned into a scalar.
#[derive(Debug, Error)]
pub enum ScalarError {
    /// The value is not a UUID in any form the `uuid` crate accepts.
    #[error("invalid UUID '{value}': {source}")]
    InvalidUuid {
        /// The rejected input.
        value: String,
        /// Parser failure.
        #[source]
        source: uuid::Error,
    },

    /// The value is not an RFC 3339 timestamp.
    #[error("invalid RFC 3339 timestamp '{value}': {source}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// Parser failure.
        #[source]
        source: chrono::ParseError,
    },

    /// A JSON value other than an object was offered as `jsonb`.
    #[error("jsonb scalar requires a JSON object, found {found}")]
    NotAnObject {
        /// JSON kind that was found instead.
        found: &'static str,
    },

    /// A GraphQL variable could not be converted into JSON.
    #[error("variable '{name}' could not be serialized: {source}")]
    Variable {
        /// Variable name without the leading `$`.
        name: String,
        /// Serializer failure.
        #[source]
        source: serde_json::Error,
    },
}

//! The `uuid` scalar.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Scalar, ScalarError};

/// Canonical string form of the nil UUID.
pub const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// Hasura `uuid` scalar held in its textual form.
///
/// ## Invariants
/// - The wrapped string is never empty: an empty input becomes [`NIL_UUID`].
///
/// No format validation happens in [`Uuid::new`]; callers are trusted to
/// supply canonical UUIDs. Use [`Uuid::parse_strict`] for untrusted input.
///
/// # Examples
/// ```
/// use hasura_scalars::{NIL_UUID, Uuid};
///
/// assert_eq!(Uuid::new(""), Uuid::new(NIL_UUID));
/// assert_eq!(Uuid::new("abc").as_str(), "abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Uuid(String);

impl Uuid {
    /// Wrap a UUID string, mapping the empty string to the nil UUID.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let text = value.into();
        if text.is_empty() {
            return Self::nil();
        }
        Self(text)
    }

    /// The nil UUID.
    #[must_use]
    pub fn nil() -> Self {
        Self(NIL_UUID.to_owned())
    }

    /// Parse and canonicalize through the `uuid` crate, rejecting anything
    /// that is not a UUID (including the empty string).
    ///
    /// # Errors
    /// Returns [`ScalarError::InvalidUuid`] when `value` does not parse.
    pub fn parse_strict(value: &str) -> Result<Self, ScalarError> {
        uuid::Uuid::parse_str(value)
            .map(Self::from)
            .map_err(|source| ScalarError::InvalidUuid {
                value: value.to_owned(),
                source,
            })
    }

    /// Whether this is the nil UUID.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == NIL_UUID
    }

    /// Borrow the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Unwrap into the textual form.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Scalar for Uuid {
    const TYPE_NAME: &'static str = "uuid";
}

impl Default for Uuid {
    fn default() -> Self {
        Self::nil()
    }
}

impl From<String> for Uuid {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Uuid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<uuid::Uuid> for Uuid {
    fn from(value: uuid::Uuid) -> Self {
        Self(value.hyphenated().to_string())
    }
}

impl From<Uuid> for String {
    fn from(value: Uuid) -> Self {
        value.0
    }
}

impl AsRef<str> for Uuid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

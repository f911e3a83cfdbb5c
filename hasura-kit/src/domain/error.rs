//! Hasura-compliant error payload.
//!
//! Actions and event handlers report failures back to Hasura as
//! `{"message": "...", "code": "..."}`. The type here is transport agnostic;
//! the inbound HTTP adapter maps it onto status codes and response bodies.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Machine-readable error code, numeric or textual.
///
/// Always rendered as text on the wire. A textual code holding the canonical
/// decimal form of a `u16` is normalized to [`ErrorCode::Numeric`], so `404`
/// and `"404"` decode to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Numeric code, usually an HTTP status.
    Numeric(u16),
    /// Free-form textual code such as `validation-failed`.
    Text(String),
}

impl ErrorCode {
    /// Parse a textual code, recognising canonical numbers.
    #[must_use]
    pub fn parse(value: impl Into<String>) -> Self {
        let text = value.into();
        match text.parse::<u16>() {
            Ok(number) if number.to_string() == text => Self::Numeric(number),
            _ => Self::Text(text),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    /// The code as an HTTP error status, when it is one (`400..=599`).
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Numeric(number @ 400..=599) => Some(*number),
            _ => None,
        }
    }
}

impl From<u16> for ErrorCode {
    fn from(value: u16) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for ErrorCode {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for ErrorCode {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCode {
            Unsigned(u64),
            Signed(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawCode::deserialize(deserializer)? {
            RawCode::Unsigned(number) => u16::try_from(number)
                .map_or_else(|_| Self::Text(number.to_string()), Self::Numeric),
            RawCode::Signed(number) => Self::Text(number.to_string()),
            RawCode::Float(number) => Self::Text(number.to_string()),
            RawCode::Text(text) => Self::parse(text),
        })
    }
}

/// Error returned to Hasura from an action or event handler.
///
/// ## Invariants
/// - `code == None` means "no code": the error renders as its message alone
///   and the `code` key is left out of the JSON body.
/// - An empty textual code is stored as no code.
///
/// # Examples
/// ```
/// use hasura_kit::domain::{Error, ErrorCode};
///
/// let err = Error::new("user not found", Some(ErrorCode::Numeric(404)));
/// assert_eq!(err.to_string(), "[404] user not found");
/// assert_eq!(
///     serde_json::to_string(&err).expect("serializes"),
///     r#"{"message":"user not found","code":"404"}"#,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    message: String,
    code: Option<ErrorCode>,
}

impl Error {
    /// Create an error with an optional code.
    #[must_use]
    pub fn new(message: impl Into<String>, code: Option<ErrorCode>) -> Self {
        Self {
            message: message.into(),
            code: code.filter(|candidate| !candidate.is_empty()),
        }
    }

    /// Wrap an underlying failure's message.
    ///
    /// A missing failure yields an error with an empty message rather than no
    /// error at all.
    ///
    /// # Examples
    /// ```
    /// use hasura_kit::domain::Error;
    ///
    /// let none: Option<&std::io::Error> = None;
    /// assert_eq!(Error::from_error(none, None).message(), "");
    /// ```
    #[must_use]
    pub fn from_error<E>(error: Option<&E>, code: Option<ErrorCode>) -> Self
    where
        E: fmt::Display + ?Sized,
    {
        let message = error.map(ToString::to_string).unwrap_or_default();
        Self::new(message, code)
    }

    /// Replace the code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = Some(code.into()).filter(|candidate| !candidate.is_empty());
        self
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Machine-readable code, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }

    /// Convenience constructor for code `400`.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, Some(ErrorCode::Numeric(400)))
    }

    /// Convenience constructor for code `401`.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, Some(ErrorCode::Numeric(401)))
    }

    /// Convenience constructor for code `403`.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message, Some(ErrorCode::Numeric(403)))
    }

    /// Convenience constructor for code `404`.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, Some(ErrorCode::Numeric(404)))
    }

    /// Convenience constructor for code `409`.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message, Some(ErrorCode::Numeric(409)))
    }

    /// Convenience constructor for code `500`.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message, Some(ErrorCode::Numeric(500)))
    }
}

/// Shorthand for a code-less [`Error`].
#[must_use]
pub fn err(message: impl Into<String>) -> Error {
    Error::new(message, None)
}

/// Shorthand for wrapping an existing failure in a code-less [`Error`].
///
/// Typically used when handing a failure back to Hasura as an action or
/// event response.
#[must_use]
pub fn err_from<E>(error: &E) -> Error
where
    E: fmt::Display + ?Sized,
{
    Error::from_error(Some(error), None)
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorDto {
    #[serde(default)]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            message: value.message,
            code: value.code,
        }
    }
}

impl From<ErrorDto> for Error {
    fn from(value: ErrorDto) -> Self {
        Self::new(value.message, value.code)
    }
}

#[cfg(test)]
mod tests;

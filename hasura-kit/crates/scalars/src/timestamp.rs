//! The `timestamptz` scalar.

use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{Scalar, ScalarError};

/// Hasura `timestamptz` scalar, normalized to UTC at whole-second precision.
///
/// The source offset is discarded and the value renders as RFC 3339 with a
/// `Z` suffix.
///
/// # Examples
/// ```
/// use chrono::DateTime;
/// use hasura_scalars::Timestamptz;
///
/// let local = DateTime::parse_from_rfc3339("2024-01-01T00:00:00-05:00").expect("valid");
/// assert_eq!(Timestamptz::new(local).to_string(), "2024-01-01T05:00:00Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamptz(DateTime<Utc>);

impl Timestamptz {
    /// Convert a timestamp in any zone to UTC, dropping sub-second digits.
    #[must_use]
    pub fn new<Tz: TimeZone>(value: DateTime<Tz>) -> Self {
        Self(value.with_timezone(&Utc).trunc_subsecs(0))
    }

    /// Parse an RFC 3339 string and normalize it like [`Timestamptz::new`].
    ///
    /// # Errors
    /// Returns [`ScalarError::InvalidTimestamp`] when `value` is not RFC 3339.
    pub fn parse(value: &str) -> Result<Self, ScalarError> {
        DateTime::parse_from_rfc3339(value)
            .map(Self::new)
            .map_err(|source| ScalarError::InvalidTimestamp {
                value: value.to_owned(),
                source,
            })
    }

    /// The normalized instant.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as RFC 3339 in UTC, e.g. `2024-01-01T05:00:00Z`.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Scalar for Timestamptz {
    const TYPE_NAME: &'static str = "timestamptz";
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamptz {
    fn from(value: DateTime<Tz>) -> Self {
        Self::new(value)
    }
}

impl TryFrom<String> for Timestamptz {
    type Error = ScalarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamptz> for String {
    fn from(value: Timestamptz) -> Self {
        value.to_rfc3339()
    }
}

impl fmt::Display for Timestamptz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use chrono::FixedOffset;
    use rstest::rstest;

    #[rstest]
    #[case::negative_offset("2024-01-01T00:00:00-05:00", "2024-01-01T05:00:00Z")]
    #[case::positive_offset("2024-03-10T01:30:00+09:30", "2024-03-09T16:00:00Z")]
    #[case::already_utc("2024-06-01T12:00:00Z", "2024-06-01T12:00:00Z")]
    #[case::fraction_dropped("2024-06-01T12:00:00.987654+00:00", "2024-06-01T12:00:00Z")]
    fn renders_in_utc(#[case] input: &str, #[case] expected: &str) {
        let parsed: DateTime<FixedOffset> =
            DateTime::parse_from_rfc3339(input).expect("fixture is RFC 3339");
        assert_eq!(Timestamptz::new(parsed).to_string(), expected);
    }

    #[test]
    fn parse_matches_new() {
        let parsed = Timestamptz::parse("2024-01-01T00:00:00-05:00").expect("valid timestamp");
        let built = Timestamptz::new(
            DateTime::parse_from_rfc3339("2024-01-01T05:00:00Z").expect("valid timestamp"),
        );
        assert_eq!(parsed, built);
    }

    #[test]
    fn parse_rejects_other_formats() {
        let result = Timestamptz::parse("01/01/2024");
        assert!(matches!(
            result,
            Err(ScalarError::InvalidTimestamp { value, .. }) if value == "01/01/2024"
        ));
    }

    #[test]
    fn serde_uses_the_rfc3339_string() {
        let value = Timestamptz::parse("2024-01-01T05:00:00+00:00").expect("valid timestamp");
        let json = serde_json::to_string(&value).expect("serializes");
        assert_eq!(json, r#""2024-01-01T05:00:00Z""#);

        let back: Timestamptz = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, value);
    }
}

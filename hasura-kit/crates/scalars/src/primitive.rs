//! Identity wrappers for integer, float, boolean and string scalars.

use crate::macros::define_scalar;

define_scalar! {
    /// Postgres `bigint` column value (64-bit signed).
    pub struct BigInt(i64) => "bigint";
    derive(Copy, Eq, Hash, Ord)
}

define_scalar! {
    /// Postgres `smallint` column value (16-bit signed).
    pub struct SmallInt(i16) => "smallint";
    derive(Copy, Eq, Hash, Ord)
}

define_scalar! {
    /// GraphQL built-in `Int` (32-bit signed).
    pub struct Int(i32) => "Int";
    derive(Copy, Eq, Hash, Ord)
}

define_scalar! {
    /// GraphQL built-in `Float`.
    pub struct Float(f64) => "Float";
    derive(Copy)
}

define_scalar! {
    /// GraphQL built-in `Boolean`.
    pub struct Boolean(bool) => "Boolean";
    derive(Copy, Eq, Hash, Ord)
}

define_scalar! {
    /// GraphQL built-in `ID`, serialized as a string.
    pub struct Id(String) => "ID";
    derive(Eq, Hash, Ord)
}

define_scalar! {
    /// GraphQL built-in `String`.
    pub struct Text(String) => "String";
    derive(Eq, Hash, Ord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;
    use rstest::rstest;

    #[rstest]
    #[case::present(Some(42), Some(BigInt::new(42)))]
    #[case::zero_is_not_absent(Some(0), Some(BigInt::new(0)))]
    #[case::absent(None, None)]
    fn big_int_from_option_preserves_absence(
        #[case] raw: Option<i64>,
        #[case] expected: Option<BigInt>,
    ) {
        assert_eq!(BigInt::from_option(raw), expected);
    }

    #[rstest]
    #[case::present(Some(-7), Some(SmallInt::new(-7)))]
    #[case::absent(None, None)]
    fn small_int_from_option_preserves_absence(
        #[case] raw: Option<i16>,
        #[case] expected: Option<SmallInt>,
    ) {
        assert_eq!(SmallInt::from_option(raw), expected);
    }

    #[test]
    fn big_int_keeps_full_range() {
        let value = BigInt::new(i64::MIN);
        assert_eq!(value.into_inner(), i64::MIN);
        assert_eq!(*BigInt::new(i64::MAX).get(), i64::MAX);
    }

    #[test]
    fn wrappers_serialize_as_the_bare_primitive() {
        let json = serde_json::to_value((BigInt::new(9), SmallInt::new(3), Id::new("a".into())));
        assert_eq!(json.ok(), Some(serde_json::json!([9, 3, "a"])));
    }

    #[test]
    fn small_int_rejects_out_of_range_json() {
        let result: Result<SmallInt, _> = serde_json::from_str("40000");
        assert!(result.is_err());
    }

    #[rstest]
    #[case(BigInt::TYPE_NAME, "bigint")]
    #[case(SmallInt::TYPE_NAME, "smallint")]
    #[case(Int::TYPE_NAME, "Int")]
    #[case(Float::TYPE_NAME, "Float")]
    #[case(Boolean::TYPE_NAME, "Boolean")]
    #[case(Id::TYPE_NAME, "ID")]
    #[case(Text::TYPE_NAME, "String")]
    fn type_names_match_the_schema(#[case] actual: &str, #[case] expected: &str) {
        assert_eq!(actual, expected);
    }

    #[test]
    fn display_delegates_to_the_primitive() {
        assert_eq!(BigInt::new(-12).to_string(), "-12");
        assert_eq!(Boolean::new(true).to_string(), "true");
        assert_eq!(Text::new("hi".to_owned()).to_string(), "hi");
    }
}

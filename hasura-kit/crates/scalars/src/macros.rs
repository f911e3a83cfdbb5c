//! Defines the helper macro for identity-wrapping scalar newtypes.

/// Declare a newtype over a primitive with the shared scalar surface:
/// `new`, `from_option`, `get`, `into_inner`, conversions both ways,
/// `Display`, transparent serde and a [`crate::Scalar`] impl.
macro_rules! define_scalar {
    (
        $(#[$outer:meta])*
        pub struct $name:ident($inner:ty) => $type_name:literal;
        derive($($extra:ident),* $(,)?)
    ) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, PartialEq, PartialOrd, ::serde::Serialize, ::serde::Deserialize
            $(, $extra)*
        )]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Wrap a raw value.
            #[must_use]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Wrap an optional value, keeping an absent value absent.
            #[must_use]
            pub fn from_option(value: Option<$inner>) -> Option<Self> {
                value.map(Self)
            }

            /// Borrow the wrapped value.
            #[must_use]
            pub const fn get(&self) -> &$inner {
                &self.0
            }

            /// Unwrap into the raw value.
            #[must_use]
            pub fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl $crate::Scalar for $name {
            const TYPE_NAME: &'static str = $type_name;
        }
    };
}

pub(crate) use define_scalar;

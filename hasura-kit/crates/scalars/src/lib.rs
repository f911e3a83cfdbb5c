//! Nominal newtypes mirroring the Hasura GraphQL scalar set.
//!
//! Hasura exposes Postgres column types as lowercase GraphQL scalars (`uuid`,
//! `jsonb`, `bigint`, ...). Plain Rust primitives carry no trace of which
//! scalar they stand for, so a `String` meant as a `uuid` is easily passed
//! where a `String` is expected. Each type in this crate wraps exactly one
//! primitive and records the backend type name through [`Scalar`], which lets
//! [`Vars`] generate GraphQL variable declarations.
//!
//! # Example
//!
//! ```
//! use hasura_scalars::{BigInt, Scalar, Uuid, Vars};
//!
//! let id = Uuid::new("");
//! assert!(id.is_nil());
//!
//! let vars = Vars::new()
//!     .with("id", id)
//!     .and_then(|vars| vars.with("limit", BigInt::new(10)))
//!     .expect("scalars serialize");
//! assert_eq!(vars.declarations(), "$id: uuid!, $limit: bigint!");
//! assert_eq!(Uuid::TYPE_NAME, "uuid");
//! ```

mod error;
mod jsonb;
mod macros;
mod primitive;
mod timestamp;
mod uuid_scalar;
mod vars;

pub use error::ScalarError;
pub use jsonb::Jsonb;
pub use primitive::{BigInt, Boolean, Float, Id, Int, SmallInt, Text};
pub use timestamp::Timestamptz;
pub use uuid_scalar::{NIL_UUID, Uuid};
pub use vars::Vars;

/// A value that maps onto a named scalar in the backend's GraphQL schema.
pub trait Scalar {
    /// Scalar name as it appears in the schema, e.g. `uuid` or `Int`.
    const TYPE_NAME: &'static str;

    /// Non-null type reference used in variable declarations (`uuid!`).
    #[must_use]
    fn non_null_type() -> String {
        format!("{}!", Self::TYPE_NAME)
    }
}

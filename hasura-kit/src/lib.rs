//! Helpers for services that back Hasura actions and event triggers.
//!
//! - [`domain::Error`] is the `{"message", "code"}` error payload Hasura
//!   expects from action and event handlers.
//! - [`domain::envelope`] decodes action, change event and scheduled event
//!   webhook bodies into caller-typed payloads plus metadata.
//! - [`scalars`] re-exports newtypes for Hasura's scalar set.
//! - [`inbound::http`] adapts all of the above to actix-web.
//!
//! ```
//! use hasura_kit::domain::envelope::decode_action;
//! use hasura_kit::domain::Error;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct CreateUser {
//!     name: String,
//! }
//!
//! let body = r#"{"session_variables":{},"input":{"params":{"name":"ada"}}}"#;
//! let action = decode_action::<CreateUser, _>(body).map_err(Error::from);
//! assert_eq!(action.map(|action| action.params.name).ok().as_deref(), Some("ada"));
//! ```

pub mod domain;
pub mod inbound;

pub use hasura_scalars as scalars;

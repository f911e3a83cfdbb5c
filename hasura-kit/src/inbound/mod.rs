//! Inbound adapters that translate transport requests into domain calls.

pub mod http;

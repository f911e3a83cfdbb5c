//! actix-web adapter for Hasura action and event webhooks.
//!
//! ```text
//! POST /actions/<name>   {"session_variables": {...}, "input": {"params": {...}}}
//! POST /events/<name>    {"event": {"op": "...", "data": {"old": ..., "new": ...}}}
//! POST /schedules/<name> {"payload": {...}}
//! ```
//!
//! Routing stays with the host application; this module provides the body
//! binder, request extractors, error responses, the redaction middleware
//! and their settings.

pub mod binder;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;

pub use binder::JsonBody;
pub use config::WebhookSettings;
pub use error::{ApiResult, ErrorResponder, ResponseWriter, respond_with_error, status_for};
pub use extract::{HasuraAction, HasuraChangeEvent, HasuraScheduledEvent};
pub use middleware::RedactErrors;

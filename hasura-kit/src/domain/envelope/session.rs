//! Session variables forwarded by Hasura.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Session variable holding the authenticated user id.
pub const USER_ID_SESSION_VARIABLE: &str = "x-hasura-user-id";

const ROLE_SESSION_VARIABLE: &str = "x-hasura-role";

/// Request-scoped session variables.
///
/// The user id must be a string when present; the remaining variables are
/// kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionVariables {
    #[serde(rename = "x-hasura-user-id", default)]
    user_id: String,
    #[serde(flatten)]
    others: BTreeMap<String, Value>,
}

impl SessionVariables {
    /// Authenticated user id; empty for unauthenticated calls.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Role the request was made with, when Hasura forwarded one.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.get(ROLE_SESSION_VARIABLE)
    }

    /// Look up any string-valued session variable by its lowercase name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == USER_ID_SESSION_VARIABLE {
            return Some(self.user_id()).filter(|id| !id.is_empty());
        }
        self.others.get(name).and_then(Value::as_str)
    }
}

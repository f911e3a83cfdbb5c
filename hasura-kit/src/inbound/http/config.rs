//! Webhook adapter settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Settings for the webhook extractors and error responses.
///
/// Register as `web::Data<WebhookSettings>` to make the extractors and the
/// [`super::RedactErrors`] middleware honour them; without it the defaults
/// apply.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HASURA_WEBHOOK")]
pub struct WebhookSettings {
    /// Largest accepted webhook body in bytes.
    pub max_body_bytes: Option<usize>,
    /// Replace the message of 5xx errors before they leave the service.
    #[ortho_config(default = false)]
    pub redact_internal_errors: bool,
}

impl WebhookSettings {
    /// Built-in defaults, used when no settings were registered.
    #[must_use]
    pub const fn defaults() -> Self {
        Self {
            max_body_bytes: None,
            redact_internal_errors: false,
        }
    }

    /// Return the configured body limit, falling back to 1 MiB.
    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for webhook settings parsing.

    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> WebhookSettings {
        WebhookSettings::load_from_iter([OsString::from("hasura-kit")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("HASURA_WEBHOOK_MAX_BODY_BYTES", None::<String>),
            ("HASURA_WEBHOOK_REDACT_INTERNAL_ERRORS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.redact_internal_errors);
        assert!(settings.max_body_bytes.is_none());
        assert_eq!(settings.max_body_bytes(), DEFAULT_MAX_BODY_BYTES);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("HASURA_WEBHOOK_MAX_BODY_BYTES", Some("2048".to_owned())),
            ("HASURA_WEBHOOK_REDACT_INTERNAL_ERRORS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.redact_internal_errors);
        assert_eq!(settings.max_body_bytes(), 2048);
    }

    #[rstest]
    fn builtin_defaults_match_the_unconfigured_load() {
        let settings = WebhookSettings::defaults();
        assert_eq!(settings.max_body_bytes(), DEFAULT_MAX_BODY_BYTES);
        assert!(!settings.redact_internal_errors);
    }
}

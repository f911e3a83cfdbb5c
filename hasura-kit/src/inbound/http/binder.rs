//! Request body binder for actix-web.

use actix_web::web::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{BindError, Binder};

/// A buffered request body bound as JSON, with an optional size limit.
///
/// # Examples
/// ```
/// use actix_web::web::Bytes;
/// use hasura_kit::domain::envelope::decode_scheduled_event;
/// use hasura_kit::inbound::http::JsonBody;
///
/// let bytes = Bytes::from_static(br#"{"payload": 3}"#);
/// let value: u8 = decode_scheduled_event(&JsonBody::new(&bytes)).expect("fits");
/// assert_eq!(value, 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JsonBody<'a> {
    bytes: &'a [u8],
    limit: Option<usize>,
}

impl<'a> JsonBody<'a> {
    /// Bind the whole body without a size limit.
    #[must_use]
    pub fn new(bytes: &'a Bytes) -> Self {
        Self::from_slice(bytes.as_ref())
    }

    /// Bind an arbitrary byte slice.
    #[must_use]
    pub const fn from_slice(bytes: &'a [u8]) -> Self {
        Self { bytes, limit: None }
    }

    /// Reject bodies larger than `limit` bytes.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Body size in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the body is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn check_limit(&self) -> Result<(), BindError> {
        match self.limit {
            Some(limit) if self.bytes.len() > limit => Err(BindError::PayloadTooLarge {
                size: self.bytes.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}

impl Binder for JsonBody<'_> {
    fn bind<T: DeserializeOwned>(&self) -> Result<T, BindError> {
        self.check_limit()
            .and_then(|()| self.bytes.bind())
            .inspect_err(|error| debug!(size = self.bytes.len(), %error, "rejected webhook body"))
    }
}

impl Binder for Bytes {
    fn bind<T: DeserializeOwned>(&self) -> Result<T, BindError> {
        JsonBody::new(self).bind()
    }
}

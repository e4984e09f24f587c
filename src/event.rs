use std::{borrow::Cow, error::Error, sync::Arc};

use http::StatusCode;

/// The error a host server is about to report: the response status code, the
/// message attached to it, and the underlying failure when one is known.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    /// The status code of the error response
    pub status: StatusCode,
    /// The host server's message for this error
    pub message: Cow<'static, str>,
    /// The failure that triggered the error response, if the host recorded one
    pub cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl ErrorEvent {
    /// Create an event with no underlying cause.
    pub fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        ErrorEvent {
            status,
            message: message.into(),
            cause: None,
        }
    }

    /// Create an event from a status code alone, using its canonical reason
    /// phrase as the message.
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(status, status.canonical_reason().unwrap_or_default())
    }

    /// Attach the failure that triggered this error.
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Whether this event is an authentication challenge. The body of a
    /// challenge response belongs to the authentication layer, not to a
    /// generic error page.
    pub fn is_credential_challenge(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

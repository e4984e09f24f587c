use std::{io::Write, str::FromStr};

use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;
use tracing::{event, Level};

use crate::ErrorEvent;

/// Configuration for [ErrorResponder]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResponderSettings {
    /// Record one error-level log entry per handled event
    pub log_errors: bool,
    /// Leave 401 Unauthorized responses untouched so the authentication
    /// layer's challenge body survives
    pub skip_challenge_body: bool,
}

impl Default for ResponderSettings {
    /// The default settings are the [ResponderProfile::Full] profile.
    fn default() -> Self {
        ResponderProfile::Full.settings()
    }
}

/// The two deployment profiles for [ErrorResponder].
///
/// `Full` logs every handled error and leaves 401 challenge responses alone.
/// `Minimal` writes the canned content for every error, including 401, and
/// never logs. Hosts that need something in between can build a
/// [ResponderSettings] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponderProfile {
    /// Log errors and pass credential challenges through untouched
    Full,
    /// Write the canned content unconditionally, with no logging
    Minimal,
}

impl ResponderProfile {
    /// The settings this profile expands to.
    pub fn settings(self) -> ResponderSettings {
        match self {
            ResponderProfile::Full => ResponderSettings {
                log_errors: true,
                skip_challenge_body: true,
            },
            ResponderProfile::Minimal => ResponderSettings {
                log_errors: false,
                skip_challenge_body: false,
            },
        }
    }
}

/// The error returned when a profile name fails to parse
#[derive(Debug, Error)]
#[error("unknown responder profile {0:?}, expected \"full\" or \"minimal\"")]
pub struct UnknownProfile(String);

impl FromStr for ResponderProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(ResponderProfile::Full),
            "minimal" => Ok(ResponderProfile::Minimal),
            _ => Err(UnknownProfile(s.to_string())),
        }
    }
}

/// Writes a fixed, pre-configured body for error responses.
///
/// The content is set once at construction and emitted verbatim for every
/// handled event, with no templating of the event's fields. The responder
/// holds no mutable state, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct ErrorResponder {
    content: Bytes,
    settings: ResponderSettings,
}

impl ErrorResponder {
    /// Create a responder with the given canned content and the
    /// [ResponderProfile::Full] profile.
    pub fn new(content: impl Into<Bytes>) -> Self {
        Self::with_settings(content, ResponderSettings::default())
    }

    /// Create a responder with the given canned content and settings.
    pub fn with_settings(content: impl Into<Bytes>, settings: ResponderSettings) -> Self {
        ErrorResponder {
            content: content.into(),
            settings,
        }
    }

    /// The canned content this responder writes.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// The settings this responder was built with.
    pub fn settings(&self) -> ResponderSettings {
        self.settings
    }

    /// Decide what to send for `event`: the canned content, or `None` when
    /// the body should be left to the authentication layer. Logging happens
    /// here, before any write is attempted.
    pub fn handle(&self, event: &ErrorEvent) -> Option<Bytes> {
        if self.settings.skip_challenge_body && event.is_credential_challenge() {
            return None;
        }

        if self.settings.log_errors {
            match &event.cause {
                Some(cause) => event!(Level::ERROR, error = %cause, "gangway server error"),
                None => event!(
                    Level::ERROR,
                    code = event.status.as_u16(),
                    message = %event.message,
                    "gangway server error"
                ),
            }
        }

        Some(self.content.clone())
    }

    /// Handle `event` and write the canned content to `output`.
    ///
    /// Write failures are returned to the caller, not retried; any log entry
    /// has already been emitted by then.
    pub fn respond(&self, event: &ErrorEvent, output: &mut dyn Write) -> std::io::Result<()> {
        match self.handle(event) {
            Some(content) => output.write_all(&content),
            None => Ok(()),
        }
    }
}

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error kind that represents failures reported by the [`crate::Client`].
///
/// Match on the kind rather than on [`ClientError::message`], the text is for humans.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The default value of a variable is not a Boolean, Number, String, or JSON.
    InvalidDefaultValue = 1000,
    /// An empty variable key was passed to a variable evaluation method.
    InvalidVariableKey = 1001,
    /// A custom event was tracked without an event type.
    MissingEventType = 1002,
    /// The SDK key is empty or is not a server SDK key.
    InvalidSdkKey = 1100,
    /// Initialization of the internal [`reqwest::Client`] failed.
    HttpClientInitFailure = 1101,
    /// The HTTP request failed (most likely, due to a local network issue).
    HttpRequestFailure = 1102,
    /// The HTTP request timed out.
    HttpRequestTimeout = 1103,
    /// The API rejected the SDK key (401 Unauthorized or 403 Forbidden).
    Unauthorized = 1104,
    /// Unexpected HTTP response was received (unexpected HTTP status code).
    UnexpectedHttpResponse = 1105,
    /// A successful HTTP response was received with a body that could not be decoded.
    InvalidHttpResponseContent = 1106,
}

impl ErrorKind {
    /// Numeric code of the kind, logged as the `event_id` of the related log records.
    pub fn code(&self) -> u16 {
        *self as u16
    }
}

/// Error struct that holds the [`ErrorKind`] and message of the reported failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientError {
    /// Error kind that represents failures reported by the [`crate::Client`].
    pub kind: ErrorKind,
    /// The text representation of the failure.
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: ErrorKind, message: String) -> Self {
        Self { message, kind }
    }

    /// Returns `true` when the error is of the given `kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl Error for ClientError {}

#[cfg(test)]
mod tests {
    use crate::errors::{ClientError, ErrorKind};

    #[test]
    fn kind_is_independent_of_message() {
        let first = ClientError::new(ErrorKind::InvalidDefaultValue, "first".to_owned());
        let second = ClientError::new(ErrorKind::InvalidDefaultValue, "second".to_owned());

        assert!(first.is(ErrorKind::InvalidDefaultValue));
        assert_eq!(first.kind, second.kind);
        assert_ne!(first, second);
        assert!(!first.is(ErrorKind::InvalidSdkKey));
    }

    #[test]
    fn display_is_message() {
        let err = ClientError::new(ErrorKind::Unauthorized, "bad key".to_owned());
        assert_eq!(err.to_string(), "bad key");
        assert_eq!(err.kind.code(), 1104);
    }
}

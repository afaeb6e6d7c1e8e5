use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error kind that represents failures reported by the [`crate::Client`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Initialization of the internal [`reqwest::Client`] failed.
    HttpClientInitFailure = 1,
    /// The process-wide default client was used before [`crate::configure`] was called.
    UnconfiguredClient = 10,
    /// The entity could not be serialized to JSON.
    EntitySerializationFailure = 20,
    /// An invalid HTTP response was received (200 OK with an invalid content).
    InvalidHttpResponseContent = 21,
    /// The response payload could not be deserialized into the requested type,
    /// or the response carried no payload.
    PayloadDeserializationFailure = 22,
    /// Invalid HTTP response was received (unexpected HTTP status code).
    UnexpectedHttpResponse = 30,
    /// The HTTP request timed out.
    HttpRequestTimeout = 31,
    /// The HTTP request failed (most likely, due to a local network issue).
    HttpRequestFailure = 32,
}

impl ErrorKind {
    /// True for failures of the serialization class: the entity could not be
    /// encoded, or a response could not be decoded into the expected shape.
    pub fn is_serialization_failure(&self) -> bool {
        matches!(
            self,
            ErrorKind::EntitySerializationFailure
                | ErrorKind::InvalidHttpResponseContent
                | ErrorKind::PayloadDeserializationFailure
        )
    }

    /// True for failures of the transport class: connection failure, timeout,
    /// or an unexpected HTTP status.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnconfiguredClient
                | ErrorKind::UnexpectedHttpResponse
                | ErrorKind::HttpRequestTimeout
                | ErrorKind::HttpRequestFailure
        )
    }

    pub(crate) fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Error struct that holds the [`ErrorKind`] and message of the reported failure.
#[derive(Debug, PartialEq)]
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
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl Error for ClientError {}

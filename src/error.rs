//! Error types shared by the request and response sides of the client.

use std::fmt;
use thiserror::Error;

/// Errors returned by Premailer operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied value was outside its allowed domain.
    ///
    /// Raised before any network activity.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `submit` was called without a configured url or html source.
    #[error("either the url or html must be provided")]
    MissingSource,

    /// The HTTP round-trip itself failed (DNS, connect, timeout, TLS, ...).
    #[error("transport error [{}]: {message}", .kind.code())]
    Transport {
        kind: TransportKind,
        message: String,
    },

    /// The service answered with a body that is not the expected JSON shape.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

/// Coarse classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The request could not be built (bad URL, bad proxy, bad header).
    Builder,
    Connect,
    Timeout,
    Redirect,
    /// Reading or decoding the response body failed.
    Body,
    Request,
    Other,
}

impl TransportKind {
    /// Stable numeric code for this kind.
    pub fn code(self) -> u16 {
        match self {
            TransportKind::Builder => 1,
            TransportKind::Connect => 2,
            TransportKind::Timeout => 3,
            TransportKind::Redirect => 4,
            TransportKind::Body => 5,
            TransportKind::Request => 6,
            TransportKind::Other => 99,
        }
    }

    fn classify(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            TransportKind::Builder
        } else if err.is_timeout() {
            TransportKind::Timeout
        } else if err.is_connect() {
            TransportKind::Connect
        } else if err.is_redirect() {
            TransportKind::Redirect
        } else if err.is_body() || err.is_decode() {
            TransportKind::Body
        } else if err.is_request() {
            TransportKind::Request
        } else {
            TransportKind::Other
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportKind::Builder => "builder",
            TransportKind::Connect => "connect",
            TransportKind::Timeout => "timeout",
            TransportKind::Redirect => "redirect",
            TransportKind::Body => "body",
            TransportKind::Request => "request",
            TransportKind::Other => "other",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Numeric transport code, if this is a transport failure.
    pub fn transport_code(&self) -> Option<u16> {
        match self {
            Error::Transport { kind, .. } => Some(kind.code()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport {
            kind: TransportKind::classify(&err),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

//! Decoded Premailer service replies and on-demand document fetches.

use crate::client::HttpSettings;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The document was created.
pub const STATUS_SUCCESS: i64 = 201;
/// The service could not read the source document.
pub const STATUS_MISSING_SOURCE_FILE: i64 = 400;
/// The service failed internally.
pub const STATUS_ERROR: i64 = 500;

/// TLS certificate handling for document fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    #[default]
    Verify,
    /// Skip certificate validation. Only meant for self-signed test endpoints.
    NoVerify,
}

impl SslMode {
    /// Name used by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            SslMode::Verify => "verify",
            SslMode::NoVerify => "not_verify",
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SslMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "verify" => Ok(SslMode::Verify),
            "not_verify" => Ok(SslMode::NoVerify),
            other => Err(Error::InvalidArgument(format!(
                "ssl mode must be one of \"verify\" or \"not_verify\", got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    status: Option<Value>,
    message: Option<Value>,
    version: Option<Value>,
    documents: Option<Map<String, Value>>,
    options: Option<Map<String, Value>>,
}

/// A decoded reply to a document submission.
///
/// Immutable once parsed. [`Response::get_html`] and [`Response::get_text`]
/// hit the network on every call; nothing fetched is cached here.
#[derive(Debug, Clone)]
pub struct Response {
    status: Option<i64>,
    message: Option<String>,
    version: Option<String>,
    documents: BTreeMap<String, String>,
    options: Map<String, Value>,
    settings: HttpSettings,
}

impl Response {
    /// Parse a raw JSON reply body.
    ///
    /// Absent fields are reported as `None` (or empty maps) by the accessors.
    ///
    /// # Errors
    /// [`Error::Parse`] if the body is not a JSON object or a field has a
    /// type that cannot be coerced.
    pub fn parse(body: &str) -> Result<Self> {
        Self::parse_with(body, HttpSettings::default())
    }

    pub(crate) fn parse_with(body: &str, settings: HttpSettings) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(Error::Parse(format!("expected a JSON object, got {value}")));
        }
        let raw: RawResponse = serde_json::from_value(value)?;

        let status = raw.status.as_ref().map(coerce_status).transpose()?;
        let message = raw.message.as_ref().and_then(scalar_to_string);
        let version = raw.version.as_ref().and_then(scalar_to_string);
        let documents = raw
            .documents
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(kind, url)| scalar_to_string(&url).map(|url| (kind, url)))
            .collect();

        Ok(Self {
            status,
            message,
            version,
            documents,
            options: raw.options.unwrap_or_default(),
            settings,
        })
    }

    /// Service status code; see [`STATUS_SUCCESS`] and friends.
    pub fn status(&self) -> Option<i64> {
        self.status
    }

    /// `true` when the service reported [`STATUS_SUCCESS`].
    pub fn is_success(&self) -> bool {
        self.status == Some(STATUS_SUCCESS)
    }

    /// Human-readable message from the service.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// API version echoed by the service.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Result URLs keyed by kind (`"html"`, `"txt"`).
    pub fn documents(&self) -> &BTreeMap<String, String> {
        &self.documents
    }

    /// Result URL for one kind, e.g. `"html"`.
    pub fn document_url(&self, kind: &str) -> Option<&str> {
        self.documents.get(kind).map(String::as_str)
    }

    /// Options the service recorded as applied, exactly as echoed.
    ///
    /// The service echoes most values as strings (`"65"`, `"true"`).
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// A single echoed option, verbatim.
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Echoed option rendered as text. Numbers and booleans are stringified.
    pub fn option_str(&self, name: &str) -> Option<String> {
        self.option(name).and_then(scalar_to_string)
    }

    /// Echoed option read as a boolean, from a JSON bool or `"true"`/`"false"`.
    pub fn option_bool(&self, name: &str) -> Option<bool> {
        match self.option(name)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Fetch the processed HTML document.
    ///
    /// # Errors
    /// [`Error::Parse`] if the reply carried no html URL, [`Error::Transport`]
    /// if the GET fails.
    pub async fn get_html(&self, ssl_mode: SslMode) -> Result<String> {
        self.fetch_document("html", ssl_mode).await
    }

    /// Fetch the plain-text rendering.
    ///
    /// # Errors
    /// [`Error::Parse`] if the reply carried no txt URL, [`Error::Transport`]
    /// if the GET fails.
    pub async fn get_text(&self, ssl_mode: SslMode) -> Result<String> {
        self.fetch_document("txt", ssl_mode).await
    }

    async fn fetch_document(&self, kind: &str, ssl_mode: SslMode) -> Result<String> {
        let url = self
            .document_url(kind)
            .ok_or_else(|| Error::Parse(format!("response has no {kind:?} document url")))?;

        tracing::debug!(kind, url, ssl_mode = %ssl_mode, "Fetching Premailer document");

        let http = self.settings.http_client(ssl_mode == SslMode::NoVerify)?;
        let body = http.get(url).send().await?.text().await?;

        tracing::debug!(kind, bytes = body.len(), "Fetched Premailer document");
        Ok(body)
    }
}

impl FromStr for Response {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn coerce_status(value: &Value) -> Result<i64> {
    let status = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    status.ok_or_else(|| Error::Parse(format!("status is not an integer: {value}")))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

//! Request configuration submitted to the Premailer service.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Default wrap width for the plain-text rendering.
pub const DEFAULT_LINE_LENGTH: u32 = 65;
/// Stylesheets are kept unless told otherwise.
pub const DEFAULT_PRESERVE_STYLES: bool = true;
/// `id` attributes are kept by default.
pub const DEFAULT_REMOVE_IDS: bool = false;
/// `class` attributes are kept by default.
pub const DEFAULT_REMOVE_CLASSES: bool = false;
/// Comments are kept by default.
pub const DEFAULT_REMOVE_COMMENTS: bool = false;

/// How the source document is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// The service fetches the document from a URL.
    Url,
    /// The document markup is posted inline.
    Html,
}

impl SourceType {
    /// Form field name carrying the source text.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Url => "url",
            SourceType::Html => "html",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "url" => Ok(SourceType::Url),
            "html" => Ok(SourceType::Html),
            other => Err(Error::InvalidArgument(format!(
                "source type must be one of \"url\" or \"html\", got {other:?}"
            ))),
        }
    }
}

/// A source document: either a URL for the service to fetch or raw markup.
///
/// The kind and the text always travel together, so a half-configured
/// source cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Html(String),
}

impl Source {
    /// How the document is supplied.
    pub fn kind(&self) -> SourceType {
        match self {
            Source::Url(_) => SourceType::Url,
            Source::Html(_) => SourceType::Html,
        }
    }

    /// The URL or markup, exactly as given.
    pub fn text(&self) -> &str {
        match self {
            Source::Url(text) | Source::Html(text) => text,
        }
    }

    fn new(kind: SourceType, text: String) -> Self {
        match kind {
            SourceType::Url => Source::Url(text),
            SourceType::Html => Source::Html(text),
        }
    }
}

/// Remote HTML engine used by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Adapter {
    #[default]
    Hpricot,
    Nokogiri,
}

impl Adapter {
    /// Name the service expects in the `adapter` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Adapter::Hpricot => "hpricot",
            Adapter::Nokogiri => "nokogiri",
        }
    }
}

impl fmt::Display for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Adapter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hpricot" => Ok(Adapter::Hpricot),
            "nokogiri" => Ok(Adapter::Nokogiri),
            other => Err(Error::InvalidArgument(format!(
                "adapter must be one of \"hpricot\" or \"nokogiri\", got {other:?}"
            ))),
        }
    }
}

/// Options for a single Premailer submission.
///
/// Every field except the source has a usable default, see [`Options::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    source: Option<Source>,
    adapter: Option<Adapter>,
    base_url: String,
    line_length: u32,
    link_query_string: String,
    preserve_styles: bool,
    remove_ids: bool,
    remove_classes: bool,
    remove_comments: bool,
}

impl Default for Options {
    /// Defaults:
    /// - No source
    /// - `adapter = hpricot`
    /// - Empty base URL and link query string
    /// - `line_length = 65`
    /// - Styles preserved; ids, classes and comments kept
    fn default() -> Self {
        Self {
            source: None,
            adapter: Some(Adapter::default()),
            base_url: String::new(),
            line_length: DEFAULT_LINE_LENGTH,
            link_query_string: String::new(),
            preserve_styles: DEFAULT_PRESERVE_STYLES,
            remove_ids: DEFAULT_REMOVE_IDS,
            remove_classes: DEFAULT_REMOVE_CLASSES,
            remove_comments: DEFAULT_REMOVE_COMMENTS,
        }
    }
}

impl Options {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configured source document, if any.
    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    /// Kind of the configured source.
    pub fn source_type(&self) -> Option<SourceType> {
        self.source.as_ref().map(Source::kind)
    }

    /// URL or markup of the configured source.
    pub fn source_text(&self) -> Option<&str> {
        self.source.as_ref().map(Source::text)
    }

    /// Set the source document from string-typed parts.
    ///
    /// Passing `None` for either argument clears the source, whatever the
    /// other argument holds. Otherwise `kind` must be `"url"` or `"html"`;
    /// the text is stored as given.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] when `kind` is not a known source type.
    /// The current source is left untouched in that case.
    pub fn set_source(&mut self, kind: Option<&str>, text: Option<&str>) -> Result<&mut Self> {
        match (kind, text) {
            (Some(kind), Some(text)) => {
                let kind = kind.parse::<SourceType>()?;
                self.source = Some(Source::new(kind, text.to_string()));
            }
            _ => self.source = None,
        }
        Ok(self)
    }

    /// Set (or clear, with `None`) the source document.
    pub fn with_source(&mut self, source: Option<Source>) -> &mut Self {
        self.source = source;
        self
    }

    /// Shorthand for a URL source.
    pub fn url(&mut self, url: impl Into<String>) -> &mut Self {
        self.with_source(Some(Source::Url(url.into())))
    }

    /// Shorthand for an inline HTML source.
    pub fn html(&mut self, html: impl Into<String>) -> &mut Self {
        self.with_source(Some(Source::Html(html.into())))
    }

    /// Forget the configured source.
    pub fn clear_source(&mut self) -> &mut Self {
        self.with_source(None)
    }

    /// HTML engine requested from the service; `None` sends an empty value.
    pub fn adapter(&self) -> Option<Adapter> {
        self.adapter
    }

    /// Set the adapter by name; `None` leaves the adapter unset.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for names other than `"hpricot"` and `"nokogiri"`.
    pub fn set_adapter(&mut self, adapter: Option<&str>) -> Result<&mut Self> {
        self.adapter = adapter.map(str::parse::<Adapter>).transpose()?;
        Ok(self)
    }

    /// Set (or clear, with `None`) the adapter.
    pub fn with_adapter(&mut self, adapter: Option<Adapter>) -> &mut Self {
        self.adapter = adapter;
        self
    }

    /// Base URL for relative links; empty when unset.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL for resolving relative links. Empty means "not sent".
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into();
        self
    }

    /// Wrap width of the plain-text rendering.
    pub fn line_length(&self) -> u32 {
        self.line_length
    }

    /// Set the wrap width of the plain-text rendering.
    pub fn set_line_length(&mut self, line_length: u32) -> &mut Self {
        self.line_length = line_length;
        self
    }

    /// Query string appended to links; empty when unset.
    pub fn link_query_string(&self) -> &str {
        &self.link_query_string
    }

    /// Query string appended to every link in the output.
    pub fn set_link_query_string(&mut self, link_query_string: impl Into<String>) -> &mut Self {
        self.link_query_string = link_query_string.into();
        self
    }

    /// Whether stylesheet links and style elements are kept.
    pub fn preserve_styles(&self) -> bool {
        self.preserve_styles
    }

    /// Keep `<link rel="stylesheet">` and `<style>` elements.
    pub fn set_preserve_styles(&mut self, preserve_styles: bool) -> &mut Self {
        self.preserve_styles = preserve_styles;
        self
    }

    /// Whether `id` attributes are stripped.
    pub fn remove_ids(&self) -> bool {
        self.remove_ids
    }

    /// Strip `id` attributes from the output.
    pub fn set_remove_ids(&mut self, remove_ids: bool) -> &mut Self {
        self.remove_ids = remove_ids;
        self
    }

    /// Whether `class` attributes are stripped.
    pub fn remove_classes(&self) -> bool {
        self.remove_classes
    }

    /// Strip `class` attributes from the output.
    pub fn set_remove_classes(&mut self, remove_classes: bool) -> &mut Self {
        self.remove_classes = remove_classes;
        self
    }

    /// Whether HTML comments are stripped.
    pub fn remove_comments(&self) -> bool {
        self.remove_comments
    }

    /// Strip HTML comments from the output.
    pub fn set_remove_comments(&mut self, remove_comments: bool) -> &mut Self {
        self.remove_comments = remove_comments;
        self
    }

    /// Build the ordered form fields for a submission.
    ///
    /// Values are unencoded; the form encoder percent-encodes them once.
    /// `base_url` is only present when non-empty: the service blanks every
    /// relative link when it receives an empty one.
    ///
    /// # Errors
    /// [`Error::MissingSource`] when no source is configured.
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>> {
        let source = self.source.as_ref().ok_or(Error::MissingSource)?;

        let mut fields = vec![
            (source.kind().as_str(), source.text().to_string()),
            (
                "adapter",
                self.adapter.map(|a| a.as_str()).unwrap_or_default().to_string(),
            ),
            ("line_length", self.line_length.to_string()),
            ("link_query_string", self.link_query_string.clone()),
            ("preserve_styles", self.preserve_styles.to_string()),
            ("remove_ids", self.remove_ids.to_string()),
            ("remove_classes", self.remove_classes.to_string()),
            ("remove_comments", self.remove_comments.to_string()),
        ];

        if !self.base_url.is_empty() {
            fields.push(("base_url", self.base_url.clone()));
        }

        Ok(fields)
    }
}

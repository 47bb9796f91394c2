//! # Premailer Client
//! Asynchronous wrapper around the Premailer HTML-email preparation web service: submit a URL or raw HTML with formatting [`Options`] through a [`Client`], then read the decoded [`Response`] and fetch the processed HTML and plain-text documents it points to.
//!
//! ## Audience and uses
//! For Rust developers who send HTML email and want the Premailer treatment (CSS inlined into `style` attributes, relative links made absolute, a plain-text alternative) without running the service themselves. Configure with [`ClientBuilder`] and [`Options`], submit, then pull the results.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Each call is a single request/response cycle awaited to completion: nothing is retried, queued, or cached.
//!
//! ## Out of scope
//! No HTML parsing or CSS inlining happens locally; the remote service does all of it. The crate inherits the service's availability and limits.
//!
//! ## Errors
//! Bad option values surface as [`Error::InvalidArgument`] and an unconfigured source as [`Error::MissingSource`], both before any network traffic. Network failures become [`Error::Transport`]; replies that are not the documented JSON shape become [`Error::Parse`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Requests and decoded statuses are reported through [`tracing`]. Install a subscriber in your application to see them.
//!
//! ## Example
//! ```no_run
//! use premailer_client::{Client, SslMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), premailer_client::Error> {
//!     let mut client = Client::new()?;
//!     client
//!         .options_mut()
//!         .url("http://dialect.ca/premailer-tests/base.html")
//!         .set_remove_comments(true);
//!
//!     client.submit().await?;
//!     if let Some(response) = client.response() {
//!         println!("{:?}: {:?}", response.status(), response.message());
//!         println!("{}", response.get_html(SslMode::Verify).await?);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod options;
mod response;

pub use client::{Client, ClientBuilder};
pub use error::{Error, TransportKind};
pub use options::{
    Adapter, DEFAULT_LINE_LENGTH, DEFAULT_PRESERVE_STYLES, DEFAULT_REMOVE_CLASSES,
    DEFAULT_REMOVE_COMMENTS, DEFAULT_REMOVE_IDS, Options, Source, SourceType,
};
pub use response::{
    Response, STATUS_ERROR, STATUS_MISSING_SOURCE_FILE, STATUS_SUCCESS, SslMode,
};

/// Result type alias for Premailer operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

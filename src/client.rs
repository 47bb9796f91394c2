//! Premailer async client implementation.

use crate::{Options, Response, Result};
use reqwest::header::ACCEPT;
use std::time::Duration;

/// Async client for the Premailer email-preparation service.
///
/// Holds the request [`Options`] and, after [`Client::submit`], the raw and
/// decoded reply of the most recent submission.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    settings: HttpSettings,
    options: Options,
    response: Option<Response>,
    response_text: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the public Premailer endpoint with default options.
    ///
    /// # Examples
    /// ```no_run
    /// # use premailer_client::Client;
    /// # fn main() -> Result<(), premailer_client::Error> {
    /// let mut client = Client::new()?;
    /// client.options_mut().url("https://example.com/newsletter.html");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// The service URL submissions are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.settings.proxy.as_deref()
    }

    /// Request options used by the next [`Client::submit`].
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Mutable access to the request options.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Decoded reply of the last successful submission.
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Raw body of the last submission that reached the service.
    ///
    /// Kept even when the body could not be decoded.
    pub fn response_text(&self) -> Option<&str> {
        self.response_text.as_deref()
    }

    /// Submit the configured document to Premailer.
    ///
    /// Replaces any previously stored reply. HTTP error statuses are not
    /// treated as failures: the service reports them in its JSON body, see
    /// [`Response::status`].
    ///
    /// # Errors
    /// - [`crate::Error::MissingSource`] if no source is configured; no request is made.
    /// - [`crate::Error::Transport`] if the POST fails.
    /// - [`crate::Error::Parse`] if the reply is not the expected JSON object.
    ///
    /// # Examples
    /// ```no_run
    /// # use premailer_client::{Client, SslMode};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), premailer_client::Error> {
    /// let mut client = Client::new()?;
    /// client.options_mut().html("<html><body><p>Hello</p></body></html>");
    ///
    /// let response = client.submit().await?.response().expect("decoded reply");
    /// if response.is_success() {
    ///     println!("{}", response.get_text(SslMode::Verify).await?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit(&mut self) -> Result<&mut Self> {
        let form = self.options.form_fields()?;

        tracing::debug!(
            endpoint = %self.endpoint,
            source_type = ?self.options.source_type(),
            adapter = ?self.options.adapter(),
            "Submitting document to Premailer"
        );

        let text = self
            .http
            .post(&self.endpoint)
            .form(&form)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .text()
            .await?;

        let parsed = Response::parse_with(&text, self.settings.clone());
        self.response_text = Some(text);
        self.response = None;
        let response = parsed?;

        match response.status() {
            Some(status) if response.is_success() => {
                tracing::info!(status, version = ?response.version(), "Premailer document created");
            }
            status => {
                tracing::warn!(?status, message = ?response.message(), "Premailer reported a failure");
            }
        }

        self.response = Some(response);
        Ok(self)
    }
}

const PREMAILER_URL: &str = "http://premailer.dialect.ca/api/0.1/documents";
const USER_AGENT_VALUE: &str = concat!("premailer-client/", env!("CARGO_PKG_VERSION"));

/// Transport settings shared by the submit call and the document fetches.
#[derive(Debug, Clone)]
pub(crate) struct HttpSettings {
    pub(crate) proxy: Option<String>,
    pub(crate) user_agent: String,
    pub(crate) timeout: Option<Duration>,
    pub(crate) connect_timeout: Option<Duration>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            proxy: None,
            user_agent: USER_AGENT_VALUE.to_string(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl HttpSettings {
    /// Build a reqwest client from these settings.
    ///
    /// Idle connections are never kept, so each request's socket is closed
    /// once its body has been read.
    pub(crate) fn http_client(&self, danger_accept_invalid_certs: bool) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .user_agent(self.user_agent.as_str())
            .danger_accept_invalid_certs(danger_accept_invalid_certs);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(builder.build()?)
    }
}

/// Builder for configuring a Premailer client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    endpoint: String,
    settings: HttpSettings,
    options: Options,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Public Premailer endpoint
    /// - No proxy, no timeouts beyond reqwest's own
    /// - `premailer-client/<version>` user agent
    /// - [`Options::default`]
    pub fn new() -> Self {
        Self {
            endpoint: PREMAILER_URL.to_string(),
            settings: HttpSettings::default(),
            options: Options::default(),
        }
    }

    /// Override the service endpoint URL.
    ///
    /// Useful for testing against a mock service or a self-hosted Premailer.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080" or "socks5://127.0.0.1:1080").
    ///
    /// Applies to the submission and to document fetches.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.settings.proxy = Some(proxy.into());
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings.user_agent = user_agent.into();
        self
    }

    /// Total time allowed for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = Some(timeout);
        self
    }

    /// Time allowed for establishing each connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = Some(timeout);
        self
    }

    /// Start from these request options instead of the defaults.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Build the client.
    ///
    /// No network traffic happens here.
    ///
    /// # Errors
    /// [`crate::Error::Transport`] if the proxy URL or TLS backend cannot be
    /// set up.
    pub fn build(self) -> Result<Client> {
        let http = self.settings.http_client(false)?;

        Ok(Client {
            http,
            endpoint: self.endpoint,
            settings: self.settings,
            options: self.options,
            response: None,
            response_text: None,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

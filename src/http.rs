//! Executing HTTP requests.
//!
//! Every request is made with a brand-new client that lives only as long as
//! the request itself. See [`HTTPClientFactory::perform`].

use log::trace;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// The result of an HTTP request.
pub type HTTPResult<T> = Result<T, HTTPError>;

/// Indicates an error has occurred when making an HTTP call.
#[derive(Debug, Error)]
pub enum HTTPError {
    /// The HTTP client could not be created.
    #[error("Error creating HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// An error that occurred while making an HTTP request.
    #[error("Error while making HTTP request: {0}")]
    Request(#[source] reqwest::Error),

    /// An error retrieving the body of a response.
    #[error("Error retrieving body of HTTP response: {0}")]
    Body(#[source] reqwest::Error),

    /// The body of a response was not the expected JSON document.
    #[error("Error deserializing body of HTTP response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// An unsuccessful HTTP status code in an HTTP response.
    #[error("Request returned HTTP {0}")]
    Http(StatusCode),
}

/// Creates short-lived HTTP clients.
#[derive(Clone, Debug)]
pub struct HTTPClientFactory {
    user_agent: String,
    timeout: Option<Duration>,
}

impl HTTPClientFactory {
    /// Creates a factory whose clients identify themselves as version
    /// `version` of `name`.
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            user_agent: format!("{name} v{version}"),
            timeout: None,
        }
    }

    /// Applies `timeout` to every request made by clients from this
    /// factory. `None` keeps the HTTP client's default.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The user agent sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Creates a new HTTP client.
    ///
    /// Clients do not keep idle connections around, so nothing outlives the
    /// client once it is dropped.
    pub fn create(&self) -> HTTPResult<Client> {
        let builder = ClientBuilder::new()
            .user_agent(&self.user_agent)
            .pool_max_idle_per_host(0);
        let builder = match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        builder.build().map_err(HTTPError::Client)
    }

    /// Creates a new client, hands it to `request`, and returns whatever
    /// `request` produces.
    ///
    /// The client is owned by the request and is released when the request
    /// completes, whether it succeeded or failed.
    pub async fn perform<T, F, Fut>(&self, request: F) -> HTTPResult<T>
    where
        F: FnOnce(Client) -> Fut,
        Fut: Future<Output = HTTPResult<T>>,
    {
        let client = self.create()?;
        trace!("created HTTP client");
        let result = request(client).await;
        trace!("released HTTP client");
        result
    }
}

impl Default for HTTPClientFactory {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

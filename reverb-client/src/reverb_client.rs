use crate::error::Error;
use reqwest::{blocking::Response, StatusCode};
use reverb::CapturedRequest;
use serde::Deserialize;

type ReqwestClient = reqwest::blocking::Client;

const DEFAULT_DOMAIN_NAME: &str = "http://localhost:8080";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Builder used to build a ReverbClient instance
#[derive(Debug, Clone, Default)]
pub struct ReverbClientBuilder {
    domain_name: Option<String>,
    http_client: Option<ReqwestClient>,
}

impl ReverbClientBuilder {
    /// Create a new ReverbClientBuilder instance.
    pub fn new() -> Self {
        Self {
            domain_name: None,
            http_client: None,
        }
    }

    /// Use the given domain_name when building a ReverbClient instance.
    ///
    /// # Arguments
    /// `domain_name` - scheme, host and port of a running request bin,
    ///     e.g. `http://localhost:8080`.
    ///
    /// # Returns
    /// This builder.
    pub fn with_domain_name<T: Into<String>>(mut self, domain_name: T) -> Self {
        self.domain_name = Some(domain_name.into());
        self
    }

    /// Use the given blocking reqwest client when building a ReverbClient instance.
    ///
    /// # Arguments
    /// `client` - a pre-configured blocking reqwest client.
    ///
    /// # Returns
    /// This builder.
    pub fn with_http_client(mut self, client: ReqwestClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Consume the builder and create a ReverbClient instance using all of the previously
    /// configured values or their defaults.
    pub fn build(mut self) -> ReverbClient {
        ReverbClient {
            http: self.http_client.take().unwrap_or_default(),
            domain_name: self
                .domain_name
                .take()
                .map(|domain_name| domain_name.trim_end_matches('/').to_string())
                .unwrap_or_else(|| String::from(DEFAULT_DOMAIN_NAME)),
        }
    }
}

/// Reads back and flushes the requests captured by a request bin.
#[derive(Debug, Clone)]
pub struct ReverbClient {
    http: ReqwestClient,
    domain_name: String,
}

impl ReverbClient {
    /// Create a ReverbClient talking to `http://localhost:8080`.
    pub fn new() -> Self {
        ReverbClientBuilder::new().build()
    }

    /// Lists every captured request, oldest first.
    pub fn list(&self) -> Result<Vec<CapturedRequest>, Error> {
        let response = self.http.get(self.url("/requests")).send()?;

        Ok(Self::check_status(response, None)?.json()?)
    }

    /// Gets a single captured request.
    ///
    /// # Arguments
    /// `id` - the id the request bin assigned on capture.
    ///
    /// # Returns
    /// The captured request, or `Error::NotFound` once it has been evicted or flushed
    /// (or was never captured).
    pub fn get(&self, id: u64) -> Result<CapturedRequest, Error> {
        let response = self
            .http
            .get(self.url(&format!("/requests/{}", id)))
            .send()?;

        Ok(Self::check_status(response, Some(id))?.json()?)
    }

    /// Gets the exact body bytes of a captured request.
    pub fn body(&self, id: u64) -> Result<Vec<u8>, Error> {
        let response = self
            .http
            .get(self.url(&format!("/requests/{}/body", id)))
            .send()?;

        Ok(Self::check_status(response, Some(id))?.bytes()?.to_vec())
    }

    /// Removes every captured request.
    pub fn flush(&self) -> Result<(), Error> {
        let response = self.http.delete(self.url("/requests")).send()?;
        Self::check_status(response, None)?;

        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.domain_name, path)
    }

    fn check_status(response: Response, id: Option<u64>) -> Result<Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text()?;
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => Err(Error::NotFound(id, message)),
            _ => Err(Error::UnexpectedStatus(status.as_u16(), message)),
        }
    }
}

impl Default for ReverbClient {
    fn default() -> Self {
        Self::new()
    }
}

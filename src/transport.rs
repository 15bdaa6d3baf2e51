use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE};
use crate::error::GroqError;

/// Status and body of a completed exchange, uninterpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// One authenticated JSON POST. Implementations must not retry.
pub trait Transport {
    fn post(&self, url: &str, api_key: &str, body: String) -> Result<RawResponse, GroqError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, url: &str, api_key: &str, body: String) -> Result<RawResponse, GroqError> {
        (**self).post(url, api_key, body)
    }
}

/// Blocking reqwest client, reused across calls for its connection pool.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, api_key: &str, body: String) -> Result<RawResponse, GroqError> {
        let res = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_LANGUAGE, "pt-BR")
            .body(body)
            .send()?;

        let status = res.status().as_u16();
        let body = res.text()?;
        Ok(RawResponse { status, body })
    }
}

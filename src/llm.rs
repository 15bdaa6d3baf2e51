use serde_json::Value;
use tracing::{debug, error};
use crate::config::Config;
use crate::error::GroqError;
use crate::message::{ChatMessage, ChatRequest, Choice, MODEL};
use crate::transport::{HttpTransport, RawResponse, Transport};

/// Answer handed to callers whenever the API could not produce one.
pub const FALLBACK_MESSAGE: &str = "Erro ao processar a solicitação.";

pub fn artist_prompt(artist_name: &str) -> String {
    format!(
        "Me Responda em Português Brasil e fale da carreira e liste 3 musicas do artista: {}",
        artist_name
    )
}

pub fn build_request(artist_name: &str) -> ChatRequest {
    ChatRequest {
        model: MODEL.to_string(),
        messages: vec![ChatMessage::user(artist_prompt(artist_name))],
    }
}

/// Pulls `choices[0].message.content` out of a response.
/// Anything but a 200 is reported as [`GroqError::Status`].
pub fn extract(status: u16, body: &str) -> Result<String, GroqError> {
    if status != 200 {
        return Err(GroqError::Status { status, body: body.to_string() });
    }

    let mut root: Value = serde_json::from_str(body).map_err(|e| GroqError::Parse(e.to_string()))?;
    let choices = root
        .get_mut("choices")
        .map(Value::take)
        .ok_or_else(|| GroqError::Parse("missing `choices` field".to_string()))?;
    let choices: Vec<Choice> = serde_json::from_value(choices).map_err(|e| GroqError::Parse(e.to_string()))?;

    choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| GroqError::Parse("`choices` is empty".to_string()))
}

/// Outcome of a lookup that got as far as the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    Found(String),
    Unavailable,
}

impl Lookup {
    pub fn into_text(self) -> String {
        match self {
            Lookup::Found(text) => text,
            Lookup::Unavailable => FALLBACK_MESSAGE.to_string(),
        }
    }
}

pub struct GroqClient<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl GroqClient<HttpTransport> {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> GroqClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    /// Checks the key, serializes `request` and performs a single POST.
    pub fn send(&self, request: &ChatRequest) -> Result<RawResponse, GroqError> {
        let api_key = self.config.api_key().ok_or(GroqError::MissingApiKey)?;
        let json = serde_json::to_string(request).map_err(|e| GroqError::Serialization(e.to_string()))?;

        if self.config.debug {
            let pretty = serde_json::to_string_pretty(request).unwrap_or_else(|_| json.clone());
            debug!("[API request] {}\n{}", self.config.api_url, pretty);
        }

        self.transport.post(&self.config.api_url, api_key, json)
    }

    pub fn lookup(&self, texto: &str) -> Result<Lookup, GroqError> {
        let request = build_request(texto);
        let result = self
            .send(&request)
            .and_then(|res| extract(res.status, &res.body));

        match result {
            Ok(text) => Ok(Lookup::Found(text)),
            Err(e) if e.is_recoverable() => {
                error!("Error sending request to the API: {}", e);
                Ok(Lookup::Unavailable)
            }
            Err(e) => Err(e),
        }
    }

    /// Artist biography and songs, or [`FALLBACK_MESSAGE`] when the API fails.
    pub fn obter_informacao(&self, texto: &str) -> Result<String, GroqError> {
        self.lookup(texto).map(Lookup::into_text)
    }
}

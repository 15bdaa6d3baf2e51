//! Artist biographies and song lists from the Groq chat completions API.
//!
//! ```no_run
//! use soundbio::{config::load_config, GroqClient};
//!
//! let client = GroqClient::new(load_config());
//! println!("{}", client.obter_informacao("Milton Nascimento")?);
//! # Ok::<(), soundbio::GroqError>(())
//! ```

pub mod config;
pub mod error;
pub mod llm;
pub mod message;
pub mod transport;

pub use config::Config;
pub use error::GroqError;
pub use llm::{build_request, extract, GroqClient, Lookup, FALLBACK_MESSAGE};
pub use message::{ChatMessage, ChatRequest, Choice};
pub use transport::{HttpTransport, RawResponse, Transport};

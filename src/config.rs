use std::path::{Path, PathBuf};
use json_comments::StripComments;
use serde::{Serialize, Deserialize};
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    pub debug: bool,
    pub api_url: String,
    #[serde(skip)] // Only ever read from GROQ_API_KEY
    pub api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug: false,
            api_url: DEFAULT_API_URL.to_string(),
            api_key: "".to_string(),
        }
    }
}

impl Config {
    /// Key as sent in the `Authorization` header, if one is configured.
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }
}

pub fn get_config_path() -> PathBuf {
    config_path_from(|name| std::env::var(name).ok())
}

fn config_path_from<F>(env: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = env("SOUNDBIO_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    let mut config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config_dir.push("soundbio");
    config_dir.push("soundbio.config.json");
    config_dir
}

pub fn load_config() -> Config {
    let config_path = get_config_path();
    write_default_config(&config_path);
    load_config_from(&config_path, |name| std::env::var(name).ok())
}

/// Reads `path` over the defaults, then applies environment overrides from `env`.
pub fn load_config_from<F>(path: &Path, env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::default();

    if let Ok(json) = std::fs::read_to_string(path) {
        let stripped = StripComments::new(json.as_bytes());
        match serde_json::from_reader(stripped) {
            Ok(file_config) => config = file_config,
            Err(e) => warn!("Failed to parse {}: {}. Using default config", path.display(), e),
        }
    }

    if let Some(debug) = env("SOUNDBIO_DEBUG") { config.debug = debug.to_lowercase() == "true"; }
    if let Some(api_url) = env("SOUNDBIO_API_URL") { config.api_url = api_url; }
    if let Some(api_key) = env("GROQ_API_KEY") { config.api_key = api_key; }

    config
}

pub(crate) fn write_default_config(config_path: &Path) {
    if config_path.exists() {
        return;
    }
    let Some(parent) = config_path.parent() else { return };
    if let Err(e) = std::fs::create_dir_all(parent) {
        warn!("Failed to create config directory '{}': {}", parent.display(), e);
        return;
    }
    let default_json = serde_json::to_string_pretty(&Config::default()).unwrap_or_else(|_| "{}".to_string());
    match std::fs::write(config_path, default_json) {
        Ok(()) => info!("Created default config at '{}'", config_path.display()),
        Err(e) => warn!("Failed to write default config to '{}': {}", config_path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.json"), env_of(&[]));
        assert!(!config.debug);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn file_accepts_comments_and_env_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soundbio.config.json");
        std::fs::write(
            &path,
            r#"{
                // local proxy
                "debug": true,
                "api_url": "http://localhost:9000/chat",
                "api_key": "ignored-from-file"
            }"#,
        )
        .unwrap();

        let config = load_config_from(&path, env_of(&[]));
        assert!(config.debug);
        assert_eq!(config.api_url, "http://localhost:9000/chat");
        assert_eq!(config.api_key(), None);

        let config = load_config_from(&path, env_of(&[("GROQ_API_KEY", "from-env"), ("SOUNDBIO_DEBUG", "FALSE")]));
        assert!(!config.debug);
        assert_eq!(config.api_key(), Some("from-env"));
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = load_config_from(&path, env_of(&[("SOUNDBIO_API_URL", "http://example.test")]));
        assert_eq!(config.api_url, "http://example.test");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            load_config_from(&path, env_of(&[]));
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "output: {output}");
        assert!(output.contains("Failed to parse"), "output: {output}");
        assert!(output.contains("broken.json"), "output: {output}");
    }

    #[test]
    fn default_file_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("soundbio").join("soundbio.config.json");

        write_default_config(&path);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("api_key"));
        let parsed: Config = serde_json::from_str(&written).unwrap();
        assert!(!parsed.debug);
        assert_eq!(parsed.api_url, DEFAULT_API_URL);

        std::fs::write(&path, r#"{"debug": true, "api_url": "http://kept"}"#).unwrap();
        write_default_config(&path);
        let config = load_config_from(&path, env_of(&[]));
        assert!(config.debug);
        assert_eq!(config.api_url, "http://kept");
    }

    #[test]
    fn unwritable_parent_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("soundbio.config.json");

        write_default_config(&path);
        assert!(!path.exists());
        assert_eq!(load_config_from(&path, env_of(&[])).api_url, DEFAULT_API_URL);
    }

    #[test]
    fn config_path_honours_override() {
        let path = config_path_from(env_of(&[("SOUNDBIO_CONFIG_PATH", "/tmp/custom.json")]));
        assert_eq!(path, PathBuf::from("/tmp/custom.json"));

        let path = config_path_from(env_of(&[]));
        assert!(path.ends_with("soundbio/soundbio.config.json"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = Config { api_key: "   ".into(), ..Config::default() };
        assert_eq!(config.api_key(), None);
    }
}

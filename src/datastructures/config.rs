use std::{env, fmt};
use tracing::warn;

pub const PAPER_BASE_URL: &str = "https://paper-api.alpaca.markets";
pub const LIVE_BASE_URL: &str = "https://api.alpaca.markets";
pub const DATA_BASE_URL: &str = "https://data.alpaca.markets";
pub const DEFAULT_DEMO_SYMBOL: &str = "AAPL";

const API_KEY_VAR: &str = "API_KEY";
const API_SECRET_VAR: &str = "API_SECRET";

/// Static API-key pair sent with every request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub key_id: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials {
            key_id: key_id.into(),
            secret: secret.into(),
        }
    }

    /// Reads `API_KEY` / `API_SECRET` from the process environment. Load any
    /// `.env` file before calling this.
    pub fn from_env() -> Self {
        Credentials::from_lookup(|name| env::var(name).ok())
    }

    /// Missing values become empty strings; the remote service rejects them.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name).unwrap_or_else(|| {
                warn!("{name} is not set, requests will be rejected");
                String::new()
            })
        };

        Credentials {
            key_id: read(API_KEY_VAR),
            secret: read(API_SECRET_VAR),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &redact(&self.key_id))
            .field("secret", &redact(&self.secret))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/* Immutable configuration object. */
#[derive(Debug, Clone)]
pub struct Config {
    pub alpaca_base_url: String,
    pub alpaca_data_url: String,
    pub credentials: Credentials,
    /// Ticker used by the stubbed sell/close keys.
    pub demo_symbol: String,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/* Creates the final config object. Unset fields fall back to paper trading. */
#[derive(Default)]
pub struct ConfigBuilder {
    alpaca_base_url: Option<String>,
    alpaca_data_url: Option<String>,
    credentials: Credentials,
    demo_symbol: Option<String>,
}

impl ConfigBuilder {
    /// Determines whether orders go to the real or the paper account.
    pub fn alpaca_base_url(mut self, alpaca_base_url: String) -> Self {
        self.alpaca_base_url = Some(alpaca_base_url);
        self
    }

    pub fn alpaca_data_url(mut self, alpaca_data_url: String) -> Self {
        self.alpaca_data_url = Some(alpaca_data_url);
        self
    }

    pub fn alpaca_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn demo_symbol(mut self, demo_symbol: String) -> Self {
        self.demo_symbol = Some(demo_symbol);
        self
    }

    pub fn build(self) -> Config {
        Config {
            alpaca_base_url: self
                .alpaca_base_url
                .unwrap_or_else(|| PAPER_BASE_URL.to_string()),
            alpaca_data_url: self
                .alpaca_data_url
                .unwrap_or_else(|| DATA_BASE_URL.to_string()),
            credentials: self.credentials,
            demo_symbol: self
                .demo_symbol
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_DEMO_SYMBOL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_paper_trading() {
        let config = Config::builder().build();
        assert_eq!(config.alpaca_base_url, PAPER_BASE_URL);
        assert_eq!(config.alpaca_data_url, DATA_BASE_URL);
        assert_eq!(config.demo_symbol, "AAPL");
        assert_eq!(config.credentials, Credentials::default());
    }

    #[test]
    fn builder_keeps_overrides() {
        let config = Config::builder()
            .alpaca_base_url(LIVE_BASE_URL.to_string())
            .alpaca_credentials(Credentials::new("key", "secret"))
            .demo_symbol(" msft ".to_string())
            .build();

        assert_eq!(config.alpaca_base_url, LIVE_BASE_URL);
        assert_eq!(config.credentials, Credentials::new("key", "secret"));
        assert_eq!(config.demo_symbol, "MSFT");
    }

    #[test]
    fn credentials_read_both_variables() {
        let credentials = Credentials::from_lookup(|name| match name {
            "API_KEY" => Some("PKTEST".to_string()),
            "API_SECRET" => Some("s3cret".to_string()),
            _ => None,
        });
        assert_eq!(credentials, Credentials::new("PKTEST", "s3cret"));
    }

    #[test]
    fn missing_credentials_become_empty() {
        let credentials = Credentials::from_lookup(|_| None);
        assert_eq!(credentials, Credentials::default());

        let credentials = Credentials::from_lookup(|name| {
            (name == "API_KEY").then(|| "PKTEST".to_string())
        });
        assert_eq!(credentials, Credentials::new("PKTEST", ""));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!("{:?}", Credentials::new("PKTEST", "hunter2"));
        assert!(!rendered.contains("PKTEST"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));

        let rendered = format!("{:?}", Credentials::default());
        assert!(rendered.contains("<unset>"));
    }
}

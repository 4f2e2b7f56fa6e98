use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Similarity threshold for requests that do not carry their own.
    /// Legal range is (0, 1); 0 and 1 degenerate to everything/nothing.
    pub threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

const DEFAULT_THRESHOLD: f64 = 0.7;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            matching: MatchingConfig {
                threshold: DEFAULT_THRESHOLD,
            },
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            matching: MatchingConfig {
                threshold: std::env::var("MATCH_THRESHOLD")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .filter(|t| (0.0..=1.0).contains(t))
                    .unwrap_or(DEFAULT_THRESHOLD),
            },
        }
    }
}

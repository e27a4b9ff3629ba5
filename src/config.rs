use std::env;
use std::time::Duration;

pub const DEFAULT_PLAYERS_SOURCE: &str = "players.json";
pub const DEFAULT_MODAL_CLOSE_MS: u64 = 300;
const MAX_MODAL_CLOSE_MS: u64 = 5_000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub players_source: String,
    pub modal_close_delay: Duration,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players_source: DEFAULT_PLAYERS_SOURCE.to_string(),
            modal_close_delay: Duration::from_millis(DEFAULT_MODAL_CLOSE_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads `PLAYERS_SOURCE`, `MODAL_CLOSE_MS` and `HTTP_TIMEOUT_SECS`.
    /// A non-empty `source_arg` wins over `PLAYERS_SOURCE`.
    pub fn from_env(source_arg: Option<String>) -> Self {
        let players_source = source_arg
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                env::var("PLAYERS_SOURCE")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
            })
            .unwrap_or_else(|| DEFAULT_PLAYERS_SOURCE.to_string());
        let close_ms = env::var("MODAL_CLOSE_MS")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_MODAL_CLOSE_MS)
            .min(MAX_MODAL_CLOSE_MS);
        let timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
            .max(1);

        Self {
            players_source: players_source.trim().to_string(),
            modal_close_delay: Duration::from_millis(close_ms),
            http_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: user.db
pub static DATABASE_PATH: Lazy<String> = Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "user.db".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server (local telegram-bot-api)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("BOT_API_URL"));

/// API key for v6.exchangerate-api.com
/// Read from EXCHANGE_RATE_API_KEY environment variable
pub static EXCHANGE_RATE_API_KEY: Lazy<Option<String>> = Lazy::new(|| non_empty_var("EXCHANGE_RATE_API_KEY"));

/// Endpoint returning the USD-based rate table
/// EXCHANGE_RATE_URL wins; otherwise built from EXCHANGE_RATE_API_KEY.
/// `None` means rate lookups are not configured.
pub static EXCHANGE_RATE_URL: Lazy<Option<String>> = Lazy::new(|| {
    non_empty_var("EXCHANGE_RATE_URL").or_else(|| EXCHANGE_RATE_API_KEY.as_deref().map(exchange_rate_url_for_key))
});

/// Builds the `latest/USD` endpoint for an exchangerate-api key
pub fn exchange_rate_url_for_key(key: &str) -> String {
    format!("https://v6.exchangerate-api.com/v6/{}/latest/USD", key)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Database configuration
pub mod database {
    use super::Duration;

    /// Maximum number of pooled SQLite connections
    pub const MAX_POOL_SIZE: u32 = 10;

    /// How long a connection waits on a locked database (in seconds)
    pub const BUSY_TIMEOUT_SECS: u64 = 30;

    /// Busy timeout duration
    pub fn busy_timeout() -> Duration {
        Duration::from_secs(BUSY_TIMEOUT_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for HTTP requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Retry configuration
pub mod retry {
    use super::Duration;

    /// Maximum number of retries for dispatcher reconnection
    pub const MAX_DISPATCHER_RETRIES: u32 = 5;

    /// Delay between dispatcher retry attempts (in seconds)
    pub const DISPATCHER_RETRY_DELAY_SECS: u64 = 5;

    /// Dispatcher retry delay duration
    pub fn dispatcher_delay() -> Duration {
        Duration::from_secs(DISPATCHER_RETRY_DELAY_SECS)
    }
}

//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "products", version, about = "Browse, search and edit a remote product list")]
pub struct Args {
    /// Base URL of the service exposing `/posts`.
    #[arg(long, env = "PRODUCTS_API_URL", default_value = "https://jsonplaceholder.typicode.com")]
    pub base_url: String,

    /// Quiet period before a typed search is sent, in milliseconds.
    #[arg(long, env = "PRODUCTS_DEBOUNCE_MS", default_value_t = 500)]
    pub debounce_ms: u64,

    /// Per-request timeout in seconds; 0 disables it.
    #[arg(long, env = "PRODUCTS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Load the product list on startup.
    #[arg(long)]
    pub load: bool,
}

impl Args {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

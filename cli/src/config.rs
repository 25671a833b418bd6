//! API settings for the CLI: environment (and `.env`) first, flags on top.

use museo_core::ApiConfig;

/// Overlay the `--api-url` flag onto the environment's configuration.
pub fn resolve(env: ApiConfig, api_url: Option<String>) -> ApiConfig {
    match api_url {
        Some(base_url) => ApiConfig { base_url, ..env },
        None => env,
    }
}

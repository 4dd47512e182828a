// src/http.rs
// Shared HTTP client for Productive API calls

use std::time::Duration;

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Create the shared HTTP client with appropriate defaults.
///
/// Built once at startup and handed to the gateway. Uses connection pooling internally.
pub fn create_shared_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(4)
        .user_agent(concat!("productive-mcp/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_shared_client() {
        let client = create_shared_client(Duration::from_secs(5));
        drop(client);
    }
}

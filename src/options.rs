use std::time::Duration;

use crate::consts::consts::{DEFAULT_API_COMMAND_URL, DEFAULT_API_QUERY_URL, PERSONS_RESOURCE};

/// Where the client sends writes (command API) and reads (query API).
///
/// Both URLs are kept separate even when they point at the same deployment, the client
/// never assumes they collapse into one service.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub command_url: String,
    pub query_url: String,
    pub timeout: Option<Duration>,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl ClientOptions {
    pub fn set_command_url(mut self, command_url: impl Into<String>) -> Self {
        self.command_url = command_url.into();
        self
    }

    pub fn set_query_url(mut self, query_url: impl Into<String>) -> Self {
        self.query_url = query_url.into();
        self
    }

    /// Upper bound for a single request. Without it a hung request hangs the caller
    pub fn set_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{command}/persons`
    pub fn command_resource(&self) -> String {
        resource_url(&self.command_url)
    }

    /// `{query}/persons`
    pub fn query_resource(&self) -> String {
        resource_url(&self.query_url)
    }
}

fn resource_url(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), PERSONS_RESOURCE)
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            command_url: DEFAULT_API_COMMAND_URL.to_string(),
            query_url: DEFAULT_API_QUERY_URL.to_string(),
            timeout: None,
        }
    }
}

#[cfg(test)]
impl ClientOptions {
    pub fn new_test() -> Self {
        ClientOptions::default()
            .set_command_url("http://command.test")
            .set_query_url("http://query.test")
    }
}

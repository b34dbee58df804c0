//! HTTP preset fetching.
//!
//! `GET {base}/commands/{keyword}`: 200 carries the preset document,
//! 404 means the keyword is unknown, anything else is a fetch failure.

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, ThamilError};
use crate::preset::Preset;

use super::PresetSource;

/// Fetches presets from the preset server.
pub struct HttpPresetClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpPresetClient {
    /// Create a client with the default 30-second timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ThamilError::InvalidConfig {
            message: format!("invalid api_url '{}': {}", base_url, e),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ThamilError::InvalidConfig {
                message: format!("api_url '{}' cannot be used as a base URL", base_url),
            });
        }

        let client = Client::builder()
            .user_agent(concat!("thamil/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ThamilError::Other(e.into()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL of the preset for `keyword`, with the keyword percent-encoded.
    pub fn preset_url(&self, keyword: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("commands").push(keyword);
        }
        url
    }
}

impl PresetSource for HttpPresetClient {
    fn location(&self, keyword: &str) -> String {
        self.preset_url(keyword).to_string()
    }

    fn fetch(&self, keyword: &str) -> Result<Preset> {
        let url = self.preset_url(keyword);
        let fetch_failed = |message: String| ThamilError::FetchFailed {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| fetch_failed(e.to_string()))?;

        let status = response.status();
        debug!("GET {} -> {}", url, status);

        if status == StatusCode::NOT_FOUND {
            return Err(ThamilError::PresetNotFound {
                keyword: keyword.to_string(),
            });
        }

        if !status.is_success() {
            return Err(fetch_failed(format!("HTTP {}", status)));
        }

        let body = response.text().map_err(|e| fetch_failed(e.to_string()))?;
        Preset::from_json(&body, keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn default_timeout_is_30_seconds() {
        let client = HttpPresetClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = HttpPresetClient::new("not a url").err().unwrap();
        assert!(matches!(err, ThamilError::InvalidConfig { .. }));
    }

    #[test]
    fn preset_url_appends_commands_segment() {
        let client = HttpPresetClient::new("https://example.com/api/").unwrap();
        assert_eq!(
            client.preset_url("setup-node").as_str(),
            "https://example.com/api/commands/setup-node"
        );
    }

    #[test]
    fn preset_url_encodes_keyword() {
        let client = HttpPresetClient::new("https://example.com").unwrap();
        assert_eq!(
            client.preset_url("a b/c").as_str(),
            "https://example.com/commands/a%20b%2Fc"
        );
    }

    #[test]
    fn fetch_returns_preset() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/commands/setup-node");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"keyword":"setup-node","commands":["echo A","echo B"],"prerequisites":[]}"#);
        });

        let client = HttpPresetClient::new(&server.base_url()).unwrap();
        let preset = client.fetch("setup-node").unwrap();

        mock.assert();
        assert_eq!(preset.commands, vec!["echo A", "echo B"]);
    }

    #[test]
    fn fetch_maps_404_to_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/commands/missing");
            then.status(404).body(r#"{"error":"Command not found"}"#);
        });

        let client = HttpPresetClient::new(&server.base_url()).unwrap();
        let err = client.fetch("missing").unwrap_err();

        assert!(matches!(err, ThamilError::PresetNotFound { ref keyword } if keyword == "missing"));
    }

    #[test]
    fn fetch_maps_500_to_fetch_failed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/commands/broken");
            then.status(500).body(r#"{"error":"db down"}"#);
        });

        let client = HttpPresetClient::new(&server.base_url()).unwrap();
        let err = client.fetch("broken").unwrap_err();

        assert!(matches!(err, ThamilError::FetchFailed { .. }));
        assert!(err.to_string().contains("500"), "got: {}", err);
    }

    #[test]
    fn fetch_rejects_malformed_document() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/commands/bad");
            then.status(200).body(r#"{"keyword":"bad"}"#);
        });

        let client = HttpPresetClient::new(&server.base_url()).unwrap();
        let err = client.fetch("bad").unwrap_err();

        assert!(matches!(err, ThamilError::InvalidPreset { .. }));
    }

    #[test]
    fn unreachable_server_is_fetch_failure() {
        // Port 9 (discard) is essentially never listening locally.
        let client =
            HttpPresetClient::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.fetch("anything").unwrap_err();

        assert!(matches!(err, ThamilError::FetchFailed { .. }));
    }
}

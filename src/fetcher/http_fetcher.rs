use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{ForestayError, Result};
use crate::config::RelayConfig;
use crate::fetcher::Fetcher;

/// Fetches feeds over HTTP, optionally through a relay that returns the
/// upstream body unchanged.
pub struct HttpFetcher {
    client: Client,
    relay: Option<String>,
}

impl HttpFetcher {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("forestay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let relay = config.enabled.then(|| config.endpoint.clone());

        Ok(Self { client, relay })
    }

    /// The URL actually requested for `target`.
    pub fn request_url(&self, target: &str) -> Result<String> {
        let target = Url::parse(target)?;
        Ok(match &self.relay {
            Some(endpoint) => {
                let encoded: String =
                    url::form_urlencoded::byte_serialize(target.as_str().as_bytes()).collect();
                format!("{}{}", endpoint, encoded)
            }
            None => target.into(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let request_url = self.request_url(url)?;
        let response = self.client.get(&request_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForestayError::Relay {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const FEED: &str = "BEGIN:VEVENT\r\nDTSTART;VALUE=DATE:20250301\r\nDTEND;VALUE=DATE:20250305\r\nEND:VEVENT\r\n";

    fn relay_config(endpoint: String) -> RelayConfig {
        RelayConfig {
            enabled: true,
            endpoint,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_request_url_through_relay() {
        let fetcher = HttpFetcher::new(&relay_config("https://corsproxy.io/?".into())).unwrap();
        let url = fetcher
            .request_url("https://www.airbnb.com/calendar/ical/1.ics?s=abc&locale=de")
            .unwrap();
        assert_eq!(
            url,
            "https://corsproxy.io/?https%3A%2F%2Fwww.airbnb.com%2Fcalendar%2Fical%2F1.ics%3Fs%3Dabc%26locale%3Dde"
        );
    }

    #[test]
    fn test_request_url_direct() {
        let config = RelayConfig {
            enabled: false,
            ..RelayConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let url = fetcher.request_url("https://example.com/feed.ics").unwrap();
        assert_eq!(url, "https://example.com/feed.ics");
    }

    #[test]
    fn test_request_url_rejects_relative() {
        let fetcher = HttpFetcher::new(&RelayConfig::default()).unwrap();
        assert!(matches!(
            fetcher.request_url("not a url"),
            Err(ForestayError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_through_relay_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/relay"))
            .and(query_param("url", "https://example.com/feed.ics"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&relay_config(format!("{}/relay?url=", server.uri()))).unwrap();
        let body = fetcher.fetch("https://example.com/feed.ics").await.unwrap();
        assert_eq!(body, FEED);
    }

    #[tokio::test]
    async fn test_relay_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/relay"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&relay_config(format!("{}/relay?url=", server.uri()))).unwrap();
        let result = fetcher.fetch("https://example.com/feed.ics").await;
        assert!(matches!(result, Err(ForestayError::Relay { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_relay_500_degrades_to_no_ranges() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&relay_config(format!("{}/relay?url=", server.uri()))).unwrap();
        let ranges = crate::fetcher::fetch_booked_ranges(&fetcher, "https://example.com/feed.ics").await;
        assert!(ranges.is_empty());
    }

    #[tokio::test]
    async fn test_direct_fetch_parses_ranges() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.ics"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
            .mount(&server)
            .await;

        let config = RelayConfig {
            enabled: false,
            ..RelayConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let ranges =
            crate::fetcher::fetch_booked_ranges(&fetcher, &format!("{}/feed.ics", server.uri())).await;
        assert_eq!(ranges.len(), 1);
    }
}

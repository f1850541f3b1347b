//! `HttpTransport` - reqwest-backed transport.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalTransport;
use super::params::QueryState;
use super::types::OmdbResponse;

/// Default User-Agent sent with every request.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP transport over `reqwest`.
///
/// Non-2xx statuses are returned as responses, not errors.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client.
    http_client: Client,
}

/// Builder for `HttpTransport`.
#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    /// Sets the User-Agent (default: `omdb-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a whole-request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the `reqwest::Client` build fails.
    pub fn build(self) -> Result<HttpTransport> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("failed to build HTTP client")?;

        Ok(HttpTransport { http_client })
    }
}

impl HttpTransport {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }
}

impl LocalTransport for HttpTransport {
    #[instrument(skip_all)]
    async fn perform_get(&self, url: &Url, query: &QueryState) -> Result<OmdbResponse> {
        let request = self
            .http_client
            .get(url.clone())
            .query(&query.to_query_pairs())
            .build()?;

        tracing::debug!(url = %request.url(), "OMDb API request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "OMDb API response");

        Ok(OmdbResponse::new(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;
    use crate::validator::Field;

    fn state(pairs: &[(Field, serde_json::Value)]) -> QueryState {
        let mut state = QueryState::new();
        for (field, value) in pairs {
            state.apply(*field, value.clone()).unwrap();
        }
        state
    }

    #[test]
    fn test_builder_defaults_succeed() {
        // Arrange & Act
        let result = HttpTransport::builder().build();

        // Assert
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_query_params_are_encoded() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("t", "Wedding Crashers"))
            .and(wiremock::matchers::query_param("tomatoes", "true"))
            .and(wiremock::matchers::query_param("y", "2005"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::builder().build().unwrap();
        let url: Url = mock_server.uri().parse().unwrap();
        let query = state(&[
            (Field::Title, json!("Wedding Crashers")),
            (Field::IncludeRatings, json!(true)),
            (Field::Year, json!(2005)),
        ]);

        // Act
        let response = transport.perform_get(&url, &query).await.unwrap();

        // Assert
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{}");
    }

    #[tokio::test]
    async fn test_user_agent_is_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::header("User-Agent", "omdb-test/1.0"))
            .respond_with(wiremock::ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::builder()
            .user_agent("omdb-test/1.0")
            .build()
            .unwrap();
        let url: Url = mock_server.uri().parse().unwrap();

        // Act & Assert (mock expect(1) verifies User-Agent header)
        transport
            .perform_get(&url, &QueryState::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(401)
                    .set_body_string(r#"{"Response":"False","Error":"No API key provided."}"#),
            )
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::builder().build().unwrap();
        let url: Url = mock_server.uri().parse().unwrap();

        // Act
        let response = transport
            .perform_get(&url, &QueryState::new())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status, 401);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_connection_failure_propagates_reqwest_error() {
        // Arrange: nothing listens on the discard port
        let transport = HttpTransport::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let url: Url = "http://127.0.0.1:9/".parse().unwrap();

        // Act
        let result = transport.perform_get(&url, &QueryState::new()).await;

        // Assert
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<reqwest::Error>().is_some());
    }
}

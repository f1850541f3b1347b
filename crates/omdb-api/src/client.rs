//! `OmdbClient` - entry point for building requests.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

use super::request::{LookupRequest, SearchRequest};
use super::transport::HttpTransport;
use super::validator::{Field, ValidationError};

/// Default base URL for the OMDb API.
pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// OMDb API client.
///
/// Holds the destination and the transport; every request built from it
/// reads the base URL when it is sent.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient<T = HttpTransport> {
    /// Base URL for API requests.
    base_url: Url,
    /// Outbound GET capability.
    transport: T,
}

/// Builder for `OmdbClient` over [`HttpTransport`].
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl OmdbClientBuilder {
    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a whole-request timeout on the HTTP transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let mut transport = HttpTransport::builder();
        if let Some(ua) = self.user_agent {
            transport = transport.user_agent(ua);
        }
        if let Some(timeout) = self.timeout {
            transport = transport.timeout(timeout);
        }

        Ok(OmdbClient {
            base_url,
            transport: transport.build()?,
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::default()
    }
}

impl<T> OmdbClient<T> {
    /// Creates a client over a custom transport.
    pub const fn with_transport(base_url: Url, transport: T) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Starts a lookup by IMDb identifier (`i=`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `id` is not a string.
    pub fn by_id(&self, id: impl Into<Value>) -> Result<LookupRequest<'_, T>, ValidationError> {
        LookupRequest::new(self, Field::Identifier, id.into())
    }

    /// Starts a lookup by exact title (`t=`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `title` is not a string.
    pub fn by_title(
        &self,
        title: impl Into<Value>,
    ) -> Result<LookupRequest<'_, T>, ValidationError> {
        LookupRequest::new(self, Field::Title, title.into())
    }

    /// Starts a title search (`s=`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `search` is not a string.
    pub fn by_search(
        &self,
        search: impl Into<Value>,
    ) -> Result<SearchRequest<'_, T>, ValidationError> {
        SearchRequest::new(self, Field::Search, search.into())
    }
}

//! Fluent request builders.
//!
//! Each builder owns its [`QueryState`]. Modifiers validate synchronously,
//! store the value under its wire name and hand back the same builder for
//! chaining. [`LookupRequest::request`] and [`SearchRequest::request`] are the
//! only async steps.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use serde_json::Value;
use tracing::instrument;

use super::api::LocalTransport;
use super::client::OmdbClient;
use super::params::QueryState;
use super::transport::HttpTransport;
use super::types::OmdbResponse;
use super::validator::{Field, ValidationError};

/// Lookup of a single title, by identifier or by exact title.
///
/// ```no_run
/// # async fn run() -> anyhow::Result<()> {
/// let client = omdb_api::OmdbClient::builder().build()?;
/// let response = client
///     .by_title("Wedding Crashers")?
///     .category("movie")?
///     .include_ratings(true)?
///     .request()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LookupRequest<'a, T = HttpTransport> {
    client: &'a OmdbClient<T>,
    query: QueryState,
}

/// Title search.
///
/// Plot and ratings are only offered by lookups:
///
/// ```compile_fail
/// # fn run() -> anyhow::Result<()> {
/// let client = omdb_api::OmdbClient::builder().build()?;
/// client.by_search("dogs")?.plot("full")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SearchRequest<'a, T = HttpTransport> {
    client: &'a OmdbClient<T>,
    query: QueryState,
}

/// Items common to both request builders.
macro_rules! common_builder {
    ($builder:ident) => {
        impl<'a, T> $builder<'a, T> {
            /// Applies the base field; no builder exists if it is rejected.
            pub(crate) fn new(
                client: &'a OmdbClient<T>,
                base: Field,
                value: Value,
            ) -> Result<Self, ValidationError> {
                let mut query = QueryState::new();
                query.apply(base, value)?;
                Ok(Self { client, query })
            }

            /// Restricts the result type: `movie`, `series` or `episode`.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError`] for any other value.
            pub fn category(
                &mut self,
                value: impl Into<Value>,
            ) -> Result<&mut Self, ValidationError> {
                self.query.apply(Field::Category, value.into())?;
                Ok(self)
            }

            /// Restricts the release year.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError`] if `value` is not a number.
            pub fn year(&mut self, value: impl Into<Value>) -> Result<&mut Self, ValidationError> {
                self.query.apply(Field::Year, value.into())?;
                Ok(self)
            }

            /// Selects the response format: `json` or `xml`.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError`] for any other value.
            pub fn format(
                &mut self,
                value: impl Into<Value>,
            ) -> Result<&mut Self, ValidationError> {
                self.query.apply(Field::Format, value.into())?;
                Ok(self)
            }

            /// Parameters accumulated so far.
            #[must_use]
            pub const fn query(&self) -> &QueryState {
                &self.query
            }
        }

        impl<T: LocalTransport> $builder<'_, T> {
            /// Sends the accumulated parameters.
            ///
            /// May be called again; each call re-sends the current parameters.
            ///
            /// # Errors
            ///
            /// Returns the transport's error unchanged.
            pub async fn request(&self) -> Result<OmdbResponse> {
                send(self.client, &self.query).await
            }
        }
    };
}

common_builder!(LookupRequest);
common_builder!(SearchRequest);

impl<T> LookupRequest<'_, T> {
    /// Selects the plot length: `short` or `full`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for any other value.
    pub fn plot(&mut self, value: impl Into<Value>) -> Result<&mut Self, ValidationError> {
        self.query.apply(Field::Plot, value.into())?;
        Ok(self)
    }

    /// Includes Rotten Tomatoes ratings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `value` is not a boolean.
    pub fn include_ratings(
        &mut self,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ValidationError> {
        self.query.apply(Field::IncludeRatings, value.into())?;
        Ok(self)
    }
}

/// Hands the base URL and the full state to the transport, exactly once.
#[instrument(skip_all, fields(params = query.len()))]
async fn send<T: LocalTransport>(
    client: &OmdbClient<T>,
    query: &QueryState,
) -> Result<OmdbResponse> {
    client
        .transport()
        .perform_get(client.base_url(), query)
        .await
}

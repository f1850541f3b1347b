//! `Transport` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use url::Url;

use super::params::QueryState;
use super::types::OmdbResponse;

/// Outbound GET capability used by [`crate::OmdbClient`].
///
/// Abstracts the HTTP layer for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Issues one GET to `url` with `query` encoded as query parameters.
    ///
    /// Retries, headers and timeouts are the implementation's concern.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or its body cannot be read.
    async fn perform_get(&self, url: &Url, query: &QueryState) -> Result<OmdbResponse>;
}

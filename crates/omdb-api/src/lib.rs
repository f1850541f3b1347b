//! Fluent, validated query builder for the OMDb API.
//!
//! Start from an [`OmdbClient`], pick a lookup (`by_id`, `by_title`) or a
//! search (`by_search`), chain modifiers and finish with `request()`:
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use omdb_api::OmdbClient;
//!
//! let client = OmdbClient::builder().build()?;
//! let results = client
//!     .by_search("dogs")?
//!     .category("movie")?
//!     .year(2018)?
//!     .request()
//!     .await?
//!     .into_search()?;
//! # Ok(())
//! # }
//! ```
//!
//! Every value is validated when it is supplied; a rejected value returns a
//! [`ValidationError`] and leaves the request unchanged.

mod api;
mod client;
mod params;
mod request;
mod transport;
mod types;
mod validator;

pub use api::{LocalTransport, Transport};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, OmdbClient, OmdbClientBuilder};
pub use params::QueryState;
pub use request::{LookupRequest, SearchRequest};
pub use transport::{HttpTransport, HttpTransportBuilder};
pub use types::{OmdbRating, OmdbResponse, OmdbSearchItem, OmdbSearchResults, OmdbTitle};
pub use validator::{Field, ValidationError, ValidationResult, validate};

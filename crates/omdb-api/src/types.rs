//! OMDb response types.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmdbResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, verbatim.
    pub body: String,
}

impl OmdbResponse {
    /// Creates a response from its parts.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).context("failed to decode OMDb JSON response")
    }

    /// Decodes a single title (`i=` / `t=` lookups).
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be decoded or the API reports
    /// `"Response": "False"`.
    pub fn into_title(self) -> Result<OmdbTitle> {
        self.check_api_error()?;
        self.json()
    }

    /// Decodes a result page (`s=` searches).
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be decoded or the API reports
    /// `"Response": "False"`.
    pub fn into_search(self) -> Result<OmdbSearchResults> {
        self.check_api_error()?;
        self.json()
    }

    /// Fails with the API's own message when it signals an error in the body.
    fn check_api_error(&self) -> Result<()> {
        let envelope: OmdbEnvelope = self.json()?;
        if envelope.response.as_deref() == Some("False") {
            bail!(
                "OMDb API error: {}",
                envelope.error.as_deref().unwrap_or("unknown error")
            );
        }
        Ok(())
    }
}

/// Fields shared by every JSON response.
#[derive(Debug, Deserialize)]
struct OmdbEnvelope {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

// --- Title lookup ---

/// A single title returned by an identifier or title lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbTitle {
    /// Title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Year, or a range such as `2005–2013` for series.
    #[serde(rename = "Year")]
    pub year: String,
    /// Content rating.
    #[serde(rename = "Rated", default)]
    pub rated: Option<String>,
    /// Release date.
    #[serde(rename = "Released", default)]
    pub released: Option<String>,
    /// Runtime, e.g. `119 min`.
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    /// Comma-separated genres.
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    /// Director(s).
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    /// Main cast.
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    /// Plot, short or full depending on the request.
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    /// Poster URL.
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    /// Ratings from individual sources.
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<OmdbRating>,
    /// IMDb rating.
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    /// IMDb identifier.
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// movie, series or episode.
    #[serde(rename = "Type")]
    pub kind: String,
    /// Tomatometer, present when ratings were requested.
    #[serde(rename = "tomatoMeter", default)]
    pub tomato_meter: Option<String>,
    /// Rotten Tomatoes consensus.
    #[serde(rename = "tomatoConsensus", default)]
    pub tomato_consensus: Option<String>,
}

/// A rating from one source.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbRating {
    /// Rating source, e.g. `Rotten Tomatoes`.
    #[serde(rename = "Source")]
    pub source: String,
    /// Rating value, e.g. `75%`.
    #[serde(rename = "Value")]
    pub value: String,
}

// --- Search ---

/// A page of search results.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResults {
    /// Matching items.
    #[serde(rename = "Search", default)]
    pub items: Vec<OmdbSearchItem>,
    /// Total number of matches, as sent by the API.
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchItem {
    /// Title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Year.
    #[serde(rename = "Year")]
    pub year: String,
    /// IMDb identifier.
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// movie, series or episode.
    #[serde(rename = "Type")]
    pub kind: String,
    /// Poster URL.
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

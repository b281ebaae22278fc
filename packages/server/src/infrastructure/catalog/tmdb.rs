//! TMDB-backed movie catalog.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{CatalogError, MovieCatalog};

/// Public TMDB API host.
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org";

/// TMDB genre id of "Horror".
const HORROR_GENRE_ID: &str = "27";

/// Queries TMDB's discover endpoint.
#[derive(Debug, Clone)]
pub struct TmdbMovieCatalog {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl TmdbMovieCatalog {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MovieCatalog for TmdbMovieCatalog {
    async fn horror_movies(&self) -> Result<Value, CatalogError> {
        let api_key = self.api_key.as_deref().ok_or(CatalogError::NotConfigured)?;
        let url = format!("{}/3/discover/movie", self.base_url);
        tracing::debug!("Fetching horror movies from {}", url);

        self.http
            .get(&url)
            .query(&[("api_key", api_key), ("with_genres", HORROR_GENRE_ID)])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| CatalogError::Upstream(e.to_string()))?
            .json::<Value>()
            .await
            .map_err(|e| CatalogError::Upstream(e.to_string()))
    }
}

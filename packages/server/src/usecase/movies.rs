//! UseCase: ホラー映画一覧の取得

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{CatalogError, MovieCatalog};

pub struct HorrorMoviesUseCase {
    catalog: Arc<dyn MovieCatalog>,
}

impl HorrorMoviesUseCase {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn execute(&self) -> Result<Value, CatalogError> {
        self.catalog.horror_movies().await.inspect_err(|e| {
            tracing::error!("Failed to fetch movies: {}", e);
        })
    }
}

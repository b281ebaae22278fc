//! Movie catalog interface.

use async_trait::async_trait;
use serde_json::Value;

use super::error::CatalogError;

/// Upstream movie listing proxied to authenticated users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Horror titles, passed through as the upstream returned them.
    async fn horror_movies(&self) -> Result<Value, CatalogError>;
}

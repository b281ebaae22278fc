//! Movie catalog implementations.

pub mod tmdb;

pub use tmdb::{TMDB_BASE_URL, TmdbMovieCatalog};

//! Utilities shared across Yagura packages.

pub mod logger;
pub mod time;

//! SUME - Smart summarizer core
//!
//! Memoized language model, speech and scraping calls behind input
//! validation, served over a small JSON API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod validation;

pub use api::AppState;
pub use cache::Cache;
pub use config::Config;
pub use error::{AppError, Result};

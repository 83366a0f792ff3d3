//! # Normandy API Client
//!
//! Client for the recipe server's self-describing HTTP API. The API root
//! serves an index mapping endpoint names (`recipe-list`, `action-list`,
//! `classify-client`, ...) to paths; every other URL is looked up there.
//!
//! ## Example
//!
//! ```no_run
//! use normandy_api::{ApiConfig, NormandyApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = NormandyApi::new(ApiConfig::new("http://localhost:8000/api/v1"))?;
//!
//!     for recipe in api.fetch_recipes().await? {
//!         println!("{}: {}", recipe.id, recipe.name);
//!     }
//!
//!     let classification = api.classify_client().await?;
//!     println!("country: {}", classification.country);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::NormandyApi;
pub use config::{ApiConfig, DEFAULT_API_URL};
pub use error::ApiError;
pub use types::{Action, ApiIndex, Classification, RecipeSummary};

//! Rust SDK for the Kidsout sitter-booking API.
//!
//! The API answers with JSON:API-style envelopes: a list of primary
//! resources, a shared `included` pool of related resources, and pagination
//! metadata. Wrap a response in views to reach related resources such as a
//! sitter's avatar without copying the pool.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kidsout::{Client, SearchSittersParams, SitterView};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kidsout::Error> {
//!     let client = Client::builder().api_key("your-api-key").build()?;
//!
//!     let response = client
//!         .search_sitters(&SearchSittersParams {
//!             date: Some("2024-05-01".into()),
//!             include: vec!["avatars".into()],
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     for sitter in SitterView::from_list_response(response) {
//!         if let Some(avatar) = sitter.avatar() {
//!             println!("{}: {:?}", sitter.id(), avatar.attributes.best_url());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod params;
mod relationships;
mod types;
mod version;
mod views;

pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};
pub use params::{
    BoundingBox, Corner, NewsParams, ReviewsParams, SearchSittersParams, Sort, MAX_PER_PAGE,
    MAX_RATE,
};
pub use relationships::{resolve, resolve_as, Related};
pub use types::*;
pub use version::SDK_VERSION;
pub use views::{
    CurrencyRateView, CurrencyView, PerkView, RegionView, ResourceView, ReviewView, SitterView,
};

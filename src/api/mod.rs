//! Storefront REST API client.
//!
//! `StorefrontApi` is the seam between the page and the network. The HTTP
//! implementation lives in [`http`]; tests drive the page through in-memory
//! implementations of the same trait.

pub mod error;
pub mod http;
mod retry;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::types::{NewQuestion, NewReview, Paginated, Product, Question, Review};

pub use error::ApiError;
pub use http::HttpStorefrontApi;
pub use retry::{RetryPolicy, execute_with_retry};

/// Query for one page of reviews or questions belonging to a product
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PageQuery {
    pub product: String,
    pub page: u32,
    pub limit: u32,
}

impl PageQuery {
    pub fn new(product: impl Into<String>, page: u32, limit: u32) -> Self {
        Self {
            product: product.into(),
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

/// Remote operations the product page depends on
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Look up a product by slug; `Ok(None)` when no such product exists
    async fn fetch_product(&self, slug: &str) -> Result<Option<Product>>;

    async fn list_questions(&self, query: &PageQuery) -> Result<Paginated<Question>>;

    async fn list_reviews(&self, query: &PageQuery) -> Result<Paginated<Review>>;

    async fn create_review(&self, review: &NewReview) -> Result<()>;

    async fn create_question(&self, question: &NewQuestion) -> Result<()>;
}

//! Wire types for the storefront API.
//!
//! Field names follow the API's JSON (`_id`, camelCase pagination fields).
//! Everything the API may omit is optional or defaulted so a sparse payload
//! still decodes; `Product::id` and `Product::slug` are the exception, a
//! product without them is rejected rather than rendered half-empty.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

/// Route prefix for product pages, joined with the app base URL and slug
pub const ROUTE_PRODUCT: &str = "/products";

/// Page size used when neither config nor the response says otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Average star rating
    #[serde(default)]
    pub ratings: f64,
    #[serde(default, rename = "totalReviews", alias = "total_reviews")]
    pub total_reviews: u64,
    #[serde(default)]
    pub rating_count: Vec<RatingCount>,
    #[serde(default)]
    pub shop: Option<Shop>,
}

/// Number of reviews left at one star value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingCount {
    #[serde(deserialize_with = "number_or_string")]
    pub rating: f64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo: Option<ShopLogo>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub settings: Option<ShopSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopLogo {
    #[serde(default)]
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopSettings {
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Author reference embedded in reviews and questions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<Author>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub rating: f64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: String,
    #[serde(default, rename = "createdAt", alias = "created_at")]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<Author>,
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, rename = "createdAt", alias = "created_at")]
    pub created_at: Option<Timestamp>,
}

impl Review {
    pub fn author_name(&self) -> &str {
        author_or_anonymous(self.user.as_ref())
    }
}

impl Question {
    pub fn author_name(&self) -> &str {
        author_or_anonymous(self.user.as_ref())
    }
}

fn author_or_anonymous(user: Option<&Author>) -> &str {
    user.and_then(|u| u.name.as_deref())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("Anonymous")
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub docs: Vec<T>,
    #[serde(default)]
    pub total_docs: u64,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_one")]
    pub page: u32,
    #[serde(default = "default_one")]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_prev_page: bool,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(default)]
    pub prev_page: Option<u32>,
    #[serde(default = "default_one_u64")]
    pub paging_counter: u64,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_one() -> u32 {
    1
}

fn default_one_u64() -> u64 {
    1
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            docs: Vec::new(),
            total_docs: 0,
            limit: DEFAULT_PAGE_SIZE,
            page: 1,
            total_pages: 1,
            has_next_page: false,
            has_prev_page: false,
            next_page: None,
            prev_page: None,
            paging_counter: 1,
        }
    }
}

impl<T> Paginated<T> {
    /// Clamp navigation fields so they agree with each other.
    ///
    /// Guarantees `1 <= page <= total_pages` and that the has-next/has-prev
    /// flags and neighbour pages are derived from `page` and `total_pages`.
    /// `total_pages` is recomputed from `total_docs` and `limit` when the
    /// server reports fewer pages than the documents require.
    pub fn normalized(mut self) -> Self {
        if self.limit == 0 {
            self.limit = DEFAULT_PAGE_SIZE;
        }
        let needed = self.total_docs.div_ceil(u64::from(self.limit)).max(1);
        let needed = u32::try_from(needed).unwrap_or(u32::MAX);
        if self.total_pages < needed {
            self.total_pages = needed;
        }
        self.total_pages = self.total_pages.max(1);
        self.page = self.page.clamp(1, self.total_pages);
        self.has_prev_page = self.page > 1;
        self.has_next_page = self.page < self.total_pages;
        self.prev_page = self.has_prev_page.then(|| self.page - 1);
        self.next_page = self.has_next_page.then(|| self.page + 1);
        self.paging_counter = u64::from(self.page - 1) * u64::from(self.limit) + 1;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Accepts `4`, `4.0` or `"4"` for numeric fields the API sometimes quotes
fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
        Null,
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got '{s}'"))),
        NumberOrString::Null => Ok(0.0),
    }
}

/// Body for `POST /reviews`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub product: String,
    pub rating: u8,
    pub comment: String,
}

/// Body for `POST /questions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewQuestion {
    pub product: String,
    pub question: String,
}

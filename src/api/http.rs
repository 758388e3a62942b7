//! reqwest-backed implementation of [`StorefrontApi`].
//!
//! The bearer token is held in a `SecretBox` and only exposed while building
//! the `Authorization` header, which is itself wrapped so that it formats as
//! `[REDACTED]` if a request ever ends up in a log line.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretBox};
use serde::de::DeserializeOwned;
use url::Url;

use super::error::ApiError;
use super::retry::{RetryPolicy, execute_with_retry};
use super::{PageQuery, StorefrontApi};
use crate::config::Config;
use crate::error::{Result, StorefrontError};
use crate::types::{NewQuestion, NewReview, Paginated, Product, Question, Review};

struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    fn bearer(token: &str) -> Self {
        Self {
            value: format!("Bearer {token}"),
        }
    }

    fn as_header_value(&self) -> std::result::Result<HeaderValue, ApiError> {
        let mut value = HeaderValue::from_str(&self.value)
            .map_err(|_| ApiError::new("auth token contains characters not allowed in a header"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

pub struct HttpStorefrontApi {
    client: Client,
    base_url: Url,
    token: Option<SecretBox<String>>,
    retry: RetryPolicy,
}

impl fmt::Debug for HttpStorefrontApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStorefrontApi")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpStorefrontApi {
    /// Create a client for `base_url`.
    ///
    /// Configures HTTP client with 30s connect timeout and 60s total timeout.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(StorefrontError::Config(format!(
                "API URL '{base_url}' cannot hold a path"
            )));
        }
        let client = Client::builder()
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: token.map(|t| SecretBox::new(Box::new(t))),
            retry: RetryPolicy::default(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url(), config.token())
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// `base_url` with `segments` appended as percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Url {
        endpoint(&self.base_url, segments)
    }

    /// Send a request built by `build` under `policy`.
    ///
    /// Non-success statuses become `ApiError`s carrying the status and any
    /// `Retry-After` value; `404` is passed through to the caller.
    async fn send<F>(
        &self,
        policy: RetryPolicy,
        build: F,
    ) -> std::result::Result<Response, ApiError>
    where
        F: Fn() -> std::result::Result<RequestBuilder, ApiError>,
    {
        execute_with_retry(policy, || async {
            let response = build()?.send().await?;
            let status = response.status();
            if status.is_success() || status == StatusCode::NOT_FOUND {
                return Ok(response);
            }
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok());
            let message = error_message(response).await;
            let mut err = ApiError::with_status(message, status);
            if let Some(seconds) = retry_after {
                err = err.with_retry_after(seconds);
            }
            Err(err)
        })
        .await
    }

    async fn get_page<T>(&self, resource: &str, query: &PageQuery) -> Result<Paginated<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(&[resource]);
        tracing::debug!(%url, product = %query.product, page = query.page, "listing");
        let response = self
            .send(self.retry, || Ok(self.client.get(url.clone()).query(query)))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorefrontError::Api {
                status: 404,
                message: format!("{resource} endpoint not found"),
            });
        }
        let page: Paginated<T> = response.json().await?;
        Ok(page.normalized())
    }

    async fn post_json<B>(&self, resource: &str, body: &B) -> Result<()>
    where
        B: serde::Serialize + Sync,
    {
        let token = self.token.as_ref().ok_or_else(|| {
            StorefrontError::Auth("sign in required: set auth.token or STOREFRONT_TOKEN".to_string())
        })?;
        let url = self.endpoint(&[resource]);
        tracing::debug!(%url, "posting");
        // A POST the server may already have stored is never re-sent
        let response = self
            .send(RetryPolicy::once(), || {
                let auth = RedactedHeader::bearer(token.expose_secret());
                Ok(self
                    .client
                    .post(url.clone())
                    .header(header::AUTHORIZATION, auth.as_header_value()?)
                    .json(body))
            })
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorefrontError::Api {
                status: 404,
                message: format!("{resource} endpoint not found"),
            });
        }
        Ok(())
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        path.extend(segments);
    }
    url
}

/// Best-effort message from an error response body
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn fetch_product(&self, slug: &str) -> Result<Option<Product>> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(StorefrontError::InvalidSlug(slug.to_string()));
        }
        let url = self.endpoint(&["products", slug]);
        tracing::debug!(%url, "fetching product");
        let response = self
            .send(self.retry, || Ok(self.client.get(url.clone())))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let product: Option<Product> = response.json().await?;
        Ok(product)
    }

    async fn list_questions(&self, query: &PageQuery) -> Result<Paginated<Question>> {
        self.get_page("questions", query).await
    }

    async fn list_reviews(&self, query: &PageQuery) -> Result<Paginated<Review>> {
        self.get_page("reviews", query).await
    }

    async fn create_review(&self, review: &NewReview) -> Result<()> {
        self.post_json("reviews", review).await
    }

    async fn create_question(&self, question: &NewQuestion) -> Result<()> {
        self.post_json("questions", question).await
    }
}

//! Carry out `PageEffect`s and turn their outcome back into `PageAction`s.

use clipboard_rs::{Clipboard, ClipboardContext};
use futures::future::join_all;

use super::composer::Submission;
use super::model::{PageAction, PageEffect, ProductPageState, reduce_page};
use super::store::PageContext;
use crate::api::StorefrontApi;
use crate::error::{Result, StorefrontError};

/// Run one effect against the API (or the system clipboard).
///
/// Failures are folded into the returned action as display strings; the
/// reducer decides how to present them.
pub async fn run_effect(effect: PageEffect, api: &dyn StorefrontApi) -> PageAction {
    match effect {
        PageEffect::FetchProduct { slug, token } => PageAction::ProductLoaded {
            token,
            result: api.fetch_product(&slug).await.map_err(|e| e.to_string()),
        },
        PageEffect::FetchReviews { query, token } => PageAction::ReviewsLoaded {
            token,
            result: api.list_reviews(&query).await.map_err(|e| e.to_string()),
        },
        PageEffect::FetchQuestions { query, token } => PageAction::QuestionsLoaded {
            token,
            result: api.list_questions(&query).await.map_err(|e| e.to_string()),
        },
        PageEffect::Submit(submission) => {
            let kind = submission.kind();
            let result = match &submission {
                Submission::Review(review) => api.create_review(review).await,
                Submission::Question(question) => api.create_question(question).await,
            };
            PageAction::Submitted {
                kind,
                result: result.map_err(|e| e.to_string()),
            }
        }
        PageEffect::CopyToClipboard(text) => PageAction::ShareLinkCopied(
            copy_to_clipboard(text.clone())
                .await
                .map(|()| text)
                .map_err(|e| e.to_string()),
        ),
    }
}

/// Run queued effects, and the effects their outcomes queue, until none remain.
///
/// Effects queued together run concurrently; their actions are reduced in
/// queue order. Used by one-shot commands that render a settled page.
pub async fn settle(
    mut state: ProductPageState,
    api: &dyn StorefrontApi,
    ctx: &PageContext,
) -> ProductPageState {
    loop {
        let effects = state.take_effects();
        if effects.is_empty() {
            return state;
        }
        let actions = join_all(effects.into_iter().map(|e| run_effect(e, api))).await;
        for action in actions {
            state = reduce_page(state, action, ctx);
        }
    }
}

/// Put `text` on the system clipboard
pub async fn copy_to_clipboard(text: String) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        ClipboardContext::new()
            .and_then(|ctx| ctx.set_text(text))
            .map_err(|e| StorefrontError::Clipboard(e.to_string()))
    })
    .await
    .map_err(|e| StorefrontError::Clipboard(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PageQuery;
    use crate::page::fetch::RequestGenerations;
    use crate::page::store::ComposerKind;
    use crate::types::{NewQuestion, NewReview, Paginated, Product, Question, Review};
    use async_trait::async_trait;

    struct NotFoundApi;

    #[async_trait]
    impl StorefrontApi for NotFoundApi {
        async fn fetch_product(&self, _slug: &str) -> Result<Option<Product>> {
            Ok(None)
        }

        async fn list_questions(&self, query: &PageQuery) -> Result<Paginated<Question>> {
            Ok(Paginated {
                page: query.page,
                ..Default::default()
            })
        }

        async fn list_reviews(&self, _query: &PageQuery) -> Result<Paginated<Review>> {
            Err(StorefrontError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        }

        async fn create_review(&self, _review: &NewReview) -> Result<()> {
            Err(StorefrontError::Auth("sign in required".to_string()))
        }

        async fn create_question(&self, _question: &NewQuestion) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_fetch_product_keeps_token() {
        let token = RequestGenerations::default().issue();
        let action = run_effect(
            PageEffect::FetchProduct {
                slug: "tee".to_string(),
                token,
            },
            &NotFoundApi,
        )
        .await;
        assert!(matches!(
            action,
            PageAction::ProductLoaded { token: t, result: Ok(None) } if t == token
        ));
    }

    #[tokio::test]
    async fn test_errors_become_messages() {
        let token = RequestGenerations::default().issue();
        let action = run_effect(
            PageEffect::FetchReviews {
                query: PageQuery::new("p1", 1, 10),
                token,
            },
            &NotFoundApi,
        )
        .await;
        let PageAction::ReviewsLoaded { result: Err(message), .. } = action else {
            panic!("expected a failed reviews load");
        };
        assert_eq!(message, "API error (500): boom");
    }

    #[tokio::test]
    async fn test_submit_reports_kind() {
        let action = run_effect(
            PageEffect::Submit(Submission::Review(NewReview {
                product: "p1".to_string(),
                rating: 5,
                comment: "Great".to_string(),
            })),
            &NotFoundApi,
        )
        .await;
        assert!(matches!(
            action,
            PageAction::Submitted {
                kind: ComposerKind::Review,
                result: Err(_)
            }
        ));
    }

    #[tokio::test]
    async fn test_settle_stops_on_missing_product() {
        let ctx = PageContext::new(
            crate::page::store::AuthorizationGate::default(),
            std::sync::Arc::new(crate::page::store::ModalStore::new()),
        );
        let state = reduce_page(
            ProductPageState::new("tee", Default::default()),
            PageAction::Load,
            &ctx,
        );
        let state = settle(state, &NotFoundApi, &ctx).await;
        assert!(!state.has_pending_effects());
        assert!(matches!(state.product, crate::page::fetch::FetchState::Empty));
    }
}

//! Product page model types for testable state management
//!
//! This module separates state (`ProductPageState`) from view (`PageView`)
//! so the page can be exercised without the iocraft framework. Remote work
//! requested by the reducer is queued as `PageEffect`s on the state and
//! drained by whoever drives the page.

use std::sync::Arc;
use std::time::Instant;

use crate::api::PageQuery;
use crate::config::Config;
use crate::error::Result;
use crate::types::{DEFAULT_PAGE_SIZE, Paginated, Product, Question, Review};

use super::composer::Submission;
use super::fetch::{FetchState, RequestGenerations, RequestToken};
use super::pagination::PagerView;
use super::rating::{RatingBucket, RatingPalette, rating_histogram};
use super::sidebar::{ShareLinks, ShopSidebarModel};
use super::store::{AuthorizationGate, ComposerKind, PageContext};
use super::toast::Toast;

pub const LOADING_MESSAGE: &str = "Loading product details...";
pub const NOT_FOUND_MESSAGE: &str = "Product not found.";
pub const NO_REVIEWS_MESSAGE: &str = "No Review Found";
pub const NO_QUESTIONS_MESSAGE: &str = "No Question Found";

// ============================================================================
// State Types
// ============================================================================

/// The three mutually exclusive panels under the product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductTab {
    #[default]
    Details,
    Reviews,
    Questions,
}

impl ProductTab {
    pub const ALL: [ProductTab; 3] = [ProductTab::Details, ProductTab::Reviews, ProductTab::Questions];

    pub fn label(self) -> &'static str {
        match self {
            ProductTab::Details => "Details",
            ProductTab::Reviews => "Reviews",
            ProductTab::Questions => "Q&A",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ProductTab::Details => 0,
            ProductTab::Reviews => 1,
            ProductTab::Questions => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// One paginated list panel (reviews or questions)
#[derive(Debug, Clone)]
pub struct ListPanel<T> {
    /// One-based page currently requested
    pub page: u32,
    pub list: FetchState<Paginated<T>>,
    pub scroll: usize,
    generations: RequestGenerations,
}

impl<T> Default for ListPanel<T> {
    fn default() -> Self {
        Self {
            page: 1,
            list: FetchState::Idle,
            scroll: 0,
            generations: RequestGenerations::default(),
        }
    }
}

impl<T> ListPanel<T> {
    /// Back to page one with nothing loaded; in-flight responses become stale
    fn reset(&mut self) {
        self.generations.issue();
        self.page = 1;
        self.list = FetchState::Idle;
        self.scroll = 0;
    }

    /// Last known page bounds, if a page has been received
    fn total_pages(&self) -> Option<u32> {
        self.list.ready().map(|p| p.total_pages)
    }

    fn item_count(&self) -> usize {
        self.list.ready().map_or(0, |p| p.docs.len())
    }

    fn begin_fetch(&mut self, product_id: &str, limit: u32) -> (PageQuery, RequestToken) {
        let token = self.generations.issue();
        self.list = FetchState::Loading;
        self.scroll = 0;
        (PageQuery::new(product_id, self.page, limit), token)
    }

    /// Whether Retry should refetch this list.
    ///
    /// An empty page past the first (the list shrank under us) restarts
    /// from page one.
    fn wants_retry(&mut self) -> bool {
        if self.list.is_empty() && self.page > 1 {
            self.page = 1;
            return true;
        }
        self.list.is_failed()
    }

    /// Apply a response; returns false when the token was superseded
    fn apply(&mut self, token: RequestToken, result: std::result::Result<Paginated<T>, String>) -> bool {
        if !self.generations.is_current(token) {
            return false;
        }
        self.list = match result {
            Ok(page) => {
                let page = page.normalized();
                self.page = page.page;
                if page.is_empty() {
                    FetchState::Empty
                } else {
                    FetchState::Ready(page)
                }
            }
            Err(message) => FetchState::Failed(message),
        };
        true
    }
}

/// Values the page takes from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub page_size: u32,
    /// Base URL of the web app, for share links
    pub app_url: String,
    pub palette: RatingPalette,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            app_url: String::new(),
            palette: RatingPalette::default(),
        }
    }
}

impl PageSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            page_size: config.page_size(),
            app_url: config.app_url(),
            palette: config.rating_palette()?,
        })
    }
}

/// Raw state that changes during user interaction
#[derive(Debug, Clone)]
pub struct ProductPageState {
    pub slug: String,
    pub settings: PageSettings,

    // Data
    pub product: FetchState<Arc<Product>>,
    product_generations: RequestGenerations,
    pub reviews: ListPanel<Review>,
    pub questions: ListPanel<Question>,

    // View state
    pub active_tab: ProductTab,
    pub details_scroll: usize,
    /// Composer submission in flight
    pub submitting: Option<ComposerKind>,
    pub toast: Option<Toast>,
    pub should_exit: bool,

    effects: Vec<PageEffect>,
}

impl ProductPageState {
    pub fn new(slug: impl Into<String>, settings: PageSettings) -> Self {
        Self {
            slug: slug.into(),
            settings,
            product: FetchState::Idle,
            product_generations: RequestGenerations::default(),
            reviews: ListPanel::default(),
            questions: ListPanel::default(),
            active_tab: ProductTab::default(),
            details_scroll: 0,
            submitting: None,
            toast: None,
            should_exit: false,
            effects: Vec::new(),
        }
    }

    pub fn product(&self) -> Option<&Arc<Product>> {
        self.product.ready()
    }

    /// Remove and return queued effects, oldest first
    pub fn take_effects(&mut self) -> Vec<PageEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn has_pending_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    /// Clear the toast once it has been up long enough; true if one was cleared
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
            return true;
        }
        false
    }

    fn fetch_product(&mut self) {
        let token = self.product_generations.issue();
        self.product = FetchState::Loading;
        self.reviews.reset();
        self.questions.reset();
        self.effects.push(PageEffect::FetchProduct {
            slug: self.slug.clone(),
            token,
        });
    }

    fn fetch_reviews(&mut self) {
        let Some(product_id) = self.product().map(|p| p.id.clone()) else {
            return;
        };
        let (query, token) = self.reviews.begin_fetch(&product_id, self.settings.page_size);
        self.effects.push(PageEffect::FetchReviews { query, token });
    }

    fn fetch_questions(&mut self) {
        let Some(product_id) = self.product().map(|p| p.id.clone()) else {
            return;
        };
        let (query, token) = self
            .questions
            .begin_fetch(&product_id, self.settings.page_size);
        self.effects.push(PageEffect::FetchQuestions { query, token });
    }

    fn fetch_list(&mut self, kind: ComposerKind) {
        match kind {
            ComposerKind::Review => self.fetch_reviews(),
            ComposerKind::Question => self.fetch_questions(),
        }
    }

    /// Ask the modal store for a composer; a no-op unless authorized
    fn compose(&self, kind: ComposerKind, ctx: &PageContext) {
        if !ctx.auth.is_authorized() {
            tracing::debug!(?kind, "compose ignored, viewer is not authorized");
            return;
        }
        let Some(product) = self.product().cloned() else {
            return;
        };
        match kind {
            ComposerKind::Review => ctx.modals.open_review_composer(product),
            ComposerKind::Question => ctx.modals.open_question_composer(product),
        }
    }

    /// Move the active list panel to `page` and refetch it
    fn go_to_page(&mut self, page: u32) {
        let kind = match self.active_tab {
            ProductTab::Details => return,
            ProductTab::Reviews => ComposerKind::Review,
            ProductTab::Questions => ComposerKind::Question,
        };
        let (current, total_pages) = match kind {
            ComposerKind::Review => (self.reviews.page, self.reviews.total_pages()),
            ComposerKind::Question => (self.questions.page, self.questions.total_pages()),
        };
        let Some(total_pages) = total_pages else {
            return;
        };
        let target = page.clamp(1, total_pages);
        if target == current {
            return;
        }
        match kind {
            ComposerKind::Review => self.reviews.page = target,
            ComposerKind::Question => self.questions.page = target,
        }
        self.fetch_list(kind);
    }
}

// ============================================================================
// Actions and Effects
// ============================================================================

/// Everything that can happen to the page
#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    /// Start (or restart) the product fetch
    Load,
    ProductLoaded {
        token: RequestToken,
        result: std::result::Result<Option<Product>, String>,
    },
    ReviewsLoaded {
        token: RequestToken,
        result: std::result::Result<Paginated<Review>, String>,
    },
    QuestionsLoaded {
        token: RequestToken,
        result: std::result::Result<Paginated<Question>, String>,
    },

    // Tabs
    SelectTab(ProductTab),
    NextTab,
    PrevTab,

    // Pagination of the active list panel
    NextPage,
    PrevPage,
    GoToPage(u32),

    // Composition
    /// Compose for the active tab
    Compose,
    ComposeReview,
    ComposeQuestion,
    Submit(Submission),
    Submitted {
        kind: ComposerKind,
        result: std::result::Result<(), String>,
    },

    Retry,
    CopyShareLink,
    ShareLinkCopied(std::result::Result<String, String>),
    Notify(Toast),
    ScrollUp,
    ScrollDown,
    DismissToast,
    Quit,
}

/// Remote work requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum PageEffect {
    FetchProduct { slug: String, token: RequestToken },
    FetchReviews { query: PageQuery, token: RequestToken },
    FetchQuestions { query: PageQuery, token: RequestToken },
    Submit(Submission),
    CopyToClipboard(String),
}

// ============================================================================
// Reducer
// ============================================================================

/// Apply one action to the page state
pub fn reduce_page(
    mut state: ProductPageState,
    action: PageAction,
    ctx: &PageContext,
) -> ProductPageState {
    match action {
        PageAction::Load => state.fetch_product(),
        PageAction::ProductLoaded { token, result } => {
            if !state.product_generations.is_current(token) {
                tracing::debug!(generation = token.generation(), "dropping stale product response");
                return state;
            }
            match result {
                Ok(Some(product)) => {
                    tracing::debug!(slug = %product.slug, "product loaded");
                    state.product = FetchState::Ready(Arc::new(product));
                    state.fetch_reviews();
                    state.fetch_questions();
                }
                Ok(None) => {
                    tracing::info!(slug = %state.slug, "product not found");
                    state.product = FetchState::Empty;
                }
                Err(message) => {
                    tracing::warn!(slug = %state.slug, error = %message, "failed to load product");
                    state.product = FetchState::Failed(message);
                }
            }
        }
        PageAction::ReviewsLoaded { token, result } => {
            if let Err(message) = &result {
                tracing::warn!(error = %message, "failed to load reviews");
            }
            if !state.reviews.apply(token, result) {
                tracing::debug!(generation = token.generation(), "dropping stale reviews response");
            }
        }
        PageAction::QuestionsLoaded { token, result } => {
            if let Err(message) = &result {
                tracing::warn!(error = %message, "failed to load questions");
            }
            if !state.questions.apply(token, result) {
                tracing::debug!(generation = token.generation(), "dropping stale questions response");
            }
        }

        PageAction::SelectTab(tab) => state.active_tab = tab,
        PageAction::NextTab => state.active_tab = state.active_tab.next(),
        PageAction::PrevTab => state.active_tab = state.active_tab.prev(),

        PageAction::NextPage => {
            let page = match state.active_tab {
                ProductTab::Details => return state,
                ProductTab::Reviews => state.reviews.page,
                ProductTab::Questions => state.questions.page,
            };
            state.go_to_page(page.saturating_add(1));
        }
        PageAction::PrevPage => {
            let page = match state.active_tab {
                ProductTab::Details => return state,
                ProductTab::Reviews => state.reviews.page,
                ProductTab::Questions => state.questions.page,
            };
            if page > 1 {
                state.go_to_page(page - 1);
            }
        }
        PageAction::GoToPage(page) => state.go_to_page(page),

        PageAction::Compose => match state.active_tab {
            ProductTab::Details => {}
            ProductTab::Reviews => state.compose(ComposerKind::Review, ctx),
            ProductTab::Questions => state.compose(ComposerKind::Question, ctx),
        },
        PageAction::ComposeReview => state.compose(ComposerKind::Review, ctx),
        PageAction::ComposeQuestion => state.compose(ComposerKind::Question, ctx),
        PageAction::Submit(submission) => {
            if state.submitting.is_some() {
                return state;
            }
            state.submitting = Some(submission.kind());
            state.effects.push(PageEffect::Submit(submission));
        }
        PageAction::Submitted { kind, result } => {
            state.submitting = None;
            match result {
                Ok(()) => {
                    state.toast = Some(Toast::info(match kind {
                        ComposerKind::Review => "Review submitted",
                        ComposerKind::Question => "Question posted",
                    }));
                    state.fetch_list(kind);
                }
                Err(message) => {
                    tracing::warn!(?kind, error = %message, "submission failed");
                    state.toast = Some(Toast::error(format!("Failed to submit: {message}")));
                }
            }
        }

        PageAction::Retry => {
            if state.product().is_some() {
                if state.reviews.wants_retry() {
                    state.fetch_reviews();
                }
                if state.questions.wants_retry() {
                    state.fetch_questions();
                }
            } else if !state.product.is_loading() {
                state.fetch_product();
            }
        }
        PageAction::CopyShareLink => {
            if state.product().is_none() {
                return state;
            }
            match ShareLinks::new(&state.settings.app_url, &state.slug) {
                Ok(links) => state
                    .effects
                    .push(PageEffect::CopyToClipboard(links.product_url)),
                Err(e) => state.toast = Some(Toast::error(format!("Cannot build link: {e}"))),
            }
        }
        PageAction::ShareLinkCopied(result) => {
            state.toast = Some(match result {
                Ok(url) => Toast::info(format!("Copied {url}")),
                Err(message) => Toast::error(format!("Copy failed: {message}")),
            });
        }
        PageAction::Notify(toast) => state.toast = Some(toast),

        PageAction::ScrollUp => match state.active_tab {
            ProductTab::Details => state.details_scroll = state.details_scroll.saturating_sub(1),
            ProductTab::Reviews => state.reviews.scroll = state.reviews.scroll.saturating_sub(1),
            ProductTab::Questions => {
                state.questions.scroll = state.questions.scroll.saturating_sub(1)
            }
        },
        PageAction::ScrollDown => match state.active_tab {
            ProductTab::Details => state.details_scroll += 1,
            ProductTab::Reviews => {
                let max = state.reviews.item_count().saturating_sub(1);
                state.reviews.scroll = (state.reviews.scroll + 1).min(max);
            }
            ProductTab::Questions => {
                let max = state.questions.item_count().saturating_sub(1);
                state.questions.scroll = (state.questions.scroll + 1).min(max);
            }
        },
        PageAction::DismissToast => state.toast = None,
        PageAction::Quit => state.should_exit = true,
    }
    state
}

// ============================================================================
// View Model
// ============================================================================

/// What the page renders
#[derive(Debug, Clone)]
pub enum PageView {
    Loading,
    NotFound,
    Failed(String),
    Ready(Box<ReadyView>),
}

/// Everything needed to render a loaded product
#[derive(Debug, Clone)]
pub struct ReadyView {
    pub product: Arc<Product>,
    pub sidebar: ShopSidebarModel,
    pub active_tab: ProductTab,
    /// "4.5 ★ (12 reviews)"
    pub badge: String,
    pub histogram: Vec<RatingBucket>,
    pub details_scroll: usize,
    pub reviews: ListView<Review>,
    pub questions: ListView<Question>,
    /// Whether the compose actions are live
    pub compose_enabled: bool,
}

/// Body of a list panel
#[derive(Debug, Clone, PartialEq)]
pub enum ListBody<T> {
    Loading,
    Empty(&'static str),
    Items(Vec<T>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    pub body: ListBody<T>,
    /// Absent when there is nothing to page through
    pub pager: Option<PagerView>,
    pub scroll: usize,
    pub compose_label: &'static str,
}

impl<T: Clone> ListView<T> {
    fn from_panel(panel: &ListPanel<T>, kind: ComposerKind, empty: &'static str) -> Self {
        let (body, pager) = match &panel.list {
            FetchState::Idle | FetchState::Loading => (ListBody::Loading, None),
            FetchState::Empty => (ListBody::Empty(empty), None),
            FetchState::Ready(page) => (ListBody::Items(page.docs.clone()), PagerView::from_page(page)),
            FetchState::Failed(message) => (ListBody::Failed(message.clone()), None),
        };
        Self {
            body,
            pager,
            scroll: panel.scroll,
            compose_label: kind.title(),
        }
    }
}

/// "4.5 ★ (12 reviews)"; the count is `totalReviews`, not the number of
/// distinct star values in `rating_count`
pub fn rating_badge(product: &Product) -> String {
    format!("{:.1} ★ ({} reviews)", product.ratings, product.total_reviews)
}

/// Compute the view model from raw state
pub fn compute_page_view(state: &ProductPageState, auth: &AuthorizationGate) -> PageView {
    let product = match &state.product {
        FetchState::Idle | FetchState::Loading => return PageView::Loading,
        FetchState::Empty => return PageView::NotFound,
        FetchState::Failed(message) => return PageView::Failed(message.clone()),
        FetchState::Ready(product) => Arc::clone(product),
    };

    let share = ShareLinks::new(&state.settings.app_url, &product.slug)
        .inspect_err(|e| tracing::debug!(error = %e, "no share links"))
        .ok();

    PageView::Ready(Box::new(ReadyView {
        sidebar: ShopSidebarModel::new(product.shop.as_ref(), share),
        active_tab: state.active_tab,
        badge: rating_badge(&product),
        histogram: rating_histogram(
            &product.rating_count,
            product.total_reviews,
            &state.settings.palette,
        ),
        details_scroll: state.details_scroll,
        reviews: ListView::from_panel(&state.reviews, ComposerKind::Review, NO_REVIEWS_MESSAGE),
        questions: ListView::from_panel(
            &state.questions,
            ComposerKind::Question,
            NO_QUESTIONS_MESSAGE,
        ),
        compose_enabled: auth.is_authorized(),
        product,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::store::ModalDispatch;
    use crate::types::{RatingCount, Shop};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingModals {
        reviews: AtomicUsize,
        questions: AtomicUsize,
    }

    impl ModalDispatch for CountingModals {
        fn open_review_composer(&self, _product: Arc<Product>) {
            self.reviews.fetch_add(1, Ordering::SeqCst);
        }

        fn open_question_composer(&self, _product: Arc<Product>) {
            self.questions.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn settings() -> PageSettings {
        PageSettings {
            page_size: 10,
            app_url: "https://shop.example.com".to_string(),
            palette: RatingPalette::default(),
        }
    }

    fn ctx(authorized: bool) -> (PageContext, Arc<CountingModals>) {
        let modals = Arc::new(CountingModals::default());
        (
            PageContext::new(AuthorizationGate::new(authorized), modals.clone()),
            modals,
        )
    }

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            slug: "striped-tee".to_string(),
            name: "Striped Tee".to_string(),
            description: Some("Soft cotton".to_string()),
            price: Some(19.5),
            ratings: 4.5,
            total_reviews: 4,
            rating_count: vec![
                RatingCount { rating: 5.0, total: 3 },
                RatingCount { rating: 3.0, total: 1 },
            ],
            shop: Some(Shop::default()),
        }
    }

    fn page<T>(docs: Vec<T>, total_docs: u64, page: u32) -> Paginated<T> {
        Paginated {
            docs,
            total_docs,
            page,
            ..Default::default()
        }
    }

    fn review(id: &str) -> Review {
        Review {
            id: id.to_string(),
            user: None,
            rating: 5.0,
            title: None,
            comment: "Nice".to_string(),
            created_at: None,
        }
    }

    fn token_of(effect: &PageEffect) -> RequestToken {
        match effect {
            PageEffect::FetchProduct { token, .. }
            | PageEffect::FetchReviews { token, .. }
            | PageEffect::FetchQuestions { token, .. } => *token,
            other => panic!("not a fetch: {other:?}"),
        }
    }

    /// State with the product loaded and both lists requested
    fn loaded(ctx: &PageContext) -> (ProductPageState, RequestToken, RequestToken) {
        let mut state = reduce_page(ProductPageState::new("striped-tee", settings()), PageAction::Load, ctx);
        let effects = state.take_effects();
        let token = token_of(&effects[0]);
        state = reduce_page(
            state,
            PageAction::ProductLoaded {
                token,
                result: Ok(Some(product())),
            },
            ctx,
        );
        let effects = state.take_effects();
        assert_eq!(effects.len(), 2);
        (state, token_of(&effects[0]), token_of(&effects[1]))
    }

    #[test]
    fn test_load_shows_loading() {
        let (ctx, _) = ctx(false);
        let mut state = reduce_page(ProductPageState::new("striped-tee", settings()), PageAction::Load, &ctx);
        assert!(matches!(compute_page_view(&state, &ctx.auth), PageView::Loading));
        let effects = state.take_effects();
        assert!(matches!(&effects[0], PageEffect::FetchProduct { slug, .. } if slug == "striped-tee"));
        assert!(!state.has_pending_effects());
    }

    #[test]
    fn test_not_found_renders_no_sidebar_or_tabs() {
        let (ctx, _) = ctx(false);
        let mut state = reduce_page(ProductPageState::new("nope", settings()), PageAction::Load, &ctx);
        let token = token_of(&state.take_effects()[0]);
        state = reduce_page(state, PageAction::ProductLoaded { token, result: Ok(None) }, &ctx);
        assert!(matches!(compute_page_view(&state, &ctx.auth), PageView::NotFound));
        assert!(state.take_effects().is_empty());
    }

    #[test]
    fn test_failed_product_then_retry() {
        let (ctx, _) = ctx(false);
        let mut state = reduce_page(ProductPageState::new("tee", settings()), PageAction::Load, &ctx);
        let token = token_of(&state.take_effects()[0]);
        state = reduce_page(
            state,
            PageAction::ProductLoaded {
                token,
                result: Err("connection refused".to_string()),
            },
            &ctx,
        );
        match compute_page_view(&state, &ctx.auth) {
            PageView::Failed(message) => assert_eq!(message, "connection refused"),
            other => panic!("expected failure, got {other:?}"),
        }

        state = reduce_page(state, PageAction::Retry, &ctx);
        assert!(state.product.is_loading());
        assert!(matches!(state.take_effects()[0], PageEffect::FetchProduct { .. }));
    }

    #[test]
    fn test_product_loaded_fetches_first_pages() {
        let (ctx, _) = ctx(false);
        let mut state = reduce_page(ProductPageState::new("striped-tee", settings()), PageAction::Load, &ctx);
        let token = token_of(&state.take_effects()[0]);
        state = reduce_page(
            state,
            PageAction::ProductLoaded {
                token,
                result: Ok(Some(product())),
            },
            &ctx,
        );
        let effects = state.take_effects();
        assert_eq!(
            effects
                .iter()
                .filter_map(|e| match e {
                    PageEffect::FetchReviews { query, .. } | PageEffect::FetchQuestions { query, .. } =>
                        Some(query.clone()),
                    _ => None,
                })
                .collect::<Vec<_>>(),
            vec![PageQuery::new("p1", 1, 10), PageQuery::new("p1", 1, 10)]
        );
    }

    #[test]
    fn test_badge_counts_reviews_not_star_values() {
        let mut p = product();
        p.total_reviews = 7;
        p.rating_count = vec![RatingCount { rating: 4.0, total: 7 }];
        assert_eq!(rating_badge(&p), "4.5 ★ (7 reviews)");
    }

    #[test]
    fn test_ready_view_defaults_to_details() {
        let (ctx, _) = ctx(false);
        let (state, _, _) = loaded(&ctx);
        let PageView::Ready(view) = compute_page_view(&state, &ctx.auth) else {
            panic!("expected ready view");
        };
        assert_eq!(view.active_tab, ProductTab::Details);
        assert_eq!(view.sidebar.name, "Unnamed Shop");
        assert_eq!(view.badge, "4.5 ★ (4 reviews)");
        assert_eq!(view.histogram[0].count, 3);
        assert_eq!(view.histogram[0].fraction, 0.75);
        assert!(!view.compose_enabled);
        assert_eq!(view.reviews.body, ListBody::Loading);
    }

    #[test]
    fn test_reviews_page_change_leaves_questions_alone() {
        let (ctx, _) = ctx(false);
        let (mut state, reviews_token, questions_token) = loaded(&ctx);
        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: reviews_token,
                result: Ok(page(vec![review("r1")], 25, 1)),
            },
            &ctx,
        );
        state = reduce_page(
            state,
            PageAction::QuestionsLoaded {
                token: questions_token,
                result: Ok(page(vec![], 0, 1)),
            },
            &ctx,
        );
        let questions_before = state.questions.page;

        state = reduce_page(state, PageAction::SelectTab(ProductTab::Reviews), &ctx);
        state = reduce_page(state, PageAction::NextPage, &ctx);

        let effects = state.take_effects();
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            PageEffect::FetchReviews { query, .. } => assert_eq!(query.page, 2),
            other => panic!("expected reviews fetch, got {other:?}"),
        }
        assert_eq!(state.reviews.page, 2);
        assert_eq!(state.questions.page, questions_before);
        assert_eq!(state.questions.list, FetchState::Empty);
    }

    #[test]
    fn test_page_navigation_is_bounded() {
        let (ctx, _) = ctx(false);
        let (mut state, reviews_token, _) = loaded(&ctx);
        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: reviews_token,
                result: Ok(page(vec![review("r1")], 3, 1)),
            },
            &ctx,
        );
        state = reduce_page(state, PageAction::SelectTab(ProductTab::Reviews), &ctx);
        state = reduce_page(state, PageAction::PrevPage, &ctx);
        state = reduce_page(state, PageAction::NextPage, &ctx);
        assert!(state.take_effects().is_empty());
        assert_eq!(state.reviews.page, 1);
    }

    #[test]
    fn test_paging_on_details_tab_is_ignored() {
        let (ctx, _) = ctx(false);
        let (mut state, reviews_token, _) = loaded(&ctx);
        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: reviews_token,
                result: Ok(page(vec![review("r1")], 30, 1)),
            },
            &ctx,
        );
        state = reduce_page(state, PageAction::NextPage, &ctx);
        assert!(state.take_effects().is_empty());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let (ctx, _) = ctx(false);
        let (mut state, first, _) = loaded(&ctx);
        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: first,
                result: Ok(page(vec![review("r1")], 30, 1)),
            },
            &ctx,
        );
        state = reduce_page(state, PageAction::SelectTab(ProductTab::Reviews), &ctx);
        state = reduce_page(state, PageAction::NextPage, &ctx);
        let second = token_of(&state.take_effects()[0]);
        state = reduce_page(state, PageAction::NextPage, &ctx);
        assert!(state.take_effects().is_empty(), "no bounds known while loading");

        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: second,
                result: Ok(page(vec![review("r2")], 30, 2)),
            },
            &ctx,
        );
        // A late reply to the first request must not overwrite page 2
        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: first,
                result: Ok(page(vec![review("stale")], 30, 1)),
            },
            &ctx,
        );
        let docs = &state.reviews.list.ready().unwrap().docs;
        assert_eq!(docs[0].id, "r2");
        assert_eq!(state.reviews.page, 2);
    }

    #[test]
    fn test_stale_product_response_is_dropped() {
        let (ctx, _) = ctx(false);
        let mut state = reduce_page(ProductPageState::new("striped-tee", settings()), PageAction::Load, &ctx);
        let first = token_of(&state.take_effects()[0]);
        state = reduce_page(state, PageAction::Retry, &ctx);
        assert!(state.take_effects().is_empty(), "retry while loading does nothing");
        state = reduce_page(state, PageAction::Load, &ctx);
        let _second = token_of(&state.take_effects()[0]);
        state = reduce_page(
            state,
            PageAction::ProductLoaded {
                token: first,
                result: Ok(None),
            },
            &ctx,
        );
        assert!(state.product.is_loading());
    }

    #[test]
    fn test_empty_lists_have_no_pager() {
        let (ctx, _) = ctx(false);
        let (mut state, reviews_token, questions_token) = loaded(&ctx);
        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: reviews_token,
                result: Ok(page(vec![], 0, 1)),
            },
            &ctx,
        );
        state = reduce_page(
            state,
            PageAction::QuestionsLoaded {
                token: questions_token,
                result: Ok(page(vec![], 0, 1)),
            },
            &ctx,
        );
        let PageView::Ready(view) = compute_page_view(&state, &ctx.auth) else {
            panic!("expected ready view");
        };
        assert!(view.reviews.pager.is_none());
        assert!(view.questions.pager.is_none());
        assert_eq!(view.reviews.body, ListBody::Empty(NO_REVIEWS_MESSAGE));
        assert_eq!(view.questions.body, ListBody::Empty(NO_QUESTIONS_MESSAGE));
    }

    #[test]
    fn test_pager_shown_for_non_empty_list() {
        let (ctx, _) = ctx(false);
        let (mut state, reviews_token, _) = loaded(&ctx);
        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: reviews_token,
                result: Ok(page(vec![review("r1")], 12, 1)),
            },
            &ctx,
        );
        let PageView::Ready(view) = compute_page_view(&state, &ctx.auth) else {
            panic!("expected ready view");
        };
        assert_eq!(view.reviews.pager.unwrap().indicator(), "Page 1 of 2");
    }

    #[test]
    fn test_compose_is_noop_when_unauthorized() {
        let (ctx, modals) = ctx(false);
        let (mut state, _, _) = loaded(&ctx);
        state = reduce_page(state, PageAction::ComposeReview, &ctx);
        state = reduce_page(state, PageAction::ComposeQuestion, &ctx);
        state = reduce_page(state, PageAction::SelectTab(ProductTab::Reviews), &ctx);
        let _ = reduce_page(state, PageAction::Compose, &ctx);
        assert_eq!(modals.reviews.load(Ordering::SeqCst), 0);
        assert_eq!(modals.questions.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_compose_dispatches_once_when_authorized() {
        let (ctx, modals) = ctx(true);
        let (mut state, _, _) = loaded(&ctx);
        state = reduce_page(state, PageAction::ComposeReview, &ctx);
        assert_eq!(modals.reviews.load(Ordering::SeqCst), 1);
        assert_eq!(modals.questions.load(Ordering::SeqCst), 0);

        state = reduce_page(state, PageAction::SelectTab(ProductTab::Questions), &ctx);
        let state = reduce_page(state, PageAction::Compose, &ctx);
        assert_eq!(modals.questions.load(Ordering::SeqCst), 1);
        assert_eq!(modals.reviews.load(Ordering::SeqCst), 1);

        let PageView::Ready(view) = compute_page_view(&state, &ctx.auth) else {
            panic!("expected ready view");
        };
        assert!(view.compose_enabled);
    }

    #[test]
    fn test_compose_on_details_tab_does_nothing() {
        let (ctx, modals) = ctx(true);
        let (state, _, _) = loaded(&ctx);
        let _ = reduce_page(state, PageAction::Compose, &ctx);
        assert_eq!(modals.reviews.load(Ordering::SeqCst), 0);
        assert_eq!(modals.questions.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_successful_submit_refetches_current_page() {
        let (ctx, _) = ctx(true);
        let (mut state, _, questions_token) = loaded(&ctx);
        state = reduce_page(
            state,
            PageAction::QuestionsLoaded {
                token: questions_token,
                result: Ok(page(vec![], 0, 1)),
            },
            &ctx,
        );
        let submission = Submission::Question(crate::types::NewQuestion {
            product: "p1".to_string(),
            question: "Machine washable?".to_string(),
        });
        state = reduce_page(state, PageAction::Submit(submission.clone()), &ctx);
        state = reduce_page(state, PageAction::Submit(submission.clone()), &ctx);
        assert_eq!(state.take_effects(), vec![PageEffect::Submit(submission)]);

        state = reduce_page(
            state,
            PageAction::Submitted {
                kind: ComposerKind::Question,
                result: Ok(()),
            },
            &ctx,
        );
        assert!(state.submitting.is_none());
        assert_eq!(state.toast.as_ref().unwrap().message, "Question posted");
        let effects = state.take_effects();
        assert!(matches!(&effects[..], [PageEffect::FetchQuestions { query, .. }] if query.page == 1));
    }

    #[test]
    fn test_failed_submit_shows_error() {
        let (ctx, _) = ctx(true);
        let (mut state, _, _) = loaded(&ctx);
        state = reduce_page(
            state,
            PageAction::Submitted {
                kind: ComposerKind::Review,
                result: Err("HTTP 401".to_string()),
            },
            &ctx,
        );
        let toast = state.toast.clone().unwrap();
        assert_eq!(toast.level, crate::page::toast::ToastLevel::Error);
        assert!(toast.message.contains("HTTP 401"));
        assert!(state.take_effects().is_empty());
    }

    #[test]
    fn test_retry_restarts_empty_later_page() {
        let (ctx, _) = ctx(false);
        let (mut state, reviews_token, questions_token) = loaded(&ctx);
        // Reviews were deleted since the bounds were read: page 3 comes back empty
        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: reviews_token,
                result: Ok(page(vec![], 25, 3)),
            },
            &ctx,
        );
        state = reduce_page(
            state,
            PageAction::QuestionsLoaded {
                token: questions_token,
                result: Ok(page(vec![], 0, 1)),
            },
            &ctx,
        );
        assert_eq!(state.reviews.page, 3);
        state = reduce_page(state, PageAction::Retry, &ctx);
        let effects = state.take_effects();
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            PageEffect::FetchReviews { query, .. } => assert_eq!(query.page, 1),
            other => panic!("expected a reviews fetch, got {other:?}"),
        }
        assert_eq!(state.reviews.page, 1);
    }

    #[test]
    fn test_retry_refetches_only_failed_lists() {
        let (ctx, _) = ctx(false);
        let (mut state, reviews_token, questions_token) = loaded(&ctx);
        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: reviews_token,
                result: Err("timeout".to_string()),
            },
            &ctx,
        );
        state = reduce_page(
            state,
            PageAction::QuestionsLoaded {
                token: questions_token,
                result: Ok(page(vec![], 0, 1)),
            },
            &ctx,
        );
        state = reduce_page(state, PageAction::Retry, &ctx);
        let effects = state.take_effects();
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], PageEffect::FetchReviews { .. }));
    }

    #[test]
    fn test_copy_share_link() {
        let (ctx, _) = ctx(false);
        let (mut state, _, _) = loaded(&ctx);
        state = reduce_page(state, PageAction::CopyShareLink, &ctx);
        assert_eq!(
            state.take_effects(),
            vec![PageEffect::CopyToClipboard(
                "https://shop.example.com/products/striped-tee".to_string()
            )]
        );
    }

    #[test]
    fn test_tabs_cycle() {
        assert_eq!(ProductTab::Details.next(), ProductTab::Reviews);
        assert_eq!(ProductTab::Questions.next(), ProductTab::Details);
        assert_eq!(ProductTab::Details.prev(), ProductTab::Questions);
        assert_eq!(ProductTab::from_index(2), Some(ProductTab::Questions));
        assert_eq!(ProductTab::from_index(3), None);
    }

    #[test]
    fn test_scroll_is_bounded_by_items() {
        let (ctx, _) = ctx(false);
        let (mut state, reviews_token, _) = loaded(&ctx);
        state = reduce_page(
            state,
            PageAction::ReviewsLoaded {
                token: reviews_token,
                result: Ok(page(vec![review("r1"), review("r2")], 2, 1)),
            },
            &ctx,
        );
        state = reduce_page(state, PageAction::SelectTab(ProductTab::Reviews), &ctx);
        for _ in 0..5 {
            state = reduce_page(state, PageAction::ScrollDown, &ctx);
        }
        assert_eq!(state.reviews.scroll, 1);
        state = reduce_page(state, PageAction::ScrollUp, &ctx);
        state = reduce_page(state, PageAction::ScrollUp, &ctx);
        assert_eq!(state.reviews.scroll, 0);
    }

    #[test]
    fn test_toast_expires() {
        let (ctx, _) = ctx(false);
        let mut state = reduce_page(
            ProductPageState::new("tee", settings()),
            PageAction::Notify(Toast::info("hi")),
            &ctx,
        );
        let shown = state.toast.as_ref().unwrap().timestamp;
        assert!(!state.expire_toast(shown));
        assert!(state.expire_toast(shown + crate::page::toast::TOAST_TTL));
        assert!(state.toast.is_none());
    }

    #[test]
    fn test_quit_and_dismiss() {
        let (ctx, _) = ctx(false);
        let mut state = ProductPageState::new("tee", settings());
        state = reduce_page(state, PageAction::Notify(Toast::warning("hm")), &ctx);
        state = reduce_page(state, PageAction::DismissToast, &ctx);
        assert!(state.toast.is_none());
        state = reduce_page(state, PageAction::Quit, &ctx);
        assert!(state.should_exit);
    }
}

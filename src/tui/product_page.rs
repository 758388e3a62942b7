//! Main product page component
//!
//! Holds the page state in a single `State<ProductPageState>`, feeds key
//! presses through the pure keymap and reducer, and runs queued effects on
//! an async handler whose results are reduced back into the state.

// Allow clone on Copy types - used intentionally in async closures for clarity
#![allow(clippy::clone_on_copy)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use iocraft::prelude::*;

use crate::api::StorefrontApi;
use crate::page::composer::ComposerDraft;
use crate::page::effects::run_effect;
use crate::page::model::{
    PageAction, PageEffect, PageSettings, PageView, ProductPageState, ProductTab,
    compute_page_view, reduce_page,
};
use crate::page::store::{AuthorizationGate, ModalReader, ModalStore, PageContext};
use crate::page::toast::Toast;
use crate::tui::components::{
    EmptyState, EmptyStateKind, Footer, TabBar, composer_shortcuts, page_shortcuts, render_toast,
};
use crate::tui::composer_modal::ComposerModal;
use crate::tui::details_pane::{DescriptionPanel, DetailsPane};
use crate::tui::keymap::{ComposerInput, KeyAction, key_to_action};
use crate::tui::shop_sidebar::ShopSidebar;
use crate::tui::tabs::{QuestionsPanel, ReviewsPanel};
use crate::tui::theme::theme;

/// Props for the ProductPage component
#[derive(Default, Props)]
pub struct ProductPageProps {
    pub slug: String,
    pub settings: PageSettings,
    pub api: Option<Arc<dyn StorefrontApi>>,
    pub auth: AuthorizationGate,
    pub modals: ModalStore,
}

/// Apply a composer keystroke to `draft`; returns the page action it triggers
fn apply_composer_input(draft: &mut ComposerDraft, input: ComposerInput) -> Option<PageAction> {
    match input {
        ComposerInput::Char(c) => draft.push(c),
        ComposerInput::Backspace => draft.backspace(),
        ComposerInput::Rating(rating) => draft.set_rating(rating),
        ComposerInput::AdjustRating(delta) => draft.adjust_rating(delta),
        ComposerInput::ToggleFocus => draft.toggle_focus(),
        ComposerInput::Close => {}
        ComposerInput::Submit => {
            return Some(match draft.validate() {
                Ok(submission) => PageAction::Submit(submission),
                Err(message) => PageAction::Notify(Toast::warning(message)),
            });
        }
    }
    None
}

/// Close the composer a successful submission came from.
///
/// A composer of the other kind opened while the request was in flight
/// stays open.
fn close_submitted_composer(modals: &dyn ModalReader, action: &PageAction) {
    let PageAction::Submitted { kind, result: Ok(()) } = action else {
        return;
    };
    if modals.current().is_some_and(|req| req.kind == *kind) {
        modals.close();
    }
}

#[component]
pub fn ProductPage<'a>(props: &ProductPageProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let theme = theme();

    let modals = props.modals.clone();
    let ctx = PageContext::new(props.auth.clone(), Arc::new(modals.clone()));

    let mut page: State<ProductPageState> = hooks.use_state({
        let slug = props.slug.clone();
        let settings = props.settings.clone();
        let ctx = ctx.clone();
        move || reduce_page(ProductPageState::new(slug, settings), PageAction::Load, &ctx)
    });
    let mut draft: State<Option<ComposerDraft>> = hooks.use_state(|| None);

    // Runs one effect and reduces its outcome back into the page
    let effect_handler: Handler<PageEffect> = hooks.use_async_handler({
        let page_setter = page.clone();
        let api = props.api.clone();
        let ctx = ctx.clone();
        let modals = modals.clone();

        move |effect: PageEffect| {
            let mut page_setter = page_setter.clone();
            let api = api.clone();
            let ctx = ctx.clone();
            let modals = modals.clone();

            async move {
                let Some(api) = api else {
                    tracing::warn!(?effect, "no API client configured, dropping effect");
                    return;
                };
                let action = run_effect(effect, api.as_ref()).await;
                close_submitted_composer(&modals, &action);
                let current = page_setter.read().clone();
                page_setter.set(reduce_page(current, action, &ctx));
            }
        }
    });

    // Clears the toast once it has been up long enough
    hooks.use_future({
        let mut page = page.clone();
        async move {
            loop {
                tokio::time::sleep(Duration::from_millis(500)).await;
                let now = Instant::now();
                let expired = page
                    .read()
                    .toast
                    .as_ref()
                    .is_some_and(|t| t.is_expired(now));
                if expired {
                    page.write().expire_toast(now);
                }
            }
        }
    });

    hooks.use_terminal_events({
        let ctx = ctx.clone();
        let modals = modals.clone();
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let request = modals.current();
                let mut current_draft = request.as_ref().map(|req| {
                    draft
                        .read()
                        .clone()
                        .filter(|d| d.matches(req))
                        .unwrap_or_else(|| ComposerDraft::new(req))
                });
                let focus = current_draft.as_ref().map(|d| d.focus);

                let action = match key_to_action(code, modifiers, focus) {
                    Some(KeyAction::Page(action)) => Some(action),
                    Some(KeyAction::Composer(ComposerInput::Close)) => {
                        modals.close();
                        current_draft = None;
                        None
                    }
                    Some(KeyAction::Composer(input)) => current_draft
                        .as_mut()
                        .and_then(|d| apply_composer_input(d, input)),
                    Some(KeyAction::Consumed) | None => None,
                };

                if request.is_some() {
                    draft.set(current_draft);
                }
                if let Some(action) = action {
                    let current = page.read().clone();
                    page.set(reduce_page(current, action, &ctx));
                }
            }
            _ => {}
        }
    });

    // Drain effects queued by the reducer
    if page.read().has_pending_effects() {
        let effects = page.write().take_effects();
        for effect in effects {
            effect_handler.clone()(effect);
        }
    }

    // Exit if requested
    if page.read().should_exit {
        system.exit();
    }

    // A closed composer forgets its draft
    let request = modals.current();
    if request.is_none() && draft.read().is_some() {
        draft.set(None);
    }
    let shown_draft = request.as_ref().map(|req| {
        draft
            .read()
            .clone()
            .filter(|d| d.matches(req))
            .unwrap_or_else(|| ComposerDraft::new(req))
    });

    let (view, toast, submitting) = {
        let state = page.read();
        (
            compute_page_view(&state, &props.auth),
            state.toast.clone(),
            state.submitting.is_some(),
        )
    };

    let shortcuts = match (&shown_draft, &view) {
        (Some(d), _) => composer_shortcuts(d.kind),
        (None, PageView::Ready(ready)) => page_shortcuts(ready.active_tab, ready.compose_enabled),
        (None, _) => page_shortcuts(ProductTab::Details, false),
    };

    let body = match view {
        PageView::Loading => element! {
            EmptyState(kind: EmptyStateKind::Loading)
        }
        .into_any(),
        PageView::NotFound => element! {
            EmptyState(kind: EmptyStateKind::NotFound)
        }
        .into_any(),
        PageView::Failed(message) => element! {
            EmptyState(kind: EmptyStateKind::Failed, message: Some(message))
        }
        .into_any(),
        PageView::Ready(ready) => {
            let product = (*ready.product).clone();
            let panel = match ready.active_tab {
                ProductTab::Details => element! {
                    DescriptionPanel(
                        description: product.description.clone(),
                        scroll: ready.details_scroll,
                    )
                }
                .into_any(),
                ProductTab::Reviews => element! {
                    ReviewsPanel(
                        view: Some(ready.reviews.clone()),
                        histogram: ready.histogram.clone(),
                        badge: ready.badge.clone(),
                        compose_enabled: ready.compose_enabled,
                    )
                }
                .into_any(),
                ProductTab::Questions => element! {
                    QuestionsPanel(
                        view: Some(ready.questions.clone()),
                        compose_enabled: ready.compose_enabled,
                    )
                }
                .into_any(),
            };
            element! {
                View(flex_grow: 1.0, width: 100pct, flex_direction: FlexDirection::Row) {
                    View(flex_grow: 1.0, height: 100pct, flex_direction: FlexDirection::Column) {
                        DetailsPane(product: Some(product.clone()), badge: ready.badge.clone())
                        TabBar(active_tab: ready.active_tab, review_count: Some(product.total_reviews))
                        #(Some(panel))
                    }
                    ShopSidebar(model: Some(ready.sidebar.clone()))
                }
            }
            .into_any()
        }
    };

    let product_name = page
        .read()
        .product()
        .map(|p| p.name.clone())
        .unwrap_or_default();

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            View(flex_grow: 1.0, width: 100pct) {
                #(Some(body))
            }

            // Footer
            Footer(shortcuts: shortcuts)

            // Toast notification
            #(render_toast(&toast))

            // Composer overlay
            ComposerModal(
                draft: shown_draft,
                product_name: product_name,
                submitting: submitting,
            )
        }
    }
}

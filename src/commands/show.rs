//! Print a product page once (`storefront show <slug>`)

use std::sync::Arc;

use crate::api::HttpStorefrontApi;
use crate::config::Config;
use crate::display::{format_page_text, page_json};
use crate::error::{Result, StorefrontError};
use crate::page::effects::settle;
use crate::page::model::{
    PageAction, PageSettings, PageView, ProductPageState, ProductTab, compute_page_view,
    reduce_page,
};
use crate::page::store::{AuthorizationGate, ModalStore, PageContext};

use super::CommandOutput;

#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    pub reviews_page: Option<u32>,
    pub questions_page: Option<u32>,
    pub json: bool,
}

/// Fetch the product with its first (or requested) review and question
/// pages and print it.
///
/// Fails when the product is missing or could not be loaded, after printing.
pub async fn cmd_show(slug: &str, options: ShowOptions) -> Result<()> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(StorefrontError::InvalidSlug(slug.to_string()));
    }

    let config = Config::load()?;
    let settings = PageSettings::from_config(&config)?;
    let api = HttpStorefrontApi::from_config(&config)?;
    let auth = AuthorizationGate::new(api.has_token());
    let ctx = PageContext::new(auth.clone(), Arc::new(ModalStore::new()));

    let state = ProductPageState::new(slug, settings);
    let state = reduce_page(state, PageAction::Load, &ctx);
    let mut state = settle(state, &api, &ctx).await;

    for (tab, page) in [
        (ProductTab::Reviews, options.reviews_page),
        (ProductTab::Questions, options.questions_page),
    ] {
        let Some(page) = page.filter(|p| *p > 1) else {
            continue;
        };
        state = reduce_page(state, PageAction::SelectTab(tab), &ctx);
        state = reduce_page(state, PageAction::GoToPage(page), &ctx);
        state = settle(state, &api, &ctx).await;
    }

    let view = compute_page_view(&state, &auth);
    let outcome = match &view {
        PageView::NotFound => Err(StorefrontError::Other(format!("product '{slug}' not found"))),
        PageView::Failed(message) => Err(StorefrontError::Other(format!(
            "failed to load product '{slug}': {message}"
        ))),
        _ => Ok(()),
    };

    CommandOutput::new(page_json(&view))
        .with_text(format_page_text(&view))
        .print(options.json)?;
    outcome
}

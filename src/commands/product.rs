//! Interactive product page command (`storefront product <slug>`)

use std::sync::Arc;

use iocraft::prelude::*;

use crate::api::{HttpStorefrontApi, StorefrontApi};
use crate::config::Config;
use crate::error::{Result, StorefrontError};
use crate::logging;
use crate::page::model::PageSettings;
use crate::page::store::{AuthorizationGate, ModalStore};
use crate::tui::ProductPage;

/// Launch the product page TUI
pub async fn cmd_product(slug: &str) -> Result<()> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(StorefrontError::InvalidSlug(slug.to_string()));
    }

    let config = Config::load()?;
    logging::init_file(&Config::log_path())?;

    let settings = PageSettings::from_config(&config)?;
    let api = HttpStorefrontApi::from_config(&config)?;
    let auth = AuthorizationGate::new(api.has_token());
    let api: Arc<dyn StorefrontApi> = Arc::new(api);

    tracing::info!(slug, authorized = auth.is_authorized(), "opening product page");

    element!(ProductPage(
        slug: slug.to_string(),
        settings: settings,
        api: Some(api),
        auth: auth,
        modals: ModalStore::new(),
    ))
    .fullscreen()
    .await
    .map_err(|e| StorefrontError::Other(format!("TUI error: {}", e)))
}

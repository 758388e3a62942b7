//! Shop sidebar view model and share links.

use url::Url;

use crate::error::{Result, StorefrontError};
use crate::types::{ROUTE_PRODUCT, Shop};

pub const UNNAMED_SHOP: &str = "Unnamed Shop";
pub const NO_IMAGE: &str = "No Image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoView {
    Image(String),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopSidebarModel {
    pub logo: LogoView,
    pub name: String,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub website: Option<String>,
    /// Absent when the app URL cannot form a product link
    pub share: Option<ShareLinks>,
}

impl ShopSidebarModel {
    pub fn new(shop: Option<&Shop>, share: Option<ShareLinks>) -> Self {
        let settings = shop.and_then(|s| s.settings.as_ref());
        Self {
            logo: shop
                .and_then(|s| s.logo.as_ref())
                .and_then(|l| non_empty(l.img_url.as_deref()))
                .map(LogoView::Image)
                .unwrap_or(LogoView::Placeholder(NO_IMAGE)),
            name: shop
                .and_then(|s| non_empty(s.name.as_deref()))
                .unwrap_or_else(|| UNNAMED_SHOP.to_string()),
            description: shop.and_then(|s| non_empty(s.description.as_deref())),
            contact: settings.and_then(|s| non_empty(s.contact.as_deref())),
            website: settings.and_then(|s| non_empty(s.website.as_deref())),
            share,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Social network a product link can be shared to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Facebook,
    Twitter,
    LinkedIn,
    WhatsApp,
    Email,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 5] = [
        ShareTarget::Facebook,
        ShareTarget::Twitter,
        ShareTarget::LinkedIn,
        ShareTarget::WhatsApp,
        ShareTarget::Email,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShareTarget::Facebook => "Facebook",
            ShareTarget::Twitter => "X",
            ShareTarget::LinkedIn => "LinkedIn",
            ShareTarget::WhatsApp => "WhatsApp",
            ShareTarget::Email => "Email",
        }
    }

    fn share_url(self, product_url: &str) -> String {
        let (base, param) = match self {
            ShareTarget::Facebook => ("https://www.facebook.com/sharer/sharer.php", "u"),
            ShareTarget::Twitter => ("https://twitter.com/intent/tweet", "url"),
            ShareTarget::LinkedIn => ("https://www.linkedin.com/sharing/share-offsite/", "url"),
            ShareTarget::WhatsApp => ("https://api.whatsapp.com/send", "text"),
            ShareTarget::Email => ("mailto:", "body"),
        };
        let mut url = match Url::parse(base) {
            Ok(url) => url,
            Err(_) => return product_url.to_string(),
        };
        url.query_pairs_mut().append_pair(param, product_url);
        url.to_string()
    }
}

/// Canonical product URL plus per-network share URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub product_url: String,
    pub targets: Vec<(ShareTarget, String)>,
}

impl ShareLinks {
    /// Build links for `base_url + /products/ + slug`.
    ///
    /// The slug is percent-encoded as a single path segment.
    pub fn new(base_url: &str, slug: &str) -> Result<Self> {
        let product_url = product_url(base_url, slug)?;
        let targets = ShareTarget::ALL
            .iter()
            .map(|t| (*t, t.share_url(&product_url)))
            .collect();
        Ok(Self {
            product_url,
            targets,
        })
    }
}

/// Canonical URL of a product page
pub fn product_url(base_url: &str, slug: &str) -> Result<String> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(StorefrontError::InvalidSlug(slug.to_string()));
    }
    let mut url = Url::parse(base_url.trim_end_matches('/'))?;
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            StorefrontError::Config(format!("base URL '{base_url}' cannot hold a path"))
        })?;
        segments.pop_if_empty();
        for part in ROUTE_PRODUCT.split('/').filter(|p| !p.is_empty()) {
            segments.push(part);
        }
        segments.push(slug);
    }
    Ok(url.to_string())
}

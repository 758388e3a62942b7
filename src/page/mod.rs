//! Product page state, independent of any rendering.
//!
//! [`model`] holds the reducer and the view-model computation; the other
//! modules are the pure pieces it is built from. Nothing here touches the
//! network or the terminal: remote work is described as [`model::PageEffect`]
//! values and carried out by [`effects::run_effect`].

pub mod composer;
pub mod effects;
pub mod fetch;
pub mod model;
pub mod pagination;
pub mod rating;
pub mod sidebar;
pub mod store;
pub mod toast;

pub use composer::{ComposerDraft, ComposerField, Submission};
pub use effects::{run_effect, settle};
pub use fetch::{FetchState, RequestGenerations, RequestToken};
pub use model::{
    ListView, PageAction, PageEffect, PageSettings, PageView, ProductPageState, ProductTab,
    ReadyView, compute_page_view, reduce_page,
};
pub use pagination::PagerView;
pub use rating::{RatingBucket, RatingPalette, Rgb, rating_histogram};
pub use sidebar::{ShareLinks, ShareTarget, ShopSidebarModel};
pub use store::{
    AuthorizationGate, ComposerKind, ComposerRequest, ModalDispatch, ModalReader, ModalStore,
    PageContext,
};
pub use toast::{Toast, ToastLevel};

pub mod api;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod page;
pub mod tui;
pub mod types;

pub use api::{ApiError, HttpStorefrontApi, PageQuery, StorefrontApi};
pub use config::Config;
pub use error::{Result, StorefrontError};
pub use page::{
    AuthorizationGate, ModalStore, PageAction, PageContext, PageView, ProductPageState,
    compute_page_view, reduce_page,
};
pub use types::{NewQuestion, NewReview, Paginated, Product, Question, Review, Shop};

//! Shared page context: the authorization gate and the composer modal store.
//!
//! Both are process-wide and shared by handle. Reading and writing are split:
//! components that may only request an overlay get a `ModalDispatch`, the
//! overlay itself reads through `ModalReader`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::types::Product;

/// Read-only view of whether the viewer may post reviews and questions
#[derive(Debug, Clone, Default)]
pub struct AuthorizationGate {
    authorized: Arc<AtomicBool>,
}

impl AuthorizationGate {
    pub fn new(authorized: bool) -> Self {
        Self {
            authorized: Arc::new(AtomicBool::new(authorized)),
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::Acquire)
    }
}

/// Which overlay is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerKind {
    Review,
    Question,
}

impl ComposerKind {
    pub fn title(self) -> &'static str {
        match self {
            ComposerKind::Review => "Write a Review",
            ComposerKind::Question => "Post Your Question",
        }
    }
}

/// An open-composer request carrying the target product
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerRequest {
    pub kind: ComposerKind,
    pub product: Arc<Product>,
}

/// Write side of the modal store
pub trait ModalDispatch: Send + Sync {
    fn open_review_composer(&self, product: Arc<Product>);
    fn open_question_composer(&self, product: Arc<Product>);
}

/// Read side of the modal store
pub trait ModalReader: Send + Sync {
    fn current(&self) -> Option<ComposerRequest>;
    fn close(&self);
}

/// In-process modal store implementing both sides
#[derive(Debug, Clone, Default)]
pub struct ModalStore {
    state: Arc<RwLock<Option<ComposerRequest>>>,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn open(&self, kind: ComposerKind, product: Arc<Product>) {
        tracing::debug!(?kind, product = %product.id, "opening composer");
        *self.state.write() = Some(ComposerRequest { kind, product });
    }
}

impl ModalDispatch for ModalStore {
    fn open_review_composer(&self, product: Arc<Product>) {
        self.open(ComposerKind::Review, product);
    }

    fn open_question_composer(&self, product: Arc<Product>) {
        self.open(ComposerKind::Question, product);
    }
}

impl ModalReader for ModalStore {
    fn current(&self) -> Option<ComposerRequest> {
        self.state.read().clone()
    }

    fn close(&self) {
        *self.state.write() = None;
    }
}

/// Capabilities handed to the page
#[derive(Clone)]
pub struct PageContext {
    pub auth: AuthorizationGate,
    pub modals: Arc<dyn ModalDispatch>,
}

impl PageContext {
    pub fn new(auth: AuthorizationGate, modals: Arc<dyn ModalDispatch>) -> Self {
        Self { auth, modals }
    }
}

//! Draft state for the review and question composer overlay.

use super::store::{ComposerKind, ComposerRequest};
use crate::types::{NewQuestion, NewReview};

/// Longest body accepted from the composer
pub const MAX_BODY_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerDraft {
    pub kind: ComposerKind,
    pub product_id: String,
    /// Star rating, only meaningful for reviews
    pub rating: u8,
    pub body: String,
    pub focus: ComposerField,
}

/// Input field that receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerField {
    Rating,
    Body,
}

/// A validated draft ready to be posted
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Review(NewReview),
    Question(NewQuestion),
}

impl Submission {
    pub fn kind(&self) -> ComposerKind {
        match self {
            Submission::Review(_) => ComposerKind::Review,
            Submission::Question(_) => ComposerKind::Question,
        }
    }
}

impl ComposerDraft {
    pub fn new(request: &ComposerRequest) -> Self {
        Self {
            kind: request.kind,
            product_id: request.product.id.clone(),
            rating: 5,
            body: String::new(),
            focus: match request.kind {
                ComposerKind::Review => ComposerField::Rating,
                ComposerKind::Question => ComposerField::Body,
            },
        }
    }

    /// Switch between the rating and body fields; questions only have a body
    pub fn toggle_focus(&mut self) {
        if self.kind == ComposerKind::Review {
            self.focus = match self.focus {
                ComposerField::Rating => ComposerField::Body,
                ComposerField::Body => ComposerField::Rating,
            };
        }
    }

    pub fn adjust_rating(&mut self, delta: i8) {
        let rating = (self.rating as i8 + delta).clamp(1, 5);
        self.set_rating(rating as u8);
    }

    /// Whether this draft was started for `request`
    pub fn matches(&self, request: &ComposerRequest) -> bool {
        self.kind == request.kind && self.product_id == request.product.id
    }

    pub fn set_rating(&mut self, rating: u8) {
        if self.kind == ComposerKind::Review && (1..=5).contains(&rating) {
            self.rating = rating;
        }
    }

    pub fn push(&mut self, c: char) {
        if self.body.chars().count() < MAX_BODY_CHARS && !c.is_control() {
            self.body.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.body.pop();
    }

    pub fn validate(&self) -> Result<Submission, &'static str> {
        let body = self.body.trim();
        if body.is_empty() {
            return Err(match self.kind {
                ComposerKind::Review => "Review text cannot be empty",
                ComposerKind::Question => "Question cannot be empty",
            });
        }
        Ok(match self.kind {
            ComposerKind::Review => Submission::Review(NewReview {
                product: self.product_id.clone(),
                rating: self.rating,
                comment: body.to_string(),
            }),
            ComposerKind::Question => Submission::Question(NewQuestion {
                product: self.product_id.clone(),
                question: body.to_string(),
            }),
        })
    }
}

//! Composer overlay for writing a review or asking a question.

use iocraft::prelude::*;

use crate::page::composer::{ComposerDraft, ComposerField};
use crate::page::store::ComposerKind;
use crate::tui::theme::theme;

/// Standard backdrop color for the overlay
pub const MODAL_BACKDROP: Color = Color::Rgb {
    r: 30,
    g: 30,
    b: 30,
};

/// Props for the ComposerModal component
#[derive(Default, Props)]
pub struct ComposerModalProps {
    pub draft: Option<ComposerDraft>,
    pub product_name: String,
    /// A submission is in flight
    pub submitting: bool,
}

#[component]
pub fn ComposerModal(props: &ComposerModalProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let Some(draft) = props.draft.clone() else {
        return element! { View() };
    };

    let focused = |field: ComposerField| {
        if draft.focus == field {
            theme.border_focused
        } else {
            theme.border
        }
    };
    let rating_row = (draft.kind == ComposerKind::Review).then(|| {
        let stars = format!(
            "{}{}",
            "★".repeat(usize::from(draft.rating)),
            "☆".repeat(usize::from(5 - draft.rating.min(5)))
        );
        element! {
            View(
                border_style: BorderStyle::Single,
                border_color: focused(ComposerField::Rating),
                padding_left: 1,
            ) {
                Text(content: format!("Rating: {stars}"), color: theme.star)
            }
        }
    });
    let status = if props.submitting {
        "Submitting..."
    } else {
        "Enter to submit, Esc to cancel"
    };

    element! {
        View(
            width: 100pct,
            height: 100pct,
            position: Position::Absolute,
            top: 0,
            left: 0,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            background_color: MODAL_BACKDROP,
        ) {
            View(
                width: 64,
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Double,
                border_color: theme.border_focused,
                background_color: Color::Black,
                padding: 1,
            ) {
                Text(content: draft.kind.title(), color: theme.text, weight: Weight::Bold)
                Text(content: props.product_name.clone(), color: theme.text_dimmed)
                #(rating_row)
                View(
                    min_height: 5,
                    border_style: BorderStyle::Single,
                    border_color: focused(ComposerField::Body),
                    padding_left: 1,
                ) {
                    Text(content: format!("{}▏", draft.body), color: theme.text)
                }
                Text(content: status, color: theme.text_dimmed)
            }
        }
    }
}

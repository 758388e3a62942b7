//! Reviews and Q&A panels
//!
//! Each panel renders its list body, the pager when there is something to
//! page through, and the gated compose button. The reviews panel also shows
//! the rating histogram.

use iocraft::prelude::*;

use crate::page::model::{ListBody, ListView};
use crate::page::pagination::PagerView;
use crate::page::rating::{RatingBucket, bar};
use crate::tui::theme::{Theme, theme};
use crate::types::{Question, Review};

const BAR_WIDTH: usize = 20;
const PAGER_WINDOW: u32 = 5;

/// Props for the ReviewsPanel component
#[derive(Default, Props)]
pub struct ReviewsPanelProps {
    pub view: Option<ListView<Review>>,
    pub histogram: Vec<RatingBucket>,
    pub badge: String,
    pub compose_enabled: bool,
}

#[component]
pub fn ReviewsPanel(props: &ReviewsPanelProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let Some(view) = props.view.clone() else {
        return element! { View() };
    };

    element! {
        View(flex_direction: FlexDirection::Column, flex_grow: 1.0, padding_left: 1, padding_right: 1) {
            View(flex_direction: FlexDirection::Row) {
                Text(content: props.badge.clone(), color: theme.star, weight: Weight::Bold)
                View(flex_grow: 1.0)
                #(Some(compose_button(view.compose_label, props.compose_enabled)))
            }
            View(flex_direction: FlexDirection::Column, margin_top: 1, margin_bottom: 1) {
                #(props.histogram.iter().map(|bucket| histogram_row(bucket)))
            }
            #(Some(render_body(&view.body, view.scroll, review_row)))
            #(view.pager.as_ref().map(pager_row))
        }
    }
}

/// Props for the QuestionsPanel component
#[derive(Default, Props)]
pub struct QuestionsPanelProps {
    pub view: Option<ListView<Question>>,
    pub compose_enabled: bool,
}

#[component]
pub fn QuestionsPanel(props: &QuestionsPanelProps) -> impl Into<AnyElement<'static>> {
    let Some(view) = props.view.clone() else {
        return element! { View() };
    };

    element! {
        View(flex_direction: FlexDirection::Column, flex_grow: 1.0, padding_left: 1, padding_right: 1) {
            View(flex_direction: FlexDirection::Row, margin_bottom: 1) {
                View(flex_grow: 1.0)
                #(Some(compose_button(view.compose_label, props.compose_enabled)))
            }
            #(Some(render_body(&view.body, view.scroll, question_row)))
            #(view.pager.as_ref().map(pager_row))
        }
    }
}

/// "[w] Write a Review", dimmed when the viewer may not post
fn compose_button(label: &'static str, enabled: bool) -> AnyElement<'static> {
    let theme = theme();
    element! {
        Text(
            content: format!("[w] {label}"),
            color: if enabled { theme.highlight } else { theme.text_dimmed },
            weight: if enabled { Weight::Bold } else { Weight::Normal },
        )
    }
    .into_any()
}

fn histogram_row(bucket: &RatingBucket) -> AnyElement<'static> {
    let theme = theme();
    element! {
        View(flex_direction: FlexDirection::Row, column_gap: 1) {
            Text(content: format!("{} ★", bucket.rating), color: theme.text)
            Text(content: bar(bucket.fraction, BAR_WIDTH), color: Theme::rgb(bucket.color))
            Text(
                content: format!("{:>3.0}% ({})", bucket.percent(), bucket.count),
                color: theme.text_dimmed,
            )
        }
    }
    .into_any()
}

fn render_body<T>(
    body: &ListBody<T>,
    scroll: usize,
    row: fn(&T) -> AnyElement<'static>,
) -> AnyElement<'static> {
    let theme = theme();
    match body {
        ListBody::Loading => element! {
            Text(content: "Loading...", color: theme.text_dimmed)
        }
        .into_any(),
        ListBody::Empty(message) => element! {
            View(padding: 1) {
                Text(content: *message, color: theme.text_dimmed)
            }
        }
        .into_any(),
        ListBody::Failed(message) => element! {
            Text(
                content: format!("Failed to load: {message} (press 'r' to retry)"),
                color: theme.error,
            )
        }
        .into_any(),
        ListBody::Items(items) => element! {
            View(flex_direction: FlexDirection::Column, flex_grow: 1.0, overflow: Overflow::Hidden) {
                #(items.iter().skip(scroll).map(row))
            }
        }
        .into_any(),
    }
}

fn review_row(review: &Review) -> AnyElement<'static> {
    let theme = theme();
    let stars = "★".repeat(review.rating.clamp(0.0, 5.0).round() as usize);
    let date = review
        .created_at
        .map(|ts| ts.strftime("%Y-%m-%d").to_string())
        .unwrap_or_default();
    element! {
        View(flex_direction: FlexDirection::Column, margin_bottom: 1) {
            View(flex_direction: FlexDirection::Row, column_gap: 1) {
                Text(content: stars, color: theme.star)
                Text(content: review.author_name().to_string(), color: theme.text, weight: Weight::Bold)
                Text(content: date, color: theme.text_dimmed)
            }
            #(review.title.clone().map(|title| element! {
                Text(content: title, color: theme.text, weight: Weight::Bold)
            }))
            Text(content: review.comment.clone(), color: theme.text)
        }
    }
    .into_any()
}

fn question_row(question: &Question) -> AnyElement<'static> {
    let theme = theme();
    let answer = question
        .answer
        .clone()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| "Not answered yet".to_string());
    element! {
        View(flex_direction: FlexDirection::Column, margin_bottom: 1) {
            View(flex_direction: FlexDirection::Row, column_gap: 1) {
                Text(content: "Q:", color: theme.highlight, weight: Weight::Bold)
                Text(content: question.question.clone(), color: theme.text)
            }
            View(flex_direction: FlexDirection::Row, column_gap: 1) {
                Text(content: "A:", color: theme.price, weight: Weight::Bold)
                Text(content: answer, color: theme.text_dimmed)
            }
            Text(content: format!("asked by {}", question.author_name()), color: theme.text_dimmed)
        }
    }
    .into_any()
}

fn pager_row(pager: &PagerView) -> AnyElement<'static> {
    let theme = theme();
    element! {
        View(
            flex_direction: FlexDirection::Row,
            column_gap: 2,
            border_edges: Edges::Top,
            border_style: BorderStyle::Single,
            border_color: theme.border,
        ) {
            Text(content: pager.indicator(), color: theme.text)
            Text(content: pager.control(PAGER_WINDOW), color: theme.highlight)
            View(flex_grow: 1.0)
            Text(content: pager.range_label(), color: theme.text_dimmed)
        }
    }
    .into_any()
}

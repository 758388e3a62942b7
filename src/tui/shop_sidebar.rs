//! Shop sidebar component
//!
//! Shop identity, contact details and share links for the product.

use iocraft::prelude::*;

use crate::page::sidebar::{LogoView, ShopSidebarModel};
use crate::tui::theme::theme;

/// Props for the ShopSidebar component
#[derive(Default, Props)]
pub struct ShopSidebarProps {
    pub model: Option<ShopSidebarModel>,
}

#[component]
pub fn ShopSidebar(props: &ShopSidebarProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(model) = props.model.clone() else {
        return element! { View() };
    };

    let logo = match &model.logo {
        LogoView::Image(url) => url.clone(),
        LogoView::Placeholder(text) => format!("[ {text} ]"),
    };
    let fields: Vec<(&'static str, String)> = [
        ("Contact", model.contact.clone()),
        ("Website", model.website.clone()),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| (label, v)))
    .collect();

    element! {
        View(
            width: 36,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: logo, color: theme.text_dimmed)
            View(margin_top: 1) {
                Text(content: model.name.clone(), color: theme.text, weight: Weight::Bold)
            }
            #(model.description.clone().map(|description| element! {
                View(margin_top: 1) {
                    Text(content: description, color: theme.text)
                }
            }))
            View(margin_top: 1, flex_direction: FlexDirection::Column) {
                #(fields.into_iter().map(|(label, value)| element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(content: format!("{label}: "), color: theme.text_dimmed)
                        Text(content: value, color: theme.text)
                    }
                }))
            }
            #(model.share.clone().map(|share| element! {
                View(margin_top: 1, flex_direction: FlexDirection::Column) {
                    Text(content: "Share", color: theme.text_dimmed, weight: Weight::Bold)
                    Text(content: share.product_url.clone(), color: theme.link)
                    Text(
                        content: share
                            .targets
                            .iter()
                            .map(|(target, _)| target.label())
                            .collect::<Vec<_>>()
                            .join(" · "),
                        color: theme.text_dimmed,
                    )
                }
            }))
        }
    }
}

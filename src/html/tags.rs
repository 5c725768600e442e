//! Tag tables: which HTML tags become elements and which become marks.

use super::HtmlElement;
use crate::model::{ElementKind, Mark};

/// Element kind for a block or inline HTML tag, with attributes read from
/// the element. Returns None for tags that are not element tags.
pub fn element_kind(element: &HtmlElement) -> Option<ElementKind> {
    let kind = match element.name.as_str() {
        "a" => ElementKind::Link {
            url: attr_or_empty(element, "href"),
        },
        "blockquote" => ElementKind::BlockQuote,
        "h1" => ElementKind::HeadingOne,
        "h2" => ElementKind::HeadingTwo,
        "h3" => ElementKind::HeadingThree,
        "h4" => ElementKind::HeadingFour,
        "h5" => ElementKind::HeadingFive,
        "h6" => ElementKind::HeadingSix,
        "img" => ElementKind::Image {
            url: attr_or_empty(element, "src"),
        },
        "li" => ElementKind::ListItem,
        "ol" => ElementKind::NumberedList,
        "p" => ElementKind::Paragraph,
        "pre" => ElementKind::Code,
        "ul" => ElementKind::BulletedList,
        _ => return None,
    };
    Some(kind)
}

/// Mark applied by an inline style tag. Returns None for other tags.
pub fn text_mark(name: &str) -> Option<Mark> {
    match name {
        "code" => Some(Mark::Code),
        "del" | "s" => Some(Mark::Strikethrough),
        "em" | "i" => Some(Mark::Italic),
        "strong" => Some(Mark::Bold),
        "u" => Some(Mark::Underline),
        _ => None,
    }
}

fn attr_or_empty(element: &HtmlElement, name: &str) -> String {
    match element.attr(name) {
        Some(value) => value.to_string(),
        None => {
            log::debug!("<{}> without {} attribute", element.name, name);
            String::new()
        }
    }
}

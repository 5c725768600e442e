//! HTML text to [`HtmlNode`] tree, backed by `scraper` (html5ever).

use scraper::{ElementRef, Html, Node};

use super::{HtmlNode, ImportOptions};

/// Parse an HTML document and return its `body` element.
///
/// Parsing follows the HTML5 algorithm, so fragments such as
/// `<p>a<b>b</p>` or bare text are repaired and wrapped into a body the
/// same way a browser would do it.
pub fn parse_document(html: &str) -> HtmlNode {
    parse_document_with_options(html, &ImportOptions::default())
}

/// Parse an HTML document and return its `body` element, keeping element
/// structure down to `options.max_depth` levels below the body. Anything
/// deeper is collapsed into a single text node holding its text content.
pub fn parse_document_with_options(html: &str, options: &ImportOptions) -> HtmlNode {
    let converter = Converter {
        max_depth: options.max_depth,
    };
    let document = Html::parse_document(html);
    let root = document.root_element();

    let body = root
        .children()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name().eq_ignore_ascii_case("body"));

    match body {
        Some(body) => converter.element(body, 0),
        None => {
            log::debug!("parsed document has no body, using <html> element");
            converter.element(root, 0)
        }
    }
}

struct Converter {
    max_depth: usize,
}

impl Converter {
    fn element(&self, element: ElementRef<'_>, depth: usize) -> HtmlNode {
        if depth > self.max_depth {
            // text() walks descendants without recursion
            return HtmlNode::Text(element.text().collect());
        }

        let value = element.value();
        let children = element
            .children()
            .map(|child| match child.value() {
                Node::Text(text) => HtmlNode::Text(String::from(&**text)),
                Node::Comment(comment) => HtmlNode::Comment(String::from(&**comment)),
                Node::Element(_) => ElementRef::wrap(child)
                    .map(|child| self.element(child, depth + 1))
                    .unwrap_or(HtmlNode::Other),
                _ => HtmlNode::Other,
            })
            .collect();

        HtmlNode::Element(super::HtmlElement {
            name: value.name().to_ascii_lowercase(),
            attrs: value
                .attrs()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
                .collect(),
            children,
        })
    }
}

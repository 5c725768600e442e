//! HTML rendering for documents.
//!
//! Uses the same tag table the importer reads. Blocks are separated by
//! newlines, so rendered HTML imports back into an equal document (for the
//! element kinds HTML can express) only when whitespace text between
//! blocks is dropped with `ImportOptions::with_drop_whitespace_text`.

use crate::error::Result;
use crate::model::{Document, Element, ElementKind, Node, TextRun};

/// Convert a document to an HTML fragment, one top-level block per line.
pub fn to_html(doc: &Document) -> Result<String> {
    let blocks: Vec<String> = doc
        .children
        .iter()
        .map(|node| {
            let mut output = String::new();
            render_node(&mut output, node);
            output
        })
        .collect();
    Ok(blocks.join("\n"))
}

fn render_node(output: &mut String, node: &Node) {
    match node {
        Node::Text(run) => render_text_run(output, run),
        Node::Element(element) => render_element(output, element),
    }
}

fn render_element(output: &mut String, element: &Element) {
    let style = element
        .align
        .map(|align| format!(" style=\"text-align: {}\"", align.as_str()))
        .unwrap_or_default();

    match &element.kind {
        ElementKind::Code => {
            output.push_str(&format!("<pre{}><code>", style));
            render_children(output, element);
            output.push_str("</code></pre>");
        }
        ElementKind::Link { url } => {
            output.push_str(&format!("<a href=\"{}\">", escape_attr(url)));
            render_children(output, element);
            output.push_str("</a>");
        }
        ElementKind::Image { url } => {
            output.push_str(&format!("<img src=\"{}\"{}>", escape_attr(url), style));
        }
        ElementKind::Mention { character } => {
            output.push_str(&format!(
                "<span data-mention=\"{}\">@{}</span>",
                escape_attr(character),
                escape_text(character)
            ));
        }
        ElementKind::CheckListItem { checked } => {
            let checked = if *checked { " checked" } else { "" };
            output.push_str(&format!(
                "<div{}><input type=\"checkbox\" disabled{}> ",
                style, checked
            ));
            render_children(output, element);
            output.push_str("</div>");
        }
        kind => {
            let tag = tag_name(kind);
            output.push_str(&format!("<{}{}>", tag, style));
            render_children(output, element);
            output.push_str(&format!("</{}>", tag));
        }
    }
}

fn render_children(output: &mut String, element: &Element) {
    for child in &element.children {
        render_node(output, child);
    }
}

fn tag_name(kind: &ElementKind) -> &'static str {
    match kind {
        ElementKind::HeadingOne => "h1",
        ElementKind::HeadingTwo => "h2",
        ElementKind::HeadingThree => "h3",
        ElementKind::HeadingFour => "h4",
        ElementKind::HeadingFive => "h5",
        ElementKind::HeadingSix => "h6",
        ElementKind::BlockQuote => "blockquote",
        ElementKind::BulletedList => "ul",
        ElementKind::NumberedList => "ol",
        ElementKind::ListItem => "li",
        ElementKind::Table => "table",
        ElementKind::TableRow => "tr",
        ElementKind::TableCell => "td",
        _ => "p",
    }
}

fn render_text_run(output: &mut String, run: &TextRun) {
    let mut result = escape_text(&run.text);
    let marks = run.marks;

    // Innermost first
    if marks.code {
        result = format!("<code>{}</code>", result);
    }
    if marks.strikethrough {
        result = format!("<del>{}</del>", result);
    }
    if marks.italic {
        result = format!("<em>{}</em>", result);
    }
    if marks.bold {
        result = format!("<strong>{}</strong>", result);
    }
    if marks.underline {
        result = format!("<u>{}</u>", result);
    }

    output.push_str(&result);
}

fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::{import_html_with_options, ImportOptions};
    use crate::model::{Alignment, Mark};

    fn element(kind: ElementKind, children: Vec<Node>) -> Node {
        Node::Element(Element::new(kind, children))
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn test_render_blocks() {
        let doc = Document::from_nodes(vec![
            Node::Element(Element::heading(1, "Title")),
            element(
                ElementKind::Paragraph,
                vec![
                    Node::text("A "),
                    Node::Text(TextRun::bold("bold")),
                    Node::text(" "),
                    Node::Element(Element::link("https://example.com", vec![Node::text("link")])),
                ],
            ),
            element(ElementKind::Code, vec![Node::text("x < 1")]),
        ]);

        assert_eq!(
            to_html(&doc).unwrap(),
            "<h1>Title</h1>\n\
             <p>A <strong>bold</strong> <a href=\"https://example.com\">link</a></p>\n\
             <pre><code>x &lt; 1</code></pre>"
        );
    }

    #[test]
    fn test_render_marks_and_alignment() {
        let run = TextRun::new("t").mark(Mark::Underline).mark(Mark::Code);
        let doc = Document::from_nodes(vec![Node::Element(
            Element::new(ElementKind::Paragraph, vec![Node::Text(run)]).with_align(Alignment::Center),
        )]);
        assert_eq!(
            to_html(&doc).unwrap(),
            "<p style=\"text-align: center\"><u><code>t</code></u></p>"
        );
    }

    #[test]
    fn test_render_image_and_mention() {
        let doc = Document::from_nodes(vec![
            Node::Element(Element::image("a.png")),
            element(
                ElementKind::Mention {
                    character: "Rey".to_string(),
                },
                vec![],
            ),
        ]);
        assert_eq!(
            to_html(&doc).unwrap(),
            "<img src=\"a.png\">\n<span data-mention=\"Rey\">@Rey</span>"
        );
    }

    #[test]
    fn test_import_round_trip() {
        let item = |text: &str| element(ElementKind::ListItem, vec![Node::text(text)]);
        let doc = Document::from_nodes(vec![
            Node::Element(Element::heading(2, "Notes")),
            element(
                ElementKind::BlockQuote,
                vec![Node::text("plain "), Node::Text(TextRun::italic("quoted"))],
            ),
            element(ElementKind::NumberedList, vec![item("one"), item("two")]),
            element(ElementKind::Code, vec![Node::text("fn main() {}")]),
        ]);

        let html = to_html(&doc).unwrap();
        let options = ImportOptions::new().with_drop_whitespace_text(true);
        assert_eq!(import_html_with_options(&html, &options), doc);
    }
}

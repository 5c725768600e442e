//! Markdown rendering for documents.

use crate::error::Result;
use crate::model::{Document, Element, ElementKind, Node, TextRun};

use super::RenderOptions;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        Ok(self.render_blocks(&doc.children))
    }

    /// Render a list of nodes as blocks separated by blank lines. Runs of
    /// inline nodes form one paragraph.
    fn render_blocks(&self, nodes: &[Node]) -> String {
        let mut blocks = Vec::new();
        let mut inline = String::new();

        for node in nodes {
            if is_inline(node) {
                self.render_inline(&mut inline, node);
                continue;
            }
            if !inline.trim().is_empty() {
                blocks.push(std::mem::take(&mut inline));
            }
            inline.clear();
            if let Node::Element(element) = node {
                let block = self.render_element(element);
                if !block.is_empty() {
                    blocks.push(block);
                }
            }
        }
        if !inline.trim().is_empty() {
            blocks.push(inline);
        }

        blocks.join("\n\n")
    }

    fn render_element(&self, element: &Element) -> String {
        match &element.kind {
            ElementKind::Paragraph | ElementKind::ListItem | ElementKind::TableCell => {
                self.render_blocks(&element.children)
            }
            kind if kind.heading_level().is_some() => {
                let level = kind
                    .heading_level()
                    .unwrap_or(1)
                    .min(self.options.max_heading_level);
                format!(
                    "{} {}",
                    "#".repeat(level as usize),
                    self.render_blocks(&element.children)
                )
            }
            ElementKind::BlockQuote => prefix_lines(&self.render_blocks(&element.children), "> ", ">"),
            ElementKind::Code => {
                let fence = &self.options.code_fence;
                format!("{}\n{}\n{}", fence, element.plain_text(), fence)
            }
            ElementKind::BulletedList | ElementKind::NumberedList => self.render_list(element),
            ElementKind::CheckListItem { checked } => {
                let check = if *checked { 'x' } else { ' ' };
                format!(
                    "{} [{}] {}",
                    self.options.list_marker,
                    check,
                    self.render_blocks(&element.children)
                )
            }
            ElementKind::Image { url } => format!("![]({})", url),
            ElementKind::Table | ElementKind::TableRow => self.render_table(element),
            ElementKind::Link { .. } | ElementKind::Mention { .. } => {
                let mut output = String::new();
                self.render_inline_element(&mut output, element);
                output
            }
            _ => self.render_blocks(&element.children),
        }
    }

    fn render_list(&self, list: &Element) -> String {
        let ordered = list.kind == ElementKind::NumberedList;
        let mut items = Vec::new();
        let mut number = 0;

        for child in &list.children {
            let content = match child {
                Node::Element(item) if item.kind == ElementKind::ListItem => {
                    self.render_blocks(&item.children)
                }
                Node::Element(other) => {
                    items.push(self.render_element(other));
                    continue;
                }
                Node::Text(run) if run.text.trim().is_empty() => continue,
                Node::Text(_) => self.render_blocks(std::slice::from_ref(child)),
            };

            number += 1;
            let marker = if ordered {
                format!("{}.", number)
            } else {
                self.options.list_marker.to_string()
            };
            let indent = " ".repeat(marker.len() + 1);
            let body = prefix_lines(&content, &indent, "");
            items.push(format!("{} {}", marker, body.trim_start()));
        }

        items.join("\n")
    }

    fn render_table(&self, table: &Element) -> String {
        let rows: Vec<&Element> = match table.kind {
            ElementKind::TableRow => vec![table],
            _ => table
                .children
                .iter()
                .filter_map(Node::as_element)
                .filter(|row| row.kind == ElementKind::TableRow)
                .collect(),
        };

        let mut output = Vec::with_capacity(rows.len() + 1);
        for (i, row) in rows.iter().enumerate() {
            let cells: Vec<String> = row
                .children
                .iter()
                .map(|cell| {
                    let text = match cell {
                        Node::Element(element) => self.render_blocks(&element.children),
                        Node::Text(run) => self.render_text_run(run),
                    };
                    text.replace('\n', " ").replace('|', "\\|")
                })
                .collect();
            output.push(format!("| {} |", cells.join(" | ")));

            // Separator after the header row
            if i == 0 {
                output.push(format!("|{}", " --- |".repeat(cells.len())));
            }
        }

        output.join("\n")
    }

    fn render_inline(&self, output: &mut String, node: &Node) {
        match node {
            Node::Text(run) => output.push_str(&self.render_text_run(run)),
            Node::Element(element) => self.render_inline_element(output, element),
        }
    }

    fn render_inline_element(&self, output: &mut String, element: &Element) {
        match &element.kind {
            ElementKind::Link { url } => {
                let mut text = String::new();
                for child in &element.children {
                    self.render_inline(&mut text, child);
                }
                output.push_str(&format!("[{}]({})", text, url));
            }
            ElementKind::Mention { character } => {
                output.push('@');
                output.push_str(character);
            }
            ElementKind::Image { url } => output.push_str(&format!("![]({})", url)),
            _ => {
                for child in &element.children {
                    self.render_inline(output, child);
                }
            }
        }
    }

    fn render_text_run(&self, run: &TextRun) -> String {
        if run.text.is_empty() {
            return String::new();
        }

        let marks = run.marks;
        let mut result = if marks.code {
            format!("`{}`", run.text)
        } else if self.options.escape_special_chars {
            escape_markdown(&run.text)
        } else {
            run.text.clone()
        };

        // Innermost first
        if marks.strikethrough {
            result = format!("~~{}~~", result);
        }
        if marks.italic {
            result = format!("*{}*", result);
        }
        if marks.bold {
            result = format!("**{}**", result);
        }
        if marks.underline {
            result = format!("<u>{}</u>", result);
        }

        result
    }
}

fn is_inline(node: &Node) -> bool {
    match node {
        Node::Text(_) => true,
        Node::Element(element) => matches!(
            element.kind,
            ElementKind::Link { .. } | ElementKind::Mention { .. }
        ),
    }
}

/// Prefix every line; blank lines get `blank` instead.
fn prefix_lines(text: &str, prefix: &str, blank: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                blank.to_string()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape characters that could be read as Markdown syntax inside a line.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '~' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mark, Marks};

    fn render(nodes: Vec<Node>) -> String {
        to_markdown(&Document::from_nodes(nodes), &RenderOptions::new()).unwrap()
    }

    fn element(kind: ElementKind, children: Vec<Node>) -> Node {
        Node::Element(Element::new(kind, children))
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_render_paragraphs() {
        let result = render(vec![
            Node::Element(Element::paragraph("Hello, world!")),
            Node::Element(Element::paragraph("Second")),
        ]);
        assert_eq!(result, "Hello, world!\n\nSecond");
    }

    #[test]
    fn test_render_heading() {
        assert_eq!(render(vec![Node::Element(Element::heading(2, "Chapter"))]), "## Chapter");

        let options = RenderOptions::new().with_max_heading(1);
        let doc = Document::from_nodes(vec![Node::Element(Element::heading(3, "Deep"))]);
        assert_eq!(to_markdown(&doc, &options).unwrap(), "# Deep");
    }

    #[test]
    fn test_render_marks() {
        let marks = Marks::new().with(Mark::Bold).with(Mark::Italic);
        let result = render(vec![element(
            ElementKind::Paragraph,
            vec![
                Node::Text(TextRun::with_marks("both", marks)),
                Node::text(" "),
                Node::Text(TextRun::code("x < y")),
                Node::text(" "),
                Node::Text(TextRun::new("gone").mark(Mark::Strikethrough)),
                Node::text(" "),
                Node::Text(TextRun::new("under").mark(Mark::Underline)),
            ],
        )]);
        assert_eq!(result, "***both*** `x < y` ~~gone~~ <u>under</u>");
    }

    #[test]
    fn test_render_lists() {
        let item = |text: &str| element(ElementKind::ListItem, vec![Node::text(text)]);
        let result = render(vec![
            element(ElementKind::BulletedList, vec![item("one"), item("two")]),
            element(ElementKind::NumberedList, vec![item("first"), item("second")]),
        ]);
        assert_eq!(result, "- one\n- two\n\n1. first\n2. second");
    }

    #[test]
    fn test_render_nested_list() {
        let inner = element(
            ElementKind::BulletedList,
            vec![element(ElementKind::ListItem, vec![Node::text("inner")])],
        );
        let outer = element(
            ElementKind::BulletedList,
            vec![element(ElementKind::ListItem, vec![Node::text("outer"), inner])],
        );
        assert_eq!(render(vec![outer]), "- outer\n\n  - inner");
    }

    #[test]
    fn test_render_quote_code_and_checklist() {
        let result = render(vec![
            element(ElementKind::BlockQuote, vec![Node::text("quoted")]),
            element(ElementKind::Code, vec![Node::text("let x = 1;")]),
            element(
                ElementKind::CheckListItem { checked: true },
                vec![Node::text("done")],
            ),
            element(
                ElementKind::CheckListItem { checked: false },
                vec![Node::text("todo")],
            ),
        ]);
        assert_eq!(
            result,
            "> quoted\n\n```\nlet x = 1;\n```\n\n- [x] done\n\n- [ ] todo"
        );
    }

    #[test]
    fn test_render_links_images_mentions() {
        let link = Node::Element(Element::link(
            "https://example.com",
            vec![Node::Text(TextRun::bold("site"))],
        ));
        let mention = element(
            ElementKind::Mention {
                character: "Han".to_string(),
            },
            vec![],
        );
        let result = render(vec![
            element(ElementKind::Paragraph, vec![Node::text("See "), link, Node::text(" "), mention]),
            Node::Element(Element::image("cat.png")),
        ]);
        assert_eq!(result, "See [**site**](https://example.com) @Han\n\n![](cat.png)");
    }

    #[test]
    fn test_render_table() {
        let cell = |text: &str| element(ElementKind::TableCell, vec![Node::text(text)]);
        let row = |a: &str, b: &str| element(ElementKind::TableRow, vec![cell(a), cell(b)]);
        let result = render(vec![element(
            ElementKind::Table,
            vec![row("a", "b"), row("c", "d|e")],
        )]);
        assert_eq!(result, "| a | b |\n| --- | --- |\n| c | d\\|e |");
    }

    #[test]
    fn test_empty_blocks_skipped() {
        let result = render(vec![
            Node::Element(Element::paragraph("")),
            Node::Element(Element::paragraph("text")),
        ]);
        assert_eq!(result, "text");
    }

    #[test]
    fn test_whitespace_between_blocks_ignored() {
        let item = element(ElementKind::ListItem, vec![Node::text("a")]);
        let result = render(vec![
            Node::Element(Element::heading(1, "Title")),
            Node::text("\n"),
            element(
                ElementKind::NumberedList,
                vec![Node::text("\n"), item, Node::text("\n")],
            ),
        ]);
        assert_eq!(result, "# Title\n\n1. a");
    }

    #[test]
    fn test_escape_option() {
        let doc = Document::from_nodes(vec![Node::Element(Element::paragraph("2 * 3"))]);
        let options = RenderOptions::new().with_escape(true);
        assert_eq!(to_markdown(&doc, &options).unwrap(), "2 \\* 3");
    }
}

//! Integration tests for the decoration tokenizer.

use markleaf::decorate::{
    decorate, decorate_text, ranges_from_tokens, DecorationRange, Decorator, Grammar, Rule, Token,
};
use markleaf::model::{Document, Element, ElementKind, Node};

const SAMPLES: [&str; 12] = [
    "# Title",
    "Heading\n=======",
    "Some **bold** and *italic* text",
    "Use `cargo build` to compile",
    "~~removed~~ kept",
    "- item with [link](https://example.com)",
    "1. numbered",
    "> quoted **words**",
    "***",
    "[ref]: https://example.com \"Title\"",
    "ünïcödé **wörds** ☃",
    "```rust\nfn main() {}\n```",
];

/// Assert the tokens concatenate back to the input and ranges are ordered.
fn assert_well_formed(text: &str) {
    let tokens = Grammar::markdown().tokenize(text);
    let total: usize = tokens.iter().map(Token::len).sum();
    assert_eq!(total, text.chars().count(), "token lengths for {:?}", text);

    let rebuilt: String = tokens.iter().map(Token::text).collect();
    assert_eq!(rebuilt, text);

    let ranges = ranges_from_tokens(&tokens);
    for pair in ranges.windows(2) {
        assert!(pair[0].end <= pair[1].start, "overlap in {:?}", text);
    }
    for range in &ranges {
        assert!(range.start < range.end);
        assert!(range.end <= text.chars().count());
    }
}

#[test]
fn test_samples_are_well_formed() {
    for sample in SAMPLES {
        assert_well_formed(sample);
    }
}

#[test]
fn test_heading_line() {
    assert_eq!(
        decorate_text("# Title"),
        vec![DecorationRange::new("title", 0, 7)]
    );
}

#[test]
fn test_plain_text() {
    assert!(decorate_text("plain text").is_empty());
}

#[test]
fn test_mark_types() {
    let ranges = decorate_text("Some **bold** and *italic* text");
    let types: Vec<&str> = ranges.iter().map(|r| r.mark_type.as_str()).collect();
    assert_eq!(types, vec!["bold", "italic"]);

    let text = "Some **bold** and *italic* text";
    assert_eq!(ranges[0].slice(text), "**bold**");
    assert_eq!(ranges[1].slice(text), "*italic*");
}

#[test]
fn test_offsets_are_characters() {
    let text = "ünïcödé **wörds** ☃";
    let ranges = decorate_text(text);
    assert_eq!(ranges, vec![DecorationRange::new("bold", 8, 17)]);
    assert_eq!(ranges[0].slice(text), "**wörds**");
}

#[test]
fn test_decorate_node() {
    let leaf = Node::text("`x`");
    assert_eq!(
        decorate(&leaf),
        vec![DecorationRange::new("code-snippet", 0, 3)]
    );

    let paragraph = Node::Element(Element::paragraph("`x`"));
    assert!(decorate(&paragraph).is_empty());
}

#[test]
fn test_custom_grammar() {
    let grammar = Grammar::new()
        .with_rule(Rule::new("hashtag", r"#\w+").unwrap())
        .with_rule(Rule::new("mention", r"@\w+").unwrap());
    let decorator = Decorator::new().with_grammar(&grammar);

    assert_eq!(
        decorator.decorate_text("hi @ana see #rust"),
        vec![
            DecorationRange::new("mention", 3, 7),
            DecorationRange::new("hashtag", 12, 17),
        ]
    );
}

#[test]
fn test_invalid_rule_pattern() {
    let result = Rule::new("broken", "(unclosed");
    assert!(matches!(result, Err(markleaf::Error::InvalidPattern(_))));
}

#[test]
fn test_decorate_document_parallel_matches_sequential() {
    let nodes = SAMPLES
        .iter()
        .map(|text| Node::Element(Element::new(ElementKind::Paragraph, vec![Node::text(*text)])))
        .collect();
    let doc = Document::from_nodes(nodes);

    let parallel = Decorator::new().decorate_document(&doc);
    let sequential = Decorator::new().with_parallel(false).decorate_document(&doc);
    assert_eq!(parallel, sequential);
    assert!(!parallel.is_empty());

    for leaf in &parallel {
        assert_eq!(leaf.path.len(), 2);
        let text = &doc.text(&leaf.path).unwrap().text;
        assert_eq!(leaf.ranges, decorate_text(text));
    }
}

#[test]
fn test_ranges_serialize() {
    let json = serde_json::to_string(&DecorationRange::new("title", 0, 7)).unwrap();
    assert!(json.contains("\"title\""));
    assert!(json.contains("7"));
}

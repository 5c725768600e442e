//! Integration tests for the editor and its plugins.

use markleaf::editor::{
    hotkey_mark, standard_plugins, BlockFormat, DataTransfer, DroppedFile, Editor, EditorPlugin,
    PluginAction, Point,
};
use markleaf::model::{Document, Element, ElementKind, Mark, Node, TextRun};
use markleaf::render::{from_json, to_json, JsonFormat};
use markleaf::Result;

fn paragraph(text: &str) -> Node {
    Node::Element(Element::paragraph(text))
}

fn standard_editor(nodes: Vec<Node>) -> Editor {
    Editor::builder()
        .document(Document::from_nodes(nodes))
        .standard_plugins()
        .build()
}

fn texts(editor: &Editor) -> Vec<String> {
    editor
        .document()
        .children
        .iter()
        .map(Node::plain_text)
        .collect()
}

/// Records every paste it sees and lets the next plugin run.
struct PasteCounter {
    seen: std::sync::atomic::AtomicUsize,
}

impl EditorPlugin for PasteCounter {
    fn name(&self) -> &'static str {
        "paste-counter"
    }

    fn insert_data(&self, _editor: &mut Editor, _data: &DataTransfer) -> Result<PluginAction> {
        self.seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(PluginAction::Continue)
    }
}

#[test]
fn test_standard_plugin_order() {
    let names: Vec<&str> = standard_plugins().iter().map(|p| p.name()).collect();
    assert_eq!(
        names,
        vec!["checklists", "tables", "mentions", "images", "html-paste"]
    );

    let editor = standard_editor(vec![paragraph("")]);
    assert_eq!(editor.plugin_names(), names);
}

#[test]
fn test_typing_with_hotkeys() {
    let mut editor = standard_editor(vec![paragraph("")]);
    editor.select_end().unwrap();
    editor.insert_text("Hello").unwrap();

    assert!(editor.handle_hotkey("mod+b").unwrap());
    assert!(editor.is_mark_active(Mark::Bold));
    editor.insert_text(" world").unwrap();

    assert!(!editor.handle_hotkey("mod+shift+z").unwrap());
    assert_eq!(
        editor.document().children[0].children(),
        &[Node::text("Hello"), Node::Text(TextRun::bold(" world"))]
    );
    assert_eq!(editor.selection(), Some(&Point::new(vec![0, 1], 6)));
}

#[test]
fn test_hotkey_table() {
    assert_eq!(hotkey_mark("mod+b"), Some(Mark::Bold));
    assert_eq!(hotkey_mark("mod+i"), Some(Mark::Italic));
    assert_eq!(hotkey_mark("mod+u"), Some(Mark::Underline));
    assert_eq!(hotkey_mark("mod+`"), Some(Mark::Code));
    assert_eq!(hotkey_mark("mod+x"), None);
}

#[test]
fn test_toggle_heading_and_back() {
    let mut editor = standard_editor(vec![paragraph("Title")]);
    editor.select_end().unwrap();

    let heading: BlockFormat = "heading-one".parse().unwrap();
    editor.toggle_block(heading.clone()).unwrap();
    assert!(editor.is_block_active(&heading));
    assert_eq!(
        editor.document().children[0].as_element().unwrap().kind,
        ElementKind::HeadingOne
    );

    editor.toggle_block(heading.clone()).unwrap();
    assert!(!editor.is_block_active(&heading));
    assert_eq!(
        editor.document().children[0].as_element().unwrap().kind,
        ElementKind::Paragraph
    );
}

#[test]
fn test_unknown_block_format() {
    let result = "heading-seven".parse::<BlockFormat>();
    assert!(matches!(result, Err(markleaf::Error::UnknownBlockFormat(_))));
}

#[test]
fn test_paste_html_splits_block() {
    let mut editor = standard_editor(vec![paragraph("ab")]);
    editor.select(Point::new(vec![0, 0], 1)).unwrap();
    editor
        .insert_data(&DataTransfer::from_html("<p>one</p><p>two</p>"))
        .unwrap();

    assert_eq!(texts(&editor), vec!["a", "one", "two", "b"]);
}

#[test]
fn test_paste_plain_text_without_html() {
    let mut editor = standard_editor(vec![paragraph("")]);
    editor.select_end().unwrap();
    editor
        .insert_data(&DataTransfer::from_text("first\nsecond"))
        .unwrap();
    assert_eq!(texts(&editor), vec!["first", "second"]);
}

#[test]
fn test_custom_plugin_sees_paste_first() {
    let counter = PasteCounter {
        seen: std::sync::atomic::AtomicUsize::new(0),
    };
    let mut editor = Editor::builder()
        .document(Document::from_nodes(vec![paragraph("")]))
        .plugin(counter)
        .standard_plugins()
        .build();
    editor.select_end().unwrap();
    editor
        .insert_data(&DataTransfer::from_html("<h2>Pasted</h2>"))
        .unwrap();

    assert_eq!(editor.plugin_names()[0], "paste-counter");
    assert_eq!(texts(&editor), vec!["Pasted"]);
}

#[test]
fn test_drop_image_file() {
    let mut editor = standard_editor(vec![paragraph("caption")]);
    editor.select_end().unwrap();
    let file = DroppedFile::new("dot.gif", "image/gif", vec![1, 2, 3]);
    editor.insert_data(&DataTransfer::from_files(vec![file])).unwrap();

    let image = editor.document().children[1].as_element().unwrap();
    assert_eq!(
        image.kind,
        ElementKind::Image {
            url: "data:image/gif;base64,AQID".to_string()
        }
    );
    assert!(editor.is_void(image));
}

#[test]
fn test_mention_then_keep_typing() {
    let mut editor = standard_editor(vec![paragraph("Hi ")]);
    editor.select_end().unwrap();
    markleaf::editor::insert_mention(&mut editor, "Luke").unwrap();
    editor.insert_text("!").unwrap();

    let children = editor.document().children[0].children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[2], Node::text("!"));
}

#[test]
fn test_document_survives_json() {
    let mut editor = standard_editor(vec![paragraph("")]);
    editor.select_end().unwrap();
    editor
        .insert_data(&DataTransfer::from_html(
            r#"<h1>Doc</h1><ul><li><a href="https://example.com">link</a></li></ul>"#,
        ))
        .unwrap();

    let json = to_json(editor.document(), JsonFormat::Compact).unwrap();
    assert!(json.contains(r#""type":"bulleted-list""#));
    assert!(json.contains(r#""url":"https://example.com""#));
    assert_eq!(&from_json(&json).unwrap(), editor.document());
}

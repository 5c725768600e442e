//! Built-in editor plugins.

use super::{DataTransfer, Editor, EditorPlugin, PluginAction};
use crate::detect;
use crate::error::Result;
use crate::html::{self, ImportOptions};
use crate::model::{Element, ElementKind, Node};

/// All built-in plugins, in the order the editor should ask them.
pub fn standard_plugins() -> Vec<Box<dyn EditorPlugin>> {
    vec![
        Box::new(Checklists),
        Box::new(Tables),
        Box::new(Mentions),
        Box::new(Images),
        Box::new(HtmlPaste::default()),
    ]
}

/// Insert an image element at the cursor.
pub fn insert_image(editor: &mut Editor, url: &str) -> Result<()> {
    editor.insert_nodes(vec![Node::Element(Element::image(url))])
}

/// Insert a mention at the cursor and move past it.
pub fn insert_mention(editor: &mut Editor, character: &str) -> Result<()> {
    let mention = Element::new(
        ElementKind::Mention {
            character: character.to_string(),
        },
        Vec::new(),
    );
    editor.insert_nodes(vec![Node::Element(mention)])
}

/// Pasting HTML: links are inline, images are void, and `text/html`
/// clipboard data is imported and inserted as a fragment.
#[derive(Debug, Clone)]
pub struct HtmlPaste {
    options: ImportOptions,
}

impl HtmlPaste {
    /// Create the plugin with custom import options.
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }
}

impl Default for HtmlPaste {
    fn default() -> Self {
        Self::new(ImportOptions::new().with_drop_whitespace_text(true))
    }
}

impl EditorPlugin for HtmlPaste {
    fn name(&self) -> &'static str {
        "html-paste"
    }

    fn is_inline(&self, element: &Element) -> Option<bool> {
        matches!(element.kind, ElementKind::Link { .. }).then_some(true)
    }

    fn is_void(&self, element: &Element) -> Option<bool> {
        matches!(element.kind, ElementKind::Image { .. }).then_some(true)
    }

    fn insert_data(&self, editor: &mut Editor, data: &DataTransfer) -> Result<PluginAction> {
        let Some(markup) = data.html.as_deref().filter(|html| !html.is_empty()) else {
            return Ok(PluginAction::Continue);
        };

        let fragment = html::import_html_with_options(markup, &self.options);
        log::debug!("pasting {} imported nodes", fragment.children.len());
        editor.insert_fragment(fragment.children)?;
        Ok(PluginAction::Handled)
    }
}

/// Images: image elements are void; dropped image files and pasted image
/// URLs become image elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Images;

impl EditorPlugin for Images {
    fn name(&self) -> &'static str {
        "images"
    }

    fn is_void(&self, element: &Element) -> Option<bool> {
        matches!(element.kind, ElementKind::Image { .. }).then_some(true)
    }

    fn insert_data(&self, editor: &mut Editor, data: &DataTransfer) -> Result<PluginAction> {
        if !data.files.is_empty() {
            for file in data.files.iter().filter(|file| file.is_image()) {
                log::debug!("inserting dropped image {}", file.name);
                insert_image(editor, &file.data_url())?;
            }
            return Ok(PluginAction::Handled);
        }

        match data.text.as_deref() {
            Some(text) if detect::is_image_url(text) => {
                insert_image(editor, text)?;
                Ok(PluginAction::Handled)
            }
            _ => Ok(PluginAction::Continue),
        }
    }
}

/// Mentions are inline, void and markable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mentions;

impl Mentions {
    fn is_mention(element: &Element) -> Option<bool> {
        matches!(element.kind, ElementKind::Mention { .. }).then_some(true)
    }
}

impl EditorPlugin for Mentions {
    fn name(&self) -> &'static str {
        "mentions"
    }

    fn is_inline(&self, element: &Element) -> Option<bool> {
        Self::is_mention(element)
    }

    fn is_void(&self, element: &Element) -> Option<bool> {
        Self::is_mention(element)
    }

    fn is_markable_void(&self, element: &Element) -> Option<bool> {
        Self::is_mention(element)
    }
}

/// Tables: deleting across a cell boundary and breaking lines inside a
/// table do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tables;

impl EditorPlugin for Tables {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn delete_backward(&self, editor: &mut Editor) -> Result<PluginAction> {
        let at_start = editor
            .above(|element| element.kind == ElementKind::TableCell)
            .is_some_and(|cell| editor.is_at_start_of(&cell));
        Ok(swallow_if(at_start))
    }

    fn delete_forward(&self, editor: &mut Editor) -> Result<PluginAction> {
        let at_end = editor
            .above(|element| element.kind == ElementKind::TableCell)
            .is_some_and(|cell| editor.is_at_end_of(&cell));
        Ok(swallow_if(at_end))
    }

    fn insert_break(&self, editor: &mut Editor) -> Result<PluginAction> {
        let in_table = editor
            .above(|element| element.kind == ElementKind::Table)
            .is_some();
        Ok(swallow_if(in_table))
    }
}

/// Check lists: backspace at the start of a check-list item turns it into
/// a paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checklists;

impl EditorPlugin for Checklists {
    fn name(&self) -> &'static str {
        "checklists"
    }

    fn delete_backward(&self, editor: &mut Editor) -> Result<PluginAction> {
        let item = editor.above(|element| matches!(element.kind, ElementKind::CheckListItem { .. }));
        match item {
            Some(path) if editor.is_at_start_of(&path) => {
                editor.set_kind_at(&path, ElementKind::Paragraph)?;
                Ok(PluginAction::Handled)
            }
            _ => Ok(PluginAction::Continue),
        }
    }
}

fn swallow_if(condition: bool) -> PluginAction {
    if condition {
        PluginAction::Handled
    } else {
        PluginAction::Continue
    }
}

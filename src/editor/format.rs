//! Marks, hotkeys and block formats.

use std::fmt;
use std::str::FromStr;

use super::{Editor, Point};
use crate::error::{Error, Result};
use crate::model::{Alignment, Element, ElementKind, Mark, Marks, Node};

/// Keyboard shortcuts toggling marks.
pub const HOTKEYS: &[(&str, Mark)] = &[
    ("mod+b", Mark::Bold),
    ("mod+i", Mark::Italic),
    ("mod+u", Mark::Underline),
    ("mod+`", Mark::Code),
];

/// Mark toggled by a hotkey. `ctrl+`, `cmd+` and `meta+` are accepted in
/// place of `mod+`.
pub fn hotkey_mark(hotkey: &str) -> Option<Mark> {
    let hotkey = hotkey.trim().to_ascii_lowercase();
    let key = ["mod+", "ctrl+", "cmd+", "meta+"]
        .iter()
        .find_map(|prefix| hotkey.strip_prefix(prefix))?;
    HOTKEYS
        .iter()
        .find(|(name, _)| name.strip_prefix("mod+") == Some(key))
        .map(|(_, mark)| *mark)
}

/// A block-level format: an element kind or an alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockFormat {
    /// Set the block's kind
    Kind(ElementKind),
    /// Set the block's alignment
    Align(Alignment),
}

impl BlockFormat {
    /// Check if this is a list format.
    pub fn is_list(&self) -> bool {
        matches!(self, BlockFormat::Kind(kind) if kind.is_list())
    }

    /// Check if this is an alignment format.
    pub fn is_align(&self) -> bool {
        matches!(self, BlockFormat::Align(_))
    }

    fn matches(&self, element: &Element) -> bool {
        match self {
            BlockFormat::Kind(kind) => element.kind.same_type(kind),
            BlockFormat::Align(align) => element.align == Some(*align),
        }
    }
}

impl From<ElementKind> for BlockFormat {
    fn from(kind: ElementKind) -> Self {
        BlockFormat::Kind(kind)
    }
}

impl From<Alignment> for BlockFormat {
    fn from(align: Alignment) -> Self {
        BlockFormat::Align(align)
    }
}

impl FromStr for BlockFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(align) = s.parse::<Alignment>() {
            return Ok(BlockFormat::Align(align));
        }
        s.parse::<ElementKind>().map(BlockFormat::Kind)
    }
}

impl fmt::Display for BlockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockFormat::Kind(kind) => write!(f, "{}", kind),
            BlockFormat::Align(align) => f.write_str(align.as_str()),
        }
    }
}

impl Editor {
    /// Marks the next inserted text will carry: the queued marks, or those
    /// of the leaf under the cursor.
    pub fn marks(&self) -> Marks {
        if let Some(marks) = self.marks {
            return marks;
        }
        self.selection
            .as_ref()
            .and_then(|point| self.document.text(&point.path))
            .map(|run| run.marks)
            .unwrap_or_default()
    }

    /// Queue a mark for the next insertion.
    pub fn add_mark(&mut self, mark: Mark) -> Result<()> {
        self.cursor()?;
        let marks = self.marks().with(mark);
        self.marks = Some(marks);
        Ok(())
    }

    /// Queue removal of a mark for the next insertion.
    pub fn remove_mark(&mut self, mark: Mark) -> Result<()> {
        self.cursor()?;
        let mut marks = self.marks();
        marks.set(mark, false);
        self.marks = Some(marks);
        Ok(())
    }

    /// Toggle a mark for the next insertion.
    pub fn toggle_mark(&mut self, mark: Mark) -> Result<()> {
        if self.is_mark_active(mark) {
            self.remove_mark(mark)
        } else {
            self.add_mark(mark)
        }
    }

    /// Check if a mark is active at the cursor.
    pub fn is_mark_active(&self, mark: Mark) -> bool {
        self.marks().has(mark)
    }

    /// Toggle the mark bound to a hotkey. Returns false for unbound keys.
    pub fn handle_hotkey(&mut self, hotkey: &str) -> Result<bool> {
        match hotkey_mark(hotkey) {
            Some(mark) => {
                self.toggle_mark(mark)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Check if any element above the cursor has the format.
    pub fn is_block_active(&self, format: &BlockFormat) -> bool {
        self.above(|element| format.matches(element)).is_some()
    }

    /// Toggle a block format at the cursor.
    ///
    /// Kinds switch the current block to the kind, or back to a paragraph
    /// when already active. List kinds lift the block out of its enclosing
    /// list and, when turning on, wrap it as a list item in a new list.
    /// Alignments set or clear the block's alignment.
    pub fn toggle_block(&mut self, format: BlockFormat) -> Result<()> {
        self.cursor()?;
        let active = self.is_block_active(&format);

        if !format.is_align() {
            self.unwrap_list()?;
        }

        let block = self.block_path().ok_or(Error::NoSelection)?;
        let element = self.element_mut(&block)?;
        match &format {
            BlockFormat::Align(align) => {
                element.align = if active { None } else { Some(*align) };
            }
            BlockFormat::Kind(kind) => {
                element.kind = if active {
                    ElementKind::Paragraph
                } else if format.is_list() {
                    ElementKind::ListItem
                } else {
                    kind.clone()
                };
            }
        }

        if let (false, BlockFormat::Kind(kind)) = (active, &format) {
            if kind.is_list() {
                self.wrap_block(&block, kind.clone())?;
            }
        }
        Ok(())
    }

    /// Lift the child of the nearest list above the cursor out of that
    /// list, splitting the list around it.
    fn unwrap_list(&mut self) -> Result<()> {
        let point = self.cursor()?;
        let Some(list_path) = self.above(|element| element.kind.is_list()) else {
            return Ok(());
        };

        let index = point.path[list_path.len()];
        let Node::Element(list) = self.remove_node(&list_path)? else {
            return Err(super::invalid_path(&list_path));
        };

        let Element {
            kind,
            align,
            children: mut before,
        } = list;
        let mut rest = before.split_off(index);
        let after = rest.split_off(1);

        let mut replacement = Vec::with_capacity(3);
        if !before.is_empty() {
            replacement.push(Node::Element(Element {
                kind: kind.clone(),
                align,
                children: before,
            }));
        }
        let lifted = replacement.len();
        replacement.extend(rest);
        if !after.is_empty() {
            replacement.push(Node::Element(Element {
                kind,
                align,
                children: after,
            }));
        }

        for (i, node) in replacement.into_iter().enumerate() {
            let mut path = list_path.clone();
            if let Some(last) = path.last_mut() {
                *last += i;
            }
            self.insert_node_at(&path, node)?;
        }

        let mut path = list_path;
        if let Some(last) = path.last_mut() {
            *last += lifted;
        }
        let depth = path.len();
        path.extend_from_slice(&point.path[depth + 1..]);
        self.selection = Some(Point::new(path, point.offset));
        Ok(())
    }

    /// Wrap the block at `path` into a new element of `kind`.
    fn wrap_block(&mut self, path: &[usize], kind: ElementKind) -> Result<()> {
        let point = self.cursor()?;
        let node = self.remove_node(path)?;
        self.insert_node_at(path, Node::Element(Element::new(kind, vec![node])))?;

        if point.path.starts_with(path) {
            let mut inner = path.to_vec();
            inner.push(0);
            inner.extend_from_slice(&point.path[path.len()..]);
            self.selection = Some(Point::new(inner, point.offset));
        }
        Ok(())
    }
}

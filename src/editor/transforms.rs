//! Default editing behaviour: typing, splitting, deleting and inserting
//! nodes at the cursor.
//!
//! Text leaves are never merged after an edit, so paths handed out before
//! an operation stay meaningful to the caller.

use super::{invalid_path, DataTransfer, Editor, Point};
use crate::error::{Error, Result};
use crate::model::{Element, ElementKind, Node, Path, TextRun};

impl Editor {
    /// Insert text at the cursor. Queued marks apply to the inserted text
    /// and are cleared afterwards.
    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        let point = self.cursor()?;
        let pending = self.marks.take();
        if text.is_empty() || self.void_ancestor(&point.path).is_some() {
            return Ok(());
        }

        let inserted = text.chars().count();
        let index = *point.path.last().ok_or_else(|| invalid_path(&point.path))?;
        let siblings = self.siblings_mut(&point.path)?;
        let Some(Node::Text(run)) = siblings.get_mut(index) else {
            return Err(invalid_path(&point.path));
        };

        let marks = pending.unwrap_or(run.marks);
        if marks == run.marks {
            let at = byte_offset(&run.text, point.offset);
            run.text.insert_str(at, text);
            self.selection = Some(Point::new(point.path, point.offset + inserted));
            return Ok(());
        }

        let right = split_run(run, point.offset);
        let (new_index, insert_at) = if run.is_empty() {
            siblings.remove(index);
            (index, index)
        } else {
            (index + 1, index + 1)
        };
        siblings.insert(insert_at, Node::Text(TextRun::with_marks(text, marks)));
        if !right.is_empty() {
            siblings.insert(insert_at + 1, Node::Text(right));
        }

        let mut path = point.path;
        if let Some(last) = path.last_mut() {
            *last = new_index;
        }
        self.selection = Some(Point::new(path, inserted));
        Ok(())
    }

    /// Insert nodes at the cursor.
    ///
    /// Text and inline elements go into the current text flow, splitting the
    /// leaf under the cursor. Anything else is inserted as blocks next to the
    /// current block, splitting it when the cursor is in its middle; loose
    /// inline nodes among them are wrapped into paragraphs.
    pub fn insert_nodes(&mut self, nodes: Vec<Node>) -> Result<()> {
        if nodes.is_empty() {
            return Ok(());
        }
        let point = self.cursor()?;

        if nodes.iter().all(|node| self.node_is_inline(node)) {
            self.insert_inline_nodes(point, nodes)
        } else {
            self.insert_block_nodes(point, nodes)
        }
    }

    /// Insert a pasted fragment at the cursor.
    ///
    /// A fragment made of a single text block contributes only its inline
    /// content. A fragment pasted into an empty block replaces that block.
    pub fn insert_fragment(&mut self, mut nodes: Vec<Node>) -> Result<()> {
        if nodes.is_empty() {
            return Ok(());
        }
        let point = self.cursor()?;

        if nodes.len() == 1 && self.is_text_block(&nodes[0]) {
            if let Some(Node::Element(block)) = nodes.pop() {
                return self.insert_nodes(block.children);
            }
        }

        let has_blocks = nodes.iter().any(|node| !self.node_is_inline(node));
        if has_blocks && self.void_ancestor(&point.path).is_none() {
            if let Some(block) = self.block_of(&point.path) {
                if self.is_blank_block(&block) {
                    let blocks = self.wrap_inline_runs(nodes);
                    let count = blocks.len();
                    self.remove_node(&block)?;
                    for (i, node) in blocks.into_iter().enumerate() {
                        self.insert_node_at(&sibling(&block, i), node)?;
                    }
                    let end = self.end_of(&sibling(&block, count - 1))?;
                    self.move_cursor(end);
                    return Ok(());
                }
            }
        }

        self.insert_nodes(nodes)
    }

    /// Change the kind of the block containing the cursor.
    pub fn set_block_kind(&mut self, kind: ElementKind) -> Result<()> {
        let block = self.block_path().ok_or(Error::NoSelection)?;
        self.set_kind_at(&block, kind)
    }

    /// Change the kind of the element at `path`.
    pub fn set_kind_at(&mut self, path: &[usize], kind: ElementKind) -> Result<()> {
        self.element_mut(path)?.kind = kind;
        Ok(())
    }

    pub(super) fn split_at_cursor(&mut self) -> Result<()> {
        let point = self.cursor()?;

        if let Some(void) = self.void_ancestor(&point.path) {
            let after = sibling(&void, 1);
            self.insert_node_at(&after, Node::Element(Element::paragraph("")))?;
            let start = self.start_of(&after)?;
            self.move_cursor(start);
            return Ok(());
        }

        let block = self.block_of(&point.path).ok_or_else(|| {
            Error::InvalidPath(format!("{:?} is not inside a block", point.path))
        })?;
        let right = self.split_node(&block, &point)?;
        let start = self.start_of(&right)?;
        self.move_cursor(start);
        Ok(())
    }

    pub(super) fn delete_char_backward(&mut self) -> Result<()> {
        loop {
            let point = self.cursor()?;

            if point.offset > 0 {
                let index = point.offset - 1;
                let run = self.leaf_mut(&point.path)?;
                remove_char(&mut run.text, index);
                self.selection = Some(Point::new(point.path, index));
                return Ok(());
            }

            if let Some(void) = self.void_ancestor(&point.path) {
                return self.remove_void(&void);
            }

            let leaves = self.leaf_paths();
            let position = leaves
                .iter()
                .position(|path| *path == point.path)
                .ok_or_else(|| invalid_path(&point.path))?;
            let Some(prev) = position.checked_sub(1).map(|i| leaves[i].clone()) else {
                return Ok(());
            };

            if let Some(void) = self.void_ancestor(&prev) {
                self.remove_node(&void)?;
                return self.remove_empty_ancestors(&void);
            }

            let current_block = self.block_of(&point.path);
            let prev_block = self.block_of(&prev);
            if current_block == prev_block {
                let run = self.leaf_mut(&prev)?;
                let len = run.char_len();
                if len > 0 {
                    remove_char(&mut run.text, len - 1);
                    return Ok(());
                }
                self.remove_node(&prev)?;
                self.remove_empty_ancestors(&prev)?;
                continue;
            }

            let (Some(current_block), Some(prev_block)) = (current_block, prev_block) else {
                return Ok(());
            };
            if prev.starts_with(&current_block) {
                return Ok(());
            }

            let prev_len = self.leaf(&prev)?.char_len();
            let moved = self.take_children(&current_block)?;
            self.element_mut(&prev_block)?.children.extend(moved);
            self.move_cursor(Point::new(prev, prev_len));
            return Ok(());
        }
    }

    pub(super) fn delete_char_forward(&mut self) -> Result<()> {
        loop {
            let point = self.cursor()?;

            if let Some(void) = self.void_ancestor(&point.path) {
                return self.remove_void(&void);
            }

            let len = self.leaf(&point.path)?.char_len();
            if point.offset < len {
                let run = self.leaf_mut(&point.path)?;
                remove_char(&mut run.text, point.offset);
                return Ok(());
            }

            let leaves = self.leaf_paths();
            let position = leaves
                .iter()
                .position(|path| *path == point.path)
                .ok_or_else(|| invalid_path(&point.path))?;
            let Some(next) = leaves.get(position + 1).cloned() else {
                return Ok(());
            };

            if let Some(void) = self.void_ancestor(&next) {
                self.remove_node(&void)?;
                return self.remove_empty_ancestors(&void);
            }

            let current_block = self.block_of(&point.path);
            let next_block = self.block_of(&next);
            if current_block == next_block {
                let run = self.leaf_mut(&next)?;
                if !run.is_empty() {
                    remove_char(&mut run.text, 0);
                    return Ok(());
                }
                self.remove_node(&next)?;
                self.remove_empty_ancestors(&next)?;
                continue;
            }

            let (Some(current_block), Some(next_block)) = (current_block, next_block) else {
                return Ok(());
            };
            if point.path.starts_with(&next_block) {
                return Ok(());
            }

            let moved = self.take_children(&next_block)?;
            self.element_mut(&current_block)?.children.extend(moved);
            return Ok(());
        }
    }

    pub(super) fn insert_text_data(&mut self, data: &DataTransfer) -> Result<()> {
        let Some(text) = data.text.as_deref() else {
            return Ok(());
        };
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.split_at_cursor()?;
            }
            self.insert_text(line)?;
        }
        Ok(())
    }

    fn insert_inline_nodes(&mut self, point: Point, nodes: Vec<Node>) -> Result<()> {
        let first = match self.void_ancestor(&point.path) {
            Some(void) => sibling(&void, 1),
            None => {
                let len = self.leaf(&point.path)?.char_len();
                if point.offset == 0 {
                    point.path.clone()
                } else if point.offset >= len {
                    sibling(&point.path, 1)
                } else {
                    let right = split_run(self.leaf_mut(&point.path)?, point.offset);
                    let after = sibling(&point.path, 1);
                    self.insert_node_at(&after, Node::Text(right))?;
                    after
                }
            }
        };

        let count = nodes.len();
        for (i, node) in nodes.into_iter().enumerate() {
            self.insert_node_at(&sibling(&first, i), node)?;
        }

        let last = sibling(&first, count - 1);
        if let Some(Node::Text(_)) = self.document.node(&last) {
            let end = self.end_of(&last)?;
            self.move_cursor(end);
            return Ok(());
        }

        // Keep a text leaf after an inline element for the cursor.
        let after = sibling(&last, 1);
        if !matches!(self.document.node(&after), Some(Node::Text(_))) {
            self.insert_node_at(&after, Node::Text(TextRun::empty()))?;
        }
        self.move_cursor(Point::new(after, 0));
        Ok(())
    }

    fn insert_block_nodes(&mut self, point: Point, nodes: Vec<Node>) -> Result<()> {
        let blocks = self.wrap_inline_runs(nodes);
        let count = blocks.len();

        let target = self
            .void_ancestor(&point.path)
            .or_else(|| self.block_of(&point.path))
            .unwrap_or_else(|| point.path.clone());

        let first = if self.end_of(&target)? == point {
            sibling(&target, 1)
        } else if self.start_of(&target)? == point {
            target
        } else {
            self.split_node(&target, &point)?
        };

        for (i, node) in blocks.into_iter().enumerate() {
            self.insert_node_at(&sibling(&first, i), node)?;
        }
        let end = self.end_of(&sibling(&first, count - 1))?;
        self.move_cursor(end);
        Ok(())
    }

    /// Split the node at `path` at a point inside it. The right half is
    /// inserted after the left one; its path is returned.
    fn split_node(&mut self, path: &[usize], point: &Point) -> Result<Path> {
        let relative = point
            .path
            .strip_prefix(path)
            .ok_or_else(|| invalid_path(&point.path))?
            .to_vec();

        let right = match self.document.node_mut(path) {
            Some(Node::Text(run)) if relative.is_empty() => Node::Text(split_run(run, point.offset)),
            Some(Node::Element(element)) => {
                let children = split_children(&mut element.children, &relative, point.offset)?;
                Node::Element(Element {
                    kind: element.kind.clone(),
                    align: element.align,
                    children,
                })
            }
            _ => return Err(invalid_path(path)),
        };

        let after = sibling(path, 1);
        self.insert_node_at(&after, right)?;
        Ok(after)
    }

    /// Remove a block and hand back its children, cleaning up ancestors it
    /// leaves empty.
    fn take_children(&mut self, block: &[usize]) -> Result<Vec<Node>> {
        let children = match self.remove_node(block)? {
            Node::Element(element) => element.children,
            text => vec![text],
        };
        self.remove_empty_ancestors(block)?;
        Ok(children)
    }

    /// Remove a void element containing the cursor; the cursor moves to the
    /// end of the text before it, or the start of the document.
    fn remove_void(&mut self, void: &[usize]) -> Result<()> {
        let prev = self
            .leaf_paths()
            .into_iter()
            .filter(|path| path.as_slice() < void && !path.starts_with(void))
            .last();

        self.remove_node(void)?;
        self.remove_empty_ancestors(void)?;

        let point = match prev {
            Some(path) => Some(self.end_of(&path)?),
            None => self.leaf_paths().into_iter().next().map(|path| Point::new(path, 0)),
        };
        self.selection = None;
        if let Some(point) = point {
            self.move_cursor(point);
        }
        Ok(())
    }

    fn leaf_mut(&mut self, path: &[usize]) -> Result<&mut TextRun> {
        self.document
            .node_mut(path)
            .and_then(Node::as_text_mut)
            .ok_or_else(|| invalid_path(path))
    }

    fn is_text_block(&self, node: &Node) -> bool {
        match node {
            Node::Element(element) => {
                !self.is_inline(element)
                    && !self.is_void(element)
                    && element.children.iter().all(|child| self.node_is_inline(child))
            }
            Node::Text(_) => false,
        }
    }

    fn is_blank_block(&self, path: &[usize]) -> bool {
        match self.document.node(path) {
            Some(Node::Element(element)) => element
                .children
                .iter()
                .all(|child| matches!(child, Node::Text(run) if run.is_empty())),
            _ => false,
        }
    }

    /// Group runs of inline nodes into paragraphs so only blocks remain.
    fn wrap_inline_runs(&self, nodes: Vec<Node>) -> Vec<Node> {
        let mut blocks = Vec::with_capacity(nodes.len());
        let mut run = Vec::new();

        for node in nodes {
            if self.node_is_inline(&node) {
                run.push(node);
                continue;
            }
            if !run.is_empty() {
                let children = std::mem::take(&mut run);
                blocks.push(Node::Element(Element::new(ElementKind::Paragraph, children)));
            }
            blocks.push(node);
        }
        if !run.is_empty() {
            blocks.push(Node::Element(Element::new(ElementKind::Paragraph, run)));
        }

        blocks
    }
}

/// Path of the sibling `delta` places after `path`.
fn sibling(path: &[usize], delta: usize) -> Path {
    let mut path = path.to_vec();
    if let Some(last) = path.last_mut() {
        *last += delta;
    }
    path
}

fn byte_offset(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map_or(text.len(), |(index, _)| index)
}

fn remove_char(text: &mut String, offset: usize) {
    let at = byte_offset(text, offset);
    if at < text.len() {
        text.remove(at);
    }
}

/// Cut a run at a character offset, keeping the left part in place and
/// returning the right part with the same marks.
fn split_run(run: &mut TextRun, offset: usize) -> TextRun {
    let at = byte_offset(&run.text, offset);
    TextRun::with_marks(run.text.split_off(at), run.marks)
}

/// Split a child list along `relative` (child indices down to a text leaf).
/// The left parts stay in `children`; the right parts, followed by every
/// later sibling, are returned.
fn split_children(children: &mut Vec<Node>, relative: &[usize], offset: usize) -> Result<Vec<Node>> {
    let (&index, rest) = relative
        .split_first()
        .ok_or_else(|| invalid_path(relative))?;

    let head = match children.get_mut(index) {
        Some(Node::Text(run)) if rest.is_empty() => Node::Text(split_run(run, offset)),
        Some(Node::Element(element)) => {
            let inner = split_children(&mut element.children, rest, offset)?;
            Node::Element(Element {
                kind: element.kind.clone(),
                align: element.align,
                children: inner,
            })
        }
        _ => return Err(invalid_path(relative)),
    };

    let mut right = vec![head];
    right.extend(children.drain(index + 1..));
    Ok(right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{HtmlPaste, Images, Mentions};
    use crate::model::{Document, Mark};

    fn editor_with(nodes: Vec<Node>) -> Editor {
        Editor::builder()
            .document(Document::from_nodes(nodes))
            .plugin(Mentions)
            .plugin(Images)
            .plugin(HtmlPaste::default())
            .build()
    }

    fn paragraph(text: &str) -> Node {
        Node::Element(Element::paragraph(text))
    }

    fn texts(editor: &Editor) -> Vec<String> {
        editor
            .document()
            .children
            .iter()
            .map(Node::plain_text)
            .collect()
    }

    #[test]
    fn test_insert_text_moves_cursor() {
        let mut editor = editor_with(vec![paragraph("héllo")]);
        editor.select(Point::new(vec![0, 0], 2)).unwrap();
        editor.insert_text("XY").unwrap();
        assert_eq!(texts(&editor), vec!["héXYllo"]);
        assert_eq!(editor.selection(), Some(&Point::new(vec![0, 0], 4)));
    }

    #[test]
    fn test_insert_text_with_pending_mark_splits_leaf() {
        let mut editor = editor_with(vec![paragraph("ab")]);
        editor.select(Point::new(vec![0, 0], 1)).unwrap();
        editor.add_mark(Mark::Bold).unwrap();
        editor.insert_text("X").unwrap();

        let children = editor.document().children[0].children();
        assert_eq!(
            children,
            &[
                Node::text("a"),
                Node::Text(TextRun::bold("X")),
                Node::text("b")
            ]
        );
        assert_eq!(editor.selection(), Some(&Point::new(vec![0, 1], 1)));
        assert!(!editor.is_mark_active(Mark::Italic));
    }

    #[test]
    fn test_insert_break_splits_block() {
        let mut editor = editor_with(vec![Node::Element(Element::heading(2, "Title here"))]);
        editor.select(Point::new(vec![0, 0], 5)).unwrap();
        editor.insert_break().unwrap();

        assert_eq!(texts(&editor), vec!["Title", " here"]);
        let second = editor.document().children[1].as_element().unwrap();
        assert_eq!(second.kind, ElementKind::HeadingTwo);
        assert_eq!(editor.selection(), Some(&Point::new(vec![1, 0], 0)));
    }

    #[test]
    fn test_insert_break_inside_link() {
        let link = Element::link("https://example.com", vec![Node::text("abcd")]);
        let mut editor = editor_with(vec![Node::Element(Element::new(
            ElementKind::Paragraph,
            vec![Node::text("x "), Node::Element(link), Node::text(" y")],
        ))]);
        editor.select(Point::new(vec![0, 1, 0], 2)).unwrap();
        editor.insert_break().unwrap();

        assert_eq!(texts(&editor), vec!["x ab", "cd y"]);
        assert_eq!(editor.selection(), Some(&Point::new(vec![1, 0, 0], 0)));
    }

    #[test]
    fn test_delete_backward_within_text() {
        let mut editor = editor_with(vec![paragraph("abc")]);
        editor.select(Point::new(vec![0, 0], 3)).unwrap();
        editor.delete_backward().unwrap();
        assert_eq!(texts(&editor), vec!["ab"]);
        assert_eq!(editor.selection(), Some(&Point::new(vec![0, 0], 2)));
    }

    #[test]
    fn test_delete_backward_merges_blocks() {
        let mut editor = editor_with(vec![paragraph("one"), paragraph("two")]);
        editor.select(Point::new(vec![1, 0], 0)).unwrap();
        editor.delete_backward().unwrap();

        assert_eq!(texts(&editor), vec!["onetwo"]);
        assert_eq!(editor.selection(), Some(&Point::new(vec![0, 0], 3)));
    }

    #[test]
    fn test_delete_backward_at_document_start_is_noop() {
        let mut editor = editor_with(vec![paragraph("one")]);
        editor.select(Point::new(vec![0, 0], 0)).unwrap();
        editor.delete_backward().unwrap();
        assert_eq!(texts(&editor), vec!["one"]);
    }

    #[test]
    fn test_delete_backward_removes_previous_image() {
        let mut editor = editor_with(vec![
            Node::Element(Element::image("a.png")),
            paragraph("text"),
        ]);
        editor.select(Point::new(vec![1, 0], 0)).unwrap();
        editor.delete_backward().unwrap();

        assert_eq!(editor.document().children.len(), 1);
        assert_eq!(editor.selection(), Some(&Point::new(vec![0, 0], 0)));
    }

    #[test]
    fn test_delete_forward_merges_next_block() {
        let mut editor = editor_with(vec![paragraph("one"), paragraph("two")]);
        editor.select(Point::new(vec![0, 0], 3)).unwrap();
        editor.delete_forward().unwrap();
        assert_eq!(texts(&editor), vec!["onetwo"]);

        editor.select(Point::new(vec![0, 0], 0)).unwrap();
        editor.delete_forward().unwrap();
        assert_eq!(texts(&editor), vec!["netwo"]);
    }

    #[test]
    fn test_insert_inline_mention() {
        let mut editor = editor_with(vec![paragraph("Hi there")]);
        editor.select(Point::new(vec![0, 0], 3)).unwrap();
        crate::editor::insert_mention(&mut editor, "R2-D2").unwrap();

        let children = editor.document().children[0].children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], Node::text("Hi "));
        assert!(matches!(
            &children[1],
            Node::Element(Element { kind: ElementKind::Mention { character }, .. }) if character == "R2-D2"
        ));
        assert_eq!(children[2], Node::text("there"));
        assert_eq!(editor.selection(), Some(&Point::new(vec![0, 2], 0)));
    }

    #[test]
    fn test_insert_block_in_middle_splits() {
        let mut editor = editor_with(vec![paragraph("abcd")]);
        editor.select(Point::new(vec![0, 0], 2)).unwrap();
        editor
            .insert_nodes(vec![Node::Element(Element::heading(1, "H"))])
            .unwrap();

        assert_eq!(texts(&editor), vec!["ab", "H", "cd"]);
        assert_eq!(editor.selection(), Some(&Point::new(vec![1, 0], 1)));
    }

    #[test]
    fn test_insert_block_at_end_goes_after() {
        let mut editor = editor_with(vec![paragraph("abcd")]);
        editor.select(Point::new(vec![0, 0], 4)).unwrap();
        editor
            .insert_nodes(vec![Node::Element(Element::image("x.png"))])
            .unwrap();
        assert_eq!(editor.document().children.len(), 2);
        assert_eq!(
            editor.document().children[1].as_element().unwrap().kind,
            ElementKind::Image {
                url: "x.png".to_string()
            }
        );
    }

    #[test]
    fn test_fragment_of_one_paragraph_is_inlined() {
        let mut editor = editor_with(vec![paragraph("ab")]);
        editor.select(Point::new(vec![0, 0], 1)).unwrap();
        editor
            .insert_fragment(vec![Node::Element(Element::new(
                ElementKind::Paragraph,
                vec![Node::Text(TextRun::bold("X"))],
            ))])
            .unwrap();

        assert_eq!(editor.document().children.len(), 1);
        assert_eq!(texts(&editor), vec!["aXb"]);
    }

    #[test]
    fn test_fragment_replaces_empty_block() {
        let mut editor = editor_with(vec![paragraph("")]);
        editor.select(Point::new(vec![0, 0], 0)).unwrap();
        editor
            .insert_fragment(vec![
                Node::Element(Element::heading(1, "Title")),
                paragraph("Body"),
            ])
            .unwrap();

        assert_eq!(texts(&editor), vec!["Title", "Body"]);
        assert_eq!(editor.selection(), Some(&Point::new(vec![1, 0], 4)));
    }

    #[test]
    fn test_plain_text_data_splits_lines() {
        let mut editor = Editor::new(Document::from_nodes(vec![paragraph("")]));
        editor.select(Point::new(vec![0, 0], 0)).unwrap();
        editor
            .insert_data(&DataTransfer::from_text("one\r\ntwo\nthree"))
            .unwrap();
        assert_eq!(texts(&editor), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_set_block_kind() {
        let mut editor = editor_with(vec![paragraph("x")]);
        editor.select(Point::new(vec![0, 0], 0)).unwrap();
        editor.set_block_kind(ElementKind::BlockQuote).unwrap();
        assert_eq!(
            editor.document().children[0].as_element().unwrap().kind,
            ElementKind::BlockQuote
        );
    }
}

//! Owned HTML node tree consumed by the importer.

/// A node of an already-parsed HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Text node
    Text(String),

    /// Element node
    Element(HtmlElement),

    /// Comment node
    Comment(String),

    /// Any other node type (doctype, processing instruction, ...)
    Other,
}

impl HtmlNode {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        HtmlNode::Text(text.into())
    }

    /// Create an element node without attributes.
    pub fn element(name: &str, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Element(HtmlElement::new(name, children))
    }

    /// Create an element node with attributes.
    pub fn element_with_attrs(
        name: &str,
        attrs: &[(&str, &str)],
        children: Vec<HtmlNode>,
    ) -> Self {
        let mut element = HtmlElement::new(name, children);
        element.attrs = attrs
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
            .collect();
        HtmlNode::Element(element)
    }

    /// Get the element, if this is one.
    pub fn as_element(&self) -> Option<&HtmlElement> {
        match self {
            HtmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Lower-cased tag name for elements.
    pub fn name(&self) -> Option<&str> {
        self.as_element().map(|e| e.name.as_str())
    }

    /// Concatenated text of every text node below this one.
    pub fn text_content(&self) -> String {
        match self {
            HtmlNode::Text(text) => text.clone(),
            HtmlNode::Element(element) => element
                .children
                .iter()
                .map(HtmlNode::text_content)
                .collect(),
            HtmlNode::Comment(_) | HtmlNode::Other => String::new(),
        }
    }
}

/// An HTML element with a lower-cased tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    /// Tag name, lower-cased
    pub name: String,

    /// Attributes in source order, names lower-cased
    pub attrs: Vec<(String, String)>,

    /// Child nodes
    pub children: Vec<HtmlNode>,
}

impl HtmlElement {
    /// Create an element without attributes.
    pub fn new(name: &str, children: Vec<HtmlNode>) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
            children,
        }
    }

    /// Look up an attribute value (case-insensitive name).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check the tag name (case-insensitive).
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

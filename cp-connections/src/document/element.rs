//! Owned element tree.

/// What a tree node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    /// A markup comment. Its `text` is the comment body.
    Comment,
}

/// One node of a parsed document.
///
/// Children are elements and comments; comments take up a child index like
/// any element. Character data is attached to nodes the way an element-tree
/// model does it: `text` is whatever follows the opening tag up to the first
/// child (or the closing tag), and `tail` is whatever follows the node up to
/// the next sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub(super) kind: NodeKind,
    pub(super) name: String,
    pub(super) attrs: Vec<(String, String)>,
    pub(super) children: Vec<Element>,
    pub(super) text: Option<String>,
    pub(super) tail: Option<String>,
}

impl Element {
    pub(super) fn comment(body: &str) -> Self {
        Self {
            kind: NodeKind::Comment,
            name: String::new(),
            attrs: Vec::new(),
            children: Vec::new(),
            text: Some(body.to_string()),
            tail: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_comment(&self) -> bool {
        self.kind == NodeKind::Comment
    }

    /// Local tag name, lowercase (e.g. `div`). Empty for comments.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in the order the parser reported them.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Raw `class` attribute. Not split into tokens.
    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    /// Raw `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Leading text: character data before the first child.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Trailing text: character data after this element's closing tag.
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    /// Child at `index`, counting comments.
    pub fn child(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }

    /// Children in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Whether this node has any children, comments included.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Depth-first, document-order walk starting with this element itself.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Every element in this subtree (self included) matching `predicate`,
    /// in document order.
    pub fn find_all<P>(&self, mut predicate: P) -> impl Iterator<Item = &Element>
    where
        P: FnMut(&Element) -> bool,
    {
        self.descendants().filter(move |el| predicate(el))
    }

    /// First element in this subtree (self included) matching `predicate`.
    pub fn find_first<P>(&self, predicate: P) -> Option<&Element>
    where
        P: FnMut(&Element) -> bool,
    {
        self.find_all(predicate).next()
    }
}

/// Iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        self.stack.extend(el.children.iter().rev());
        Some(el)
    }
}

use std::sync::Arc;

use crate::tag::TagDefinition;

/// Handle of a node inside its [`Document`].
///
/// Handles are only meaningful for the document that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the node arena, also the creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// All kinds of nodes.
#[derive(Clone, Debug)]
pub enum Node {
    /// Root of the tree, exactly one per document.
    Document(DocumentNode),

    /// A recognized tag and its content.
    Element(ElementNode),

    /// Plain text.
    Text(TextNode),
}

impl Node {
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Document(v) => &v.children,
            Node::Element(v) => &v.children,
            Node::Text(..) => &[],
        }
    }

    /// Parent node, `None` for the document root.
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Document(..) => None,
            Node::Element(v) => Some(v.parent),
            Node::Text(v) => Some(v.parent),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(..))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(..))
    }

    fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Node::Document(v) => Some(&mut v.children),
            Node::Element(v) => Some(&mut v.children),
            Node::Text(..) => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DocumentNode {
    children: Vec<NodeId>,
}

/// Element node.
#[derive(Clone, Debug)]
pub struct ElementNode {
    /// Definition the element was resolved to.
    definition: Arc<TagDefinition>,

    /// Tag name as written in the source.
    tag_name: String,

    /// Option of the opening tag.
    attribute: Option<String>,

    children: Vec<NodeId>,

    parent: NodeId,

    /// 1-based count of elements of the same definition opened in the parse, including this one.
    nest_depth: usize,

    /// Content of the explicit closing tag, e.g. `/b`, if the source closed this element.
    closing: Option<String>,
}

impl ElementNode {
    pub(crate) fn new(
        definition: Arc<TagDefinition>,
        tag_name: impl Into<String>,
        attribute: Option<String>,
        nest_depth: usize,
    ) -> Self {
        Self {
            definition,
            tag_name: tag_name.into(),
            attribute,
            children: vec![],
            parent: NodeId(0),
            nest_depth,
            closing: None,
        }
    }

    pub fn definition(&self) -> &TagDefinition {
        &self.definition
    }

    /// Tag name as written in the source, keeps the original letter case.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn nest_depth(&self) -> usize {
        self.nest_depth
    }

    /// Whether the source contains an explicit closing tag for this element.
    pub fn is_closed(&self) -> bool {
        self.closing.is_some()
    }

    /// Content of the source closing tag, without brackets.
    pub fn closing(&self) -> Option<&str> {
        self.closing.as_deref()
    }

    pub(crate) fn set_closing(&mut self, closing: impl Into<String>) {
        self.closing = Some(closing.into());
    }

    /// Whether this element exceeds the nest limit of its definition.
    pub fn beyond_nest_limit(&self) -> bool {
        self.definition
            .nest_limit()
            .is_some_and(|limit| self.nest_depth > limit.get())
    }

    /// The opening tag, e.g. `[url=http://example.com]`.
    pub fn open_tag(&self) -> String {
        match &self.attribute {
            Some(attr) => format!("[{}={}]", self.tag_name, attr),
            None => format!("[{}]", self.tag_name),
        }
    }

    /// The closing tag to write in canonical markup.
    ///
    /// Uses the source closing tag when present. Unclosed unary elements have none.
    pub fn close_tag(&self) -> Option<String> {
        match &self.closing {
            Some(closing) => Some(format!("[{closing}]")),
            None if self.definition.unary() => None,
            None => Some(format!("[/{}]", self.tag_name)),
        }
    }
}

/// Text node.
#[derive(Clone, Debug)]
pub struct TextNode {
    text: String,
    parent: NodeId,
}

impl TextNode {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }
}

/// Parsed tree.
///
/// Nodes live in an arena owned by the document and refer to each other by [`NodeId`].
/// Node handles stay valid for the lifetime of the document, but nodes removed from the tree
/// (e.g. pruned for exceeding nest limit) are no longer reachable from the root.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Document(DocumentNode::default())],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get node by handle.
    ///
    /// # Panics
    ///
    /// When `id` was not produced by this document.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementNode> {
        match self.get(id)? {
            Node::Element(v) => Some(v),
            Node::Document(..) | Node::Text(..) => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&TextNode> {
        match self.get(id)? {
            Node::Text(v) => Some(v),
            Node::Document(..) | Node::Element(..) => None,
        }
    }

    /// All nodes reachable from `id`, including itself, in document order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            document: self,
            stack: vec![id],
        }
    }

    /// All elements in the tree, in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &ElementNode)> {
        self.descendants(self.root())
            .filter_map(|id| self.element(id).map(|el| (id, el)))
    }

    /// Nearest element named `tag_name` among `id` and its ancestors.
    pub fn closest_of_type(&self, id: NodeId, tag_name: &str) -> Option<NodeId> {
        let tag_name = tag_name.to_lowercase();
        let mut curr = Some(id);
        while let Some(id) = curr {
            if let Some(el) = self.element(id) {
                if el.definition.tag_name() == tag_name {
                    return Some(id);
                }
            }
            curr = self.parent(id);
        }
        None
    }

    /// Append a text node as the last child of `parent`.
    pub(crate) fn push_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push(
            parent,
            Node::Text(TextNode {
                text: text.into(),
                parent,
            }),
        )
    }

    /// Append an element as the last child of `parent`.
    pub(crate) fn push_element(&mut self, parent: NodeId, mut element: ElementNode) -> NodeId {
        element.parent = parent;
        self.push(parent, Node::Element(element))
    }

    fn push(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        if let Some(children) = self.nodes[parent.0].children_mut() {
            children.push(id);
        }
        id
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementNode> {
        match self.nodes.get_mut(id.0)? {
            Node::Element(v) => Some(v),
            Node::Document(..) | Node::Text(..) => None,
        }
    }

    /// Remove `id` and its subtree from its parent's children.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(children) = self.nodes[parent.0].children_mut() {
            children.retain(|x| *x != id);
        }
    }

    /// Replace `id` in its parent's children with new text nodes holding `texts`.
    pub(crate) fn replace_with_text(&mut self, id: NodeId, texts: Vec<String>) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let mut replacement = Vec::with_capacity(texts.len());
        for text in texts.into_iter().filter(|x| !x.is_empty()) {
            replacement.push(NodeId(self.nodes.len()));
            self.nodes.push(Node::Text(TextNode { text, parent }));
        }
        if let Some(children) = self.nodes[parent.0].children_mut() {
            if let Some(pos) = children.iter().position(|x| *x == id) {
                children.splice(pos..=pos, replacement);
            }
        }
    }
}

/// Pre-order iterator over a subtree, see [`Document::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.document.children(id).iter().rev().copied());
        Some(id)
    }
}

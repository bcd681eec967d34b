use crate::tree::{Document, ElementNode, Node, NodeId, TextNode};

/// Walker over a parsed [`Document`].
///
/// Visiting the children is up to the implementation, call [`Document::accept_children`] to
/// continue into them. By default the document visits all its top level nodes.
pub trait NodeVisitor {
    fn visit_document(&mut self, document: &Document) {
        document.accept_children(document.root(), self);
    }

    fn visit_element(&mut self, document: &Document, id: NodeId, element: &ElementNode);

    fn visit_text(&mut self, document: &Document, id: NodeId, text: &TextNode);
}

impl Document {
    /// Accept `visitor` at the root.
    pub fn accept<V: NodeVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_document(self);
    }

    /// Dispatch `visitor` on node `id`.
    pub fn accept_node<V: NodeVisitor + ?Sized>(&self, id: NodeId, visitor: &mut V) {
        match self.node(id) {
            Node::Document(..) => visitor.visit_document(self),
            Node::Element(el) => visitor.visit_element(self, id, el),
            Node::Text(text) => visitor.visit_text(self, id, text),
        }
    }

    /// Dispatch `visitor` on each child of `id`, in order.
    pub fn accept_children<V: NodeVisitor + ?Sized>(&self, id: NodeId, visitor: &mut V) {
        for child in self.children(id) {
            self.accept_node(*child, visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::tag::TagDefinitionBuilder;

    /// Collect an s-expression like outline of the tree.
    #[derive(Default)]
    struct Outline(String);

    impl NodeVisitor for Outline {
        fn visit_element(&mut self, document: &Document, id: NodeId, element: &ElementNode) {
            self.0.push('(');
            self.0.push_str(element.tag_name());
            document.accept_children(id, self);
            self.0.push(')');
        }

        fn visit_text(&mut self, _: &Document, _: NodeId, text: &TextNode) {
            self.0.push(' ');
            self.0.push_str(text.text());
        }
    }

    #[test]
    fn test_visit_in_order() {
        let def = Arc::new(TagDefinitionBuilder::new("b", "{param}").build().unwrap());
        let mut doc = Document::new();
        let root = doc.root();
        doc.push_text(root, "a");
        let b = doc.push_element(root, ElementNode::new(def.clone(), "b", None, 1));
        doc.push_text(b, "x");
        let inner = doc.push_element(b, ElementNode::new(def, "b", None, 2));
        doc.push_text(inner, "y");

        let mut outline = Outline::default();
        doc.accept(&mut outline);
        assert_eq!(outline.0, " a(b x(b y))");
    }
}

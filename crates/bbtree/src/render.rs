//! Output formats of a [`Document`].
//!
//! All traversals are read only and iterative, deep trees do not grow the call stack.

use crate::tree::{Document, ElementNode, Node, NodeId};

enum Step {
    Enter(NodeId),
    Exit(NodeId),
}

impl Document {
    /// Plain text of the whole document, all tags removed.
    pub fn to_text(&self) -> String {
        self.text_of(self.root())
    }

    /// Canonical markup of the whole document.
    ///
    /// Same as the input except that unclosed elements get closed.
    pub fn to_markup(&self) -> String {
        self.markup_of(self.root())
    }

    /// Rendered html of the whole document.
    ///
    /// Text is written as is, no escaping happens here.
    pub fn to_html(&self) -> String {
        self.html_of(self.root())
    }

    /// Plain text of the subtree at `id`.
    pub fn text_of(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|x| self.text(x))
            .map(|x| x.text())
            .collect()
    }

    /// Canonical markup of the subtree at `id`.
    pub fn markup_of(&self, id: NodeId) -> String {
        self.write_markup(id, ElementNode::close_tag)
    }

    /// Markup of the subtree at `id` as written in the source.
    ///
    /// Unlike [`Document::markup_of`], elements never closed in the source get no closing tag.
    pub fn source_of(&self, id: NodeId) -> String {
        self.write_markup(id, |el| el.closing().map(|x| format!("[{x}]")))
    }

    fn write_markup(
        &self,
        id: NodeId,
        close_tag: impl Fn(&ElementNode) -> Option<String>,
    ) -> String {
        let mut output = String::new();
        let mut stack = vec![Step::Enter(id)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(id) => {
                    match self.node(id) {
                        Node::Document(..) => {}
                        Node::Element(el) => {
                            output.push_str(&el.open_tag());
                            stack.push(Step::Exit(id));
                        }
                        Node::Text(v) => output.push_str(v.text()),
                    }
                    stack.extend(self.children(id).iter().rev().map(|x| Step::Enter(*x)));
                }
                Step::Exit(id) => {
                    if let Some(tag) = self.element(id).and_then(&close_tag) {
                        output.push_str(&tag);
                    }
                }
            }
        }

        output
    }

    /// Rendered html of the subtree at `id`.
    ///
    /// Elements not parsing their body use the canonical markup of their children as body.
    pub fn html_of(&self, id: NodeId) -> String {
        // One buffer per element still collecting its body, the first one is the output.
        let mut buffers = vec![String::new()];
        let mut stack = vec![Step::Enter(id)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(id) => match self.node(id) {
                    Node::Document(..) => {
                        stack.extend(self.children(id).iter().rev().map(|x| Step::Enter(*x)));
                    }
                    Node::Element(el) if !el.definition().parse_body() => {
                        let body = el
                            .children()
                            .iter()
                            .map(|x| self.markup_of(*x))
                            .collect::<String>();
                        let html = el.definition().render(el.attribute(), &body);
                        if let Some(buffer) = buffers.last_mut() {
                            buffer.push_str(&html);
                        }
                    }
                    Node::Element(el) => {
                        buffers.push(String::new());
                        stack.push(Step::Exit(id));
                        stack.extend(el.children().iter().rev().map(|x| Step::Enter(*x)));
                    }
                    Node::Text(v) => {
                        if let Some(buffer) = buffers.last_mut() {
                            buffer.push_str(v.text());
                        }
                    }
                },
                Step::Exit(id) => {
                    let body = buffers.pop().unwrap_or_default();
                    if let (Some(el), Some(buffer)) = (self.element(id), buffers.last_mut()) {
                        buffer.push_str(&el.definition().render(el.attribute(), &body));
                    }
                }
            }
        }

        buffers.pop().unwrap_or_default()
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::error::DefinitionError;
use crate::registry::Registry;
use crate::scanner::Tokenizer;
use crate::tag::{DefinitionKey, TagDefinition, TagDefinitionBuilder};
use crate::token::TagToken;
use crate::tree::{Document, ElementNode, Node, NodeId};

const OPEN_TOKEN: &str = "[";
const CLOSE_TOKEN: &str = "]";

/// The parser turning markup into a [`Document`].
///
/// Holds the registered tag definitions, nothing else survives between two parses, so one
/// parser can be shared by several threads.
///
/// ```
/// use bbtree::Parser;
///
/// let mut parser = Parser::new();
/// parser.add_bbcode("b", "<strong>{param}</strong>", false, true, None).unwrap();
///
/// let doc = parser.parse("[b]bold");
/// assert_eq!(doc.to_html(), "<strong>bold</strong>");
/// assert_eq!(doc.to_markup(), "[b]bold[/b]");
/// assert_eq!(doc.to_text(), "bold");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Parser {
    registry: Registry,
}

impl Parser {
    /// Construct a parser without any tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a parser with `definitions` registered.
    pub fn with_definitions(definitions: impl IntoIterator<Item = TagDefinition>) -> Self {
        let mut parser = Self::new();
        parser.add_definitions(definitions);
        parser
    }

    pub fn add_definition(&mut self, definition: TagDefinition) {
        self.registry.register(definition);
    }

    pub fn add_definitions(&mut self, definitions: impl IntoIterator<Item = TagDefinition>) {
        self.registry.register_set(definitions);
    }

    /// Add a simple text replacement tag.
    ///
    /// * `template`: html with `{param}` and, if `use_option`, `{option}` markers.
    /// * `parse_body`: whether to parse tags inside the element.
    /// * `nest_limit`: how many elements of this tag can be opened before further ones are
    ///   dropped, `None` for unlimited.
    ///
    /// # Errors
    ///
    /// When the definition is invalid.
    pub fn add_bbcode(
        &mut self,
        tag_name: impl Into<String>,
        template: impl Into<String>,
        use_option: bool,
        parse_body: bool,
        nest_limit: Option<usize>,
    ) -> Result<(), DefinitionError> {
        let definition = TagDefinitionBuilder::new(tag_name, template)
            .use_option(use_option)
            .parse_body(parse_body)
            .nest_limit(nest_limit)
            .build()?;
        self.add_definition(definition);
        Ok(())
    }

    /// Check if a tag is registered, tag name is case-insensitive.
    pub fn tag_exists(&self, tag_name: &str, use_option: bool) -> bool {
        self.registry.exists(tag_name, use_option)
    }

    /// Get the definition of a registered tag.
    pub fn definition(&self, tag_name: &str, use_option: bool) -> Option<&TagDefinition> {
        self.registry
            .lookup(tag_name, use_option)
            .map(AsRef::as_ref)
    }

    /// All registered definitions, in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &TagDefinition> {
        self.registry.iter()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse `input` into a new document.
    ///
    /// Never fails: anything that is not a valid tag stays in the tree as literal text.
    pub fn parse(&self, input: &str) -> Document {
        TreeBuilder::new(&self.registry, input).build()
    }
}

/// State of a single parse.
struct TreeBuilder<'p, 'a> {
    registry: &'p Registry,

    tokenizer: Tokenizer<'a>,

    document: Document,

    /// Count of elements opened so far for each definition.
    counters: HashMap<DefinitionKey, usize>,
}

impl<'p, 'a> TreeBuilder<'p, 'a> {
    fn new(registry: &'p Registry, input: &'a str) -> Self {
        Self {
            registry,
            tokenizer: Tokenizer::new(input),
            document: Document::new(),
            counters: HashMap::new(),
        }
    }

    fn build(mut self) -> Document {
        let mut parent = self.document.root();

        while self.tokenizer.has_next() {
            parent = self.parse_start(parent);
            if self
                .document
                .element(parent)
                .is_some_and(|el| !el.definition().parse_body())
            {
                // Inside an element whose content must not be parsed.
                parent = self.parse_as_text_until_close(parent);
            }
        }

        // Degrade first so a rejected tag keeps the source of its over nested content.
        self.degrade_invalid();
        self.remove_over_nested();
        self.document
    }

    fn text(&mut self, parent: NodeId, text: &str) {
        self.document.push_text(parent, text);
    }

    /// Emit `[`, `content` and `]` as text.
    fn degrade(&mut self, parent: NodeId, content: &str) {
        self.text(parent, OPEN_TOKEN);
        self.text(parent, content);
        self.text(parent, CLOSE_TOKEN);
    }

    /// Plain text state, return the new insertion node.
    fn parse_start(&mut self, parent: NodeId) -> NodeId {
        match self.tokenizer.next() {
            Some(OPEN_TOKEN) => self.parse_tag_open(parent),
            Some(token) => {
                self.text(parent, token);
                parent
            }
            None => parent,
        }
    }

    /// After a `[`.
    fn parse_tag_open(&mut self, parent: NodeId) -> NodeId {
        let Some(mut next) = self.tokenizer.next() else {
            trace!("trailing '[' as text");
            self.text(parent, OPEN_TOKEN);
            return parent;
        };

        // Loop instead of recursion to survive input like `[[[[[[...`.
        while next == OPEN_TOKEN {
            // The previous `[` was a stray bracket.
            self.text(parent, OPEN_TOKEN);
            match self.tokenizer.next() {
                Some(v) => next = v,
                None => {
                    self.text(parent, OPEN_TOKEN);
                    return parent;
                }
            }
        }

        if next == CLOSE_TOKEN {
            self.text(parent, OPEN_TOKEN);
            self.text(parent, CLOSE_TOKEN);
            return parent;
        }

        self.parse_tag(parent, next)
    }

    /// After `[` and the candidate tag `content`.
    fn parse_tag(&mut self, parent: NodeId, content: &str) -> NodeId {
        match self.tokenizer.next() {
            Some(CLOSE_TOKEN) => {}
            Some(_) => {
                trace!("malformed tag {content:?}, remaining {:?}", self.tokenizer.remainder());
                self.text(parent, OPEN_TOKEN);
                self.text(parent, content);
                // Reprocess the token that broke the tag.
                self.tokenizer.step_back();
                return parent;
            }
            None => {
                trace!("unterminated tag {content:?}");
                self.text(parent, OPEN_TOKEN);
                self.text(parent, content);
                return parent;
            }
        }

        let tag = TagToken::parse(content);
        if tag.closing {
            return self.parse_close_tag(parent, content, &tag);
        }

        let definition = match self.registry.lookup(tag.name, tag.attr.is_some()) {
            Some(v) if !tag.name.is_empty() => Arc::clone(v),
            _ => {
                trace!("unknown tag {content:?}");
                self.degrade(parent, content);
                return parent;
            }
        };

        let mut parent = parent;
        if definition.unary() {
            // A new unary tag ends the unary element it would otherwise nest in. Other tags
            // opened inside a unary element become its children.
            if let Some(el) = self.document.element(parent).filter(|el| el.definition().unary()) {
                parent = el.parent();
            }
        }

        let counter = self.counters.entry(definition.key()).or_insert(0);
        *counter += 1;
        let element = ElementNode::new(
            definition,
            tag.name,
            tag.attr.map(ToOwned::to_owned),
            *counter,
        );
        self.document.push_element(parent, element)
    }

    fn parse_close_tag(&mut self, parent: NodeId, content: &str, tag: &TagToken<'_>) -> NodeId {
        if tag.name.is_empty() || tag.attr.is_some() || !self.registry.has_name(tag.name) {
            trace!("invalid closing tag {content:?}");
            self.degrade(parent, content);
            return parent;
        }

        // Elements opened after the closed one and never closed stay where they are.
        let closed = self
            .document
            .closest_of_type(parent, tag.name)
            .and_then(|id| self.document.element_mut(id));
        match closed {
            Some(el) => {
                el.set_closing(content);
                el.parent()
            }
            None => {
                trace!("closing tag {content:?} has no open element");
                self.degrade(parent, content);
                parent
            }
        }
    }

    /// Collect tokens as text of `parent` until its closing tag.
    ///
    /// Return the parent of `parent` if closed, or `parent` itself when input ended.
    fn parse_as_text_until_close(&mut self, parent: NodeId) -> NodeId {
        let closing = match self.document.element(parent) {
            Some(el) => format!("/{}", el.definition().tag_name()),
            None => return parent,
        };

        // Sliding window of three tokens looking for `[`, `/name`, `]`.
        let Some(mut prev_prev) = self.tokenizer.next() else {
            return parent;
        };
        let Some(mut prev) = self.tokenizer.next() else {
            self.text(parent, prev_prev);
            return parent;
        };
        let Some(mut curr) = self.tokenizer.next() else {
            self.text(parent, prev_prev);
            self.text(parent, prev);
            return parent;
        };

        while prev_prev != OPEN_TOKEN || prev.to_lowercase() != closing || curr != CLOSE_TOKEN {
            self.text(parent, prev_prev);
            prev_prev = prev;
            prev = curr;
            match self.tokenizer.next() {
                Some(v) => curr = v,
                None => {
                    self.text(parent, prev_prev);
                    self.text(parent, prev);
                    return parent;
                }
            }
        }

        match self.document.element_mut(parent) {
            Some(el) => {
                el.set_closing(prev);
                el.parent()
            }
            None => parent,
        }
    }

    /// Remove elements nested deeper than the limit of their definition.
    fn remove_over_nested(&mut self) {
        let over_nested = self
            .document
            .elements()
            .filter(|(_, el)| el.beyond_nest_limit())
            .map(|(id, _)| id)
            .collect::<Vec<_>>();

        for id in over_nested {
            trace!("removing over nested element {id:?}");
            self.document.detach(id);
        }
    }

    /// Turn elements failing their validators back into their source text.
    fn degrade_invalid(&mut self) {
        let mut stack = vec![self.document.root()];

        while let Some(id) = stack.pop() {
            if let Some(el) = self.document.element(id) {
                if el.beyond_nest_limit() {
                    // Pruned later, together with its subtree.
                    continue;
                }
                if !self.is_valid(el) {
                    trace!("element {id:?} failed validation");
                    let source = self.document.source_of(id);
                    self.document.replace_with_text(id, vec![source]);
                    continue;
                }
            }
            stack.extend(self.document.children(id).iter().rev());
        }
    }

    fn is_valid(&self, el: &ElementNode) -> bool {
        let definition = el.definition();
        definition.is_valid_option(el.attribute())
            && (!definition.has_body_validator()
                || definition.is_valid_body(&self.body_text(el)))
    }

    /// Text output of the children of `el`, leaving out over nested elements.
    fn body_text(&self, el: &ElementNode) -> String {
        let mut output = String::new();
        let mut stack = el.children().iter().rev().copied().collect::<Vec<_>>();

        while let Some(id) = stack.pop() {
            match self.document.node(id) {
                Node::Text(v) => output.push_str(v.text()),
                Node::Element(v) if v.beyond_nest_limit() => {}
                _ => stack.extend(self.document.children(id).iter().rev()),
            }
        }

        output
    }
}

//! Lenient parser for bracketed markup (`[b]bold[/b]`, `[url=...]link[/url]`).
//!
//! Input is turned into a [`Document`] tree which renders to html, plain text or canonical
//! markup. Parsing never fails: tags that are unknown, malformed, over nested or rejected by a
//! validator stay in the output as the literal text they were written as.
//!
//! ```
//! use bbtree::{Parser, TagDefinitionBuilder};
//!
//! let mut parser = Parser::new();
//! parser.add_definition(
//!     TagDefinitionBuilder::new("url", "<a href=\"{option}\">{param}</a>")
//!         .use_option(true)
//!         .option_validator(|x: &str| x.starts_with("https://"))
//!         .build()
//!         .unwrap(),
//! );
//!
//! let doc = parser.parse("[url=https://example.com]site[/url] [url=ftp://x]no[/url]");
//! assert_eq!(
//!     doc.to_html(),
//!     "<a href=\"https://example.com\">site</a> [url=ftp://x]no[/url]"
//! );
//! assert_eq!(doc.to_text(), "site [url=ftp://x]no[/url]");
//! ```

mod error;
mod lexer;
mod parser;
mod registry;
mod render;
mod scanner;
mod tag;
mod token;
mod tree;
mod validator;
mod visitor;

pub use error::DefinitionError;
pub use parser::Parser;
pub use registry::Registry;
pub use scanner::Tokenizer;
pub use tag::{DefinitionKey, TagDefinition, TagDefinitionBuilder, OPTION_MARKER, PARAM_MARKER};
pub use tree::{Descendants, Document, DocumentNode, ElementNode, Node, NodeId, TextNode};
pub use validator::{SharedValidator, Validator};
pub use visitor::NodeVisitor;

const OPEN: char = '[';
const CLOSE: char = ']';
const SLASH: char = '/';
const EQUAL: char = '=';

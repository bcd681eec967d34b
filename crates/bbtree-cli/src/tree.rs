use crate::cmd::TreeArgs;
use crate::config::parser_from_args;
use crate::utils::read_content;
use anyhow::{Context, Result};
use bbtree::{Document, ElementNode, NodeId, NodeVisitor, TextNode};
use serde_json::{json, Value};

/// Collect the document into json values.
#[derive(Debug, Default)]
struct JsonTree {
    /// Nodes of the level being visited.
    nodes: Vec<Value>,
}

impl JsonTree {
    fn into_value(self) -> Value {
        json!({
            "type": "document",
            "children": self.nodes,
        })
    }
}

impl NodeVisitor for JsonTree {
    fn visit_element(&mut self, document: &Document, id: NodeId, element: &ElementNode) {
        let siblings = std::mem::take(&mut self.nodes);
        document.accept_children(id, self);
        let children = std::mem::replace(&mut self.nodes, siblings);

        self.nodes.push(json!({
            "type": "element",
            "tag": element.tag_name(),
            "attribute": element.attribute(),
            "nest_depth": element.nest_depth(),
            "closed": element.is_closed(),
            "children": children,
        }));
    }

    fn visit_text(&mut self, _: &Document, _: NodeId, text: &TextNode) {
        self.nodes.push(json!({
            "type": "text",
            "text": text.text(),
        }));
    }
}

fn document_to_json(document: &Document) -> Value {
    let mut visitor = JsonTree::default();
    document.accept(&mut visitor);
    visitor.into_value()
}

pub async fn run_tree_command(args: TreeArgs) -> Result<()> {
    let parser = parser_from_args(&args.parser).await?;
    let content = read_content(&args.file).await?;
    let document = parser.parse(content.as_str());
    let output = serde_json::to_string_pretty(&document_to_json(&document))
        .context("failed to serialize tree")?;
    println!("{output}");
    Ok(())
}

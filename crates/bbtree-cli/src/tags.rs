use crate::cmd::TagsArgs;
use crate::config::parser_from_args;
use anyhow::Result;
use bbtree::TagDefinition;

/// One line description of a definition.
fn describe(definition: &TagDefinition) -> String {
    let mut flags = vec![];
    if !definition.parse_body() {
        flags.push("raw body".to_string());
    }
    if definition.unary() {
        flags.push("unary".to_string());
    }
    if let Some(limit) = definition.nest_limit() {
        flags.push(format!("nest limit {limit}"));
    }
    if definition.has_option_validator() {
        flags.push("validated option".to_string());
    }
    if definition.has_body_validator() {
        flags.push("validated body".to_string());
    }

    let option = if definition.use_option() { "=" } else { "" };
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" ({})", flags.join(", "))
    };
    format!(
        "[{}{}] {}{}",
        definition.tag_name(),
        option,
        definition.template(),
        flags
    )
}

pub async fn run_tags_command(args: TagsArgs) -> Result<()> {
    let parser = parser_from_args(&args.parser).await?;
    for definition in parser.definitions() {
        println!("{}", describe(definition));
    }
    Ok(())
}

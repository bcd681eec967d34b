use crate::cmd::{Format, RenderArgs};
use crate::config::parser_from_args;
use crate::utils::read_content;
use anyhow::Result;
use tracing::trace;

pub async fn run_render_command(args: RenderArgs) -> Result<()> {
    let parser = parser_from_args(&args.parser).await?;
    let content = read_content(&args.file).await?;
    let document = parser.parse(content.as_str());
    trace!("parsed {} nodes", document.descendants(document.root()).count());

    let output = match args.format {
        Format::Html => document.to_html(),
        Format::Text => document.to_text(),
        Format::Markup => document.to_markup(),
    };
    println!("{output}");
    Ok(())
}

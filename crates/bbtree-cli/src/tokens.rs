use crate::cmd::TokensArgs;
use crate::utils::read_content;
use anyhow::Result;
use bbtree::Tokenizer;

pub async fn run_tokens_command(args: TokensArgs) -> Result<()> {
    let content = read_content(&args.file).await?;
    for token in Tokenizer::new(content.as_str()) {
        println!("{token:?}");
    }
    Ok(())
}

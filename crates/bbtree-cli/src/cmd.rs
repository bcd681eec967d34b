use crate::render::run_render_command;
use crate::tags::run_tags_command;
use crate::tokens::run_tokens_command;
use crate::tree::run_tree_command;
use anyhow::Result;
use clap::{ArgAction, ValueEnum};
use clap::{Args, Parser, Subcommand};

///////// Groups /////////

/// Options deciding which tags the parser knows.
#[derive(Clone, Debug, Args)]
pub struct ParserArgs {
    #[arg(
        short = 'c',
        long = "config",
        help = "Path to the toml config file defining extra tags"
    )]
    pub config: Option<String>,

    #[arg(
        long = "no-defaults",
        help = "Do not register the default tags",
        default_value = "false",
        action = ArgAction::SetTrue,
    )]
    pub no_defaults: bool,
}

///////// Args /////////

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    Html,
    Text,
    Markup,
}

#[derive(Clone, Debug, Args)]
pub struct RenderArgs {
    #[arg(help = "File path to the markup content")]
    pub file: String,

    #[arg(
        short = 'f',
        long = "format",
        help = "Output format",
        value_enum,
        default_value = "html"
    )]
    pub format: Format,

    #[command(flatten)]
    pub parser: ParserArgs,
}

#[derive(Clone, Debug, Args)]
pub struct TokensArgs {
    #[arg(help = "File path to the markup content")]
    pub file: String,
}

#[derive(Clone, Debug, Args)]
pub struct TreeArgs {
    #[arg(help = "File path to the markup content")]
    pub file: String,

    #[command(flatten)]
    pub parser: ParserArgs,
}

#[derive(Clone, Debug, Args)]
pub struct TagsArgs {
    #[command(flatten)]
    pub parser: ParserArgs,
}

///////// Subcommand /////////

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Render and inspect bracketed markup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    #[command(about = "render markup file as html, plain text or canonical markup")]
    Render(RenderArgs),

    #[command(about = "print the tokens of markup file, one per line")]
    Tokens(TokensArgs),

    #[command(about = "print the parsed tree of markup file in json")]
    Tree(TreeArgs),

    #[command(about = "list registered tags")]
    Tags(TagsArgs),
}

/// Main entry of all subcommands.
pub async fn run_command_with_args(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(render_args) => run_render_command(render_args).await,
        Command::Tokens(tokens_args) => run_tokens_command(tokens_args).await,
        Command::Tree(tree_args) => run_tree_command(tree_args).await,
        Command::Tags(tags_args) => run_tags_command(tags_args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from(["bbtree", "render", "a.txt", "-f", "text", "--no-defaults"])
            .unwrap();
        match cli.command {
            Command::Render(args) => {
                assert_eq!(args.file, "a.txt");
                assert_eq!(args.format, Format::Text);
                assert!(args.parser.no_defaults);
                assert_eq!(args.parser.config, None);
            }
            v => panic!("unexpected command {v:?}"),
        }

        let cli = Cli::try_parse_from(["bbtree", "render", "a.txt", "-c", "tags.toml"]).unwrap();
        match cli.command {
            Command::Render(args) => {
                assert_eq!(args.format, Format::Html);
                assert!(!args.parser.no_defaults);
                assert_eq!(args.parser.config.as_deref(), Some("tags.toml"));
            }
            v => panic!("unexpected command {v:?}"),
        }
    }
}

use anyhow::{Context, Result};
use bbtree::{Parser, SharedValidator, TagDefinition, TagDefinitionBuilder};
use bbtree_defaults::{default_definitions, CssColorValidator, RegexValidator, UrlValidator};
use serde::Deserialize;
use tokio::fs;
use tracing::{debug, trace};

use crate::cmd::ParserArgs;

/// Extra tag definitions loaded from a toml file.
///
/// ```toml
/// [[tag]]
/// name = "quote"
/// template = "<blockquote>{param}</blockquote>"
/// nest_limit = 3
///
/// [[tag]]
/// name = "size"
/// template = "<span style=\"font-size: {option}\">{param}</span>"
/// use_option = true
/// option_validator = { regex = "^[1-7]$" }
/// ```
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub tag: Vec<TagConfig>,
}

impl Config {
    pub(crate) async fn load(path: &str) -> Result<Self> {
        let data = fs::read_to_string(path)
            .await
            .context("when reading config file")?;
        let config: Config = toml::from_str(data.as_str()).context("invalid config")?;
        trace!("{config:#?}");
        Ok(config)
    }
}

/// One `[[tag]]` table.
#[derive(Debug, Deserialize)]
pub(crate) struct TagConfig {
    pub name: String,

    /// Html with `{param}` and optional `{option}` markers.
    pub template: String,

    #[serde(default)]
    pub use_option: bool,

    #[serde(default = "default_parse_body")]
    pub parse_body: bool,

    /// Unlimited when absent.
    #[serde(default)]
    pub nest_limit: Option<usize>,

    #[serde(default)]
    pub unary: bool,

    #[serde(default)]
    pub option_validator: Option<ValidatorConfig>,

    #[serde(default)]
    pub body_validator: Option<ValidatorConfig>,
}

fn default_parse_body() -> bool {
    true
}

impl TagConfig {
    pub(crate) fn build(&self) -> Result<TagDefinition> {
        let mut builder = TagDefinitionBuilder::new(self.name.as_str(), self.template.as_str());
        builder
            .use_option(self.use_option)
            .parse_body(self.parse_body)
            .nest_limit(self.nest_limit)
            .unary(self.unary);
        if let Some(v) = &self.option_validator {
            builder.shared_option_validator(v.build()?);
        }
        if let Some(v) = &self.body_validator {
            builder.shared_body_validator(v.build()?);
        }
        builder
            .build()
            .with_context(|| format!("invalid definition for tag {:?}", self.name))
    }
}

/// Stock validators selectable in config.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ValidatorConfig {
    /// `"url"`
    Url,

    /// `"css-color"`
    CssColor,

    /// `{ regex = "<pattern>" }`
    Regex(String),
}

impl ValidatorConfig {
    fn build(&self) -> Result<SharedValidator> {
        let validator = match self {
            ValidatorConfig::Url => SharedValidator::new(UrlValidator),
            ValidatorConfig::CssColor => SharedValidator::new(CssColorValidator),
            ValidatorConfig::Regex(pattern) => SharedValidator::new(
                RegexValidator::new(pattern)
                    .with_context(|| format!("invalid validator pattern {pattern:?}"))?,
            ),
        };
        Ok(validator)
    }
}

/// Build the parser used by all subcommands.
///
/// Tags in `config` are registered after the default ones and replace them on conflict.
pub(crate) fn build_parser(no_defaults: bool, config: Option<&Config>) -> Result<Parser> {
    let mut parser = Parser::new();
    if !no_defaults {
        parser.add_definitions(default_definitions().context("failed to build default tags")?);
    }
    if let Some(config) = config {
        for tag in &config.tag {
            parser.add_definition(tag.build()?);
        }
    }
    debug!("parser ready with {} tags", parser.registry().len());
    Ok(parser)
}

/// Load config if any and build the parser from commandline args.
pub(crate) async fn parser_from_args(args: &ParserArgs) -> Result<Parser> {
    let config = match &args.config {
        Some(path) => Some(Config::load(path).await?),
        None => None,
    };
    build_parser(args.no_defaults, config.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[[tag]]
name = "quote"
template = "<blockquote>{param}</blockquote>"
nest_limit = 2

[[tag]]
name = "size"
template = "<span style=\"font-size: {option}\">{param}</span>"
use_option = true
option_validator = { regex = "^[1-7]$" }

[[tag]]
name = "code"
template = "<pre>{param}</pre>"
parse_body = false

[[tag]]
name = "*"
template = "<li>{param}</li>"
unary = true

[[tag]]
name = "bg"
template = "<span style=\"background: {option}\">{param}</span>"
use_option = true
option_validator = "css-color"

[[tag]]
name = "link"
template = "<a href=\"{param}\">{param}</a>"
body_validator = "url"
"#;

    fn config() -> Config {
        toml::from_str(CONFIG).unwrap()
    }

    #[test]
    fn test_parse_config() {
        let config = config();
        assert_eq!(config.tag.len(), 6);

        let quote = &config.tag[0];
        assert_eq!(quote.name, "quote");
        assert!(!quote.use_option);
        assert!(quote.parse_body);
        assert_eq!(quote.nest_limit, Some(2));
        assert!(!quote.unary);
        assert_eq!(quote.option_validator, None);

        assert_eq!(
            config.tag[1].option_validator,
            Some(ValidatorConfig::Regex("^[1-7]$".to_string()))
        );
        assert!(!config.tag[2].parse_body);
        assert!(config.tag[3].unary);
        assert_eq!(
            config.tag[4].option_validator,
            Some(ValidatorConfig::CssColor)
        );
        assert_eq!(config.tag[5].body_validator, Some(ValidatorConfig::Url));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.tag.is_empty());
    }

    #[test]
    fn test_unknown_validator() {
        let data = r#"
[[tag]]
name = "x"
template = "{param}"
body_validator = "email"
"#;
        assert!(toml::from_str::<Config>(data).is_err());
    }

    #[test]
    fn test_build_parser() {
        let parser = build_parser(false, Some(&config())).unwrap();
        assert!(parser.tag_exists("b", false));
        assert!(parser.tag_exists("quote", false));
        assert!(parser.tag_exists("size", true));

        let doc = parser.parse("[size=3]a[/size][size=9]b[/size]");
        assert_eq!(
            doc.to_html(),
            "<span style=\"font-size: 3\">a</span>[size=9]b[/size]"
        );

        let doc = parser.parse("[code][b]x[/b][/code]");
        assert_eq!(doc.to_html(), "<pre>[b]x[/b]</pre>");

        let doc = parser.parse("[bg=red]x[/bg][bg=nope]y[/bg]");
        assert_eq!(
            doc.to_html(),
            "<span style=\"background: red\">x</span>[bg=nope]y[/bg]"
        );

        let parser = build_parser(true, Some(&config())).unwrap();
        assert!(!parser.tag_exists("b", false));
        assert_eq!(parser.registry().len(), 6);
    }

    #[test]
    fn test_config_replaces_default_tag() {
        let config: Config = toml::from_str(
            r#"
[[tag]]
name = "B"
template = "<b>{param}</b>"
"#,
        )
        .unwrap();
        let parser = build_parser(false, Some(&config)).unwrap();
        assert_eq!(parser.parse("[b]x[/b]").to_html(), "<b>x</b>");
    }

    #[test]
    fn test_invalid_definitions() {
        for data in [
            r#"
[[tag]]
name = "x"
template = "no marker"
"#,
            r#"
[[tag]]
name = "x"
template = "{param}"
nest_limit = 0
"#,
            r#"
[[tag]]
name = "x"
template = "{param}"
option_validator = "url"
"#,
            r#"
[[tag]]
name = "x"
template = "{param}"
use_option = true
option_validator = { regex = "(" }
"#,
        ] {
            let config: Config = toml::from_str(data).unwrap();
            assert!(build_parser(true, Some(&config)).is_err(), "{data}");
        }
    }
}

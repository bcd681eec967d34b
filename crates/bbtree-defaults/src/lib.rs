//! Common tag definitions and validators for [`bbtree`].
//!
//! * `[b]`, `[i]`, `[u]`
//! * `[url]` and `[url=...]`
//! * `[img]` and `[img=alt]`
//! * `[color=...]`

mod validators;
mod web_color;

use bbtree::{DefinitionError, Parser, SharedValidator, TagDefinition, TagDefinitionBuilder};

pub use validators::{CssColorValidator, RegexValidator, UrlValidator};
pub use web_color::{InvalidColor, WebColor};

/// Build the default tag definitions.
///
/// # Errors
///
/// Never fails with the built-in templates, the error is forwarded from
/// [`TagDefinitionBuilder::build`].
pub fn default_definitions() -> Result<Vec<TagDefinition>, DefinitionError> {
    let url = SharedValidator::new(UrlValidator);
    let mut definitions = Vec::with_capacity(8);

    let mut builder = TagDefinitionBuilder::new("b", "<strong>{param}</strong>");
    definitions.push(builder.build()?);

    builder.tag_name("i").template("<em>{param}</em>");
    definitions.push(builder.build()?);

    builder.tag_name("u").template("<u>{param}</u>");
    definitions.push(builder.build()?);

    // The body of `[url]` is the link itself, nested tags would break it.
    builder
        .tag_name("url")
        .template(r#"<a href="{param}">{param}</a>"#)
        .parse_body(false)
        .shared_body_validator(url.clone());
    definitions.push(builder.build()?);

    builder
        .use_option(true)
        .template(r#"<a href="{option}">{param}</a>"#)
        .parse_body(true)
        .remove_body_validator()
        .shared_option_validator(url.clone());
    definitions.push(builder.build()?);

    builder
        .tag_name("img")
        .use_option(false)
        .parse_body(false)
        .template(r#"<img src="{param}" />"#)
        .remove_option_validator()
        .shared_body_validator(url);
    definitions.push(builder.build()?);

    builder
        .use_option(true)
        .template(r#"<img src="{param}" alt="{option}" />"#);
    definitions.push(builder.build()?);

    builder
        .tag_name("color")
        .template(r#"<span style="color: {option}">{param}</span>"#)
        .remove_body_validator()
        .parse_body(true)
        .option_validator(CssColorValidator);
    definitions.push(builder.build()?);

    Ok(definitions)
}

/// A [`Parser`] with [`default_definitions`] registered.
///
/// # Errors
///
/// See [`default_definitions`].
pub fn default_parser() -> Result<Parser, DefinitionError> {
    Ok(Parser::with_definitions(default_definitions()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> Parser {
        default_parser().unwrap()
    }

    /// Check text, html and markup output of `input`.
    fn check(input: &str, text: &str, html: &str, markup: &str) {
        let doc = parser().parse(input);
        assert_eq!(doc.to_text(), text, "text of {input:?}");
        assert_eq!(doc.to_html(), html, "html of {input:?}");
        assert_eq!(doc.to_markup(), markup, "markup of {input:?}");
    }

    fn check_literal(input: &str) {
        check(input, input, input, input);
    }

    #[test]
    fn test_default_set() {
        let parser = parser();
        assert_eq!(parser.definitions().count(), 8);
        for (name, use_option) in [
            ("b", false),
            ("i", false),
            ("u", false),
            ("url", false),
            ("url", true),
            ("img", false),
            ("img", true),
            ("color", true),
        ] {
            assert!(parser.tag_exists(name, use_option), "{name} {use_option}");
        }
        assert!(!parser.tag_exists("color", false));
        assert!(!parser.tag_exists("b", true));

        let url = parser.definition("url", false).unwrap();
        assert!(!url.parse_body());
        assert!(url.has_body_validator());
        assert!(!url.has_option_validator());

        let url_option = parser.definition("url", true).unwrap();
        assert!(url_option.parse_body());
        assert!(!url_option.has_body_validator());
        assert!(url_option.has_option_validator());

        let img_alt = parser.definition("IMG", true).unwrap();
        assert!(!img_alt.parse_body());
        assert!(img_alt.has_body_validator());
        assert!(!img_alt.has_option_validator());
    }

    #[test]
    fn test_plain_output() {
        check("", "", "", "");
        check("foo", "foo", "foo", "foo");
        check(
            "buffer text [b]this is bold[/b] buffer text",
            "buffer text this is bold buffer text",
            "buffer text <strong>this is bold</strong> buffer text",
            "buffer text [b]this is bold[/b] buffer text",
        );
        check(
            "this is some text with [b]bold tags[/b] and [i]italics[/i] and things like [u]that[/u].",
            "this is some text with bold tags and italics and things like that.",
            "this is some text with <strong>bold tags</strong> and <em>italics</em> and things like <u>that</u>.",
            "this is some text with [b]bold tags[/b] and [i]italics[/i] and things like [u]that[/u].",
        );
    }

    #[test]
    fn test_unclosed_tag_is_closed_in_markup() {
        check("[b]bold", "bold", "<strong>bold</strong>", "[b]bold[/b]");
    }

    #[test]
    fn test_url() {
        check(
            "This contains a [url=http://example.com]url[/url] which uses an option.",
            "This contains a url which uses an option.",
            r#"This contains a <a href="http://example.com">url</a> which uses an option."#,
            "This contains a [url=http://example.com]url[/url] which uses an option.",
        );
        check(
            "This doesn't use the url option [url]http://example.com[/url].",
            "This doesn't use the url option http://example.com.",
            r#"This doesn't use the url option <a href="http://example.com">http://example.com</a>."#,
            "This doesn't use the url option [url]http://example.com[/url].",
        );
    }

    #[test]
    fn test_url_body_is_not_parsed() {
        check(
            "[url]http://a.com/[b]x[/b][/url]",
            "[url]http://a.com/[b]x[/b][/url]",
            "[url]http://a.com/[b]x[/b][/url]",
            "[url]http://a.com/[b]x[/b][/url]",
        );
        let doc = parser().parse("[url=http://a.com][b]x[/b][/url]");
        assert_eq!(
            doc.to_html(),
            r#"<a href="http://a.com"><strong>x</strong></a>"#
        );
    }

    #[test]
    fn test_invalid_urls_stay_literal() {
        check_literal(r#"[url=javascript:alert("HACKED!");]click me[/url]"#);
        check_literal(r#"[url]javascript:alert("HACKED!");[/url]"#);
        check_literal("[img]not a url[/img]");
        check_literal("[img=alt]not a url[/img]");
    }

    #[test]
    fn test_img() {
        check(
            "[img]http://a.com/x.png[/img]",
            "http://a.com/x.png",
            r#"<img src="http://a.com/x.png" />"#,
            "[img]http://a.com/x.png[/img]",
        );
        let doc = parser().parse("[img=a cat]https://a.com/cat.png[/img]");
        assert_eq!(
            doc.to_html(),
            r#"<img src="https://a.com/cat.png" alt="a cat" />"#
        );
    }

    #[test]
    fn test_color() {
        check(
            "[color=red]x[/color]",
            "x",
            r#"<span style="color: red">x</span>"#,
            "[color=red]x[/color]",
        );
        let doc = parser().parse("[color=#00ff00][b]x[/b][/color]");
        assert_eq!(
            doc.to_html(),
            r#"<span style="color: #00ff00"><strong>x</strong></span>"#
        );
        check_literal(r#"[color=red;background:url(x)]x[/color]"#);
        check_literal("[color]x[/color]");
    }

    #[test]
    fn test_upper_case_input() {
        check(
            "[B]this is bold[/B]",
            "this is bold",
            "<strong>this is bold</strong>",
            "[B]this is bold[/B]",
        );
        check(
            "[B]this is bold",
            "this is bold",
            "<strong>this is bold</strong>",
            "[B]this is bold[/B]",
        );
        check(
            "this is some text with [B]bold tags[/B] and [I]italics[/I] and things like [U]that[/U].",
            "this is some text with bold tags and italics and things like that.",
            "this is some text with <strong>bold tags</strong> and <em>italics</em> and things like <u>that</u>.",
            "this is some text with [B]bold tags[/B] and [I]italics[/I] and things like [U]that[/U].",
        );
        check(
            "This contains a [URL=http://example.com]url[/URL] which uses an option.",
            "This contains a url which uses an option.",
            r#"This contains a <a href="http://example.com">url</a> which uses an option."#,
            "This contains a [URL=http://example.com]url[/URL] which uses an option.",
        );
        check(
            "This doesn't use the url option [URL]http://example.com[/URL].",
            "This doesn't use the url option http://example.com.",
            r#"This doesn't use the url option <a href="http://example.com">http://example.com</a>."#,
            "This doesn't use the url option [URL]http://example.com[/URL].",
        );
    }

    #[test]
    fn test_invalid_upper_case_input() {
        check_literal("This is some text with an [URL]I N V A L I D[/URL] URL tag.");
        check_literal("This is some text with an [URL foo=bar]INVALID[/URL] URL tag.");
        check_literal("This is some text with an invalid [URL=INVALID]URL[/URL] tag.");
    }
}

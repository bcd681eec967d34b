use std::sync::OnceLock;

use bbtree::Validator;
use regex::Regex;

use crate::web_color::WebColor;

static URL_RE: OnceLock<Regex> = OnceLock::new();

/// Accepts absolute `http`, `https` and `ftp` urls.
///
/// Quotes, angle brackets and square brackets are rejected anywhere in the url so a valid value
/// can always be placed inside an html attribute.
#[derive(Clone, Copy, Debug, Default)]
pub struct UrlValidator;

impl Validator for UrlValidator {
    fn validate(&self, input: &str) -> bool {
        URL_RE
            .get_or_init(|| {
                Regex::new(r#"^(?i:https?|ftp)://[^\s/?#"'<>\[\]]+(?:[/?#][^\s"'<>\[\]]*)?$"#)
                    .unwrap()
            })
            .is_match(input)
    }
}

/// Accepts any [`WebColor`]: a color name or a hex/rgb value.
#[derive(Clone, Copy, Debug, Default)]
pub struct CssColorValidator;

impl Validator for CssColorValidator {
    fn validate(&self, input: &str) -> bool {
        WebColor::parse(input).is_ok()
    }
}

/// Accepts input matching a user provided pattern.
///
/// The pattern is not anchored implicitly, use `^` and `$` to match the whole input.
#[derive(Clone, Debug)]
pub struct RegexValidator(Regex);

impl RegexValidator {
    /// # Errors
    ///
    /// When `pattern` is not a valid regular expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self(Regex::new(pattern)?))
    }
}

impl Validator for RegexValidator {
    fn validate(&self, input: &str) -> bool {
        self.0.is_match(input)
    }
}

use std::num::NonZeroUsize;

use crate::error::DefinitionError;
use crate::validator::{SharedValidator, Validator};
use crate::{CLOSE, EQUAL, OPEN, SLASH};

/// Marker in template replaced by the element body.
pub const PARAM_MARKER: &str = "{param}";

/// Marker in template replaced by the element option.
pub const OPTION_MARKER: &str = "{option}";

/// Identity of a [`TagDefinition`] in the registry.
///
/// The same tag name may be registered twice, once with an option and once without, e.g.
/// `[url]http://example.com[/url]` and `[url=http://example.com]text[/url]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinitionKey {
    /// Lowercased tag name.
    pub name: String,

    /// Whether the tag carries an option.
    pub use_option: bool,
}

impl DefinitionKey {
    pub fn new(name: &str, use_option: bool) -> Self {
        Self {
            name: name.to_lowercase(),
            use_option,
        }
    }
}

/// Definition of a recognized tag.
///
/// Construct with [`TagDefinitionBuilder`], which rejects invalid configurations.
#[derive(Clone, Debug)]
pub struct TagDefinition {
    /// Always lowercase.
    tag_name: String,

    /// Html template with `{param}` and optional `{option}` markers.
    template: String,

    use_option: bool,

    /// When false, element content is kept as literal text and never parsed as tags.
    parse_body: bool,

    /// Maximum nest depth, unlimited if `None`.
    nest_limit: Option<NonZeroUsize>,

    /// Unary tags have no explicit closing tag.
    unary: bool,

    option_validator: Option<SharedValidator>,

    body_validator: Option<SharedValidator>,
}

impl TagDefinition {
    /// Lowercased tag name.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn use_option(&self) -> bool {
        self.use_option
    }

    pub fn parse_body(&self) -> bool {
        self.parse_body
    }

    pub fn nest_limit(&self) -> Option<NonZeroUsize> {
        self.nest_limit
    }

    pub fn unary(&self) -> bool {
        self.unary
    }

    pub fn key(&self) -> DefinitionKey {
        DefinitionKey {
            name: self.tag_name.clone(),
            use_option: self.use_option,
        }
    }

    pub fn has_option_validator(&self) -> bool {
        self.option_validator.is_some()
    }

    pub fn has_body_validator(&self) -> bool {
        self.body_validator.is_some()
    }

    /// Check the option against the option validator.
    ///
    /// Always valid when no validator is attached or the definition does not use an option.
    pub fn is_valid_option(&self, option: Option<&str>) -> bool {
        match (&self.option_validator, option) {
            (Some(validator), Some(option)) if self.use_option => validator.validate(option),
            _ => true,
        }
    }

    /// Check the body text against the body validator.
    pub fn is_valid_body(&self, body: &str) -> bool {
        self.body_validator
            .as_ref()
            .map_or(true, |validator| validator.validate(body))
    }

    /// Fill the template with `option` and `body`.
    ///
    /// Markers are matched case-insensitively. Both markers are substituted in a single pass so
    /// a marker appearing inside the option or body text is left untouched.
    pub fn render(&self, option: Option<&str>, body: &str) -> String {
        let option = if self.use_option {
            option
        } else {
            None
        };
        fill_template(&self.template, option, body)
    }
}

/// Replace `{param}` and `{option}` in `template`.
///
/// `{option}` stays as is when `option` is `None`.
fn fill_template(template: &str, option: Option<&str>, body: &str) -> String {
    // ASCII lowercasing keeps byte offsets, so positions found here index `template` too.
    let lowered = template.to_ascii_lowercase();
    let mut output = String::with_capacity(template.len() + body.len());
    let mut start = 0;
    let mut pos = 0;

    while let Some(offset) = lowered[pos..].find('{') {
        let at = pos + offset;
        let rest = &lowered[at..];
        if rest.starts_with(PARAM_MARKER) {
            output.push_str(&template[start..at]);
            output.push_str(body);
            pos = at + PARAM_MARKER.len();
            start = pos;
        } else if let (true, Some(option)) = (rest.starts_with(OPTION_MARKER), option) {
            output.push_str(&template[start..at]);
            output.push_str(option);
            pos = at + OPTION_MARKER.len();
            start = pos;
        } else {
            pos = at + 1;
        }
    }

    output.push_str(&template[start..]);
    output
}

/// Builder of [`TagDefinition`].
///
/// A builder can be reused to produce several related definitions:
///
/// ```
/// use bbtree::TagDefinitionBuilder;
///
/// let mut builder = TagDefinitionBuilder::new("url", "<a href=\"{param}\">{param}</a>");
/// builder.parse_body(false);
/// let plain = builder.build().unwrap();
///
/// builder
///     .use_option(true)
///     .parse_body(true)
///     .template("<a href=\"{option}\">{param}</a>");
/// let with_option = builder.build().unwrap();
///
/// assert_eq!(plain.tag_name(), with_option.tag_name());
/// assert_ne!(plain.key(), with_option.key());
/// ```
#[derive(Clone, Debug)]
pub struct TagDefinitionBuilder {
    tag_name: String,
    template: String,
    use_option: bool,
    parse_body: bool,
    nest_limit: Option<usize>,
    unary: bool,
    option_validator: Option<SharedValidator>,
    body_validator: Option<SharedValidator>,
}

impl TagDefinitionBuilder {
    /// Start a definition for tag `tag_name` rendered with `template`.
    ///
    /// Defaults: no option, body parsed, unlimited nesting, not unary, no validators.
    pub fn new(tag_name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            template: template.into(),
            use_option: false,
            parse_body: true,
            nest_limit: None,
            unary: false,
            option_validator: None,
            body_validator: None,
        }
    }

    pub fn tag_name(&mut self, tag_name: impl Into<String>) -> &mut Self {
        self.tag_name = tag_name.into();
        self
    }

    pub fn template(&mut self, template: impl Into<String>) -> &mut Self {
        self.template = template.into();
        self
    }

    pub fn use_option(&mut self, use_option: bool) -> &mut Self {
        self.use_option = use_option;
        self
    }

    pub fn parse_body(&mut self, parse_body: bool) -> &mut Self {
        self.parse_body = parse_body;
        self
    }

    /// Set the nest limit, `None` for unlimited.
    ///
    /// A limit of zero is rejected by [`build`](Self::build).
    pub fn nest_limit(&mut self, nest_limit: Option<usize>) -> &mut Self {
        self.nest_limit = nest_limit;
        self
    }

    pub fn unary(&mut self, unary: bool) -> &mut Self {
        self.unary = unary;
        self
    }

    pub fn option_validator(&mut self, validator: impl Validator + 'static) -> &mut Self {
        self.option_validator = Some(SharedValidator::new(validator));
        self
    }

    pub fn body_validator(&mut self, validator: impl Validator + 'static) -> &mut Self {
        self.body_validator = Some(SharedValidator::new(validator));
        self
    }

    /// Attach an already shared validator, for reusing one instance across builders.
    pub fn shared_option_validator(&mut self, validator: SharedValidator) -> &mut Self {
        self.option_validator = Some(validator);
        self
    }

    pub fn shared_body_validator(&mut self, validator: SharedValidator) -> &mut Self {
        self.body_validator = Some(validator);
        self
    }

    pub fn remove_option_validator(&mut self) -> &mut Self {
        self.option_validator = None;
        self
    }

    pub fn remove_body_validator(&mut self) -> &mut Self {
        self.body_validator = None;
        self
    }

    /// Build the definition with current state.
    ///
    /// # Errors
    ///
    /// When the configuration is invalid, see [`DefinitionError`].
    pub fn build(&self) -> Result<TagDefinition, DefinitionError> {
        let name = self.tag_name.as_str();
        if name.is_empty() {
            return Err(DefinitionError::EmptyTagName);
        }
        if name.starts_with(SLASH) || name.contains([OPEN, CLOSE, EQUAL]) {
            return Err(DefinitionError::InvalidTagName(name.to_owned()));
        }
        if !self.template.to_ascii_lowercase().contains(PARAM_MARKER) {
            return Err(DefinitionError::MissingParamMarker(name.to_owned()));
        }
        let nest_limit = match self.nest_limit {
            Some(v) => Some(
                NonZeroUsize::new(v)
                    .ok_or_else(|| DefinitionError::InvalidNestLimit(name.to_owned()))?,
            ),
            None => None,
        };
        if self.option_validator.is_some() && !self.use_option {
            return Err(DefinitionError::OptionValidatorWithoutOption(
                name.to_owned(),
            ));
        }

        Ok(TagDefinition {
            tag_name: name.to_lowercase(),
            template: self.template.clone(),
            use_option: self.use_option,
            parse_body: self.parse_body,
            nest_limit,
            unary: self.unary,
            option_validator: self.option_validator.clone(),
            body_validator: self.body_validator.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_lowercases_name() {
        let def = TagDefinitionBuilder::new("B", "<strong>{param}</strong>")
            .build()
            .unwrap();
        assert_eq!(def.tag_name(), "b");
        assert_eq!(def.key(), DefinitionKey::new("b", false));
        assert!(def.parse_body());
        assert_eq!(def.nest_limit(), None);
    }

    #[test]
    fn test_build_rejects_invalid_configuration() {
        assert_eq!(
            TagDefinitionBuilder::new("", "{param}").build().unwrap_err(),
            DefinitionError::EmptyTagName
        );
        assert_eq!(
            TagDefinitionBuilder::new("/b", "{param}").build().unwrap_err(),
            DefinitionError::InvalidTagName("/b".to_string())
        );
        assert_eq!(
            TagDefinitionBuilder::new("a=b", "{param}").build().unwrap_err(),
            DefinitionError::InvalidTagName("a=b".to_string())
        );
        assert_eq!(
            TagDefinitionBuilder::new("b", "<b></b>").build().unwrap_err(),
            DefinitionError::MissingParamMarker("b".to_string())
        );
        assert_eq!(
            TagDefinitionBuilder::new("b", "{param}")
                .nest_limit(Some(0))
                .build()
                .unwrap_err(),
            DefinitionError::InvalidNestLimit("b".to_string())
        );
        assert_eq!(
            TagDefinitionBuilder::new("b", "{param}")
                .option_validator(|_: &str| true)
                .build()
                .unwrap_err(),
            DefinitionError::OptionValidatorWithoutOption("b".to_string())
        );
    }

    #[test]
    fn test_render_template() {
        let def = TagDefinitionBuilder::new("color", "<span style=\"color: {OPTION}\">{Param}</span>")
            .use_option(true)
            .build()
            .unwrap();
        assert_eq!(
            def.render(Some("red"), "text"),
            "<span style=\"color: red\">text</span>"
        );
    }

    #[test]
    fn test_render_does_not_expand_markers_in_values() {
        let def = TagDefinitionBuilder::new("x", "{option}|{param}")
            .use_option(true)
            .build()
            .unwrap();
        assert_eq!(def.render(Some("{param}"), "body"), "{param}|body");
        assert_eq!(def.render(Some("o"), "{option}"), "o|{option}");
    }

    #[test]
    fn test_render_repeated_param() {
        let def = TagDefinitionBuilder::new("url", "<a href=\"{param}\">{param}</a>")
            .build()
            .unwrap();
        assert_eq!(def.render(None, "x"), "<a href=\"x\">x</a>");
    }

    #[test]
    fn test_option_validation() {
        let def = TagDefinitionBuilder::new("url", "{param}")
            .use_option(true)
            .option_validator(|x: &str| x.starts_with("http"))
            .build()
            .unwrap();
        assert!(def.is_valid_option(Some("http://a")));
        assert!(!def.is_valid_option(Some("ftp://a")));
        assert!(def.is_valid_body("anything"));
    }
}

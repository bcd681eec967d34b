/// Errors raised when configuring tag definitions.
///
/// These are the only errors the crate ever returns. Malformed *content* passed to
/// [`Parser::parse`](crate::Parser::parse) never fails, it degrades to literal text instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    /// Tag name is empty.
    #[error("tag name can not be empty")]
    EmptyTagName,

    /// Tag name can never be matched by the tokenizer.
    ///
    /// * 0: tag name.
    #[error("invalid tag name {0:?}: must not contain '[', ']' or '=' and must not start with '/'")]
    InvalidTagName(String),

    /// Template has no place to put the element body.
    ///
    /// * 0: tag name.
    #[error("template of tag {0:?} does not contain the {{param}} marker")]
    MissingParamMarker(String),

    /// Nest limit is not a positive integer.
    ///
    /// * 0: tag name.
    #[error("nest limit of tag {0:?} must be a positive integer or unlimited")]
    InvalidNestLimit(String),

    /// An option validator is attached to a definition that never carries an option.
    ///
    /// * 0: tag name.
    #[error("tag {0:?} has an option validator but does not use an option")]
    OptionValidatorWithoutOption(String),
}

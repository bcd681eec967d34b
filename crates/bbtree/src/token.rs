use crate::{EQUAL, SLASH};

/// Candidate tag between a `[` and a `]`.
///
/// `$name`, `$name=$attr`, `/$name` or `/$name=$attr`. The last form is never valid but is
/// still split so the parser can reject it.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TagToken<'a> {
    /// Tag name without the leading `/`.
    pub(crate) name: &'a str,

    /// Everything after the first `=`, if any.
    pub(crate) attr: Option<&'a str>,

    /// Whether the tag started with `/`.
    pub(crate) closing: bool,
}

impl<'a> TagToken<'a> {
    pub(crate) fn parse(content: &'a str) -> Self {
        let (head, attr) = match content.split_once(EQUAL) {
            Some((head, attr)) => (head, Some(attr)),
            None => (content, None),
        };
        match head.strip_prefix(SLASH) {
            Some(name) => Self {
                name,
                attr,
                closing: true,
            },
            None => Self {
                name: head,
                attr,
                closing: false,
            },
        }
    }
}

use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether an option or body text is acceptable for a tag.
///
/// Any `Fn(&str) -> bool` closure that is `Send + Sync` is a validator:
///
/// ```
/// use bbtree::Validator;
///
/// let digits = |input: &str| !input.is_empty() && input.chars().all(|c| c.is_ascii_digit());
/// assert!(digits.validate("42"));
/// assert!(!digits.validate("4x"));
/// ```
pub trait Validator: Send + Sync {
    /// Return true if `input` is valid.
    fn validate(&self, input: &str) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn validate(&self, input: &str) -> bool {
        self(input)
    }
}

/// Shared handle to a validator.
///
/// Definitions built from the same builder share their validators.
#[derive(Clone)]
pub struct SharedValidator(Arc<dyn Validator>);

impl SharedValidator {
    pub fn new(validator: impl Validator + 'static) -> Self {
        Self(Arc::new(validator))
    }

    pub fn validate(&self, input: &str) -> bool {
        self.0.validate(input)
    }
}

impl fmt::Debug for SharedValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedValidator(..)")
    }
}

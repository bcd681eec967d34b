use crate::lexer::Lexer;

/// Restartable cursor over the tokens of a string.
///
/// Concatenating all tokens gives back the original string.
///
/// ```
/// use bbtree::Tokenizer;
///
/// let mut tokenizer = Tokenizer::new("[b]bold[/b]");
/// assert_eq!(tokenizer.next(), Some("["));
/// assert_eq!(tokenizer.next(), Some("b"));
/// tokenizer.step_back();
/// assert_eq!(tokenizer.current(), Some("["));
/// assert_eq!(tokenizer.remainder(), "b]bold[/b]");
/// ```
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    /// Source text.
    source: &'a str,

    /// Start offset of each token.
    tokens: Vec<usize>,

    /// Count of consumed tokens.
    ///
    /// The current token is the one before this position.
    position: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Lexer::new(source).scan(),
            position: 0,
        }
    }

    /// Check if there is another token after the current one.
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// The token last returned by [`Iterator::next`], if any.
    pub fn current(&self) -> Option<&'a str> {
        self.position.checked_sub(1).and_then(|idx| self.get(idx))
    }

    /// Move the position back 1 token.
    ///
    /// Does nothing when nothing was consumed.
    pub fn step_back(&mut self) {
        if self.position == 0 {
            return;
        }
        self.position -= 1;
    }

    /// Return to the beginning of the token stream.
    pub fn restart(&mut self) {
        self.position = 0;
    }

    /// Everything after the current token.
    pub fn remainder(&self) -> &'a str {
        self.tokens
            .get(self.position)
            .map_or("", |start| &self.source[*start..])
    }

    /// Get the token at `index`.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        let start = *self.tokens.get(index)?;
        let end = self
            .tokens
            .get(index + 1)
            .copied()
            .unwrap_or(self.source.len());
        Some(&self.source[start..end])
    }

    /// Count of all tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a str;

    /// Advance to the next token and return it.
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.get(self.position)?;
        self.position += 1;
        Some(token)
    }
}

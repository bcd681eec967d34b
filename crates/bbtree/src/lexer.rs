use crate::{CLOSE, OPEN};

/// Splits input into the start offsets of its tokens.
///
/// A token is either a single `[` or `]`, or a maximal run of other characters. Only byte
/// offsets are recorded, slicing is left to [`Tokenizer`](crate::Tokenizer).
pub(crate) struct Lexer<'a> {
    /// Source text.
    source: &'a str,

    /// Start position of current constructing token.
    start: usize,

    /// Start offsets of scanned tokens.
    tokens: Vec<usize>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            tokens: vec![],
        }
    }

    /// Run the process and return token start offsets.
    pub(crate) fn scan(mut self) -> Vec<usize> {
        let bytes = self.source.as_bytes();
        while self.start < bytes.len() {
            self.tokens.push(self.start);
            self.start = match bytes[self.start] {
                // Each bracket is a token on its own.
                b if b == OPEN as u8 || b == CLOSE as u8 => self.start + 1,
                _ => self.scan_text(),
            };
        }
        self.tokens
    }

    /// Return the end of the text run starting at `self.start`.
    ///
    /// Brackets are ASCII so the returned offset is always a char boundary.
    fn scan_text(&self) -> usize {
        self.source[self.start..]
            .find([OPEN, CLOSE])
            .map_or(self.source.len(), |offset| self.start + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_offsets() {
        assert_eq!(Lexer::new("").scan(), Vec::<usize>::new());
        assert_eq!(Lexer::new("abc").scan(), vec![0]);
        assert_eq!(Lexer::new("[b]x[/b]").scan(), vec![0, 1, 2, 3, 4, 5, 7]);
        assert_eq!(Lexer::new("[[]").scan(), vec![0, 1, 2]);
    }

    #[test]
    fn test_scan_multibyte_text() {
        let source = "粗体[b]";
        assert_eq!(Lexer::new(source).scan(), vec![0, 6, 7, 8]);
    }
}

//! Tokenization and the editable token stream
//!
//! Raw input is split into tokens by whitespace alone; the actual split is
//! handled entirely by logos. The resulting [`TokenStream`] is *not* a
//! read-only view: error recovery rewrites, inserts, and deletes tokens at
//! the cursor while the checker is scanning, so all edits go through
//! explicit cursor-relative operations.

use crate::grammar::END;
use logos::Logos;

/// Raw token shape: any maximal run of non-whitespace
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"[^ \t\r\n\f]+")]
    Word,
}

/// Convenience function to split a source text into its tokens
pub fn tokenize(source: &str) -> Vec<String> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        if result.is_ok() {
            tokens.push(lexer.slice().to_string());
        }
    }
    tokens
}

/// A mutable token sequence with a read cursor
///
/// Always terminated by one `$` sentinel appended after tokenization.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<String>,
    cursor: usize,
}

impl TokenStream {
    /// Tokenize a source text and append the end sentinel
    pub fn from_source(source: &str) -> Self {
        let mut tokens = tokenize(source);
        tokens.push(END.to_string());
        TokenStream { tokens, cursor: 0 }
    }

    /// Wrap an already-split token list, appending the end sentinel
    pub fn from_tokens(mut tokens: Vec<String>) -> Self {
        tokens.push(END.to_string());
        TokenStream { tokens, cursor: 0 }
    }

    /// The token under the cursor
    pub fn current(&self) -> &str {
        &self.tokens[self.cursor]
    }

    /// Consume the current token
    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    pub fn has_input(&self) -> bool {
        self.cursor < self.tokens.len()
    }

    /// True when the cursor sits on the final token
    pub fn at_last(&self) -> bool {
        self.cursor + 1 >= self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens not yet consumed, including the current one
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.cursor)
    }

    /// Overwrite the token under the cursor
    pub fn replace_current(&mut self, value: String) {
        self.tokens[self.cursor] = value;
    }

    /// Insert a token at the cursor; it becomes the current token
    pub fn insert_before_cursor(&mut self, value: String) {
        self.tokens.insert(self.cursor, value);
    }

    /// Remove and return the token under the cursor
    pub fn delete_current(&mut self) -> String {
        self.tokens.remove(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(
            tokenize("  a\tb\n  c  "),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn empty_source_has_no_tokens() {
        assert_eq!(tokenize("   \n\t "), Vec::<String>::new());
    }

    #[test]
    fn stream_is_sentinel_terminated() {
        let stream = TokenStream::from_source("a b");
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.current(), "a");
    }

    #[test]
    fn cursor_edits_are_relative() {
        let mut stream = TokenStream::from_source("a b c");
        stream.advance();
        assert_eq!(stream.current(), "b");
        stream.insert_before_cursor("x".to_string());
        assert_eq!(stream.current(), "x");
        assert_eq!(stream.delete_current(), "x");
        stream.replace_current("y".to_string());
        assert_eq!(stream.current(), "y");
        assert_eq!(stream.remaining(), 3); // y c $
    }

    #[test]
    fn at_last_tracks_the_sentinel() {
        let mut stream = TokenStream::from_tokens(vec!["a".to_string()]);
        assert!(!stream.at_last());
        stream.advance();
        assert!(stream.at_last());
        assert!(stream.has_input());
    }
}

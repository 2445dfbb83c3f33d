//! Pull-based character input for the lexer.

use std::iter::Peekable;

/// Forward-only character stream. Never seeks or rewinds.
pub trait CharSource {
    /// Next character without consuming it, `None` at end of input.
    fn peek_char(&mut self) -> Option<char>;

    /// Consume and return the next character.
    fn next_char(&mut self) -> Option<char>;
}

impl<I> CharSource for Peekable<I>
where
    I: Iterator<Item = char>,
{
    fn peek_char(&mut self) -> Option<char> {
        self.peek().copied()
    }

    fn next_char(&mut self) -> Option<char> {
        self.next()
    }
}

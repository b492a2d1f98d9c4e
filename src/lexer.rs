/// A forward cursor over the code points of a string.
///
/// Positions are byte offsets into the original input, so they can be used to
/// slice it directly.
///
/// # Example
/// ```
/// use shell_argv::Lexer;
///
/// let mut lexer = Lexer::new("hé!");
/// assert_eq!(lexer.next(), Some('h'));
/// assert_eq!(lexer.next(), Some('é'));
/// assert_eq!(lexer.position(), 3);
/// lexer.rewind();
/// assert_eq!(lexer.peek(), Some('é'));
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte length of the whole input, read or not.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// The part of the input that has not been consumed yet.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Returns the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Steps back over the last consumed character.
    ///
    /// Multi-byte characters are stepped over whole. Does nothing at the start
    /// of the input.
    pub fn rewind(&mut self) {
        if let Some(c) = self.input[..self.pos].chars().next_back() {
            self.pos -= c.len_utf8();
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.input.len() - self.pos;
        (rest.div_ceil(4), Some(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let mut lexer = Lexer::new("");
        assert!(lexer.is_empty());
        assert_eq!(lexer.peek(), None);
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.position(), 0);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("ab");
        assert_eq!(lexer.peek(), Some('a'));
        assert_eq!(lexer.peek(), Some('a'));
        assert_eq!(lexer.next(), Some('a'));
        assert_eq!(lexer.peek(), Some('b'));
        assert_eq!(lexer.remaining(), "b");
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let mut lexer = Lexer::new("aé😀b");
        assert_eq!(lexer.len(), 1 + 2 + 4 + 1);
        lexer.next();
        assert_eq!(lexer.position(), 1);
        lexer.next();
        assert_eq!(lexer.position(), 3);
        lexer.next();
        assert_eq!(lexer.position(), 7);
        assert_eq!(lexer.next(), Some('b'));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.position(), lexer.len());
    }

    #[test]
    fn test_rewind_steps_over_whole_characters() {
        let mut lexer = Lexer::new("x😀é");
        while lexer.next().is_some() {}

        lexer.rewind();
        assert_eq!(lexer.peek(), Some('é'));
        lexer.rewind();
        assert_eq!(lexer.peek(), Some('😀'));
        lexer.rewind();
        assert_eq!(lexer.peek(), Some('x'));
        assert_eq!(lexer.position(), 0);

        lexer.rewind();
        assert_eq!(lexer.position(), 0);
    }

    #[test]
    fn test_collects_like_chars() {
        let input = "echo 'hi there'";
        assert_eq!(
            Lexer::new(input).collect::<String>(),
            input.chars().collect::<String>()
        );
    }
}

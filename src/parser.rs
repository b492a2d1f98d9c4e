use std::ops::Deref;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::TokenizeError;
use crate::lexer::Lexer;

/// A quote that has been opened and not yet closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenQuote {
    quote: char,
    /// Byte offset of the opening quote.
    offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Bare,
    /// The character after a backslash. Carries the quote the backslash
    /// appeared in, if any.
    Escaped(Option<OpenQuote>),
    Quoted(OpenQuote),
}

struct Tokenizer {
    mode: Mode,
    word: String,
    /// Set once a quoted segment of the current word has been closed, so the
    /// word is emitted even when it is empty.
    quoted: bool,
    tokens: Vec<String>,
}

impl Tokenizer {
    fn new() -> Self {
        Tokenizer {
            mode: Mode::Bare,
            word: String::new(),
            quoted: false,
            tokens: Vec::new(),
        }
    }

    fn feed(&mut self, c: char, offset: usize) {
        self.mode = match (self.mode, c) {
            (Mode::Bare, c) if c.is_whitespace() => {
                self.flush();
                Mode::Bare
            }
            (Mode::Bare, '\\') => Mode::Escaped(None),
            (Mode::Bare, '\'' | '"') => Mode::Quoted(OpenQuote { quote: c, offset }),
            (Mode::Bare, c) => {
                self.word.push(c);
                Mode::Bare
            }

            // Outside quotes a backslash takes the next character as-is.
            (Mode::Escaped(None), c) => {
                self.word.push(c);
                Mode::Bare
            }
            (Mode::Escaped(Some(open)), c) if c == open.quote || c == '\\' => {
                self.word.push(c);
                Mode::Quoted(open)
            }
            (Mode::Escaped(Some(open)), c) => {
                self.word.push('\\');
                self.word.push(c);
                Mode::Quoted(open)
            }

            (Mode::Quoted(open), '\\') => Mode::Escaped(Some(open)),
            (Mode::Quoted(open), c) if c == open.quote => {
                self.quoted = true;
                Mode::Bare
            }
            (Mode::Quoted(open), c) => {
                self.word.push(c);
                Mode::Quoted(open)
            }
        };
    }

    fn flush(&mut self) {
        if self.word.is_empty() && !self.quoted {
            return;
        }
        trace!(token = ?self.word, "flushed token");
        // Copy out so the buffer keeps its capacity for the next word.
        self.tokens.push(self.word.as_str().to_owned());
        self.word.clear();
        self.quoted = false;
    }

    fn finish(mut self) -> Result<Vec<String>, TokenizeError> {
        match self.mode {
            Mode::Bare => {}
            Mode::Escaped(None) => self.word.push('\\'),
            Mode::Escaped(Some(open)) | Mode::Quoted(open) => {
                debug!(quote = ?open.quote, offset = open.offset, "unterminated quote");
                return Err(TokenizeError::UnterminatedQuote {
                    quote: open.quote,
                    offset: open.offset,
                });
            }
        }
        self.flush();
        debug!(count = self.tokens.len(), "tokenized input");
        Ok(self.tokens)
    }
}

/// Splits an input string into a vector of arguments.
///
/// This tokenizer handles:
/// - Whitespace: separates words. Runs of whitespace never produce empty words.
/// - Backslash outside quotes: the next character is taken literally. A
///   trailing backslash is kept as a literal backslash.
/// - Single and double quotes: contents are kept as-is, whitespace included.
///   Inside quotes a backslash only escapes the active quote character or
///   another backslash; before anything else it is kept.
/// - Quoted and unquoted text with no whitespace between them form one word.
///   A closed quote always produces a word, so `""` yields one empty string.
///
/// Fails with [`TokenizeError::UnterminatedQuote`] if the input ends inside a
/// quote.
///
/// # Example
/// ```
/// use shell_argv::tokenize;
///
/// let args = tokenize("echo 'hello world'").unwrap();
/// assert_eq!(args, vec!["echo", "hello world"]);
/// ```
pub fn tokenize(input: &str) -> Result<Vec<String>, TokenizeError> {
    let mut lexer = Lexer::new(input);
    let mut tokenizer = Tokenizer::new();

    loop {
        let offset = lexer.position();
        let Some(c) = lexer.next() else {
            break;
        };
        tokenizer.feed(c, offset);
    }

    tokenizer.finish()
}

/// A tokenized command line: the program name followed by its arguments.
///
/// # Example
/// ```
/// use shell_argv::Argv;
///
/// let argv: Argv = r#"grep -n "fn main" src"#.parse().unwrap();
/// assert_eq!(argv.program(), Some("grep"));
/// assert_eq!(argv.args(), ["-n", "fn main", "src"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argv(Vec<String>);

impl Argv {
    /// The first word, conventionally the command to run.
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Every word after the program.
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl FromStr for Argv {
    type Err = TokenizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        tokenize(s).map(Argv)
    }
}

impl Deref for Argv {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Argv> for Vec<String> {
    fn from(argv: Argv) -> Self {
        argv.0
    }
}

impl IntoIterator for Argv {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Argv {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

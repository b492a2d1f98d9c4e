use thiserror::Error;

/// Failure produced by [`tokenize`](crate::tokenize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// The input ended while a quote was still open.
    ///
    /// `offset` is the byte offset of the opening quote in the input.
    #[error("missing closing quote: {quote} opened at byte {offset}")]
    UnterminatedQuote { quote: char, offset: usize },
}

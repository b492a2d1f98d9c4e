//! Splits a command line into argv-style words, honouring shell quoting.
//!
//! ```
//! use shell_argv::{tokenize, TokenizeError};
//!
//! assert_eq!(tokenize(r#"git commit -m "first commit""#).unwrap(), ["git", "commit", "-m", "first commit"]);
//! assert!(matches!(tokenize("echo 'oops"), Err(TokenizeError::UnterminatedQuote { .. })));
//! ```

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::TokenizeError;
pub use lexer::Lexer;
pub use parser::{Argv, tokenize};

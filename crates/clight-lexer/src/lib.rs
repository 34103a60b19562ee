//! clight Lexer
//!
//! Classifies the spans of a single line of C-like source into keywords,
//! type names, preprocessor directives, string literals, line comments and
//! plain words. Each span is recorded as a byte offset and length into the
//! line; operators, punctuation and digits are left unclassified.
//!
//! The scanner is total: every byte sequence tokenizes, malformed input just
//! yields shorter tokens or none at all.
//!
//! # Example
//!
//! ```
//! use clight_lexer::{Scanner, TokenKind};
//!
//! let tokens = Scanner::tokenize("int x;");
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].kind, TokenKind::Type);
//! ```

pub mod scanner;
pub mod token;
pub mod view;

pub use scanner::{Scanner, TokenizerOptions, INITIAL_TOKEN_CAPACITY};
pub use token::{is_keyword, is_type, Token, TokenKind, KEYWORDS, TYPES};
pub use view::TextView;

use tracing::trace;

use crate::token::{is_keyword, is_type, Token, TokenKind};
use crate::view::TextView;

/// Capacity reserved for the token buffer of a fresh line. Beyond this the
/// buffer grows by doubling.
pub const INITIAL_TOKEN_CAPACITY: usize = 16;

/// Knobs for the line scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Cap on the number of identifier bytes captured for classification.
    ///
    /// `None` captures the whole run. With a cap, the scanner still moves
    /// past the full run but the token covers (and is classified by) only
    /// the first `max_ident_len` bytes.
    pub max_ident_len: Option<usize>,
}

/// Line scanner for C-like source.
///
/// Makes one left-to-right pass over a line and records keywords, type
/// names, preprocessor directives, line comments, string literals and plain
/// words. Everything else (digits, operators, punctuation) is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    options: TokenizerOptions,
}

impl Scanner {
    /// Create a scanner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with specific options.
    pub fn with_options(options: TokenizerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> TokenizerOptions {
        self.options
    }

    /// Tokenize one line with default options.
    pub fn tokenize(line: &str) -> Vec<Token> {
        Scanner::new().tokenize_line(line.as_bytes())
    }

    /// Tokenize one line into a fresh buffer.
    pub fn tokenize_line(&self, line: &[u8]) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(INITIAL_TOKEN_CAPACITY);
        self.tokenize_into(line, &mut tokens);
        tokens
    }

    /// Tokenize one line into `tokens`, replacing its contents.
    ///
    /// Returns the number of tokens written. The buffer keeps its capacity
    /// between calls, so a renderer can reuse one buffer for every line.
    pub fn tokenize_into(&self, line: &[u8], tokens: &mut Vec<Token>) -> usize {
        tokens.clear();
        let mut scan = LineScan {
            origin: TextView::new(line),
            view: TextView::new(line),
            options: self.options,
            tokens,
        };
        scan.scan_tokens();
        let count = scan.tokens.len();
        trace!(len = line.len(), tokens = count, "tokenized line");
        count
    }
}

/// Whether `b` continues an identifier. Digits do not.
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn classify_word(word: &[u8]) -> TokenKind {
    if word.is_empty() {
        TokenKind::None
    } else if is_keyword(word) {
        TokenKind::Keyword
    } else if is_type(word) {
        TokenKind::Type
    } else {
        TokenKind::Word
    }
}

/// State for a single pass over one line.
struct LineScan<'a, 't> {
    origin: TextView<'a>,
    view: TextView<'a>,
    options: TokenizerOptions,
    tokens: &'t mut Vec<Token>,
}

impl LineScan<'_, '_> {
    fn scan_tokens(&mut self) {
        loop {
            self.view = self.view.trim_left();
            let Some(b) = self.view.first() else {
                break;
            };

            if b.is_ascii_alphabetic() {
                // Leaves the view one past the identifier.
                self.scan_word();
                continue;
            }

            if b == b'#' {
                self.scan_directive();
            } else if self.view.starts_with(b"//") {
                self.scan_comment();
            } else if b == b'"' {
                self.scan_string();
            }

            self.view = self.view.advance(1);
        }
    }

    /// Scan an identifier and classify it as keyword, type or word.
    fn scan_word(&mut self) {
        let start = self.pos();
        let (run, rest) = self.view.split_while(is_ident_byte);
        self.view = rest;

        let captured = match self.options.max_ident_len {
            Some(limit) => &run[..run.len().min(limit)],
            None => run,
        };
        self.emit(classify_word(captured), start, captured.len());
    }

    /// Scan a preprocessor line. The token always starts at column 0 and
    /// spans the bytes remaining from the `#`.
    fn scan_directive(&mut self) {
        let length = self.view.len();
        self.emit(TokenKind::Preprocessor, 0, length);
        self.view = self.view.skip_line();
    }

    /// Scan a `//` comment through the end of the line.
    fn scan_comment(&mut self) {
        let start = self.pos();
        let length = self.view.len();
        self.emit(TokenKind::Comment, start, length);
        self.view = self.view.skip_line();
    }

    /// Scan a string literal. Backslashes are not escapes: the first `"`
    /// after the opening one closes the literal. Leaves the view on the
    /// closing quote.
    fn scan_string(&mut self) {
        let start = self.pos();
        let (body, rest) = self.view.advance(1).split_while(|b| b != b'"');
        let length = if rest.is_empty() {
            // Unterminated: the literal runs to the end of the line.
            1 + body.len()
        } else {
            body.len() + 2
        };
        self.emit(TokenKind::String, start, length);
        self.view = rest;
    }

    // --- Helpers ---

    fn pos(&self) -> usize {
        self.view.offset_in(&self.origin)
    }

    fn emit(&mut self, kind: TokenKind, offset: usize, length: usize) {
        if kind == TokenKind::None || length == 0 {
            return;
        }
        self.tokens.push(Token::new(kind, offset, length));
    }
}

//! clight Highlighter
//!
//! Turns the tokens of a line into colored terminal output. The resolver
//! answers "what color starts here?" for each column; the painter walks a
//! line and asks it once per column, skipping ahead over colored runs.
//!
//! ```text
//! load_lines() → Scanner (per line) → ColorResolver ← paint_line() → bytes
//! ```

pub mod color;
pub mod loader;
pub mod paint;
pub mod palette;

use clight_lexer::{Scanner, Token, TokenizerOptions, INITIAL_TOKEN_CAPACITY};

pub use color::{ColorPair, ColorResolver, CustomColor, CustomColorParseError, Highlight};
pub use loader::{load_lines, split_lines, LoadError};
pub use paint::paint_line;
pub use palette::{AnsiPalette, Palette};

/// Scanner, resolver and palette for one render loop.
///
/// Keeps a single token buffer that is refilled for every line.
pub struct Highlighter<P: Palette> {
    scanner: Scanner,
    resolver: ColorResolver,
    palette: P,
    tokens: Vec<Token>,
}

impl<P: Palette> Highlighter<P> {
    pub fn new(palette: P) -> Self {
        Self {
            scanner: Scanner::new(),
            resolver: ColorResolver::new(),
            palette,
            tokens: Vec::with_capacity(INITIAL_TOKEN_CAPACITY),
        }
    }

    pub fn with_options(mut self, options: TokenizerOptions) -> Self {
        self.scanner = Scanner::with_options(options);
        self
    }

    pub fn with_custom_color(mut self, custom: CustomColor) -> Self {
        self.resolver = ColorResolver::with_custom_color(custom);
        self
    }

    pub fn palette(&self) -> &P {
        &self.palette
    }

    /// Tokens of the most recently painted line.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokenize and paint `line`, appending the output to `out`.
    pub fn paint(&mut self, line: &[u8], out: &mut Vec<u8>) {
        self.scanner.tokenize_into(line, &mut self.tokens);
        paint_line(
            line,
            &self.tokens,
            &mut self.resolver,
            &mut self.palette,
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clight_lexer::TokenKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_highlighter_paints_lines() {
        let mut hl = Highlighter::new(AnsiPalette::with_base_pairs());
        let mut out = Vec::new();
        for line in split_lines(b"#define N 4\nreturn N;\n") {
            hl.paint(&line, &mut out);
            out.push(b'\n');
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\x1b[36m#define N 4\x1b[0m\n\x1b[31mreturn\x1b[0m \x1b[34mN\x1b[0m;\n"
        );
    }

    #[test]
    fn test_highlighter_reuses_token_buffer() {
        let mut hl = Highlighter::new(AnsiPalette::new());
        let mut out = Vec::new();
        hl.paint(b"int a b c d", &mut out);
        assert_eq!(hl.tokens().len(), 5);
        hl.paint(b"// done", &mut out);
        assert_eq!(hl.tokens(), &[Token::new(TokenKind::Comment, 0, 7)]);
    }

    #[test]
    fn test_highlighter_options() {
        let mut hl = Highlighter::new(AnsiPalette::new()).with_options(TokenizerOptions {
            max_ident_len: Some(2),
        });
        hl.paint(b"while", &mut Vec::new());
        assert_eq!(hl.tokens(), &[Token::new(TokenKind::Word, 0, 2)]);
    }

    #[test]
    fn test_highlighter_custom_color() {
        let custom: CustomColor = "green:0,1000,0@30".parse().unwrap();
        let mut hl = Highlighter::new(AnsiPalette::with_base_pairs()).with_custom_color(custom);
        let mut out = Vec::new();
        hl.paint(b"// ok", &mut out);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\x1b[38;2;0;255;0m// ok\x1b[0m"
        );
        assert_eq!(
            hl.palette().style(ColorPair::Green),
            Some("\x1b[38;2;0;255;0m".into())
        );
    }
}

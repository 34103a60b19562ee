use std::fmt;
use std::str::FromStr;

use clight_lexer::{Token, TokenKind};
use tracing::debug;

use crate::palette::Palette;

/// Terminal color numbers, curses numbering.
pub const COLOR_BLACK: i16 = 0;
pub const COLOR_RED: i16 = 1;
pub const COLOR_GREEN: i16 = 2;
pub const COLOR_YELLOW: i16 = 3;
pub const COLOR_BLUE: i16 = 4;
pub const COLOR_MAGENTA: i16 = 5;
pub const COLOR_CYAN: i16 = 6;

/// Slot used for a custom color when none is given.
pub const DEFAULT_CUSTOM_SLOT: i16 = 16;

/// Color pairs registered with the terminal, one per highlighted kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorPair {
    Yellow = 1,
    Blue,
    Green,
    Red,
    Cyan,
    Magenta,
}

impl ColorPair {
    pub const ALL: [ColorPair; 6] = [
        ColorPair::Yellow,
        ColorPair::Blue,
        ColorPair::Green,
        ColorPair::Red,
        ColorPair::Cyan,
        ColorPair::Magenta,
    ];

    /// Pair number as registered with the terminal.
    pub fn id(self) -> i16 {
        self as i16
    }

    /// Foreground color the pair is registered with at startup.
    pub fn base_foreground(self) -> i16 {
        match self {
            ColorPair::Yellow => COLOR_YELLOW,
            ColorPair::Blue => COLOR_BLUE,
            ColorPair::Green => COLOR_GREEN,
            ColorPair::Red => COLOR_RED,
            ColorPair::Cyan => COLOR_CYAN,
            ColorPair::Magenta => COLOR_MAGENTA,
        }
    }

    /// Display color for a token kind.
    pub fn for_kind(kind: TokenKind) -> Option<ColorPair> {
        match kind {
            TokenKind::None => None,
            TokenKind::Keyword => Some(ColorPair::Red),
            TokenKind::Type => Some(ColorPair::Yellow),
            TokenKind::Preprocessor => Some(ColorPair::Cyan),
            TokenKind::String => Some(ColorPair::Magenta),
            TokenKind::Comment => Some(ColorPair::Green),
            TokenKind::Word => Some(ColorPair::Blue),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorPair::Yellow => "yellow",
            ColorPair::Blue => "blue",
            ColorPair::Green => "green",
            ColorPair::Red => "red",
            ColorPair::Cyan => "cyan",
            ColorPair::Magenta => "magenta",
        }
    }

    pub fn from_name(name: &str) -> Option<ColorPair> {
        ColorPair::ALL
            .into_iter()
            .find(|pair| pair.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ColorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A color slot defined from RGB components and bound to an existing pair,
/// replacing that pair's foreground.
///
/// Components use the terminal's `0..=1000` scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomColor {
    pub slot: i16,
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub pair: ColorPair,
}

/// Error parsing a `PAIR:R,G,B[@SLOT]` custom color spec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomColorParseError {
    #[error("expected PAIR:R,G,B, got '{0}'")]
    Malformed(String),
    #[error("unknown color pair '{0}'")]
    UnknownPair(String),
    #[error("color component '{0}' is not in 0..=1000")]
    Component(String),
    #[error("invalid color slot '{0}'")]
    Slot(String),
}

impl FromStr for CustomColor {
    type Err = CustomColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CustomColorParseError::Malformed(s.to_string());

        let (pair, rest) = s.split_once(':').ok_or_else(malformed)?;
        let pair = ColorPair::from_name(pair.trim())
            .ok_or_else(|| CustomColorParseError::UnknownPair(pair.trim().to_string()))?;

        let (rgb, slot) = match rest.split_once('@') {
            Some((rgb, slot)) => {
                let slot = slot
                    .trim()
                    .parse::<i16>()
                    .ok()
                    .filter(|s| *s >= 0)
                    .ok_or_else(|| CustomColorParseError::Slot(slot.trim().to_string()))?;
                (rgb, slot)
            }
            None => (rest, DEFAULT_CUSTOM_SLOT),
        };

        let components = rgb
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<i16>()
                    .ok()
                    .filter(|v| (0..=1000).contains(v))
                    .ok_or_else(|| CustomColorParseError::Component(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let [r, g, b] = components[..] else {
            return Err(malformed());
        };

        Ok(CustomColor {
            slot,
            r,
            g,
            b,
            pair,
        })
    }
}

/// The color decided for a query offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub color: Option<ColorPair>,
    /// Number of bytes, starting at the query offset, drawn in `color`.
    pub length: usize,
}

/// Maps token starts to display colors.
///
/// Owned by the render loop for the life of the process. An optional custom
/// color is registered with the palette on the first lookup and never again.
#[derive(Debug, Clone, Default)]
pub struct ColorResolver {
    custom: Option<CustomColor>,
    registered: bool,
}

impl ColorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_color(custom: CustomColor) -> Self {
        Self {
            custom: Some(custom),
            registered: false,
        }
    }

    pub fn custom_color(&self) -> Option<CustomColor> {
        self.custom
    }

    /// Whether the custom color has been pushed to a palette.
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Look up the token that starts exactly at `offset`.
    ///
    /// Only a token's first byte matches; offsets inside a token return
    /// `None`. The caller applies the returned color for `length` bytes
    /// before querying again.
    pub fn resolve<P: Palette + ?Sized>(
        &mut self,
        palette: &mut P,
        tokens: &[Token],
        offset: usize,
    ) -> Option<Highlight> {
        self.register_custom(palette);

        tokens
            .iter()
            .find(|t| t.offset == offset)
            .map(|t| Highlight {
                color: ColorPair::for_kind(t.kind),
                length: t.length,
            })
    }

    fn register_custom<P: Palette + ?Sized>(&mut self, palette: &mut P) {
        if self.registered {
            return;
        }
        let Some(custom) = self.custom else {
            return;
        };
        debug!(
            slot = custom.slot,
            pair = %custom.pair,
            r = custom.r,
            g = custom.g,
            b = custom.b,
            "registering custom color"
        );
        palette.init_color(custom.slot, custom.r, custom.g, custom.b);
        palette.init_pair(custom.pair, custom.slot, COLOR_BLACK);
        self.registered = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct Recorder {
        colors: Vec<(i16, i16, i16, i16)>,
        pairs: Vec<(ColorPair, i16, i16)>,
    }

    impl Palette for Recorder {
        fn init_color(&mut self, slot: i16, r: i16, g: i16, b: i16) {
            self.colors.push((slot, r, g, b));
        }

        fn init_pair(&mut self, pair: ColorPair, fg: i16, bg: i16) {
            self.pairs.push((pair, fg, bg));
        }

        fn style(&self, _pair: ColorPair) -> Option<String> {
            None
        }
    }

    fn tokens() -> Vec<Token> {
        // int main() { return 0; } // done
        vec![
            Token::new(TokenKind::Type, 0, 3),
            Token::new(TokenKind::Word, 4, 4),
            Token::new(TokenKind::Keyword, 13, 6),
            Token::new(TokenKind::Comment, 25, 7),
        ]
    }

    #[test]
    fn test_kind_colors() {
        assert_eq!(ColorPair::for_kind(TokenKind::Keyword), Some(ColorPair::Red));
        assert_eq!(ColorPair::for_kind(TokenKind::Type), Some(ColorPair::Yellow));
        assert_eq!(ColorPair::for_kind(TokenKind::Preprocessor), Some(ColorPair::Cyan));
        assert_eq!(ColorPair::for_kind(TokenKind::String), Some(ColorPair::Magenta));
        assert_eq!(ColorPair::for_kind(TokenKind::Comment), Some(ColorPair::Green));
        assert_eq!(ColorPair::for_kind(TokenKind::Word), Some(ColorPair::Blue));
        assert_eq!(ColorPair::for_kind(TokenKind::None), None);
    }

    #[test]
    fn test_pair_ids() {
        let ids: Vec<i16> = ColorPair::ALL.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_resolve_token_start() {
        let mut resolver = ColorResolver::new();
        let mut palette = Recorder::default();
        let toks = tokens();
        assert_eq!(
            resolver.resolve(&mut palette, &toks, 13),
            Some(Highlight {
                color: Some(ColorPair::Red),
                length: 6,
            })
        );
        assert_eq!(
            resolver.resolve(&mut palette, &toks, 0),
            Some(Highlight {
                color: Some(ColorPair::Yellow),
                length: 3,
            })
        );
    }

    #[test]
    fn test_resolve_inside_token_misses() {
        let mut resolver = ColorResolver::new();
        let mut palette = Recorder::default();
        let toks = tokens();
        assert_eq!(resolver.resolve(&mut palette, &toks, 1), None);
        assert_eq!(resolver.resolve(&mut palette, &toks, 14), None);
        assert_eq!(resolver.resolve(&mut palette, &toks, 3), None);
    }

    #[test]
    fn test_resolve_empty_tokens() {
        let mut resolver = ColorResolver::new();
        let mut palette = Recorder::default();
        assert_eq!(resolver.resolve(&mut palette, &[], 0), None);
    }

    #[test]
    fn test_first_token_at_offset_wins() {
        // `x # y`: the word and the directive both start at 0.
        let toks = vec![
            Token::new(TokenKind::Word, 0, 1),
            Token::new(TokenKind::Preprocessor, 0, 3),
        ];
        let mut resolver = ColorResolver::new();
        let mut palette = Recorder::default();
        let hit = resolver.resolve(&mut palette, &toks, 0).unwrap();
        assert_eq!(hit.color, Some(ColorPair::Blue));
        assert_eq!(hit.length, 1);
    }

    #[test]
    fn test_none_kind_matches_without_color() {
        let toks = vec![Token::new(TokenKind::None, 2, 4)];
        let mut resolver = ColorResolver::new();
        let mut palette = Recorder::default();
        assert_eq!(
            resolver.resolve(&mut palette, &toks, 2),
            Some(Highlight {
                color: None,
                length: 4,
            })
        );
    }

    #[test]
    fn test_custom_color_registered_once() {
        let custom = CustomColor {
            slot: 20,
            r: 1000,
            g: 500,
            b: 0,
            pair: ColorPair::Blue,
        };
        let mut resolver = ColorResolver::with_custom_color(custom);
        let mut palette = Recorder::default();
        assert!(!resolver.is_registered());

        let toks = tokens();
        for offset in 0..40 {
            resolver.resolve(&mut palette, &toks, offset);
        }

        assert!(resolver.is_registered());
        assert_eq!(palette.colors, vec![(20, 1000, 500, 0)]);
        assert_eq!(palette.pairs, vec![(ColorPair::Blue, 20, COLOR_BLACK)]);
    }

    #[test]
    fn test_no_custom_color_no_registration() {
        let mut resolver = ColorResolver::new();
        let mut palette = Recorder::default();
        resolver.resolve(&mut palette, &tokens(), 0);
        assert!(!resolver.is_registered());
        assert!(palette.colors.is_empty());
        assert!(palette.pairs.is_empty());
    }

    #[test]
    fn test_parse_custom_color() {
        assert_eq!(
            "blue:1000,500,0".parse::<CustomColor>(),
            Ok(CustomColor {
                slot: DEFAULT_CUSTOM_SLOT,
                r: 1000,
                g: 500,
                b: 0,
                pair: ColorPair::Blue,
            })
        );
    }

    #[test]
    fn test_parse_custom_color_with_slot() {
        let custom: CustomColor = "Magenta: 10, 20, 30 @ 42".parse().unwrap();
        assert_eq!(custom.pair, ColorPair::Magenta);
        assert_eq!((custom.r, custom.g, custom.b), (10, 20, 30));
        assert_eq!(custom.slot, 42);
    }

    #[test]
    fn test_parse_custom_color_errors() {
        assert_eq!(
            "blue".parse::<CustomColor>(),
            Err(CustomColorParseError::Malformed("blue".into()))
        );
        assert_eq!(
            "purple:1,2,3".parse::<CustomColor>(),
            Err(CustomColorParseError::UnknownPair("purple".into()))
        );
        assert_eq!(
            "red:1,2,3000".parse::<CustomColor>(),
            Err(CustomColorParseError::Component("3000".into()))
        );
        assert_eq!(
            "red:1,2".parse::<CustomColor>(),
            Err(CustomColorParseError::Malformed("red:1,2".into()))
        );
        assert_eq!(
            "red:1,2,3@x".parse::<CustomColor>(),
            Err(CustomColorParseError::Slot("x".into()))
        );
    }
}

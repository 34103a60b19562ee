use std::collections::HashMap;

use crate::color::{ColorPair, COLOR_BLACK};

/// Terminal-side color state: color slots and the pairs drawn with them.
///
/// Implementations mutate terminal state and belong to the render loop.
pub trait Palette {
    /// Define color `slot` from RGB components in `0..=1000`.
    fn init_color(&mut self, slot: i16, r: i16, g: i16, b: i16);

    /// Bind `pair` to a foreground and background color.
    fn init_pair(&mut self, pair: ColorPair, fg: i16, bg: i16);

    /// Escape sequence that switches drawing to `pair`, if it is registered.
    fn style(&self, pair: ColorPair) -> Option<String>;

    /// Escape sequence that restores default drawing.
    fn reset(&self) -> &str {
        "\x1b[0m"
    }
}

/// Palette for ANSI terminals.
///
/// Slots defined through `init_color` render as 24-bit color; other color
/// numbers use the 8/256-color escapes. Black backgrounds are left to the
/// terminal default.
#[derive(Debug, Clone, Default)]
pub struct AnsiPalette {
    colors: HashMap<i16, (u8, u8, u8)>,
    pairs: HashMap<ColorPair, (i16, i16)>,
}

impl AnsiPalette {
    /// An empty palette with no pairs registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A palette with every [`ColorPair`] bound to its base foreground.
    pub fn with_base_pairs() -> Self {
        let mut palette = Self::new();
        palette.register_base_pairs();
        palette
    }

    pub fn register_base_pairs(&mut self) {
        for pair in ColorPair::ALL {
            self.init_pair(pair, pair.base_foreground(), COLOR_BLACK);
        }
    }

    fn foreground(&self, color: i16) -> String {
        match self.colors.get(&color) {
            Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m"),
            None if (0..8).contains(&color) => format!("\x1b[3{color}m"),
            None => format!("\x1b[38;5;{}m", color.clamp(0, 255)),
        }
    }

    fn background(&self, color: i16) -> Option<String> {
        if color == COLOR_BLACK || color < 0 {
            return None;
        }
        Some(match self.colors.get(&color) {
            Some((r, g, b)) => format!("\x1b[48;2;{r};{g};{b}m"),
            None if color < 8 => format!("\x1b[4{color}m"),
            None => format!("\x1b[48;5;{}m", color.min(255)),
        })
    }
}

/// Convert a `0..=1000` component to `0..=255`.
fn scale_component(v: i16) -> u8 {
    (i32::from(v.clamp(0, 1000)) * 255 / 1000) as u8
}

impl Palette for AnsiPalette {
    fn init_color(&mut self, slot: i16, r: i16, g: i16, b: i16) {
        self.colors.insert(
            slot,
            (scale_component(r), scale_component(g), scale_component(b)),
        );
    }

    fn init_pair(&mut self, pair: ColorPair, fg: i16, bg: i16) {
        self.pairs.insert(pair, (fg, bg));
    }

    fn style(&self, pair: ColorPair) -> Option<String> {
        let (fg, bg) = *self.pairs.get(&pair)?;
        let mut style = self.foreground(fg);
        if let Some(bg) = self.background(bg) {
            style.push_str(&bg);
        }
        Some(style)
    }
}

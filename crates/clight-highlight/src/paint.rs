use clight_lexer::Token;

use crate::color::{ColorResolver, Highlight};
use crate::palette::Palette;

/// Draw one line into `out`, column by column.
///
/// Every column is offered to the resolver. A colored hit draws the next
/// `length` bytes in that color and resumes after them; anything else is
/// copied through unstyled.
pub fn paint_line<P: Palette + ?Sized>(
    line: &[u8],
    tokens: &[Token],
    resolver: &mut ColorResolver,
    palette: &mut P,
    out: &mut Vec<u8>,
) {
    let mut col = 0;
    while col < line.len() {
        match resolver.resolve(palette, tokens, col) {
            Some(Highlight {
                color: Some(pair),
                length,
            }) if length > 0 => {
                let end = (col + length).min(line.len());
                match palette.style(pair) {
                    Some(style) => {
                        out.extend_from_slice(style.as_bytes());
                        out.extend_from_slice(&line[col..end]);
                        out.extend_from_slice(palette.reset().as_bytes());
                    }
                    None => out.extend_from_slice(&line[col..end]),
                }
                col = end;
            }
            _ => {
                out.push(line[col]);
                col += 1;
            }
        }
    }
}

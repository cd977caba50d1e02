//! Shape Glyphs
//!
//! Blocky pixel-art patterns for each shape token, using Unicode block
//! elements. Every region (eye or mouth) is a fixed 4x2 cell of the
//! face; a shape selects which cells light up. Spaces are transparent.

use kao_core::Shape;

/// Cell width of one face region
pub const REGION_WIDTH: u16 = 4;

/// Cell height of one face region
pub const REGION_HEIGHT: u16 = 2;

/// The block-art pattern for a shape (rows of `REGION_WIDTH` chars)
#[must_use]
pub fn pattern(shape: Shape) -> [&'static str; 2] {
    match shape {
        Shape::Circle => ["▗██▖", "▝██▘"],
        Shape::CircleSmall => [" ▄▄ ", " ▀▀ "],
        Shape::CircleStroke => ["▛▀▀▜", "▙▄▄▟"],
        Shape::HalfUp => ["    ", "▚▄▄▞"],
        Shape::HalfDown => ["▞▀▀▚", "    "],
        Shape::HalfDownBottom => ["    ", "▞▀▀▚"],
        Shape::Bar => ["▄▄▄▄", "    "],
        Shape::BarTop => ["▀▀▀▀", "    "],
        Shape::BarBottom => ["    ", "▄▄▄▄"],
        Shape::Square => ["████", "████"],
        Shape::SquareSmall => ["    ", " ██ "],
    }
}

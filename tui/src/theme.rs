//! Theme and Colors
//!
//! kao ships two palettes. Neon is the default; mint is the alternate
//! selected when the configured color-theme name contains "mint". The
//! two are mutually exclusive - applying one removes the other.

use kao_core::Theme;
use ratatui::style::Color;

// ============================================================================
// Neon Palette (default)
// ============================================================================

/// Eyes - electric magenta
pub const NEON_EYES: Color = Color::Rgb(255, 64, 255);

/// Mouth - hot cyan
pub const NEON_MOUTH: Color = Color::Rgb(64, 224, 255);

/// Loading pulse overlay
pub const NEON_LOADING: Color = Color::Rgb(180, 120, 255);

// ============================================================================
// Mint Palette
// ============================================================================

/// Eyes - deep mint
pub const MINT_EYES: Color = Color::Rgb(62, 180, 137);

/// Mouth - pale mint
pub const MINT_MOUTH: Color = Color::Rgb(152, 255, 208);

/// Loading pulse overlay
pub const MINT_LOADING: Color = Color::Rgb(110, 220, 170);

// ============================================================================
// UI Colors
// ============================================================================

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Colors for one theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Eye glyph color
    pub eyes: Color,
    /// Mouth glyph color
    pub mouth: Color,
    /// Loading overlay color
    pub loading: Color,
}

/// The palette for a theme flag
#[must_use]
pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Neon => Palette {
            eyes: NEON_EYES,
            mouth: NEON_MOUTH,
            loading: NEON_LOADING,
        },
        Theme::Mint => Palette {
            eyes: MINT_EYES,
            mouth: MINT_MOUTH,
            loading: MINT_LOADING,
        },
    }
}

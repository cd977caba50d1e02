//! Monitor Messages
//!
//! Messages sent from the diagnostics monitor to the face surface.
//! Control flow is strictly host -> widget: the monitor decides what
//! the face should express, the surface decides how to paint it and
//! owns its own presentation timing.

use serde::{Deserialize, Serialize};

use crate::pose::Pose;

/// Messages from the monitor to the face surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MonitorMessage {
    /// Set the base pose
    Pose {
        /// The pose to display
        pose: Pose,
    },
    /// Switch the color theme
    Theme {
        /// The theme to apply
        theme: Theme,
    },
}

/// Two-valued theme flag
///
/// `Neon` is the default; `Mint` is the only alternate and the two are
/// mutually exclusive on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Default palette
    #[default]
    Neon,
    /// Mint palette
    Mint,
}

impl Theme {
    /// Derive the theme from a color-theme name.
    ///
    /// Only names containing "mint" (case-insensitive) activate the
    /// mint palette; everything else is neon.
    #[must_use]
    pub fn from_theme_name(name: &str) -> Self {
        if name.to_lowercase().contains("mint") {
            Self::Mint
        } else {
            Self::Neon
        }
    }
}

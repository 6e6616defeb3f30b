//! # Theme System
//!
//! Centralized colors for the kiosk. Rendering code references theme fields
//! instead of hardcoding `ratatui::style::Color` values; provider accents
//! come from the provider catalogue, not from the theme.
//!
//! ## Built-in Themes
//!
//! - **Catppuccin Latte** (default) - light, readable on lobby screens
//! - **Catppuccin Mocha** - warm, dark pastel theme
//! - **Nord** - arctic, north-bluish color palette
//! - **Dracula** - dark theme with vivid colors
//!
//! `t` on the landing grid cycles through them in this order.

use crate::checkin::Rgb;
use ratatui::style::Color;

/// All colors used by the kiosk, grouped by semantic role.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Human-readable name, also the value stored in the config file.
    pub name: &'static str,

    /// Screen background.
    pub bg: Color,
    /// Background of the open modal, drawn over the grid.
    pub surface: Color,

    /// Primary text color.
    pub fg: Color,
    /// Muted/secondary text (hints, footer, placeholders).
    pub fg_dim: Color,

    /// Branding, focused borders, selected card.
    pub accent: Color,
    /// Highlighted values such as the generated code.
    pub secondary: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    /// Return the list of all built-in themes (order = cycling order).
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Catppuccin Latte).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> &'static Theme {
        let pos = BUILT_IN_THEMES
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0);
        &BUILT_IN_THEMES[(pos + 1) % BUILT_IN_THEMES.len()]
    }
}

/// Convert a provider color to a terminal color.
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

// ---------------------------------------------------------------------------
// Built-in theme definitions
// ---------------------------------------------------------------------------

static BUILT_IN_THEMES: [Theme; 4] = [
    // 0 - Catppuccin Latte (default)
    Theme {
        name: "Catppuccin Latte",
        bg: Color::Rgb(239, 241, 245),        // base
        surface: Color::Rgb(204, 208, 218),   // surface0
        fg: Color::Rgb(76, 79, 105),          // text
        fg_dim: Color::Rgb(156, 160, 176),    // overlay0
        accent: Color::Rgb(30, 102, 245),     // blue
        secondary: Color::Rgb(223, 142, 29),  // yellow
        success: Color::Rgb(64, 160, 43),     // green
        warning: Color::Rgb(254, 100, 11),    // peach
        error: Color::Rgb(210, 15, 57),       // red
    },
    // 1 - Catppuccin Mocha
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),           // base
        surface: Color::Rgb(49, 50, 68),      // surface0
        fg: Color::Rgb(205, 214, 244),        // text
        fg_dim: Color::Rgb(108, 112, 134),    // overlay0
        accent: Color::Rgb(137, 180, 250),    // blue
        secondary: Color::Rgb(249, 226, 175), // yellow
        success: Color::Rgb(166, 227, 161),   // green
        warning: Color::Rgb(250, 179, 135),   // peach
        error: Color::Rgb(243, 139, 168),     // red
    },
    // 2 - Nord
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        surface: Color::Rgb(59, 66, 82),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),    // frost
        secondary: Color::Rgb(235, 203, 139), // yellow
        success: Color::Rgb(163, 190, 140),
        warning: Color::Rgb(208, 135, 112),
        error: Color::Rgb(191, 97, 106),
    },
    // 3 - Dracula
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        surface: Color::Rgb(68, 71, 90),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(139, 233, 253),    // cyan
        secondary: Color::Rgb(241, 250, 140), // yellow
        success: Color::Rgb(80, 250, 123),
        warning: Color::Rgb(255, 184, 108),
        error: Color::Rgb(255, 85, 85),
    },
];

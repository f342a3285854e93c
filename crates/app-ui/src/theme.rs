//! Design system and theme provider for Vazi
//!
//! Colors, typography, and spacing as an explicit value object. Screens
//! receive a [`Theme`] by reference; nothing reads styling from a global.
//!
//! # Themes
//!
//! Two themes are supported:
//! - Light: the default coral-and-teal palette on white
//! - Dark: the same accents on a near-black background
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{get_theme, ThemeName};
//!
//! let theme = get_theme(ThemeName::Light);
//! let cta = &theme.colors.primary_action;
//! let heading = theme.typography.h1.size;
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as an RGB hex string (e.g., "#FF6F61")
pub type Color = String;

/// Parse a hex color string to RGB components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    // get() rather than indexing: short input or a multi-byte character on
    // a slice boundary yields None instead of panicking.
    let hex = hex.trim_start_matches('#');
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

/// Convert RGB to hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

// =============================================================================
// Brand Colors
// =============================================================================

/// Vazi brand colors
pub mod brand {
    /// Primary action coral
    pub const PRIMARY_ACTION: &str = "#FF6F61";

    /// Secondary action teal
    pub const SECONDARY_ACTION: &str = "#008080";

    /// Accent gold for highlights and premium badges
    pub const ACCENT_GOLD: &str = "#B08D57";

    /// Pure white
    pub const WHITE: &str = "#FFFFFF";

    /// Success green
    pub const SUCCESS: &str = "#4CAF50";

    /// Error red
    pub const ERROR: &str = "#F44336";
}

// =============================================================================
// Color Set
// =============================================================================

/// The complete set of semantic colors for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSet {
    /// Screen background
    pub background: Color,
    /// Card and sheet surfaces
    pub surface: Color,
    /// Primary body text
    pub text_primary: Color,
    /// Secondary and placeholder text
    pub text_secondary: Color,
    /// Primary call-to-action fill
    pub primary_action: Color,
    /// Secondary action fill
    pub secondary_action: Color,
    /// Accent gold
    pub accent_gold: Color,
    /// Borders and dividers
    pub light_grey: Color,
    /// Text on filled buttons
    pub white: Color,
    /// Success state
    pub success: Color,
    /// Error state
    pub error: Color,
}

// =============================================================================
// Typography
// =============================================================================

/// One text style in the type scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family name
    pub font_family: String,
    /// Font size in points
    pub size: u16,
}

impl TextStyle {
    fn new(font_family: &str, size: u16) -> Self {
        Self {
            font_family: font_family.to_string(),
            size,
        }
    }
}

/// The application type scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    /// Screen titles
    pub h1: TextStyle,
    /// Section headings
    pub h2: TextStyle,
    /// Body copy
    pub body: TextStyle,
    /// Button labels
    pub button: TextStyle,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            h1: TextStyle::new("Montserrat-Bold", 32),
            h2: TextStyle::new("Montserrat-SemiBold", 24),
            body: TextStyle::new("OpenSans-Regular", 16),
            button: TextStyle::new("Montserrat-Medium", 16),
        }
    }
}

// =============================================================================
// Spacing
// =============================================================================

/// The spacing scale, in points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    /// Extra small
    pub xs: u16,
    /// Small
    pub s: u16,
    /// Medium
    pub m: u16,
    /// Large
    pub l: u16,
    /// Extra large
    pub xl: u16,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            xs: 4,
            s: 8,
            m: 16,
            l: 24,
            xl: 32,
        }
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Theme identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

/// A complete theme: colors, type scale, and spacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme identifier
    pub name: ThemeName,
    /// Semantic colors
    pub colors: ColorSet,
    /// Type scale
    pub typography: Typography,
    /// Spacing scale
    pub spacing: Spacing,
}

/// Build the light theme
pub fn light_theme() -> Theme {
    Theme {
        name: ThemeName::Light,
        colors: ColorSet {
            background: brand::WHITE.to_string(),
            surface: "#F7F7F7".to_string(),
            text_primary: "#333333".to_string(),
            text_secondary: "#A0A0A0".to_string(),
            primary_action: brand::PRIMARY_ACTION.to_string(),
            secondary_action: brand::SECONDARY_ACTION.to_string(),
            accent_gold: brand::ACCENT_GOLD.to_string(),
            light_grey: "#D1D1D1".to_string(),
            white: brand::WHITE.to_string(),
            success: brand::SUCCESS.to_string(),
            error: brand::ERROR.to_string(),
        },
        typography: Typography::default(),
        spacing: Spacing::default(),
    }
}

/// Build the dark theme
pub fn dark_theme() -> Theme {
    Theme {
        name: ThemeName::Dark,
        colors: ColorSet {
            background: "#121212".to_string(),
            surface: "#1E1E1E".to_string(),
            text_primary: "#F2F2F2".to_string(),
            text_secondary: "#8A8A8A".to_string(),
            primary_action: brand::PRIMARY_ACTION.to_string(),
            secondary_action: "#26A6A6".to_string(),
            accent_gold: brand::ACCENT_GOLD.to_string(),
            light_grey: "#3A3A3A".to_string(),
            white: brand::WHITE.to_string(),
            success: brand::SUCCESS.to_string(),
            error: brand::ERROR.to_string(),
        },
        typography: Typography::default(),
        spacing: Spacing::default(),
    }
}

/// Get a theme by name
pub fn get_theme(name: ThemeName) -> Theme {
    match name {
        ThemeName::Light => light_theme(),
        ThemeName::Dark => dark_theme(),
    }
}

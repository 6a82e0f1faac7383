//! Color themes for the terminal explorer.
//!
//! Selected with `--theme` / `TAOX_THEME` and cycled at runtime with `t`.

use anyhow::{anyhow, Result};
use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Dark background, teal accents (default).
    #[default]
    Subnet,
    /// Nord-inspired muted colors.
    Nord,
    /// Amber CRT.
    Amber,
    /// Plain terminal colors for low-color terminals.
    Mono,
}

const ALL: [Theme; 4] = [Theme::Subnet, Theme::Nord, Theme::Amber, Theme::Mono];

impl Theme {
    pub fn colors(&self) -> ColorScheme {
        match self {
            Theme::Subnet => ColorScheme::subnet(),
            Theme::Nord => ColorScheme::nord(),
            Theme::Amber => ColorScheme::amber(),
            Theme::Mono => ColorScheme::mono(),
        }
    }

    /// Following theme in cycling order.
    pub fn next(self) -> Theme {
        let i = ALL.iter().position(|t| *t == self).unwrap_or(0);
        ALL[(i + 1) % ALL.len()]
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "subnet" | "default" => Ok(Theme::Subnet),
            "nord" => Ok(Theme::Nord),
            "amber" | "amber-crt" => Ok(Theme::Amber),
            "mono" | "plain" => Ok(Theme::Mono),
            _ => Err(anyhow!("Unknown theme '{s}'. Available: subnet, nord, amber, mono")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Subnet => write!(f, "subnet"),
            Theme::Nord => write!(f, "nord"),
            Theme::Amber => write!(f, "amber"),
            Theme::Mono => write!(f, "mono"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub background: Color,
    pub text: Color,
    pub text_dim: Color,
    /// Header labels and table headers.
    pub label: Color,
    pub focus_border: Color,
    pub unfocused_border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Arrow of the active sort column.
    pub sort_active: Color,
    pub error: Color,
    pub toast_success: Color,
    pub toast_error: Color,
}

impl ColorScheme {
    pub fn subnet() -> Self {
        let teal = Color::Rgb(0, 219, 188);
        Self {
            background: Color::Rgb(18, 18, 18),
            text: Color::Rgb(230, 230, 230),
            text_dim: Color::Rgb(140, 140, 140),
            label: teal,
            focus_border: teal,
            unfocused_border: Color::Rgb(70, 70, 70),
            selection_bg: Color::Rgb(0, 90, 80),
            selection_fg: Color::White,
            sort_active: teal,
            error: Color::Rgb(255, 99, 99),
            toast_success: Color::Green,
            toast_error: Color::Red,
        }
    }

    pub fn nord() -> Self {
        Self {
            background: Color::Black,
            text: Color::White,
            text_dim: Color::Gray,
            label: Color::Cyan,
            focus_border: Color::Yellow,
            unfocused_border: Color::Gray,
            selection_bg: Color::Yellow,
            selection_fg: Color::Black,
            sort_active: Color::Yellow,
            error: Color::LightRed,
            toast_success: Color::Green,
            toast_error: Color::Red,
        }
    }

    pub fn amber() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_bright = Color::Rgb(255, 200, 100);
        let amber_dim = Color::Rgb(180, 120, 0);
        Self {
            background: Color::Black,
            text: amber,
            text_dim: amber_dim,
            label: amber_bright,
            focus_border: amber_bright,
            unfocused_border: amber_dim,
            selection_bg: amber,
            selection_fg: Color::Black,
            sort_active: amber_bright,
            error: Color::Red,
            toast_success: Color::Rgb(100, 255, 100),
            toast_error: Color::Red,
        }
    }

    pub fn mono() -> Self {
        Self {
            background: Color::Reset,
            text: Color::Reset,
            text_dim: Color::DarkGray,
            label: Color::Reset,
            focus_border: Color::White,
            unfocused_border: Color::DarkGray,
            selection_bg: Color::White,
            selection_fg: Color::Black,
            sort_active: Color::White,
            error: Color::Red,
            toast_success: Color::Reset,
            toast_error: Color::Red,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::subnet()
    }
}

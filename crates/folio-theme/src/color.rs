//! RGBA color values parsed from computed CSS.

use std::fmt;

use crate::error::{ColorError, Result};

/// Colors with a perceived brightness below this (in thousandths) are dark.
///
/// `0.299R + 0.587G + 0.114B < 128`, evaluated in integer thousandths so the
/// boundary is exact: mid gray (128, 128, 128) lands on 128 and is light.
pub const DARK_THRESHOLD_MILLI: u32 = 128_000;

/// Fallback when a theme variable is unset or unparseable.
pub const DEFAULT_NEUTRAL: Color = Color::rgb(128, 128, 128);

/// An sRGB color with a fractional alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in [0, 1].
    pub a: f64,
}

impl Color {
    /// Create a new color from RGBA values.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color { r, g, b, a }
    }

    /// Create a new color from RGB values (fully opaque).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Parse `rgba(r, g, b, a)`, `rgb(r, g, b)` or `#rrggbb`.
    ///
    /// Function names are case-insensitive and components may be separated by
    /// commas or whitespace (with an optional `/` before alpha).
    pub fn parse(input: &str) -> Result<Color> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = s.to_ascii_lowercase();
        let inner = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ColorError::Unsupported(s.to_string()))?;

        parse_components(inner)
    }

    /// Same color with its alpha replaced (clamped to [0, 1]).
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        Color { a, ..self }
    }

    /// Perceived brightness in thousandths: `299R + 587G + 114B`.
    pub const fn brightness_milli(&self) -> u32 {
        299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32
    }

    /// Perceived brightness on the 0-255 scale.
    pub fn brightness(&self) -> f64 {
        self.brightness_milli() as f64 / 1000.0
    }

    /// True when brightness is strictly below 128.
    pub const fn is_dark(&self) -> bool {
        self.brightness_milli() < DARK_THRESHOLD_MILLI
    }
}

impl Default for Color {
    fn default() -> Self {
        DEFAULT_NEUTRAL
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // At most three decimals, no trailing zeros: 0.7 rather than 0.700.
        let a = (self.a * 1000.0).round() / 1000.0;
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, a)
    }
}

fn parse_hex(hex: &str) -> Result<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };
    Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn parse_components(inner: &str) -> Result<Color> {
    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if !(3..=4).contains(&parts.len()) {
        return Err(ColorError::ComponentCount(parts.len()));
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let a = match parts.get(3) {
        Some(p) => parse_alpha(p)?,
        None => 1.0,
    };
    Ok(Color::rgba(r, g, b, a))
}

fn parse_channel(part: &str) -> Result<u8> {
    let v: f64 = part
        .parse()
        .map_err(|_| ColorError::InvalidComponent(part.to_string()))?;
    if !v.is_finite() {
        return Err(ColorError::InvalidComponent(part.to_string()));
    }
    Ok(v.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(part: &str) -> Result<f64> {
    let (digits, scale) = match part.strip_suffix('%') {
        Some(d) => (d, 0.01),
        None => (part, 1.0),
    };
    let v: f64 = digits
        .parse()
        .map_err(|_| ColorError::InvalidComponent(part.to_string()))?;
    if !v.is_finite() {
        return Err(ColorError::InvalidComponent(part.to_string()));
    }
    Ok((v * scale).clamp(0.0, 1.0))
}

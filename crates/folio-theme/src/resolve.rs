//! Reading theme variables and resolving them into per-visual palettes.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use log::debug;

use crate::color::{Color, DEFAULT_NEUTRAL};

/// CSS custom properties published by the site's theming layer.
pub mod props {
    pub const TEXT: &str = "--color-text";
    pub const ACCENT: &str = "--color-accent";
    pub const MUTED: &str = "--color-text-muted";
    pub const BACKGROUND: &str = "--color-bg";
    pub const FONT_FAMILY: &str = "--font-family";
}

/// Read access to the current theme's custom properties.
///
/// The browser binding reads `getComputedStyle(document.documentElement)`;
/// tests use a plain map.
pub trait ThemeSource {
    /// Raw value of a custom property, or `None` if unset.
    fn custom_property(&self, name: &str) -> Option<String>;
}

impl<T: ThemeSource + ?Sized> ThemeSource for &T {
    fn custom_property(&self, name: &str) -> Option<String> {
        (**self).custom_property(name)
    }
}

impl<S: BuildHasher> ThemeSource for HashMap<String, String, S> {
    fn custom_property(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl ThemeSource for BTreeMap<String, String> {
    fn custom_property(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Parse a theme variable, treating unset, blank and malformed values alike.
pub fn read_color(source: &impl ThemeSource, property: &str) -> Option<Color> {
    let raw = source.custom_property(property)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Color::parse(raw) {
        Ok(c) => Some(c),
        Err(e) => {
            debug!("theme variable {property} = {raw:?} ignored: {e}");
            None
        }
    }
}

/// Resolve a theme variable at the requested opacity.
///
/// Never fails: an absent or unparseable variable degrades to
/// [`DEFAULT_NEUTRAL`] at the same opacity.
pub fn resolve_color(source: &impl ThemeSource, property: &str, opacity: f64) -> Color {
    read_color(source, property)
        .unwrap_or(DEFAULT_NEUTRAL)
        .with_alpha(opacity)
}

/// Raise an opacity for legibility on dark themes.
///
/// Bands: `<= 0.3` gains 0.4, `<= 0.5` gains 0.3, anything higher gains 0.2.
/// The result never exceeds 1.0 and is never lower than the input. Light
/// themes pass through unchanged.
pub fn boost_opacity(opacity: f64, is_dark: bool) -> f64 {
    if !is_dark {
        return opacity;
    }
    let boost = if opacity <= 0.3 {
        0.4
    } else if opacity <= 0.5 {
        0.3
    } else {
        0.2
    };
    (opacity + boost).min(1.0).max(opacity)
}

/// The theme as read at one instant, before any per-visual opacity choices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeSnapshot {
    pub text: Option<Color>,
    pub accent: Option<Color>,
    pub muted: Option<Color>,
    pub background: Option<Color>,
    pub font_family: Option<String>,
}

impl ThemeSnapshot {
    /// Read every theme variable from `source`.
    pub fn capture(source: &impl ThemeSource) -> Self {
        let font_family = source
            .custom_property(props::FONT_FAMILY)
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());

        Self {
            text: read_color(source, props::TEXT),
            accent: read_color(source, props::ACCENT),
            muted: read_color(source, props::MUTED),
            background: read_color(source, props::BACKGROUND),
            font_family,
        }
    }

    /// Dark iff the background is dark. No background reads as light.
    pub fn is_dark(&self) -> bool {
        self.background.is_some_and(|bg| bg.is_dark())
    }

    /// Resolve this snapshot against one visual's base opacities.
    pub fn palette(&self, request: &PaletteRequest) -> ResolvedPalette {
        let dark = self.is_dark();
        let channel = |c: Option<Color>, base: f64| {
            c.unwrap_or(DEFAULT_NEUTRAL)
                .with_alpha(boost_opacity(base, dark))
        };

        ResolvedPalette {
            text: channel(self.text, request.text),
            accent: channel(self.accent, request.accent),
            muted: channel(self.muted, request.muted),
            background: channel(self.background, request.background),
            is_dark: dark,
            font_family: self.font_family.clone(),
        }
    }
}

/// Base opacities a visual asks for, before dark-theme boosting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteRequest {
    pub text: f64,
    pub accent: f64,
    pub muted: f64,
    pub background: f64,
}

impl PaletteRequest {
    pub fn new(text: f64, accent: f64, muted: f64, background: f64) -> Self {
        Self {
            text,
            accent,
            muted,
            background,
        }
    }

    pub fn with_text(self, text: f64) -> Self {
        Self { text, ..self }
    }

    pub fn with_accent(self, accent: f64) -> Self {
        Self { accent, ..self }
    }

    pub fn with_muted(self, muted: f64) -> Self {
        Self { muted, ..self }
    }

    pub fn with_background(self, background: f64) -> Self {
        Self { background, ..self }
    }
}

impl Default for PaletteRequest {
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.6, 1.0)
    }
}

/// Colors handed to a visual for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPalette {
    pub text: Color,
    pub accent: Color,
    pub muted: Color,
    pub background: Color,
    pub is_dark: bool,
    pub font_family: Option<String>,
}

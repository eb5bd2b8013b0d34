//! Theme color resolution for folio visuals.
//!
//! The site's theming layer exposes its palette as CSS custom properties on
//! the document root. This crate turns those raw strings into [`Color`]s,
//! classifies the theme as dark or light, boosts opacities for legibility on
//! dark themes, and fans theme changes out to every subscribed visual through
//! a [`ThemeHub`].
//!
//! Nothing here touches the DOM: property values arrive through the
//! [`ThemeSource`] trait, so the whole pipeline is testable with a map.
//!
//! ```
//! use std::collections::HashMap;
//! use folio_theme::{props, PaletteRequest, ThemeSnapshot};
//!
//! let mut css = HashMap::new();
//! css.insert(props::BACKGROUND.to_string(), "#101014".to_string());
//! css.insert(props::MUTED.to_string(), "rgb(150, 150, 160)".to_string());
//!
//! let snapshot = ThemeSnapshot::capture(&css);
//! let palette = snapshot.palette(&PaletteRequest::default().with_muted(0.3));
//! assert!(palette.is_dark);
//! assert_eq!(palette.muted.to_string(), "rgba(150, 150, 160, 0.7)");
//! ```

pub mod color;
pub mod error;
pub mod hub;
pub mod resolve;

pub use color::{Color, DARK_THRESHOLD_MILLI, DEFAULT_NEUTRAL};
pub use error::{ColorError, Result};
pub use hub::{
    SubscriptionId, ThemeHub, ThemeTrigger, THEME_CHANGED_EVENT, WATCHED_ATTRIBUTES,
    WATCHED_STORAGE_KEYS,
};
pub use resolve::{
    boost_opacity, props, read_color, resolve_color, PaletteRequest, ResolvedPalette,
    ThemeSnapshot, ThemeSource,
};

//! folio — theme-reactive animated visuals for a static portfolio site.
//!
//! Umbrella crate re-exporting the DOM-free building blocks. The browser
//! binding lives in `folio-home`.

pub use folio_graph::{self, GraphData, Simulation, SimulationParams};
pub use folio_motion::{self, Controller, Frame, Visual, VisibilityGate};
pub use folio_theme::{self, Color, PaletteRequest, ResolvedPalette, ThemeHub, ThemeSource};
pub use folio_timeline::{self, TimelineCamera, TimelineConfig, TimelineLayout};

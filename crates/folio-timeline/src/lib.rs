//! Timeline data-to-geometry mapping.
//!
//! Years map to pixels through one linear transform, plus a fixed pixel gap
//! after each boundary between periods that follow each other with less
//! than [`GAP_THRESHOLD_YEARS`] in between. [`TimelineCamera`] decides the
//! horizontal scroll from autoplay, hover or touch input.
//!
//! ```
//! use folio_timeline::{LayoutParams, TimelineConfig, TimelineLayout};
//!
//! let config = TimelineConfig::from_json(r#"{
//!     "startYear": 2015, "endYear": 2024,
//!     "periods": [
//!         {"id": "uni", "label": "University", "start": 2015, "end": 2019},
//!         {"id": "job", "label": "Industry", "start": 2019, "end": 2024}
//!     ]
//! }"#).unwrap();
//! let layout = TimelineLayout::new(config, LayoutParams::default());
//!
//! assert_eq!(layout.year_to_x(layout.display_start()), 0.0);
//! // 2019 sits after the uni → job gap.
//! let p = layout.params();
//! assert_eq!(
//!     layout.year_to_x(2019.0),
//!     (2019.0 - layout.display_start()) * p.year_width + p.period_gap_px
//! );
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod layout;

pub use camera::{CameraParams, EdgeSide, ScrollMode, TimelineCamera, TOUCH_BREAKPOINT_PX};
pub use config::{Milestone, Period, TimelineConfig};
pub use error::{Result, TimelineError};
pub use layout::{LayoutParams, MilestoneMark, PeriodSpan, TimelineLayout, YearTick, GAP_THRESHOLD_YEARS};

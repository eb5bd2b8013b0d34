//! Closed-form animation for folio's decorative visuals.
//!
//! Every visual is a pure function of elapsed time since it last became
//! visible: [`Visual::pose_at`] returns a renderer-agnostic pose and the
//! browser binding writes it to SVG. A [`Controller`] wraps a visual with the
//! pieces every instance shares:
//! - an [`AnimationClock`] captured on the first visible frame
//! - a [`VisibilityGate`] fed by intersection ratios
//! - the reduced-motion flag, which replaces animation with a rest pose
//!
//! Visuals:
//! - [`LayeredWave`]: damped sine bursts across stacked layers
//! - [`DiscoveryDot`]: five-phase grow/travel/settle/deflate/pause cycle
//! - [`GrowthCircles`]: nested circles stepping through headcounts 4..=7
//! - [`Cradle`]: a scripted four-ball Newton's cradle
//! - [`ShapeShuffle`]: derangement shuffle of three clickable shapes

pub mod clock;
pub mod controller;
pub mod cradle;
pub mod discovery;
pub mod easing;
pub mod growth;
pub mod shapes;
pub mod visibility;
pub mod wave;

pub use clock::{cycle_phase, AnimationClock};
pub use controller::{Controller, Frame, Visual};
pub use cradle::{BallPose, Cradle, CradleLabel, CradleParams, CradlePose};
pub use discovery::{DiscoveryDot, DiscoveryParams, DiscoveryPhase, DiscoveryPose};
pub use growth::{
    interpolate_radius, state_radii, GrowthCircles, GrowthParams, GrowthPose, MAX_STATE, MIN_STATE,
};
pub use shapes::{derange, ShapeShuffle, ShapeShuffleParams, SHAPE_COUNT};
pub use visibility::{Transition, Visibility, VisibilityGate, VISIBILITY_THRESHOLD};
pub use wave::{LayeredWave, WaveParams, WavePose};

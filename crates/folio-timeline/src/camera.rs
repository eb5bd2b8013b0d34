//! Horizontal scroll camera for the timeline track.
//!
//! Three drivers share one scroll value:
//!
//! - **Autoplay** sweeps the whole track forward linearly for 80% of the
//!   cycle, then eases back to the start over the rest, looping.
//! - **Hover** maps the pointer across the viewport onto the active range
//!   and follows it with frame-rate-normalized exponential smoothing.
//!   Entering either edge zone overshoots the bound and springs back.
//! - **Touch** (narrow viewports only) follows swipe deltas directly,
//!   clamped to the track, with no inertia.
//!
//! Leaving hover or touch resumes autoplay at the phase whose forward
//! position matches the current scroll, so the camera never jumps.

use log::debug;

use folio_motion::easing::{clamp01, ease_out_cubic};
use folio_motion::AnimationClock;

use crate::layout::TimelineLayout;

/// Viewports narrower than this use touch scrolling.
pub const TOUCH_BREAKPOINT_PX: f64 = 768.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraParams {
    pub cycle_ms: f64,
    /// Share of the cycle spent on the forward sweep.
    pub forward_fraction: f64,
    /// Share of the pointer range at each end that triggers the rubber band.
    pub edge_zone: f64,
    pub overshoot_px: f64,
    pub bounce_ms: f64,
    /// Gentler smoothing used right after hover starts.
    pub warmup_ms: f64,
    pub smoothing_initial: f64,
    pub smoothing: f64,
    /// Frame length the smoothing factors are tuned for.
    pub reference_frame_ms: f64,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            cycle_ms: 24_000.0,
            forward_fraction: 0.8,
            edge_zone: 0.05,
            overshoot_px: 30.0,
            bounce_ms: 600.0,
            warmup_ms: 400.0,
            smoothing_initial: 0.03,
            smoothing: 0.08,
            reference_frame_ms: 1000.0 / 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    Autoplay,
    Hover,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    Start,
    End,
}

#[derive(Debug, Clone)]
pub struct TimelineCamera {
    params: CameraParams,
    viewport_width: f64,
    /// Browser window width; decides touch versus hover.
    window_width: f64,
    content_width: f64,
    active: (f64, f64),
    scroll: f64,
    mode: ScrollMode,
    autoplay: AnimationClock,
    last_frame_ms: Option<f64>,
    hover_started_ms: f64,
    pointer_x: f64,
    /// Edge zone the pointer is in, and when it entered.
    edge: Option<(EdgeSide, f64)>,
    touch_last_x: Option<f64>,
}

impl TimelineCamera {
    pub fn new(params: CameraParams, viewport_width: f64, content_width: f64, active: (f64, f64)) -> Self {
        Self {
            params,
            viewport_width,
            window_width: viewport_width,
            content_width,
            active,
            scroll: 0.0,
            mode: ScrollMode::Autoplay,
            autoplay: AnimationClock::new(),
            last_frame_ms: None,
            hover_started_ms: 0.0,
            pointer_x: 0.0,
            edge: None,
            touch_last_x: None,
        }
    }

    pub fn from_layout(layout: &TimelineLayout, viewport_width: f64, params: CameraParams) -> Self {
        Self::new(params, viewport_width, layout.content_width(), layout.active_range())
    }

    /// Window width used for the touch breakpoint, when the track is
    /// narrower than the window.
    pub fn with_window_width(mut self, window_width: f64) -> Self {
        self.window_width = window_width;
        self
    }

    pub fn params(&self) -> &CameraParams {
        &self.params
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    pub fn is_touch_viewport(&self) -> bool {
        self.window_width < TOUCH_BREAKPOINT_PX
    }

    /// Scroll range that keeps the viewport over `startYear..endYear`.
    pub fn active_scroll_range(&self) -> (f64, f64) {
        let max = self.max_scroll();
        let lo = self.active.0.clamp(0.0, max);
        let hi = (self.active.1 - self.viewport_width).clamp(lo, max);
        (lo, hi)
    }

    pub fn resize(&mut self, viewport_width: f64, window_width: f64) {
        self.viewport_width = viewport_width;
        self.window_width = window_width;
        if self.mode == ScrollMode::Touch {
            self.scroll = self.scroll.clamp(0.0, self.max_scroll());
        }
    }

    pub fn set_content(&mut self, content_width: f64, active: (f64, f64)) {
        self.content_width = content_width;
        self.active = active;
    }

    /// Autoplay scroll at cycle phase `phase` in [0, 1).
    pub fn autoplay_scroll(&self, phase: f64) -> f64 {
        let max = self.max_scroll();
        let f = self.params.forward_fraction;
        let phase = clamp01(phase);
        if f >= 1.0 || phase < f {
            max * phase / f
        } else {
            max * (1.0 - ease_out_cubic((phase - f) / (1.0 - f)))
        }
    }

    /// Phase on the forward sweep whose scroll equals `scroll`.
    pub fn phase_for_scroll(&self, scroll: f64) -> f64 {
        let max = self.max_scroll();
        if max <= 0.0 {
            return 0.0;
        }
        clamp01(scroll / max) * self.params.forward_fraction.min(1.0)
    }

    /// Called when the track comes back into view at `now_ms`.
    ///
    /// Time spent hidden is skipped: autoplay carries on from the current
    /// scroll and the next smoothing step is one reference frame long.
    pub fn restart(&mut self, now_ms: f64) {
        self.last_frame_ms = None;
        if self.mode == ScrollMode::Autoplay {
            let phase = self.phase_for_scroll(self.scroll);
            self.autoplay.restart_at(now_ms - phase * self.params.cycle_ms);
        }
    }

    pub fn hover_start(&mut self, x: f64, now_ms: f64) {
        if self.mode != ScrollMode::Hover {
            debug!("timeline hover start at {x:.0}");
            self.hover_started_ms = now_ms;
            self.edge = None;
        }
        self.mode = ScrollMode::Hover;
        self.hover_move(x, now_ms);
    }

    pub fn hover_move(&mut self, x: f64, now_ms: f64) {
        self.pointer_x = x.clamp(0.0, self.viewport_width.max(0.0));
        let side = self.edge_side();
        if side != self.edge.map(|(s, _)| s) {
            self.edge = side.map(|s| (s, now_ms));
        }
    }

    pub fn hover_end(&mut self, now_ms: f64) {
        if self.mode == ScrollMode::Hover {
            self.resume_autoplay(now_ms);
        }
    }

    /// Begin a swipe. Ignored on wide viewports.
    pub fn touch_start(&mut self, x: f64) -> bool {
        if !self.is_touch_viewport() {
            return false;
        }
        self.mode = ScrollMode::Touch;
        self.touch_last_x = Some(x);
        true
    }

    pub fn touch_move(&mut self, x: f64) {
        if self.mode != ScrollMode::Touch {
            return;
        }
        if let Some(last) = self.touch_last_x {
            self.scroll = (self.scroll - (x - last)).clamp(0.0, self.max_scroll());
        }
        self.touch_last_x = Some(x);
    }

    pub fn touch_end(&mut self, now_ms: f64) {
        if self.mode == ScrollMode::Touch {
            self.touch_last_x = None;
            self.resume_autoplay(now_ms);
        }
    }

    /// Where hover smoothing is heading at `now_ms`.
    pub fn hover_target(&self, now_ms: f64) -> f64 {
        let (lo, hi) = self.active_scroll_range();
        let p = &self.params;
        let frac = if self.viewport_width > 0.0 {
            self.pointer_x / self.viewport_width
        } else {
            0.5
        };
        let inner = 1.0 - 2.0 * p.edge_zone;
        let t = if inner > 0.0 {
            clamp01((frac - p.edge_zone) / inner)
        } else {
            clamp01(frac)
        };
        let base = lo + (hi - lo) * t;

        match self.edge {
            Some((side, entered)) => {
                let settle = if p.bounce_ms > 0.0 {
                    ease_out_cubic((now_ms - entered) / p.bounce_ms)
                } else {
                    1.0
                };
                let overshoot = p.overshoot_px * (1.0 - settle);
                match side {
                    EdgeSide::Start => lo - overshoot,
                    EdgeSide::End => hi + overshoot,
                }
            }
            None => base,
        }
    }

    /// Advance to `now_ms` and return the scroll offset to draw.
    pub fn frame(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_frame_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => self.params.reference_frame_ms,
        };
        self.last_frame_ms = Some(now_ms);

        match self.mode {
            ScrollMode::Autoplay => {
                let phase = self.autoplay.phase(now_ms, self.params.cycle_ms);
                self.scroll = self.autoplay_scroll(phase);
            }
            ScrollMode::Hover => {
                let target = self.hover_target(now_ms);
                let factor = if now_ms - self.hover_started_ms < self.params.warmup_ms {
                    self.params.smoothing_initial
                } else {
                    self.params.smoothing
                };
                let k = frame_factor(factor, dt, self.params.reference_frame_ms);
                self.scroll += (target - self.scroll) * k;
            }
            ScrollMode::Touch => {}
        }
        self.scroll
    }

    /// Scroll shown when motion is reduced.
    pub fn rest_scroll(&self) -> f64 {
        self.active_scroll_range().0
    }

    fn edge_side(&self) -> Option<EdgeSide> {
        if self.viewport_width <= 0.0 {
            return None;
        }
        let frac = self.pointer_x / self.viewport_width;
        if frac < self.params.edge_zone {
            Some(EdgeSide::Start)
        } else if frac > 1.0 - self.params.edge_zone {
            Some(EdgeSide::End)
        } else {
            None
        }
    }

    fn resume_autoplay(&mut self, now_ms: f64) {
        let phase = self.phase_for_scroll(self.scroll);
        self.autoplay.restart_at(now_ms - phase * self.params.cycle_ms);
        self.mode = ScrollMode::Autoplay;
        self.edge = None;
        debug!("timeline autoplay resumed at phase {phase:.3}");
    }
}

/// Per-frame smoothing factor `f` rescaled to a frame of `dt_ms`.
pub fn frame_factor(f: f64, dt_ms: f64, reference_ms: f64) -> f64 {
    if reference_ms <= 0.0 {
        return clamp01(f);
    }
    1.0 - (1.0 - clamp01(f)).powf(dt_ms / reference_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Track 2000 px wide, active 100..1900, viewport 800.
    fn camera(viewport: f64) -> TimelineCamera {
        TimelineCamera::new(CameraParams::default(), viewport, 2000.0, (100.0, 1900.0))
    }

    #[test]
    fn test_ranges() {
        let cam = camera(800.0);
        assert_eq!(cam.max_scroll(), 1200.0);
        assert_eq!(cam.active_scroll_range(), (100.0, 1100.0));
        assert_eq!(camera(3000.0).max_scroll(), 0.0);
        assert_eq!(camera(3000.0).active_scroll_range(), (0.0, 0.0));
    }

    #[test]
    fn test_autoplay_cycle() {
        let mut cam = camera(800.0);
        assert_eq!(cam.frame(5000.0), 0.0);
        assert_relative_eq!(cam.frame(5000.0 + 9600.0), 600.0, epsilon = 1e-9);
        assert_relative_eq!(cam.frame(5000.0 + 19_199.0), 1200.0, epsilon = 0.1);
        // Halfway through the return leg: 1 - ease_out(0.5) = 0.125.
        assert_relative_eq!(cam.frame(5000.0 + 21_600.0), 150.0, epsilon = 1e-9);
        assert_relative_eq!(cam.frame(5000.0 + 24_000.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_return_leg_is_monotonic() {
        let cam = camera(800.0);
        let mut last = cam.autoplay_scroll(0.8);
        for i in 1..=200 {
            let s = cam.autoplay_scroll(0.8 + 0.2 * i as f64 / 200.0);
            assert!(s <= last);
            last = s;
        }
    }

    #[test]
    fn test_hover_warmup_then_faster_smoothing() {
        let frame = 1000.0 / 60.0;
        let mut cam = camera(800.0);
        cam.frame(0.0);
        cam.hover_start(400.0, 0.0);
        let target = cam.hover_target(frame);
        assert_relative_eq!(target, 600.0, epsilon = 1e-9);

        let first = cam.frame(frame);
        assert_relative_eq!(first, 600.0 * 0.03, epsilon = 1e-9);

        let mut t = frame;
        while t < 500.0 {
            t += frame;
            cam.frame(t);
        }
        let before = cam.scroll();
        let after = cam.frame(t + frame);
        assert_relative_eq!(after - before, (600.0 - before) * 0.08, epsilon = 1e-9);
    }

    #[test]
    fn test_smoothing_is_frame_rate_independent() {
        let one = frame_factor(0.08, 1000.0 / 60.0, 1000.0 / 60.0);
        let half = frame_factor(0.08, 500.0 / 60.0, 1000.0 / 60.0);
        assert_relative_eq!(1.0 - (1.0 - half) * (1.0 - half), one, epsilon = 1e-12);
        assert_eq!(frame_factor(0.08, 0.0, 16.0), 0.0);
    }

    #[test]
    fn test_rubber_band_at_edges() {
        let mut cam = camera(800.0);
        cam.hover_start(10.0, 1000.0);
        assert_relative_eq!(cam.hover_target(1000.0), 100.0 - 30.0);
        assert!(cam.hover_target(1300.0) > 70.0);
        assert_relative_eq!(cam.hover_target(1600.0), 100.0);

        cam.hover_move(795.0, 2000.0);
        assert_relative_eq!(cam.hover_target(2000.0), 1100.0 + 30.0);
        assert_relative_eq!(cam.hover_target(2600.0), 1100.0);

        // Staying in the zone does not restart the bounce.
        cam.hover_move(798.0, 2700.0);
        assert_relative_eq!(cam.hover_target(2700.0), 1100.0);
    }

    #[test]
    fn test_pointer_is_clamped_to_viewport() {
        let mut cam = camera(800.0);
        cam.hover_start(-200.0, 0.0);
        assert_relative_eq!(cam.hover_target(10_000.0), 100.0);
        cam.hover_move(5000.0, 0.0);
        assert_relative_eq!(cam.hover_target(10_000.0), 1100.0);
    }

    #[test]
    fn test_hover_end_resumes_without_jump() {
        let mut cam = camera(800.0);
        cam.frame(0.0);
        cam.hover_start(400.0, 0.0);
        let mut t = 0.0;
        for _ in 0..120 {
            t += 1000.0 / 60.0;
            cam.frame(t);
        }
        let held = cam.scroll();
        cam.hover_end(t);
        assert_eq!(cam.mode(), ScrollMode::Autoplay);
        assert_relative_eq!(cam.frame(t), held, epsilon = 1e-6);
        assert!(cam.frame(t + 100.0) > held);
    }

    #[test]
    fn test_hidden_gap_does_not_jump_autoplay() {
        let mut cam = camera(800.0);
        cam.frame(0.0);
        let shown = cam.frame(1000.0);
        assert_relative_eq!(shown, 1200.0 * 1000.0 / 19_200.0, epsilon = 1e-9);

        // Hidden from 1 s to 60 s.
        cam.restart(60_000.0);
        assert_relative_eq!(cam.frame(60_000.0), shown, epsilon = 1e-9);
        assert!(cam.frame(60_100.0) > shown);
    }

    #[test]
    fn test_hidden_gap_does_not_snap_hover() {
        let frame = 1000.0 / 60.0;
        let mut cam = camera(800.0);
        cam.frame(0.0);
        cam.hover_start(400.0, 0.0);
        let before = cam.frame(frame);

        cam.restart(60_000.0);
        let after = cam.frame(60_000.0);
        assert_relative_eq!(after - before, (600.0 - before) * 0.08, epsilon = 1e-9);
        assert!(after < 600.0 - 100.0);
    }

    #[test]
    fn test_touch_breakpoint_uses_window_width() {
        let mut desktop = camera(400.0).with_window_width(1280.0);
        assert!(!desktop.touch_start(100.0));

        let mut phone = camera(400.0);
        phone.resize(360.0, 360.0);
        assert!(phone.touch_start(100.0));
    }

    #[test]
    fn test_touch_only_on_narrow_viewports() {
        let mut wide = camera(1024.0);
        assert!(!wide.touch_start(100.0));
        assert_eq!(wide.mode(), ScrollMode::Autoplay);

        let mut cam = camera(400.0);
        assert!(cam.touch_start(300.0));
        cam.touch_move(200.0);
        assert_eq!(cam.scroll(), 100.0);
        cam.touch_move(500.0);
        assert_eq!(cam.scroll(), 0.0);
        cam.touch_move(-5000.0);
        assert_eq!(cam.scroll(), cam.max_scroll());
        // No inertia: frames leave the scroll alone.
        assert_eq!(cam.frame(16.0), cam.max_scroll());

        cam.touch_end(100.0);
        assert_eq!(cam.mode(), ScrollMode::Autoplay);
        assert_relative_eq!(cam.frame(100.0), cam.max_scroll(), epsilon = 1e-6);
    }

    #[test]
    fn test_from_layout() {
        use crate::config::TimelineConfig;
        use crate::layout::{LayoutParams, TimelineLayout};

        let config = TimelineConfig::from_json(r#"{"startYear": 2010, "endYear": 2020}"#).unwrap();
        let layout = TimelineLayout::new(config, LayoutParams::default());
        let cam = TimelineCamera::from_layout(&layout, 600.0, CameraParams::default());
        assert_relative_eq!(cam.max_scroll(), 12.0 * 120.0 - 600.0);
        assert_eq!(cam.active_scroll_range(), (120.0, 1200.0 - 600.0 + 120.0));
        assert_eq!(cam.rest_scroll(), 120.0);
    }
}

//! Year → pixel transform and the geometry derived from it.

use log::debug;

use crate::config::{Milestone, Period, TimelineConfig};

/// Periods closer than this (in years) are treated as adjacent and get a
/// pixel gap between them.
pub const GAP_THRESHOLD_YEARS: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Pixels per year.
    pub year_width: f64,
    /// Buffer years drawn before `startYear`.
    pub lead_years: f64,
    /// Buffer years drawn after `endYear`.
    pub trail_years: f64,
    /// Extra pixels inserted at each adjacent-period boundary.
    pub period_gap_px: f64,
    pub gap_threshold_years: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            year_width: 120.0,
            lead_years: 1.0,
            trail_years: 1.0,
            period_gap_px: 12.0,
            gap_threshold_years: GAP_THRESHOLD_YEARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSpan {
    pub id: String,
    pub label: String,
    pub x0: f64,
    pub x1: f64,
    /// Chronological index.
    pub index: usize,
}

impl PeriodSpan {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn center(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneMark {
    pub label: String,
    pub year: f64,
    pub x: f64,
    pub major: bool,
    /// Owning period id, if the milestone came from a period.
    pub period: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearTick {
    pub year: i32,
    pub x: f64,
}

#[derive(Debug, Clone)]
pub struct TimelineLayout {
    config: TimelineConfig,
    params: LayoutParams,
    display_start: f64,
    display_end: f64,
    /// Sorted years at which a gap is inserted.
    boundaries: Vec<f64>,
}

impl TimelineLayout {
    pub fn new(config: TimelineConfig, params: LayoutParams) -> Self {
        let display_start = config.start_year - params.lead_years;
        let display_end = config.end_year + params.trail_years;

        let mut boundaries: Vec<f64> = config
            .periods_chronological()
            .windows(2)
            .filter(|w| w[1].start - w[0].end < params.gap_threshold_years)
            .map(|w| w[1].start)
            // Boundaries at or before the origin would shift it.
            .filter(|&b| b > display_start)
            .collect();
        boundaries.sort_by(f64::total_cmp);
        boundaries.dedup();
        debug!(
            "timeline layout: {} periods, {} gap boundaries",
            config.periods.len(),
            boundaries.len()
        );

        Self {
            config,
            params,
            display_start,
            display_end,
            boundaries,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn display_start(&self) -> f64 {
        self.display_start
    }

    pub fn display_end(&self) -> f64 {
        self.display_end
    }

    pub fn gap_boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn year_to_x(&self, year: f64) -> f64 {
        let gaps = self.boundaries.iter().take_while(|&&b| b <= year).count();
        (year - self.display_start) * self.params.year_width + self.params.period_gap_px * gaps as f64
    }

    /// Total drawn width, buffers included.
    pub fn content_width(&self) -> f64 {
        self.year_to_x(self.display_end)
    }

    /// Pixel range of `startYear..endYear`, buffers excluded.
    pub fn active_range(&self) -> (f64, f64) {
        (
            self.year_to_x(self.config.start_year),
            self.year_to_x(self.config.end_year),
        )
    }

    pub fn period_spans(&self) -> Vec<PeriodSpan> {
        self.config
            .periods_chronological()
            .into_iter()
            .enumerate()
            .map(|(index, p)| self.span(p, index))
            .collect()
    }

    fn span(&self, p: &Period, index: usize) -> PeriodSpan {
        PeriodSpan {
            id: p.id.clone(),
            label: p.label.clone(),
            x0: self.year_to_x(p.start),
            x1: self.year_to_x(p.end),
            index,
        }
    }

    /// Period milestones then major milestones, each sorted by year.
    pub fn milestone_marks(&self) -> Vec<MilestoneMark> {
        let mark = |m: &Milestone, major: bool, period: Option<&str>| MilestoneMark {
            label: m.label.clone(),
            year: m.year,
            x: self.year_to_x(m.year),
            major,
            period: period.map(str::to_string),
        };

        let mut minor: Vec<MilestoneMark> = self
            .config
            .periods
            .iter()
            .flat_map(|p| p.milestones.iter().map(move |m| (p, m)))
            .map(|(p, m)| mark(m, false, Some(p.id.as_str())))
            .collect();
        minor.sort_by(|a, b| a.year.total_cmp(&b.year));

        let mut major: Vec<MilestoneMark> = self
            .config
            .major_milestones
            .iter()
            .map(|m| mark(m, true, None))
            .collect();
        major.sort_by(|a, b| a.year.total_cmp(&b.year));

        minor.extend(major);
        minor
    }

    /// Whole-year axis ticks across the drawn range.
    pub fn year_ticks(&self) -> Vec<YearTick> {
        let first = self.display_start.ceil() as i32;
        let last = self.display_end.floor() as i32;
        (first..=last)
            .map(|year| YearTick {
                year,
                x: self.year_to_x(year as f64),
            })
            .collect()
    }

    /// Period drawn at `x`, if any.
    pub fn period_at(&self, x: f64) -> Option<&Period> {
        self.config
            .periods_chronological()
            .into_iter()
            .find(|p| self.year_to_x(p.start) <= x && x < self.year_to_x(p.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> TimelineConfig {
        TimelineConfig::from_json(
            r#"{
            "startYear": 2012, "endYear": 2025,
            "periods": [
                {"id": "uni", "label": "University", "start": 2012, "end": 2016,
                 "milestones": [{"year": 2014, "label": "Exchange"}]},
                {"id": "phd", "label": "PhD", "start": 2016.1, "end": 2019},
                {"id": "job", "label": "Industry", "start": 2020, "end": 2025}
            ],
            "majorMilestones": [{"year": 2019, "label": "Thesis"}]
        }"#,
        )
        .unwrap()
    }

    fn layout() -> TimelineLayout {
        TimelineLayout::new(config(), LayoutParams::default())
    }

    #[test]
    fn test_display_start_is_origin() {
        let l = layout();
        assert_eq!(l.display_start(), 2011.0);
        assert_eq!(l.year_to_x(l.display_start()), 0.0);
    }

    #[test]
    fn test_only_adjacent_periods_get_gaps() {
        // uni → phd is 0.1 years apart; phd → job is a full year.
        assert_eq!(layout().gap_boundaries(), &[2016.1]);
    }

    #[test]
    fn test_unit_spacing_away_from_gaps() {
        let l = layout();
        for year in [2011.0, 2012.0, 2013.0, 2017.0, 2020.0, 2024.0] {
            assert_relative_eq!(l.year_to_x(year + 1.0) - l.year_to_x(year), 120.0, epsilon = 1e-9);
        }
        // Crossing 2016.1 adds the gap once.
        assert_relative_eq!(l.year_to_x(2017.0) - l.year_to_x(2016.0), 132.0, epsilon = 1e-9);
    }

    #[test]
    fn test_periods_before_origin_add_no_gap() {
        let config = TimelineConfig::from_json(
            r#"{
            "startYear": 2015, "endYear": 2020,
            "periods": [
                {"id": "school", "label": "School", "start": 2010, "end": 2012},
                {"id": "uni", "label": "University", "start": 2012.1, "end": 2016}
            ]
        }"#,
        )
        .unwrap();
        let l = TimelineLayout::new(config, LayoutParams::default());
        assert_eq!(l.display_start(), 2014.0);
        assert!(l.gap_boundaries().is_empty());
        assert_eq!(l.year_to_x(l.display_start()), 0.0);
        assert_relative_eq!(l.year_to_x(2016.0), 2.0 * 120.0);
    }

    #[test]
    fn test_widths_and_active_range() {
        let l = layout();
        assert_relative_eq!(l.content_width(), 15.0 * 120.0 + 12.0);
        let (a, b) = l.active_range();
        assert_relative_eq!(a, 120.0);
        assert_relative_eq!(b, 14.0 * 120.0 + 12.0);
    }

    #[test]
    fn test_spans_and_marks() {
        let l = layout();
        let spans = l.period_spans();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].id, "phd");
        assert!(spans[0].x1 < spans[1].x0);
        assert_relative_eq!(spans[1].x0 - spans[0].x1, 0.1 * 120.0 + 12.0, epsilon = 1e-9);

        let marks = l.milestone_marks();
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].period.as_deref(), Some("uni"));
        assert!(!marks[0].major);
        assert!(marks[1].major);
        assert_relative_eq!(marks[1].x, l.year_to_x(2019.0));
    }

    #[test]
    fn test_period_at() {
        let l = layout();
        assert_eq!(l.period_at(l.year_to_x(2013.0)).map(|p| p.id.as_str()), Some("uni"));
        assert_eq!(l.period_at(l.year_to_x(2019.5)), None);
        assert_eq!(l.period_at(-10.0), None);
    }

    #[test]
    fn test_year_ticks_cover_display_range() {
        let ticks = layout().year_ticks();
        assert_eq!(ticks.first().map(|t| t.year), Some(2011));
        assert_eq!(ticks.last().map(|t| t.year), Some(2026));
        assert_eq!(ticks[0].x, 0.0);
    }
}

//! Timeline configuration as embedded in the page.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Fractional years are allowed (2019.5 is mid-2019).
    pub year: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: String,
    pub label: String,
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineConfig {
    pub start_year: f64,
    pub end_year: f64,
    #[serde(default)]
    pub periods: Vec<Period>,
    /// Milestones drawn emphasized, independent of any period.
    #[serde(default)]
    pub major_milestones: Vec<Milestone>,
}

impl TimelineConfig {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.start_year.is_finite() && self.end_year.is_finite())
            || self.start_year >= self.end_year
        {
            return Err(TimelineError::InvalidRange {
                start: self.start_year,
                end: self.end_year,
            });
        }

        let mut seen = HashSet::new();
        for p in &self.periods {
            if !(p.start.is_finite() && p.end.is_finite()) || p.start >= p.end {
                return Err(TimelineError::InvalidPeriod {
                    id: p.id.clone(),
                    start: p.start,
                    end: p.end,
                });
            }
            if !seen.insert(p.id.as_str()) {
                return Err(TimelineError::DuplicatePeriod(p.id.clone()));
            }
        }

        let all = self
            .periods
            .iter()
            .flat_map(|p| p.milestones.iter())
            .chain(self.major_milestones.iter());
        for m in all {
            if !m.year.is_finite() {
                return Err(TimelineError::InvalidMilestone {
                    label: m.label.clone(),
                    year: m.year,
                });
            }
        }
        Ok(())
    }

    /// Periods sorted by start year.
    pub fn periods_chronological(&self) -> Vec<&Period> {
        let mut periods: Vec<&Period> = self.periods.iter().collect();
        periods.sort_by(|a, b| a.start.total_cmp(&b.start));
        periods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "startYear": 2012,
        "endYear": 2025,
        "periods": [
            {"id": "job", "label": "Industry", "start": 2019.1, "end": 2025,
             "milestones": [{"year": 2021.5, "label": "Lead"}]},
            {"id": "uni", "label": "University", "start": 2012, "end": 2016},
            {"id": "phd", "label": "PhD", "start": 2016, "end": 2019}
        ],
        "majorMilestones": [{"year": 2019, "label": "Thesis"}]
    }"#;

    #[test]
    fn test_parse_camel_case() {
        let c = TimelineConfig::from_json(SAMPLE).unwrap();
        assert_eq!(c.start_year, 2012.0);
        assert_eq!(c.periods.len(), 3);
        assert_eq!(c.periods[0].milestones[0].label, "Lead");
        assert!(c.periods[1].milestones.is_empty());
        assert_eq!(c.major_milestones[0].year, 2019.0);
    }

    #[test]
    fn test_chronological_order() {
        let c = TimelineConfig::from_json(SAMPLE).unwrap();
        let ids: Vec<_> = c.periods_chronological().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["uni", "phd", "job"]);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = TimelineConfig::from_json(r#"{"startYear": 2020, "endYear": 2010}"#).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidRange { .. }));
    }

    #[test]
    fn test_rejects_bad_period() {
        let json = r#"{"startYear": 2010, "endYear": 2020,
            "periods": [{"id": "x", "label": "X", "start": 2015, "end": 2015}]}"#;
        assert!(matches!(
            TimelineConfig::from_json(json),
            Err(TimelineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{"startYear": 2010, "endYear": 2020, "periods": [
            {"id": "x", "label": "X", "start": 2010, "end": 2012},
            {"id": "x", "label": "Y", "start": 2013, "end": 2015}]}"#;
        assert!(matches!(
            TimelineConfig::from_json(json),
            Err(TimelineError::DuplicatePeriod(id)) if id == "x"
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            TimelineConfig::from_json("{\"startYear\": \"soon\"}"),
            Err(TimelineError::Json(_))
        ));
    }
}

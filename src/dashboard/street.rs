use serde::Serialize;

use crate::data::StreetSegment;
use crate::score::{Scenario, ScoreCategory, SubIndex};

/// Notice shown when a street id does not exist.
pub const NOT_FOUND_NOTICE: &str = "Street ID not found! Please enter a valid ID.";

/// Radial axis range of the radar chart.
pub const RADAR_RANGE: [f64; 2] = [0.0, 100.0];

/// One spoke of the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub label: &'static str,
    pub value: f64,
}

/// Sub-index scores of one street, one spoke per sub-index in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub title: String,
    pub axes: Vec<RadarAxis>,
    pub range: [f64; 2],
}

impl RadarChart {
    /// Polygon trace for a polar plot: the first spoke is repeated at the end to close the shape.
    pub fn closed_trace(&self) -> (Vec<f64>, Vec<&'static str>) {
        let first = self.axes.first().into_iter();
        self.axes.iter().chain(first)
            .map(|axis| (axis.value, axis.label))
            .unzip()
    }
}

/// Composite score of a street under one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioScore {
    pub scenario: Scenario,
    pub label: &'static str,
    pub condition: &'static str,
    pub month: &'static str,
    pub reference_date: &'static str,
    /// `None` when the street has no value for this scenario.
    pub score: Option<f64>,
    pub category: ScoreCategory,
    /// Thermal comfort sub-index under the same weather conditions.
    pub thermal_comfort: f64,
}

/// A sub-index with its score for one street.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubIndexScore {
    pub sub_index: SubIndex,
    pub label: &'static str,
    pub score: f64,
    pub category: ScoreCategory,
}

/// Everything shown for a single looked-up street.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetProfile {
    pub id: String,
    pub district: Option<String>,
    pub scenarios: Vec<ScenarioScore>,
    pub sub_indexes: Vec<SubIndexScore>,
    pub radar: RadarChart,
    pub strongest: SubIndexScore,
    pub weakest: SubIndexScore,
}

impl StreetProfile {
    pub(crate) fn new(street: &StreetSegment) -> Self {
        let scenarios = Scenario::ALL.iter().map(|&scenario| {
            let field = scenario.walkability_field();
            let score = street.raw_score(field.column());
            ScenarioScore {
                scenario,
                label: scenario.label(),
                condition: scenario.condition(),
                month: scenario.month(),
                reference_date: scenario.reference_date(),
                score,
                category: field.scale().thresholds().classify_opt(score),
                thermal_comfort: street.field_score(scenario.thermal_field()),
            }
        }).collect();

        let sub_indexes: Vec<SubIndexScore> = SubIndex::ALL.iter().map(|&sub_index| {
            let field = sub_index.field();
            SubIndexScore {
                sub_index,
                label: sub_index.long_label(),
                score: street.field_score(field),
                category: street.category(field),
            }
        }).collect();

        let radar = RadarChart {
            title: "Radar Chart of Walkability Scores for the Selected Street ID".to_string(),
            axes: sub_indexes.iter()
                .map(|s| RadarAxis { label: s.sub_index.short_label(), value: s.score })
                .collect(),
            range: RADAR_RANGE,
        };

        // First maximum and first minimum in display order.
        let (mut strongest, mut weakest) = (&sub_indexes[0], &sub_indexes[0]);
        for candidate in &sub_indexes[1..] {
            if candidate.score > strongest.score { strongest = candidate }
            if candidate.score < weakest.score { weakest = candidate }
        }
        let (strongest, weakest) = (strongest.clone(), weakest.clone());

        Self {
            id: street.id().to_string(),
            district: street.district().map(str::to_string),
            scenarios,
            sub_indexes,
            radar,
            strongest,
            weakest,
        }
    }

    /// One-paragraph summary naming the strongest and weakest sub-index.
    pub fn summary(&self) -> String {
        format!(
            "The strongest sub-index for this street segment is {} with a score of {}, indicating its strength in this area. \
             However, the weakest sub-index is {} with a score of {}, suggesting potential areas for improvement.",
            self.strongest.sub_index.short_label(), self.strongest.score,
            self.weakest.sub_index.short_label(), self.weakest.score,
        )
    }
}

/// Outcome of a street id lookup. A missing id is an ordinary result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum StreetLookup {
    Found(Box<StreetProfile>),
    NotFound { id: String },
}

impl StreetLookup {
    /// The profile, if the street exists.
    pub fn profile(&self) -> Option<&StreetProfile> {
        match self {
            StreetLookup::Found(profile) => Some(&**profile),
            StreetLookup::NotFound { .. } => None,
        }
    }

    /// Warning text to show the user, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            StreetLookup::Found(_) => None,
            StreetLookup::NotFound { .. } => Some(NOT_FOUND_NOTICE),
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::{line_string, MultiLineString};

    use super::*;

    fn street() -> StreetSegment {
        StreetSegment::new("42", MultiLineString(vec![line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]]))
            .with_district("Mitte")
            .with_score("Walkability Score - August", 43.0)
            .with_score("Proximity Score", 70.0)
            .with_score("Landscape and Nature Score", 20.0)
            .with_score("Pedestrian Infrastructure Score", 70.0)
            .with_score("Pedestrian Comfort Score", 55.0)
            .with_score("Outdoor Thermal Comfort - August", 10.0)
            .with_score("Outdoor Thermal Comfort - October", 10.0)
    }

    #[test]
    fn strongest_and_weakest_take_first_extreme() {
        let profile = StreetProfile::new(&street());
        assert_eq!(profile.strongest.sub_index, SubIndex::Proximity);
        assert_eq!(profile.weakest.sub_index, SubIndex::ThermalAugust);
        assert!(profile.summary().contains("Proximity with a score of 70"));
    }

    #[test]
    fn scenario_scores_keep_missing_values() {
        let profile = StreetProfile::new(&street());
        assert_eq!(profile.scenarios[0].score, Some(43.0));
        assert_eq!(profile.scenarios[0].category, ScoreCategory::Excellent);
        assert_eq!(profile.scenarios[1].score, None);
        assert_eq!(profile.scenarios[1].category, ScoreCategory::VeryPoor);
        assert_eq!(profile.scenarios[1].condition, "Precipitation");
        assert_eq!(profile.scenarios[1].reference_date, "2024-10-09");
        assert_eq!(profile.scenarios[0].thermal_comfort, 10.0);
    }

    #[test]
    fn sub_indexes_use_sub_index_thresholds() {
        let profile = StreetProfile::new(&street());
        let comfort = &profile.sub_indexes[3];
        assert_eq!(comfort.sub_index, SubIndex::Comfort);
        assert_eq!(comfort.category, ScoreCategory::Good);
    }

    #[test]
    fn radar_trace_is_closed() {
        let profile = StreetProfile::new(&street());
        let (values, labels) = profile.radar.closed_trace();
        assert_eq!(values.len(), 7);
        assert_eq!(values.first(), values.last());
        assert_eq!(labels[0], "Proximity");
        assert_eq!(labels[6], "Proximity");
        assert_eq!(labels[5], "Thermal Comfort-II");
    }

    #[test]
    fn missing_sub_index_reads_as_zero() {
        let bare = StreetSegment::new("1", MultiLineString(vec![]));
        let profile = StreetProfile::new(&bare);
        assert!(profile.sub_indexes.iter().all(|s| s.score == 0.0 && s.category == ScoreCategory::VeryPoor));
        assert_eq!(profile.strongest.sub_index, SubIndex::Proximity);
        assert_eq!(profile.weakest.sub_index, SubIndex::Proximity);
    }
}

use serde::Serialize;

use crate::data::ModeShare;
use crate::theme::{Rgb, INFERNO};

/// Size of the donut hole, as a fraction of the radius.
pub const PIE_HOLE: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

/// Donut chart of transport mode shares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub hole: f64,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Drop the given labels and renormalize the rest to percentages, as toggling legend entries does.
    pub fn without(&self, hidden: &[&str]) -> PieChart {
        let kept: Vec<&PieSlice> = self.slices.iter()
            .filter(|slice| !hidden.contains(&slice.label.as_str()))
            .collect();
        let total: f64 = kept.iter().map(|slice| slice.value).sum();
        let slices = kept.into_iter().map(|slice| PieSlice {
            value: if total > 0.0 { slice.value / total * 100.0 } else { 0.0 },
            ..slice.clone()
        }).collect();
        PieChart { title: self.title.clone(), hole: self.hole, slices }
    }
}

/// Mode-share breakdown of one district.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportSummary {
    pub district: String,
    pub pie: PieChart,
    /// Percentage of trips made on foot; 0 when the table has no walking row.
    pub on_foot: f64,
}

impl TransportSummary {
    /// Returns `None` when the district is not a column of the table.
    pub(crate) fn new(table: &ModeShare, district: &str, on_foot_label: &str) -> Option<Self> {
        let shares = table.for_district(district)?;
        let slices = shares.iter().enumerate().map(|(i, &(label, value))| PieSlice {
            label: label.to_string(),
            value,
            color: INFERNO[i % INFERNO.len()],
        }).collect();

        Some(Self {
            district: district.to_string(),
            pie: PieChart { title: format!("Choice of Transport by {district}"), hole: PIE_HOLE, slices },
            on_foot: table.share(district, on_foot_label).unwrap_or(0.0),
        })
    }

    /// Sentence describing the walking share.
    pub fn on_foot_sentence(&self) -> String {
        format!("On Foot: In the {}, {}% of people prefer walking as their main mode of transport.",
            self.district, self.on_foot)
    }
}

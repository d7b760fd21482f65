use std::{fmt, str::FromStr};

use anyhow::{anyhow, Error};
use serde::Serialize;

use crate::score::Scale;

/// A score column carried by every street segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ScoreField {
    WalkabilityAugust,
    WalkabilityOctober,
    Proximity,
    Landscape,
    Infrastructure,
    Comfort,
    ThermalAugust,
    ThermalOctober,
}

impl ScoreField {
    pub const ALL: [ScoreField; 8] = [
        ScoreField::WalkabilityAugust,
        ScoreField::WalkabilityOctober,
        ScoreField::Proximity,
        ScoreField::Landscape,
        ScoreField::Infrastructure,
        ScoreField::Comfort,
        ScoreField::ThermalAugust,
        ScoreField::ThermalOctober,
    ];

    /// Column name in the streets dataset.
    pub const fn column(self) -> &'static str {
        match self {
            ScoreField::WalkabilityAugust => "Walkability Score - August",
            ScoreField::WalkabilityOctober => "Walkability Score - October",
            ScoreField::Proximity => "Proximity Score",
            ScoreField::Landscape => "Landscape and Nature Score",
            ScoreField::Infrastructure => "Pedestrian Infrastructure Score",
            ScoreField::Comfort => "Pedestrian Comfort Score",
            ScoreField::ThermalAugust => "Outdoor Thermal Comfort - August",
            ScoreField::ThermalOctober => "Outdoor Thermal Comfort - October",
        }
    }

    /// Composite walkability columns use the composite table, everything else the sub-index table.
    pub const fn scale(self) -> Scale {
        match self {
            ScoreField::WalkabilityAugust | ScoreField::WalkabilityOctober => Scale::Composite,
            _ => Scale::SubIndex,
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Lowercase and strip separators so "Scenario-II", "scenario_ii" and "scenario ii" compare equal.
fn normalize(input: &str) -> String {
    input.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '&'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Weather scenario under which the thermal-comfort-dependent scores were computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Scenario {
    /// Scenario-I: extreme heat, referenced to 13 August 2024.
    #[default]
    Heat,
    /// Scenario-II: heavy precipitation, referenced to 9 October 2024.
    Precipitation,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Heat, Scenario::Precipitation];

    pub fn label(self) -> &'static str {
        match self {
            Scenario::Heat => "Scenario-I",
            Scenario::Precipitation => "Scenario-II",
        }
    }

    pub fn condition(self) -> &'static str {
        match self {
            Scenario::Heat => "Heat",
            Scenario::Precipitation => "Precipitation",
        }
    }

    pub fn month(self) -> &'static str {
        match self {
            Scenario::Heat => "August",
            Scenario::Precipitation => "October",
        }
    }

    /// ISO date of the reference day.
    pub fn reference_date(self) -> &'static str {
        match self {
            Scenario::Heat => "2024-08-13",
            Scenario::Precipitation => "2024-10-09",
        }
    }

    /// Composite walkability column for this scenario.
    pub fn walkability_field(self) -> ScoreField {
        match self {
            Scenario::Heat => ScoreField::WalkabilityAugust,
            Scenario::Precipitation => ScoreField::WalkabilityOctober,
        }
    }

    /// Thermal comfort sub-index for this scenario.
    pub fn thermal_field(self) -> ScoreField {
        match self {
            Scenario::Heat => ScoreField::ThermalAugust,
            Scenario::Precipitation => ScoreField::ThermalOctober,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match normalize(input).as_str() {
            "i" | "1" | "scenarioi" | "scenario1" | "heat" | "august" => Ok(Scenario::Heat),
            "ii" | "2" | "scenarioii" | "scenario2" | "precipitation" | "rain" | "october" => Ok(Scenario::Precipitation),
            _ => Err(anyhow!("unknown scenario {input:?}; expected Scenario-I (heat) or Scenario-II (precipitation)")),
        }
    }
}

/// A sub-index selectable on the sub-index map and shown on the street radar chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SubIndex {
    Proximity,
    Landscape,
    Infrastructure,
    Comfort,
    ThermalAugust,
    ThermalOctober,
}

impl SubIndex {
    /// Display order, shared by the selector and the radar chart.
    pub const ALL: [SubIndex; 6] = [
        SubIndex::Proximity,
        SubIndex::Landscape,
        SubIndex::Infrastructure,
        SubIndex::Comfort,
        SubIndex::ThermalAugust,
        SubIndex::ThermalOctober,
    ];

    pub fn field(self) -> ScoreField {
        match self {
            SubIndex::Proximity => ScoreField::Proximity,
            SubIndex::Landscape => ScoreField::Landscape,
            SubIndex::Infrastructure => ScoreField::Infrastructure,
            SubIndex::Comfort => ScoreField::Comfort,
            SubIndex::ThermalAugust => ScoreField::ThermalAugust,
            SubIndex::ThermalOctober => ScoreField::ThermalOctober,
        }
    }

    #[inline] pub fn column(self) -> &'static str { self.field().column() }

    /// Short axis label on the radar chart.
    pub fn short_label(self) -> &'static str {
        match self {
            SubIndex::Proximity => "Proximity",
            SubIndex::Landscape => "Landscape",
            SubIndex::Infrastructure => "Infrastructure",
            SubIndex::Comfort => "Comfort",
            SubIndex::ThermalAugust => "Thermal Comfort-I",
            SubIndex::ThermalOctober => "Thermal Comfort-II",
        }
    }

    /// Longer label used in the street summary.
    pub fn long_label(self) -> &'static str {
        match self {
            SubIndex::Proximity => "Proximity",
            SubIndex::Landscape => "Landscape & Nature",
            SubIndex::Infrastructure => "Pedestrian Infrastructure",
            SubIndex::Comfort => "Comfort",
            SubIndex::ThermalAugust => "Thermal Comfort (August)",
            SubIndex::ThermalOctober => "Thermal Comfort (October)",
        }
    }

    /// Short explanation of what feeds the sub-index.
    pub fn description(self) -> &'static str {
        match self {
            SubIndex::Proximity =>
                "Proximity Sub-Index includes land-use diversity, public amenities, commercial amenities, \
                 and public transport stations indicators to calculate the sub-index score.",
            SubIndex::Landscape =>
                "Landscape and Nature Sub-Index includes parks, open spaces, blue infrastructure such as lakes \
                 and canals, landmarks, and urban furniture indicators to calculate the sub-index score.",
            SubIndex::Infrastructure =>
                "Pedestrian Infrastructure Sub-Index includes street lighting data from Stadt-Münster and \
                 OpenStreetMap, and street connectivity (network nodes) to calculate the sub-index score.",
            SubIndex::Comfort =>
                "Pedestrian Comfort Sub-Index includes slope, obstacles, and presence of barriers indicators \
                 to calculate the sub-index score.",
            SubIndex::ThermalAugust =>
                "Outdoor Thermal Comfort Sub-Index evaluates air temperature, relative humidity, wind speed, \
                 precipitation, and presence of trees. August refers to 13 August 2024 and corresponds to \
                 Scenario-I (heat).",
            SubIndex::ThermalOctober =>
                "Outdoor Thermal Comfort Sub-Index evaluates air temperature, relative humidity, wind speed, \
                 precipitation, and presence of trees. October refers to 9 October 2024 and corresponds to \
                 Scenario-II (precipitation).",
        }
    }
}

impl fmt::Display for SubIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SubIndex {
    type Err = Error;

    /// Accepts the dataset column name, either display label, or a short key such as "thermal-august".
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let key = normalize(input);
        let by_label = Self::ALL.into_iter().find(|s| {
            [s.column(), s.short_label(), s.long_label()].into_iter().any(|label| normalize(label) == key)
        });
        if let Some(sub_index) = by_label { return Ok(sub_index) }

        match key.as_str() {
            "proximity" => Ok(SubIndex::Proximity),
            "landscape" | "nature" => Ok(SubIndex::Landscape),
            "infrastructure" => Ok(SubIndex::Infrastructure),
            "comfort" => Ok(SubIndex::Comfort),
            "thermal" | "thermalaugust" | "thermali" => Ok(SubIndex::ThermalAugust),
            "thermaloctober" | "thermalii" => Ok(SubIndex::ThermalOctober),
            _ => Err(anyhow!("unknown sub-index {input:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkability_fields_use_composite_scale() {
        assert_eq!(ScoreField::WalkabilityAugust.scale(), Scale::Composite);
        assert_eq!(ScoreField::WalkabilityOctober.scale(), Scale::Composite);
        for sub_index in SubIndex::ALL {
            assert_eq!(sub_index.field().scale(), Scale::SubIndex);
        }
    }

    #[test]
    fn scenario_fields() {
        assert_eq!(Scenario::Heat.walkability_field().column(), "Walkability Score - August");
        assert_eq!(Scenario::Precipitation.walkability_field().column(), "Walkability Score - October");
        assert_eq!(Scenario::Precipitation.thermal_field(), ScoreField::ThermalOctober);
    }

    #[test]
    fn parse_scenarios() {
        assert_eq!("Scenario-I".parse::<Scenario>().unwrap(), Scenario::Heat);
        assert_eq!("scenario_ii".parse::<Scenario>().unwrap(), Scenario::Precipitation);
        assert_eq!("2".parse::<Scenario>().unwrap(), Scenario::Precipitation);
        assert!("winter".parse::<Scenario>().is_err());
    }

    #[test]
    fn parse_sub_indexes() {
        assert_eq!("Proximity Score".parse::<SubIndex>().unwrap(), SubIndex::Proximity);
        assert_eq!("Landscape & Nature".parse::<SubIndex>().unwrap(), SubIndex::Landscape);
        assert_eq!("Outdoor Thermal Comfort - October".parse::<SubIndex>().unwrap(), SubIndex::ThermalOctober);
        assert_eq!("thermal-august".parse::<SubIndex>().unwrap(), SubIndex::ThermalAugust);
        assert!("noise".parse::<SubIndex>().is_err());
    }
}

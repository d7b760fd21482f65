use anyhow::{ensure, Result};

/// Transport mode share per district: rows are modes, columns are districts,
/// values are percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeShare {
    modes: Vec<String>,
    districts: Vec<String>,
    shares: Vec<Vec<f64>>, // shares[district][mode]
}

impl ModeShare {
    /// Build from column-major percentages, one column per district.
    pub fn new(modes: Vec<String>, districts: Vec<String>, shares: Vec<Vec<f64>>) -> Result<Self> {
        ensure!(shares.len() == districts.len(),
            "[data::modes] {} share columns for {} districts", shares.len(), districts.len());
        for (district, column) in districts.iter().zip(&shares) {
            ensure!(column.len() == modes.len(),
                "[data::modes] district {district:?} has {} values for {} modes", column.len(), modes.len());
        }
        Ok(Self { modes, districts, shares })
    }

    /// Transport modes, in table order.
    #[inline] pub fn modes(&self) -> &[String] { &self.modes }

    /// District columns, in table order.
    #[inline] pub fn districts(&self) -> &[String] { &self.districts }

    /// (mode, percentage) pairs for one district.
    pub fn for_district(&self, district: &str) -> Option<Vec<(&str, f64)>> {
        let column = self.districts.iter().position(|d| d == district)?;
        Some(self.modes.iter().map(String::as_str).zip(self.shares[column].iter().copied()).collect())
    }

    /// Share of one mode in one district.
    pub fn share(&self, district: &str, mode: &str) -> Option<f64> {
        let column = self.districts.iter().position(|d| d == district)?;
        let row = self.modes.iter().position(|m| m == mode)?;
        Some(self.shares[column][row])
    }
}

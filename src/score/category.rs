use std::fmt;

use serde::Serialize;

/// Ordinal walkability bucket, ordered from best to worst.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ScoreCategory {
    Excellent,
    Good,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

impl ScoreCategory {
    /// All categories, best first.
    pub const ALL: [ScoreCategory; 5] = [
        ScoreCategory::Excellent,
        ScoreCategory::Good,
        ScoreCategory::Moderate,
        ScoreCategory::Poor,
        ScoreCategory::VeryPoor,
    ];

    /// Display label, e.g. "Very Poor".
    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "Excellent",
            ScoreCategory::Good => "Good",
            ScoreCategory::Moderate => "Moderate",
            ScoreCategory::Poor => "Poor",
            ScoreCategory::VeryPoor => "Very Poor",
        }
    }

    /// Parse a display label. Case and separators (space, '-', '_') are ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label.chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL.into_iter().find(|category| {
            category.label().replace(' ', "").to_ascii_lowercase() == key
        })
    }

    /// Position in the best-to-worst ordering (0 = Excellent).
    #[inline] pub(crate) fn rank(self) -> usize { self as usize }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreCategory;

    #[test]
    fn labels_round_trip() {
        for category in ScoreCategory::ALL {
            assert_eq!(ScoreCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(ScoreCategory::from_label("very_poor"), Some(ScoreCategory::VeryPoor));
        assert_eq!(ScoreCategory::from_label("Terrible"), None);
    }

    #[test]
    fn ordered_best_to_worst() {
        assert!(ScoreCategory::Excellent < ScoreCategory::Good);
        assert!(ScoreCategory::Poor < ScoreCategory::VeryPoor);
        assert_eq!(ScoreCategory::VeryPoor.rank(), 4);
    }
}

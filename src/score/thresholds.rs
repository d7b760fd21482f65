use serde::Serialize;

use crate::score::ScoreCategory;

/// An ordered threshold table. Cut points are lower bounds (inclusive),
/// listed from highest to lowest; the first match wins and anything below
/// the last cut point is `VeryPoor`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    name: &'static str,
    cuts: [(f64, ScoreCategory); 4],
}

/// Cut points for the overall (composite) walkability score.
pub const COMPOSITE: Thresholds = Thresholds {
    name: "composite",
    cuts: [
        (42.0, ScoreCategory::Excellent),
        (29.0, ScoreCategory::Good),
        (21.0, ScoreCategory::Moderate),
        (14.0, ScoreCategory::Poor),
    ],
};

/// Cut points for individual sub-index scores.
pub const SUB_INDEX: Thresholds = Thresholds {
    name: "sub-index",
    cuts: [
        (60.0, ScoreCategory::Excellent),
        (50.0, ScoreCategory::Good),
        (25.0, ScoreCategory::Moderate),
        (15.0, ScoreCategory::Poor),
    ],
};

/// Which threshold table a score field is classified with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scale {
    Composite,
    SubIndex,
}

impl Scale {
    #[inline]
    pub fn thresholds(self) -> &'static Thresholds {
        match self {
            Scale::Composite => &COMPOSITE,
            Scale::SubIndex => &SUB_INDEX,
        }
    }

    #[inline]
    pub fn classify(self, score: f64) -> ScoreCategory {
        self.thresholds().classify(score)
    }
}

/// One row of a legend: a category and the half-open score band `[min, max)` it covers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Band {
    pub category: ScoreCategory,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Thresholds {
    #[inline] pub fn name(&self) -> &'static str { self.name }

    /// Classify a score. NaN counts as a missing score, i.e. 0.
    pub fn classify(&self, score: f64) -> ScoreCategory {
        let score = if score.is_nan() { 0.0 } else { score };
        self.cuts.iter()
            .find(|&&(lower, _)| score >= lower)
            .map(|&(_, category)| category)
            .unwrap_or(ScoreCategory::VeryPoor)
    }

    /// Classify a possibly absent score; absent scores are treated as 0.
    #[inline]
    pub fn classify_opt(&self, score: Option<f64>) -> ScoreCategory {
        self.classify(score.unwrap_or(0.0))
    }

    /// Inclusive lower bound of a category, `None` for the open-ended bottom bucket.
    pub fn lower_bound(&self, category: ScoreCategory) -> Option<f64> {
        self.cuts.iter()
            .find(|&&(_, c)| c == category)
            .map(|&(lower, _)| lower)
    }

    /// Score bands for every category, best first. Together they cover the whole real line.
    pub fn bands(&self) -> Vec<Band> {
        ScoreCategory::ALL.iter().map(|&category| {
            let min = self.lower_bound(category);
            let max = category.rank().checked_sub(1)
                .and_then(|above| self.lower_bound(ScoreCategory::ALL[above]));
            Band { category, min, max }
        }).collect()
    }
}

/// Classify an overall walkability score.
#[inline]
pub fn classify_composite(score: f64) -> ScoreCategory { COMPOSITE.classify(score) }

/// Classify an individual sub-index score.
#[inline]
pub fn classify_subindex(score: f64) -> ScoreCategory { SUB_INDEX.classify(score) }

#[cfg(test)]
mod tests {
    use super::*;
    use ScoreCategory::*;

    #[test]
    fn composite_boundaries() {
        assert_eq!(classify_composite(42.0), Excellent);
        assert_eq!(classify_composite(41.9), Good);
        assert_eq!(classify_composite(29.0), Good);
        assert_eq!(classify_composite(28.99), Moderate);
        assert_eq!(classify_composite(21.0), Moderate);
        assert_eq!(classify_composite(14.0), Poor);
        assert_eq!(classify_composite(13.99), VeryPoor);
        assert_eq!(classify_composite(0.0), VeryPoor);
    }

    #[test]
    fn sub_index_boundaries() {
        assert_eq!(classify_subindex(60.0), Excellent);
        assert_eq!(classify_subindex(59.0), Good);
        assert_eq!(classify_subindex(50.0), Good);
        assert_eq!(classify_subindex(49.5), Moderate);
        assert_eq!(classify_subindex(25.0), Moderate);
        assert_eq!(classify_subindex(15.0), Poor);
        assert_eq!(classify_subindex(14.0), VeryPoor);
    }

    #[test]
    fn tables_are_distinct() {
        // 45 is excellent overall but only moderate as a sub-index.
        assert_eq!(classify_composite(45.0), Excellent);
        assert_eq!(classify_subindex(45.0), Moderate);
        assert_ne!(COMPOSITE, SUB_INDEX);
    }

    #[test]
    fn out_of_range_and_missing() {
        assert_eq!(classify_composite(-5.0), VeryPoor);
        assert_eq!(classify_subindex(250.0), Excellent);
        assert_eq!(classify_composite(f64::NAN), VeryPoor);
        assert_eq!(classify_composite(f64::NEG_INFINITY), VeryPoor);
        assert_eq!(classify_subindex(f64::INFINITY), Excellent);
        assert_eq!(COMPOSITE.classify_opt(None), VeryPoor);
    }

    #[test]
    fn bands_partition_the_line() {
        for table in [&COMPOSITE, &SUB_INDEX] {
            let bands = table.bands();
            assert_eq!(bands.len(), 5);
            assert_eq!(bands[0].max, None);
            assert_eq!(bands[4].min, None);
            for pair in bands.windows(2) {
                assert_eq!(pair[0].min, pair[1].max);
            }
        }
    }

    #[test]
    fn every_score_lands_in_its_band() {
        for table in [&COMPOSITE, &SUB_INDEX] {
            let bands = table.bands();
            for tenths in -100..=1100 {
                let score = tenths as f64 / 10.0;
                let category = table.classify(score);
                let matching = bands.iter()
                    .filter(|b| b.min.is_none_or(|lo| score >= lo) && b.max.is_none_or(|hi| score < hi))
                    .collect::<Vec<_>>();
                assert_eq!(matching.len(), 1, "score {score} in {} table", table.name());
                assert_eq!(matching[0].category, category);
            }
        }
    }
}

use serde::Serialize;

use super::domain::{Area, MaturityBand, Score};

/// Mean rating and sample size for one area. Never built from zero samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AreaAggregate {
    pub area: Area,
    pub mean_score: f64,
    pub sample_count: usize,
}

impl AreaAggregate {
    pub fn band(&self) -> MaturityBand {
        MaturityBand::classify(self.mean_score)
    }
}

pub fn aggregate_scores(area: Area, scores: &[Score]) -> Option<AreaAggregate> {
    if scores.is_empty() {
        return None;
    }

    let total: u32 = scores.iter().map(|score| u32::from(score.value())).sum();
    Some(AreaAggregate {
        area,
        mean_score: f64::from(total) / scores.len() as f64,
        sample_count: scores.len(),
    })
}

/// Aggregates every area with at least one rating, in canonical area order.
pub fn aggregate_all<F>(mut scores_for: F) -> Vec<AreaAggregate>
where
    F: FnMut(Area) -> Vec<Score>,
{
    Area::ordered()
        .into_iter()
        .filter_map(|area| aggregate_scores(area, &scores_for(area)))
        .collect()
}

/// Unweighted mean of the per-area means.
pub fn overall_score(aggregates: &[AreaAggregate]) -> Option<f64> {
    if aggregates.is_empty() {
        return None;
    }
    let total: f64 = aggregates.iter().map(|aggregate| aggregate.mean_score).sum();
    Some(total / aggregates.len() as f64)
}

pub fn readiness_percentage(overall: f64) -> f64 {
    overall / f64::from(Score::MAX) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scores(value: u8, count: usize) -> Vec<Score> {
        vec![Score::new(value).expect("valid score"); count]
    }

    #[test]
    fn overall_is_unweighted_mean_of_area_means() {
        let aggregates = aggregate_all(|area| match area {
            Area::DataReadiness => scores(4, 34),
            Area::Infrastructure => scores(2, 15),
            _ => Vec::new(),
        });

        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].sample_count, 34);
        assert_eq!(overall_score(&aggregates), Some(3.0));
        assert_eq!(readiness_percentage(3.0), 60.0);
    }

    #[test]
    fn empty_areas_are_omitted() {
        assert!(aggregate_scores(Area::LeadershipStrategy, &[]).is_none());
        assert!(aggregate_all(|_| Vec::new()).is_empty());
        assert_eq!(overall_score(&[]), None);
    }

    proptest! {
        #[test]
        fn mean_stays_within_sample_bounds(values in prop::collection::vec(1u8..=5, 1..64)) {
            let ratings: Vec<Score> = values
                .iter()
                .map(|value| Score::new(*value).expect("generated in range"))
                .collect();
            let aggregate = aggregate_scores(Area::Infrastructure, &ratings).expect("non-empty");

            let min = f64::from(*values.iter().min().expect("non-empty"));
            let max = f64::from(*values.iter().max().expect("non-empty"));
            prop_assert!(aggregate.mean_score >= min && aggregate.mean_score <= max);
            prop_assert_eq!(aggregate.sample_count, values.len());
        }
    }
}

use crate::decision::label_table::LabelTable;
use crate::decision::prediction::PredictionResult;
use crate::error::PredictionError;
use std::cmp::Ordering;

/// Picks the highest-scoring class.
///
/// The scan runs left to right and only moves on a strictly greater score, so
/// the first index holding the maximum wins. Scores are ordered by
/// `score_order`: NaN ranks above every number.
pub fn decide(scores: &[f32], labels: &LabelTable) -> Result<PredictionResult, PredictionError> {
    check_alignment(scores, labels)?;

    prediction_at(scores, labels, arg_max(scores))
}

/// The `k` best classes, highest first. Equal scores keep index order.
pub fn rank(
    scores: &[f32],
    labels: &LabelTable,
    k: usize,
) -> Result<Vec<PredictionResult>, PredictionError> {
    check_alignment(scores, labels)?;

    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| score_order(scores[b], scores[a]));
    indices.truncate(k);

    indices
        .into_iter()
        .map(|index| prediction_at(scores, labels, index))
        .collect()
}

/// Total order on scores: IEEE total order for numbers (so `-0.0 < 0.0`),
/// with every NaN equal to every other NaN and above all numbers.
fn score_order(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

fn check_alignment(scores: &[f32], labels: &LabelTable) -> Result<(), PredictionError> {
    if scores.len() != labels.len() {
        return Err(PredictionError::ConfigMismatch {
            scores: scores.len(),
            labels: labels.len(),
        });
    }
    if scores.is_empty() {
        return Err(PredictionError::EmptyInput);
    }
    Ok(())
}

/// Callers guarantee `scores` is non-empty.
fn arg_max(scores: &[f32]) -> usize {
    let mut best = 0;
    for (index, &score) in scores.iter().enumerate().skip(1) {
        if score_order(score, scores[best]) == Ordering::Greater {
            best = index;
        }
    }
    best
}

fn prediction_at(
    scores: &[f32],
    labels: &LabelTable,
    index: usize,
) -> Result<PredictionResult, PredictionError> {
    let label = labels.get(index).ok_or(PredictionError::ConfigMismatch {
        scores: scores.len(),
        labels: labels.len(),
    })?;

    Ok(PredictionResult {
        label: label.to_string(),
        confidence_percent: scores[index] * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn labels(names: &[&str]) -> LabelTable {
        names.iter().copied().collect()
    }

    #[test]
    fn test_first_maximum_wins() {
        let result = decide(&[0.2, 0.5, 0.5, 0.1], &labels(&["A", "B", "C", "D"])).unwrap();

        assert_eq!(result.label, "B");
        assert_eq!(result.to_string(), "B (50.00%)");
    }

    #[test]
    fn test_confidence_rounds_to_two_decimals() {
        let result = decide(&[0.12345, 0.0, 0.0], &labels(&["X", "Y", "Z"])).unwrap();

        assert_eq!(result.to_string(), "X (12.35%)");
    }

    #[test]
    fn test_confidence_is_not_clamped() {
        let result = decide(&[3.0, 1.0], &labels(&["Logit", "Other"])).unwrap();

        assert_eq!(result.to_string(), "Logit (300.00%)");
    }

    #[test]
    fn test_last_index_can_win() {
        let result = decide(&[0.1, 0.2, 0.7], &labels(&["A", "B", "C"])).unwrap();

        assert_eq!(result.label, "C");
    }

    #[test]
    fn test_negative_scores() {
        let result = decide(&[-3.0, -1.5, -2.0], &labels(&["A", "B", "C"])).unwrap();

        assert_eq!(result.label, "B");
    }

    #[test]
    fn test_first_nan_wins() {
        let result = decide(&[f32::NAN, 0.3, f32::NAN], &labels(&["A", "B", "C"])).unwrap();

        assert_eq!(result.label, "A");
        assert_eq!(result.to_string(), "A (NaN%)");
    }

    #[test]
    fn test_nan_beats_a_larger_earlier_score() {
        let result = decide(&[0.9, f32::NAN, 0.1], &labels(&["A", "B", "C"])).unwrap();

        assert_eq!(result.label, "B");
    }

    #[test]
    fn test_all_nan_picks_first_class() {
        let result = decide(&[f32::NAN, f32::NAN], &labels(&["A", "B"])).unwrap();

        assert_eq!(result.to_string(), "A (NaN%)");
    }

    #[test]
    fn test_positive_zero_beats_negative_zero() {
        let result = decide(&[-0.0, 0.0], &labels(&["A", "B"])).unwrap();

        assert_eq!(result.label, "B");
    }

    #[test]
    fn test_empty_input() {
        let result = decide(&[], &LabelTable::default());

        assert!(matches!(result, Err(PredictionError::EmptyInput)));
    }

    #[test]
    fn test_any_length_mismatch_is_config_mismatch() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let score_count = rng.random_range(0..8);
            let label_count = rng.random_range(0..8);
            if score_count == label_count {
                continue;
            }
            let scores: Vec<f32> = (0..score_count).map(|_| rng.random()).collect();
            let table: LabelTable = (0..label_count).map(|i| format!("class {}", i)).collect();

            let result = decide(&scores, &table);

            assert!(
                matches!(
                    result,
                    Err(PredictionError::ConfigMismatch { scores, labels })
                        if scores == score_count && labels == label_count
                ),
                "{} scores vs {} labels",
                score_count,
                label_count
            );
        }
    }

    #[test]
    fn test_rank_orders_by_score_and_keeps_ties_stable() {
        let ranked = rank(
            &[0.1, 0.3, 0.05, 0.3, 0.25],
            &labels(&["A", "B", "C", "D", "E"]),
            3,
        )
        .unwrap();

        let names: Vec<&str> = ranked.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(names, ["B", "D", "E"]);
    }

    #[test]
    fn test_rank_head_agrees_with_decide() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let count = rng.random_range(1..12);
            let scores: Vec<f32> = (0..count)
                .map(|_| rng.random_range(0..4) as f32 / 4.0)
                .collect();
            let table: LabelTable = (0..count).map(|i| i.to_string()).collect();

            let top = rank(&scores, &table, 1).unwrap();
            let decided = decide(&scores, &table).unwrap();

            assert_eq!(top, vec![decided]);
        }
    }

    #[test]
    fn test_rank_puts_nan_first() {
        let ranked = rank(&[0.4, f32::NAN, 0.6], &labels(&["A", "B", "C"]), 3).unwrap();

        let names: Vec<&str> = ranked.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(names, ["B", "C", "A"]);
    }

    #[test]
    fn test_rank_with_k_larger_than_classes() {
        let ranked = rank(&[0.6, 0.4], &labels(&["A", "B"]), 10).unwrap();

        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_rank_shares_preconditions() {
        assert!(matches!(
            rank(&[0.6, 0.4], &labels(&["A"]), 1),
            Err(PredictionError::ConfigMismatch { .. })
        ));
        assert!(matches!(
            rank(&[], &LabelTable::default(), 1),
            Err(PredictionError::EmptyInput)
        ));
    }
}

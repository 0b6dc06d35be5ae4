//! Score percentages and per-user aggregate statistics.

use serde::{Deserialize, Serialize};

use crate::model::Quiz;

/// Percentage of correct answers, 0 when nothing was answered.
pub fn score_percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * correct as f64 / total as f64
}

/// Running count of graded answers for one attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub total: usize,
}

impl Tally {
    pub fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    pub fn percentage(&self) -> f64 {
        score_percentage(self.correct, self.total)
    }
}

/// Summary statistics over a user's quiz history.
///
/// Every field is 0 when the user has not taken any quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    /// Number of scored quizzes.
    pub count: usize,
    /// Arithmetic mean of the stored scores.
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    /// Sum of all scores.
    pub total: f64,
}

/// Aggregate a list of score percentages.
pub fn summarize_scores(scores: &[f64]) -> QuizSummary {
    if scores.is_empty() {
        return QuizSummary::default();
    }

    let total: f64 = scores.iter().sum();
    let highest = scores.iter().copied().fold(f64::MIN, f64::max);
    let lowest = scores.iter().copied().fold(f64::MAX, f64::min);

    QuizSummary {
        count: scores.len(),
        average: total / scores.len() as f64,
        highest,
        lowest,
        total,
    }
}

/// Aggregate the stored scores of `quizzes`, ignoring any not yet scored.
pub fn summarize_quizzes(quizzes: &[Quiz]) -> QuizSummary {
    let scores: Vec<f64> = quizzes.iter().filter_map(Quiz::score).collect();
    summarize_scores(&scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn percentage_of_nothing_is_zero() {
        assert_eq!(score_percentage(0, 0), 0.0);
        assert_eq!(Tally::default().percentage(), 0.0);
    }

    #[test]
    fn percentage_bounds() {
        assert_eq!(score_percentage(0, 4), 0.0);
        assert_eq!(score_percentage(4, 4), 100.0);
        assert_eq!(score_percentage(1, 2), 50.0);
        for total in 1..20 {
            for correct in 0..=total {
                let s = score_percentage(correct, total);
                assert!((0.0..=100.0).contains(&s), "{correct}/{total} gave {s}");
            }
        }
    }

    #[test]
    fn tally_counts_correct_answers() {
        let mut tally = Tally::default();
        tally.record(true);
        tally.record(false);
        tally.record(true);
        assert_eq!(tally, Tally { correct: 2, total: 3 });
        assert!((tally.percentage() - 66.666).abs() < 0.01);
    }

    #[test]
    fn empty_history_summarizes_to_zero() {
        let summary = summarize_scores(&[]);
        assert_eq!(summary, QuizSummary::default());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.highest, 0.0);
        assert_eq!(summary.lowest, 0.0);
    }

    #[test]
    fn summary_of_mixed_scores() {
        let summary = summarize_scores(&[100.0, 50.0, 0.0]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 50.0);
        assert_eq!(summary.highest, 100.0);
        assert_eq!(summary.lowest, 0.0);
        assert_eq!(summary.total, 150.0);
    }

    #[test]
    fn unscored_quizzes_are_ignored() {
        let mut scored = Quiz::new("alice".into(), Utc::now());
        scored.record_score(80.0).unwrap();
        let unscored = Quiz::new("alice".into(), Utc::now());

        let summary = summarize_quizzes(&[scored, unscored]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.average, 80.0);
    }
}

use compensated_summation::KahanBabuskaNeumaier;
use thiserror::Error;

use crate::{deviance, MatchRecord, RatingStore, RatingSystem, Score, Verdict};

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("unknown team: {0}")]
pub struct UnknownTeam(pub String);

/// Probability that `first` beats `second`, where each alliance is given by
/// the display labels of its two teams. Teams that are known by label but
/// have no rating (e.g. pruned) are assumed to be at the prior.
pub fn predict(
    store: &RatingStore,
    rating_system: &RatingSystem,
    first: [&str; 2],
    second: [&str; 2],
) -> Result<Score, UnknownTeam> {
    let lookup = |label: &str| {
        store
            .resolve_label(label)
            .map(|team| store.rating_or_default(team, rating_system))
            .ok_or_else(|| UnknownTeam(label.to_owned()))
    };

    let first = [lookup(first[0])?, lookup(first[1])?];
    let second = [lookup(second[0])?, lookup(second[1])?];
    Ok(rating_system.win_probability(&first, &second))
}

/// Outcome of backtesting ratings against a list of matches.
#[derive(Debug, Default)]
pub struct Accuracy {
    /// Ratable matches where the favored alliance won.
    pub correct: u64,
    /// Ratable matches.
    pub evaluated: u64,
    total_deviance: KahanBabuskaNeumaier<f64>,
}

impl Accuracy {
    /// Fraction of correct predictions, `NaN` if nothing was evaluated.
    pub fn ratio(&self) -> f64 {
        self.correct as f64 / self.evaluated as f64
    }

    pub fn total_deviance(&self) -> f64 {
        self.total_deviance.total()
    }

    /// Lower is better.
    pub fn avg_deviance(&self) -> f64 {
        self.total_deviance.total() / self.evaluated as f64
    }
}

/// Predicts every ratable match with the current ratings and counts how
/// often the favorite won. The ratings are usually trained on the same
/// matches, so this measures fit rather than true predictive power.
pub fn evaluate_accuracy(
    store: &RatingStore,
    rating_system: &RatingSystem,
    matches: &[MatchRecord],
) -> Accuracy {
    let mut accuracy = Accuracy::default();

    for record in matches {
        let ratable = match record.verdict() {
            Ok(Verdict::Ratable(ratable)) => ratable,
            Ok(Verdict::Invalid | Verdict::Unresolved) | Err(_) => continue,
        };

        let red = ratable
            .red
            .map(|team| store.rating_or_default(team.id, rating_system));
        let blue = ratable
            .blue
            .map(|team| store.rating_or_default(team.id, rating_system));

        let red_wins = rating_system.win_probability(&red, &blue);
        let actual = Score::from_points(ratable.red_score, ratable.blue_score);

        if (red_wins > red_wins.opposite()) == (actual == Score::WIN) {
            accuracy.correct += 1;
        }
        accuracy.evaluated += 1;
        accuracy.total_deviance += deviance(red_wins, actual);
    }

    accuracy
}

//! Bayesian skill ratings for robotics competitions played between two
//! alliances of two teams.
//!
//! Ratings follow the Plackett-Luce variant of the Weng-Lin Bayesian
//! approximation: every team has a mean skill `mu` and an uncertainty
//! `sigma`, and an alliance is as strong as the sum of its members. Match
//! histories are replayed in order, optionally several times, and the
//! resulting ratings can rank teams or predict future matches.
//!
//! ```
//! use allianceskill::{replay, rankings, ReplayConfig};
//! # let matches: Vec<allianceskill::MatchRecord> = Vec::new();
//!
//! let config = ReplayConfig::default();
//! let store = replay(&matches, &config);
//! for entry in rankings(&store, &config.rating_system, None).iter().take(10) {
//!     println!("{} {} {}", entry.rank, entry.label, f64::from(entry.ordinal));
//! }
//! ```

mod evaluate;
mod instant;
mod matches;
mod ranking;
mod rating;
mod rating_system;
mod replay;
mod score;
mod store;

pub use evaluate::{evaluate_accuracy, predict, Accuracy, UnknownTeam};
pub use instant::{Hours, Instant};
pub use matches::{
    Alliance, Color, InvalidColor, MatchError, MatchRecord, RatableMatch, TeamId, TeamRef, Verdict,
};
pub use ranking::{rankings, write_rankings, RankingEntry};
pub use rating::{Drift, Ordinal, Rating, MIN_SIGMA};
pub use rating_system::{RatingSystem, RatingSystemBuilder, UpdateError};
pub use replay::{replay, replay_match, replay_pass, Outcome, PassStats, ReplayConfig};
pub use score::Score;
pub use store::RatingStore;

/// Log likelihood deviance metric that can be used to evaluate the quality of
/// rating system predictions.
///
/// Lower is better.
///
/// See https://www.kaggle.com/c/ChessRatings2/overview/evaluation.
pub fn deviance(Score(expected): Score, Score(actual): Score) -> f64 {
    let expected = expected.clamp(0.01, 0.99);
    -(actual * expected.log10() + (1.0 - actual) * (1.0 - expected).log10())
}

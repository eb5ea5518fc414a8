use std::cmp::Ordering;

/// A score or expectation value in the range `0.0..=1.0`, where `0.0` is a
/// loss and `1.0` is a win for the first alliance.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Score(pub f64);

impl Score {
    pub const LOSS: Score = Score(0.0);
    pub const DRAW: Score = Score(0.5);
    pub const WIN: Score = Score(1.0);

    pub fn opposite(self) -> Score {
        Score(1.0 - self.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Result of a decided match between two alliances, from the
    /// perspective of the first.
    pub fn from_points(first: i32, second: i32) -> Score {
        match first.cmp(&second) {
            Ordering::Greater => Score::WIN,
            Ordering::Less => Score::LOSS,
            Ordering::Equal => Score::DRAW,
        }
    }
}

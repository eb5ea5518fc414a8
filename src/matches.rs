use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::Instant;

/// Stable numeric identifier of a team, as assigned by the results API.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Blue,
}

#[derive(Debug, Error)]
#[error("invalid alliance color")]
pub struct InvalidColor;

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "red" => Color::Red,
            "blue" => Color::Blue,
            _ => return Err(InvalidColor),
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Color::Red => "red",
            Color::Blue => "blue",
        })
    }
}

/// A team occupying a roster slot.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRef {
    pub id: TeamId,
    /// Team number, e.g. `"15442C"`.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alliance {
    pub color: Color,
    pub score: i32,
    /// Roster slots in order. Empty or sitting slots are `None`.
    pub teams: Vec<Option<TeamRef>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub id: u32,
    pub event: u32,
    pub division: u32,
    pub alliances: Vec<Alliance>,
    /// Actual start time if known, else the scheduled time.
    pub start: Option<Instant>,
}

#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum MatchError {
    #[error("expected exactly one {0} alliance, found {1}")]
    AllianceColor(Color, usize),
}

/// Classification of a match record before it is rated.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict<'a> {
    Ratable(RatableMatch<'a>),
    /// Tie or zero score.
    Invalid,
    /// Some roster slot is not occupied.
    Unresolved,
}

/// A decided match with full rosters on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct RatableMatch<'a> {
    pub red: [&'a TeamRef; 2],
    pub blue: [&'a TeamRef; 2],
    pub red_score: i32,
    pub blue_score: i32,
}

impl<'a> RatableMatch<'a> {
    pub fn teams(&self) -> impl Iterator<Item = &'a TeamRef> + 'a {
        self.red.into_iter().chain(self.blue)
    }
}

impl Alliance {
    fn roster(&self) -> Option<[&TeamRef; 2]> {
        let mut occupied = self.teams.iter().flatten();
        let roster = [occupied.next()?, occupied.next()?];
        occupied.next().is_none().then_some(roster)
    }
}

impl MatchRecord {
    pub fn alliance(&self, color: Color) -> Result<&Alliance, MatchError> {
        let mut found = self.alliances.iter().filter(|alliance| alliance.color == color);
        match (found.next(), found.count()) {
            (Some(alliance), 0) => Ok(alliance),
            (None, _) => Err(MatchError::AllianceColor(color, 0)),
            (Some(_), more) => Err(MatchError::AllianceColor(color, more + 1)),
        }
    }

    pub fn verdict(&self) -> Result<Verdict<'_>, MatchError> {
        let red = self.alliance(Color::Red)?;
        let blue = self.alliance(Color::Blue)?;

        if red.score == 0 || blue.score == 0 || red.score == blue.score {
            return Ok(Verdict::Invalid);
        }

        Ok(match (red.roster(), blue.roster()) {
            (Some(red_roster), Some(blue_roster)) => Verdict::Ratable(RatableMatch {
                red: red_roster,
                blue: blue_roster,
                red_score: red.score,
                blue_score: blue.score,
            }),
            _ => Verdict::Unresolved,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn team(id: u32) -> Option<TeamRef> {
        Some(TeamRef {
            id: TeamId(id),
            label: format!("{id}A"),
        })
    }

    pub fn alliance(color: Color, score: i32, teams: [Option<TeamRef>; 2]) -> Alliance {
        Alliance {
            color,
            score,
            teams: teams.into(),
        }
    }

    /// Teams `red` against teams `blue` with the given scores.
    pub fn record(
        id: u32,
        red: [u32; 2],
        blue: [u32; 2],
        red_score: i32,
        blue_score: i32,
        start: Option<f64>,
    ) -> MatchRecord {
        MatchRecord {
            id,
            event: 1,
            division: 1,
            alliances: vec![
                alliance(Color::Red, red_score, red.map(team)),
                alliance(Color::Blue, blue_score, blue.map(team)),
            ],
            start: start.map(Instant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::*, *};

    #[test]
    fn decided_match_is_ratable() {
        let record = record(1, [1, 2], [3, 4], 30, 12, None);
        let Ok(Verdict::Ratable(ratable)) = record.verdict() else {
            panic!("expected ratable match");
        };
        assert_eq!(ratable.red[1].id, TeamId(2));
        assert_eq!(ratable.blue[0].label, "3A");
        assert_eq!(ratable.teams().count(), 4);
    }

    #[test]
    fn ties_and_zero_scores_are_invalid() {
        assert_eq!(record(1, [1, 2], [3, 4], 7, 7, None).verdict(), Ok(Verdict::Invalid));
        assert_eq!(record(1, [1, 2], [3, 4], 0, 7, None).verdict(), Ok(Verdict::Invalid));
        assert_eq!(record(1, [1, 2], [3, 4], 7, 0, None).verdict(), Ok(Verdict::Invalid));
    }

    #[test]
    fn empty_slots_are_unresolved() {
        let mut sitting = record(1, [1, 2], [3, 4], 10, 5, None);
        sitting.alliances[1].teams[0] = None;
        assert_eq!(sitting.verdict(), Ok(Verdict::Unresolved));

        let mut short = record(1, [1, 2], [3, 4], 10, 5, None);
        short.alliances[0].teams.truncate(1);
        assert_eq!(short.verdict(), Ok(Verdict::Unresolved));
    }

    #[test]
    fn alliance_order_does_not_matter() {
        let mut swapped = record(1, [1, 2], [3, 4], 10, 5, None);
        swapped.alliances.reverse();
        let Ok(Verdict::Ratable(ratable)) = swapped.verdict() else {
            panic!("expected ratable match");
        };
        assert_eq!(ratable.red_score, 10);
        assert_eq!(ratable.red[0].id, TeamId(1));
    }

    #[test]
    fn duplicate_colors_are_malformed() {
        let mut record = record(1, [1, 2], [3, 4], 10, 5, None);
        record.alliances[1].color = Color::Red;
        assert_eq!(
            record.verdict(),
            Err(MatchError::AllianceColor(Color::Red, 2))
        );
    }

    #[test]
    fn parse_color() {
        assert_eq!("red".parse::<Color>().ok(), Some(Color::Red));
        assert_eq!("blue".parse::<Color>().ok(), Some(Color::Blue));
        assert!("green".parse::<Color>().is_err());
    }
}

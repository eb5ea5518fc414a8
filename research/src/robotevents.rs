use std::{fs::File, io::BufReader, path::Path, str::FromStr};

use allianceskill::{Alliance, Color, Instant, MatchRecord, TeamId, TeamRef};
use chrono::DateTime;
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError, DisplayFromStr};
use tracing::warn;

use crate::LoadError;

#[derive(Deserialize, Debug, Clone)]
pub struct IdInfo {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawAllianceTeam {
    #[serde(default)]
    pub team: Option<IdInfo>,
    #[serde(default)]
    pub sitting: Option<bool>,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct RawAlliance {
    /// `None` if missing or not a known color.
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub color: Option<Color>,
    pub score: i32,
    #[serde(default)]
    pub teams: Vec<RawAllianceTeam>,
}

/// A match as returned by the RobotEvents v2 API and cached in the match
/// snapshot.
#[derive(Deserialize, Debug, Clone)]
pub struct RawMatch {
    pub id: u32,
    pub event: IdInfo,
    pub division: IdInfo,
    #[serde(default)]
    pub round: u32,
    #[serde(default)]
    pub instance: u32,
    #[serde(default)]
    pub matchnum: u32,
    #[serde(default)]
    pub scheduled: Option<String>,
    #[serde(default)]
    pub started: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub scored: bool,
    #[serde(default)]
    pub name: String,
    pub alliances: Vec<RawAlliance>,
}

/// Point in time as formatted by the API, e.g. `2024-01-13T09:12:44-05:00`.
#[derive(Debug, Copy, Clone)]
pub struct ApiDateTime(Instant);

impl FromStr for ApiDateTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ApiDateTime(Instant::from_unix_millis(
            DateTime::parse_from_rfc3339(s)?.timestamp_millis(),
        )))
    }
}

impl From<ApiDateTime> for Instant {
    fn from(ApiDateTime(instant): ApiDateTime) -> Instant {
        instant
    }
}

impl RawMatch {
    /// Actual start time if the match was started, else the scheduled time.
    pub fn start_time(&self) -> Result<Option<Instant>, chrono::ParseError> {
        let Some(time) = [&self.started, &self.scheduled]
            .into_iter()
            .flatten()
            .find(|time| !time.is_empty())
        else {
            return Ok(None);
        };
        Ok(Some(time.parse::<ApiDateTime>()?.into()))
    }

    pub fn into_record(self) -> MatchRecord {
        let start = self.start_time().unwrap_or_else(|err| {
            warn!(
                match_id = self.id,
                event_id = self.event.id,
                "ignoring unparsable match time: {err}"
            );
            None
        });

        let (id, event) = (self.id, self.event.id);
        let alliances = self
            .alliances
            .into_iter()
            .filter_map(|alliance| {
                let Some(color) = alliance.color else {
                    warn!(
                        match_id = id,
                        event_id = event,
                        "dropping alliance without valid color"
                    );
                    return None;
                };
                Some(Alliance {
                    color,
                    score: alliance.score,
                    teams: alliance
                        .teams
                        .into_iter()
                        .map(|slot| {
                            slot.team.map(|team| TeamRef {
                                id: TeamId(team.id),
                                label: team.name,
                            })
                        })
                        .collect(),
                })
            })
            .collect();

        MatchRecord {
            id,
            event,
            division: self.division.id,
            alliances,
            start,
        }
    }
}

/// Parses a snapshot, a JSON array of matches, keeping the order of the
/// array.
pub fn parse_matches(json: &str) -> Result<Vec<MatchRecord>, LoadError> {
    let raw: Vec<RawMatch> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(RawMatch::into_record).collect())
}

pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    let raw: Vec<RawMatch> = serde_json::from_reader(BufReader::new(file))?;
    Ok(raw.into_iter().map(RawMatch::into_record).collect())
}

#[cfg(test)]
mod tests {
    use allianceskill::MatchError;

    use super::*;

    const SNAPSHOT: &str = r#"[
        {
            "id": 51,
            "event": { "id": 7, "name": "Region 4 Qualifier", "code": null },
            "division": { "id": 1, "name": "Division 1", "code": null },
            "round": 2,
            "instance": 1,
            "matchnum": 12,
            "scheduled": "2024-01-13T09:00:00-05:00",
            "started": "2024-01-13T09:30:00-05:00",
            "field": "Field 1",
            "scored": true,
            "name": "Qualifier #12",
            "alliances": [
                {
                    "color": "blue",
                    "score": 41,
                    "teams": [
                        { "team": { "id": 3, "name": "3C", "code": null }, "sitting": false },
                        { "team": { "id": 4, "name": "4D", "code": null }, "sitting": false }
                    ]
                },
                {
                    "color": "red",
                    "score": 17,
                    "teams": [
                        { "team": { "id": 1, "name": "1A", "code": null }, "sitting": false },
                        { "sitting": true }
                    ]
                }
            ]
        },
        {
            "id": 52,
            "event": { "id": 7, "name": "Region 4 Qualifier" },
            "division": { "id": 1, "name": "Division 1" },
            "scheduled": "not a date",
            "alliances": []
        }
    ]"#;

    #[test]
    fn parse_snapshot() {
        let matches = parse_matches(SNAPSHOT).unwrap();
        assert_eq!(matches.len(), 2);

        let first = &matches[0];
        assert_eq!((first.id, first.event, first.division), (51, 7, 1));
        assert_eq!(first.alliances[0].color, Color::Blue);
        assert_eq!(first.alliances[0].score, 41);
        assert_eq!(first.alliances[1].teams[0].as_ref().unwrap().label, "1A");
        assert!(first.alliances[1].teams[1].is_none());

        // 2024-01-13T14:30:00Z
        let expected = Instant::from_unix_millis(1_705_156_200_000);
        assert_eq!(first.start, Some(expected));

        assert_eq!(matches[1].start, None);
    }

    #[test]
    fn falls_back_to_scheduled_time() {
        let raw = RawMatch {
            id: 1,
            event: IdInfo {
                id: 1,
                name: String::new(),
                code: None,
            },
            division: IdInfo {
                id: 1,
                name: String::new(),
                code: None,
            },
            round: 0,
            instance: 0,
            matchnum: 0,
            scheduled: Some("2024-01-13T00:00:00Z".to_owned()),
            started: Some(String::new()),
            field: None,
            scored: false,
            name: String::new(),
            alliances: Vec::new(),
        };
        assert_eq!(
            raw.start_time().unwrap(),
            Some(Instant::from_unix_millis(1_705_104_000_000))
        );
    }

    #[test]
    fn unknown_color_only_spoils_its_match() {
        let json = r#"[
            { "id": 1, "event": { "id": 1 }, "division": { "id": 1 },
              "alliances": [{ "color": "green", "score": 1 }, { "color": "blue", "score": 2 }] },
            { "id": 2, "event": { "id": 1 }, "division": { "id": 1 },
              "alliances": [{ "color": "red", "score": 3 }, { "color": "blue", "score": 2 }] }
        ]"#;
        let matches = parse_matches(json).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].alliances.len(), 1);
        assert_eq!(
            matches[0].verdict(),
            Err(MatchError::AllianceColor(Color::Red, 0))
        );
        assert_eq!(matches[1].alliances.len(), 2);
        assert!(matches[1].verdict().is_ok());
    }
}

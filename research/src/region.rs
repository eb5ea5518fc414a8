use std::{io, path::Path};

use allianceskill::TeamId;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::LoadError;

#[derive(Deserialize, Debug)]
struct AllowedTeam {
    id: u32,
}

/// Reads the IDs of the teams to keep from CSV with an `id` column. Other
/// columns, like the team number, are ignored.
pub fn read_allowed_teams<R: io::Read>(reader: R) -> Result<FxHashSet<TeamId>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut allowed = FxHashSet::default();
    for team in reader.deserialize() {
        let team: AllowedTeam = team?;
        allowed.insert(TeamId(team.id));
    }
    Ok(allowed)
}

pub fn load_allowed_teams(path: &Path) -> Result<FxHashSet<TeamId>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    read_allowed_teams(file)
}

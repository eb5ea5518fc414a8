use tracing::{debug, trace, warn};

use crate::{
    MatchError, MatchRecord, Rating, RatingStore, RatingSystem, TeamId, UpdateError, Verdict,
};

/// What happened to a single match during replay.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    Applied,
    /// Tie or zero score.
    SkippedInvalid,
    /// Some roster slot is empty.
    SkippedUnresolved,
    /// The update produced non-finite values and was discarded.
    RolledBackCorrupt,
}

#[derive(Debug, Clone)]
pub struct ReplayConfig {
    pub rating_system: RatingSystem,
    /// Number of passes over the match list. Later passes start from the
    /// ratings of the previous one.
    pub passes: u32,
}

impl Default for ReplayConfig {
    fn default() -> ReplayConfig {
        ReplayConfig {
            rating_system: RatingSystem::new(),
            passes: 10,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PassStats {
    pub applied: u64,
    pub invalid: u64,
    pub unresolved: u64,
    pub rolled_back: u64,
    pub malformed: u64,
}

impl PassStats {
    fn record(&mut self, outcome: Outcome) {
        *match outcome {
            Outcome::Applied => &mut self.applied,
            Outcome::SkippedInvalid => &mut self.invalid,
            Outcome::SkippedUnresolved => &mut self.unresolved,
            Outcome::RolledBackCorrupt => &mut self.rolled_back,
        } += 1;
    }

    pub fn total(&self) -> u64 {
        self.applied + self.invalid + self.unresolved + self.rolled_back + self.malformed
    }
}

/// Rates the matches from scratch, running `config.passes` passes.
pub fn replay(matches: &[MatchRecord], config: &ReplayConfig) -> RatingStore {
    let mut store = RatingStore::new();
    for pass in 0..config.passes {
        let stats = replay_pass(&mut store, &config.rating_system, matches);
        debug!(pass, ?stats, teams = store.len(), "replay pass done");
    }
    store
}

/// Folds every match of the list into the store, in list order. Decay does
/// not carry over from a previous pass.
pub fn replay_pass(
    store: &mut RatingStore,
    rating_system: &RatingSystem,
    matches: &[MatchRecord],
) -> PassStats {
    store.clear_last_rated();

    let mut stats = PassStats::default();
    for record in matches {
        match replay_match(store, rating_system, record) {
            Ok(outcome) => stats.record(outcome),
            Err(err) => {
                warn!(
                    match_id = record.id,
                    event_id = record.event,
                    "skipping malformed match: {err}"
                );
                stats.malformed += 1;
            }
        }
    }
    stats
}

pub fn replay_match(
    store: &mut RatingStore,
    rating_system: &RatingSystem,
    record: &MatchRecord,
) -> Result<Outcome, MatchError> {
    let ratable = match record.verdict()? {
        Verdict::Ratable(ratable) => ratable,
        Verdict::Invalid => {
            trace!(match_id = record.id, "tie or zero score");
            return Ok(Outcome::SkippedInvalid);
        }
        Verdict::Unresolved => {
            trace!(match_id = record.id, "incomplete roster");
            return Ok(Outcome::SkippedUnresolved);
        }
    };

    for team in ratable.teams() {
        store.set_label(team.id, &team.label);
    }

    let red = ratable.red.map(|team| team.id);
    let blue = ratable.blue.map(|team| team.id);
    let prepare = |store: &mut RatingStore, team: TeamId| -> Rating {
        let rating = *store.get_or_create(team, rating_system);
        match (record.start, store.last_rated(team)) {
            (Some(now), Some(last)) => rating.decay(now - last, rating_system.drift()),
            _ => rating,
        }
    };
    let red_ratings = red.map(|team| prepare(&mut *store, team));
    let blue_ratings = blue.map(|team| prepare(&mut *store, team));

    match rating_system.update_ratings(
        &red_ratings,
        &blue_ratings,
        ratable.red_score,
        ratable.blue_score,
    ) {
        Ok((new_red, new_blue)) => {
            for (team, rating) in red.into_iter().zip(new_red).chain(blue.into_iter().zip(new_blue)) {
                store.set(team, rating);
                if let Some(now) = record.start {
                    store.set_last_rated(team, now);
                }
            }
            Ok(Outcome::Applied)
        }
        Err(UpdateError::NonFinite) => {
            warn!(
                match_id = record.id,
                event_id = record.event,
                "discarding non-finite rating update"
            );
            Ok(Outcome::RolledBackCorrupt)
        }
    }
}

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Instant, Rating, RatingSystem, TeamId};

/// Ratings, display labels and last-rated times of every team seen so far.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    ratings: FxHashMap<TeamId, Rating>,
    last_rated: FxHashMap<TeamId, Instant>,
    labels: FxHashMap<TeamId, Box<str>>,
    by_label: FxHashMap<Box<str>, TeamId>,
}

impl RatingStore {
    pub fn new() -> RatingStore {
        RatingStore::default()
    }

    pub fn get(&self, team: TeamId) -> Option<&Rating> {
        self.ratings.get(&team)
    }

    pub fn get_or_create(&mut self, team: TeamId, rating_system: &RatingSystem) -> &mut Rating {
        self.ratings
            .entry(team)
            .or_insert_with(|| rating_system.new_rating())
    }

    /// Current rating of the team, or the prior if it was never rated.
    pub fn rating_or_default(&self, team: TeamId, rating_system: &RatingSystem) -> Rating {
        self.get(team)
            .copied()
            .unwrap_or_else(|| rating_system.new_rating())
    }

    pub fn set(&mut self, team: TeamId, rating: Rating) {
        self.ratings.insert(team, rating);
    }

    pub fn last_rated(&self, team: TeamId) -> Option<Instant> {
        self.last_rated.get(&team).copied()
    }

    pub fn set_last_rated(&mut self, team: TeamId, at: Instant) {
        self.last_rated.insert(team, at);
    }

    pub fn clear_last_rated(&mut self) {
        self.last_rated.clear();
    }

    pub fn label(&self, team: TeamId) -> Option<&str> {
        self.labels.get(&team).map(|label| &**label)
    }

    /// Records the display label of a team. The most recent label wins, in
    /// both directions.
    pub fn set_label(&mut self, team: TeamId, label: &str) {
        if self.label(team) != Some(label) {
            if let Some(previous) = self.labels.insert(team, label.into()) {
                if self.by_label.get(&previous) == Some(&team) {
                    self.by_label.remove(&previous);
                    if let Some((&holder, _)) =
                        self.labels.iter().find(|(_, held)| **held == previous)
                    {
                        self.by_label.insert(previous, holder);
                    }
                }
            }
        }
        if self.by_label.get(label) != Some(&team) {
            self.by_label.insert(label.into(), team);
        }
    }

    pub fn resolve_label(&self, label: &str) -> Option<TeamId> {
        self.by_label.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &Rating)> {
        self.ratings.iter().map(|(&team, rating)| (team, rating))
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Forgets all ratings and last-rated times. Labels are kept.
    pub fn reset(&mut self) {
        self.ratings.clear();
        self.last_rated.clear();
    }

    /// Drops every team that is not in `allowed`, for example to restrict the
    /// rankings to a region after rating a wider pool.
    pub fn retain_teams(&mut self, allowed: &FxHashSet<TeamId>) {
        self.ratings.retain(|team, _| allowed.contains(team));
        self.last_rated.retain(|team, _| allowed.contains(team));
        self.labels.retain(|team, _| allowed.contains(team));
        self.by_label.retain(|_, team| allowed.contains(team));
    }
}

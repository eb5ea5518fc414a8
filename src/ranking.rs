use std::{cmp::Reverse, io, io::Write};

use ordered_float::OrderedFloat;

use crate::{Instant, Ordinal, RatingStore, RatingSystem, TeamId};

#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    /// 1-based position.
    pub rank: usize,
    pub team: TeamId,
    pub label: String,
    pub ordinal: Ordinal,
}

/// Orders all rated teams by descending ordinal.
///
/// If `now` is given, each rating is first decayed from the time the team
/// was last rated to `now`, so that long idle teams reflect the accumulated
/// drift. The store itself is not modified.
pub fn rankings(
    store: &RatingStore,
    rating_system: &RatingSystem,
    now: Option<Instant>,
) -> Vec<RankingEntry> {
    let mut entries: Vec<_> = store
        .iter()
        .map(|(team, rating)| {
            let rating = match (now, store.last_rated(team)) {
                (Some(now), Some(last)) => rating.decay(now - last, rating_system.drift()),
                _ => *rating,
            };
            RankingEntry {
                rank: 0,
                team,
                label: store
                    .label(team)
                    .map_or_else(|| team.to_string(), str::to_owned),
                ordinal: rating_system.ordinal(&rating),
            }
        })
        .collect();

    entries.sort_by_key(|entry| (Reverse(OrderedFloat(f64::from(entry.ordinal))), entry.team));

    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    entries
}

/// Writes a comma separated ranking table, preceded by `# `-prefixed header
/// lines. Writes at most `limit` entries, if given.
pub fn write_rankings<W: Write>(
    mut writer: W,
    header_lines: &[String],
    entries: &[RankingEntry],
    limit: Option<usize>,
) -> io::Result<()> {
    for line in header_lines {
        writeln!(writer, "# {line}")?;
    }
    writeln!(writer)?;
    writeln!(writer, "rank, team, skill")?;

    for entry in entries.iter().take(limit.unwrap_or(usize::MAX)) {
        writeln!(
            writer,
            "{}, {}, {}",
            entry.rank,
            entry.label,
            f64::from(entry.ordinal)
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Drift, Rating};

    fn store(ratings: &[(u32, f64, f64)]) -> RatingStore {
        let mut store = RatingStore::new();
        for &(id, mu, sigma) in ratings {
            store.set(TeamId(id), Rating { mu, sigma });
            store.set_label(TeamId(id), &format!("{id}A"));
        }
        store
    }

    #[test]
    fn higher_ordinal_ranks_first() {
        let rating_system = RatingSystem::new();
        // Team 2 has the higher mean but is much less certain.
        let store = store(&[(1, 100.0, 5.0), (2, 110.0, 10.0), (3, 60.0, 1.0)]);

        let entries = rankings(&store, &rating_system, None);
        let order: Vec<_> = entries.iter().map(|entry| entry.team).collect();
        assert_eq!(order, [TeamId(1), TeamId(2), TeamId(3)]);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[2].rank, 3);
        assert_eq!(entries[0].ordinal, Ordinal(85.0));

        for pair in entries.windows(2) {
            assert!(pair[0].ordinal >= pair[1].ordinal);
        }
    }

    #[test]
    fn decay_to_now_leaves_store_alone() {
        let rating_system = RatingSystem::builder()
            .drift(Drift {
                mu_per_hour: 0.0,
                sigma_per_hour: 1.0,
            })
            .build();
        let mut store = store(&[(1, 100.0, 5.0), (2, 95.0, 5.0)]);
        store.set_last_rated(TeamId(1), Instant(0.0));
        store.set_last_rated(TeamId(2), Instant(10.0));

        let entries = rankings(&store, &rating_system, Some(Instant(10.0)));
        assert_eq!(entries[0].team, TeamId(2));
        assert_eq!(entries[1].ordinal, Ordinal(55.0));
        assert_eq!(store.get(TeamId(1)), Some(&Rating { mu: 100.0, sigma: 5.0 }));
    }

    #[test]
    fn write_report() {
        let rating_system = RatingSystem::new();
        let store = store(&[(1, 100.0, 5.0), (2, 95.0, 5.0), (3, 90.0, 5.0)]);
        let entries = rankings(&store, &rating_system, None);

        let mut out = Vec::new();
        write_rankings(&mut out, &["Region".to_owned()], &entries, Some(2)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "# Region\n\nrank, team, skill\n1, 1A, 85\n2, 2A, 80\n"
        );
    }
}

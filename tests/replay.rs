use allianceskill::{
    evaluate_accuracy, rankings, replay, Alliance, Color, Drift, Instant, MatchRecord,
    RatingSystem, ReplayConfig, TeamId, TeamRef,
};

fn alliance(color: Color, score: i32, teams: [u32; 2]) -> Alliance {
    Alliance {
        color,
        score,
        teams: teams
            .into_iter()
            .map(|id| {
                Some(TeamRef {
                    id: TeamId(id),
                    label: format!("{id}X"),
                })
            })
            .collect(),
    }
}

fn record(id: u32, red: [u32; 2], blue: [u32; 2], scores: (i32, i32), hours: f64) -> MatchRecord {
    MatchRecord {
        id,
        event: 100,
        division: 1,
        alliances: vec![
            alliance(Color::Red, scores.0, red),
            alliance(Color::Blue, scores.1, blue),
        ],
        start: Some(Instant(hours)),
    }
}

fn history() -> Vec<MatchRecord> {
    vec![
        record(1, [1, 2], [3, 4], (60, 40), 10.0),
        record(2, [5, 6], [7, 8], (35, 50), 11.0),
        record(3, [1, 5], [4, 8], (70, 30), 20.0),
        record(4, [2, 7], [3, 6], (45, 55), 21.0),
    ]
}

fn config(passes: u32) -> ReplayConfig {
    ReplayConfig {
        rating_system: RatingSystem::builder()
            .mu(90.0)
            .sigma(30.0)
            .tau(0.3)
            .drift(Drift::NONE)
            .build(),
        passes,
    }
}

#[test]
fn single_pass_golden_values() {
    let store = replay(&history(), &config(1));

    let expected = [
        (1, 103.996_352_268_242_23, 28.895_347_063_739_67),
        (2, 88.607_883_620_333_44, 28.922_588_179_282_076),
        (3, 91.392_116_379_666_56, 28.922_588_179_282_076),
        (4, 76.003_647_731_757_77, 28.895_347_063_739_67),
        (5, 89.853_430_991_260_2, 28.895_347_063_739_67),
        (6, 91.392_116_379_666_56, 28.922_588_179_282_076),
        (7, 88.607_883_620_333_44, 28.922_588_179_282_076),
        (8, 90.146_569_008_739_8, 28.895_347_063_739_67),
    ];

    assert_eq!(store.len(), expected.len());
    for (id, mu, sigma) in expected {
        let rating = store.get(TeamId(id)).expect("rated team");
        assert!((rating.mu - mu).abs() < 1e-9, "team {id}: mu {}", rating.mu);
        assert!(
            (rating.sigma - sigma).abs() < 1e-9,
            "team {id}: sigma {}",
            rating.sigma
        );
        assert_eq!(store.label(TeamId(id)), Some(format!("{id}X").as_str()));
    }
}

#[test]
fn replay_is_reproducible() {
    let first = replay(&history(), &config(5));
    let second = replay(&history(), &config(5));

    for id in 1..=8 {
        assert_eq!(first.get(TeamId(id)), second.get(TeamId(id)));
    }
}

#[test]
fn backtest_counts_every_ratable_match() {
    let mut matches = history();
    matches.push(record(5, [1, 2], [7, 8], (20, 20), 30.0));
    matches.push(record(6, [3, 4], [5, 6], (0, 20), 31.0));

    let config = config(10);
    let store = replay(&matches, &config);
    let accuracy = evaluate_accuracy(&store, &config.rating_system, &matches);

    assert_eq!(accuracy.evaluated, 4);
    assert!(accuracy.correct <= accuracy.evaluated);
}

#[test]
fn rankings_follow_ordinal() {
    let config = config(1);
    let store = replay(&history(), &config);
    let entries = rankings(&store, &config.rating_system, None);

    assert_eq!(entries.len(), 8);
    assert_eq!(entries[0].team, TeamId(1));
    assert_eq!(entries[7].team, TeamId(4));
    for pair in entries.windows(2) {
        assert!(pair[0].ordinal >= pair[1].ordinal);
        assert_eq!(pair[0].rank + 1, pair[1].rank);
    }
}

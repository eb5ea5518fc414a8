use std::error::Error as StdError;

use allianceskill::{predict, replay};
use allianceskill_research::{
    init_tracing,
    opt::{ReplayOpt, SystemOpt},
    robotevents::load_matches,
};
use clap::Parser as _;
use tracing::warn;

/// Rates the snapshot, then prints the probability that the first alliance
/// beats the second, or -1 if a team is unknown.
#[derive(clap::Parser)]
struct Opt {
    #[clap(flatten)]
    replay: ReplayOpt,
    #[clap(flatten)]
    system: SystemOpt,
    /// Team numbers: two of the first alliance, then two of the second.
    #[clap(num_args = 4, required = true, value_names = ["FIRST_1", "FIRST_2", "SECOND_1", "SECOND_2"])]
    teams: Vec<String>,
}

fn main() -> Result<(), Box<dyn StdError>> {
    init_tracing();
    let opt = Opt::parse();

    let config = opt.replay.config(&opt.system);
    let store = replay(&load_matches(&opt.replay.matches)?, &config);

    let teams: Vec<String> = opt.teams.iter().map(|team| team.to_uppercase()).collect();
    let first = [teams[0].as_str(), teams[1].as_str()];
    let second = [teams[2].as_str(), teams[3].as_str()];

    match predict(&store, &config.rating_system, first, second) {
        Ok(score) => println!(
            "{} {} has a {:.2}% chance of winning against {} {}",
            first[0],
            first[1],
            score.value() * 100.0,
            second[0],
            second[1]
        ),
        Err(err) => {
            warn!("{err}");
            println!("-1");
        }
    }

    Ok(())
}

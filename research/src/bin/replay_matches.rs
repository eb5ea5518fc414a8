use std::{
    error::Error as StdError,
    fs::File,
    io,
    io::{BufWriter, Write as _},
    path::PathBuf,
};

use allianceskill::{evaluate_accuracy, rankings, replay, write_rankings, Instant};
use allianceskill_research::{
    init_tracing,
    opt::{ReplayOpt, SystemOpt},
    region::load_allowed_teams,
    robotevents::load_matches,
};
use chrono::Utc;
use clap::Parser as _;
use tracing::info;

#[derive(clap::Parser)]
struct Opt {
    #[clap(flatten)]
    replay: ReplayOpt,
    #[clap(flatten)]
    system: SystemOpt,
    /// First header line of the report.
    #[clap(long, default_value = "All Teams")]
    title: String,
    #[clap(long, default_value = "rankings.csv")]
    output: PathBuf,
    /// Number of teams printed to stdout. The output file has all of them.
    #[clap(long, default_value = "50")]
    top: usize,
    /// Apply the drift accumulated since each team's last match.
    #[clap(long)]
    decay_to_now: bool,
}

fn main() -> Result<(), Box<dyn StdError>> {
    init_tracing();
    let opt = Opt::parse();

    let matches = load_matches(&opt.replay.matches)?;
    info!(matches = matches.len(), path = %opt.replay.matches.display(), "loaded snapshot");

    let config = opt.replay.config(&opt.system);
    let mut store = replay(&matches, &config);

    let accuracy = evaluate_accuracy(&store, &config.rating_system, &matches);
    let summary = format!(
        "Accuracy: {:.2}% ({}/{} matches guessed correct)",
        accuracy.ratio() * 100.0,
        accuracy.correct,
        accuracy.evaluated
    );
    info!(
        correct = accuracy.correct,
        evaluated = accuracy.evaluated,
        avg_deviance = accuracy.avg_deviance(),
        teams = store.len(),
        "backtest done"
    );

    if let Some(path) = &opt.replay.allowed_teams {
        let allowed = load_allowed_teams(path)?;
        store.retain_teams(&allowed);
        info!(teams = store.len(), "pruned to allowed teams");
    }

    let now = opt
        .decay_to_now
        .then(|| Instant::from_unix_millis(Utc::now().timestamp_millis()));
    let entries = rankings(&store, &config.rating_system, now);

    let header = [
        opt.title,
        summary,
        format!("Average deviance: {:.5}", accuracy.avg_deviance()),
    ];

    write_rankings(io::stdout().lock(), &header, &entries, Some(opt.top))?;

    let mut file = BufWriter::new(File::create(&opt.output)?);
    write_rankings(&mut file, &header, &entries, None)?;
    file.flush()?;

    Ok(())
}

use std::{error::Error as StdError, fs::File, io, io::Write};

use allianceskill::{
    evaluate_accuracy, rankings, replay, Accuracy, Drift, MatchRecord, RatingStore, RatingSystem,
    ReplayConfig,
};
use allianceskill_research::{init_tracing, robotevents::load_matches};
use clap::Parser as _;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use tracing::info;
use uuid::Uuid;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct Experiment {
    config: ReplayConfig,
    store: RatingStore,
    accuracy: Accuracy,
}

impl Experiment {
    fn new(config: ReplayConfig) -> Experiment {
        Experiment {
            config,
            store: RatingStore::default(),
            accuracy: Accuracy::default(),
        }
    }

    fn sort_key(&self) -> impl Ord {
        (
            OrderedFloat(self.accuracy.ratio()),
            OrderedFloat(-self.accuracy.avg_deviance()),
        )
    }

    fn run(&mut self, matches: &[MatchRecord]) {
        self.store = replay(matches, &self.config);
        self.accuracy = evaluate_accuracy(&self.store, &self.config.rating_system, matches);
    }
}

fn write_report<W: Write>(mut writer: W, experiments: &[Experiment]) -> io::Result<()> {
    writeln!(
        writer,
        "passes,mu,sigma,beta,tau,prevent_sigma_increase,mu_drift,sigma_drift,correct,evaluated,accuracy,avg_deviance"
    )?;

    for experiment in experiments {
        let rating_system = &experiment.config.rating_system;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            experiment.config.passes,
            rating_system.mu(),
            rating_system.sigma(),
            rating_system.beta(),
            rating_system.tau(),
            u8::from(rating_system.prevent_sigma_increase()),
            rating_system.drift().mu_per_hour,
            rating_system.drift().sigma_per_hour,
            experiment.accuracy.correct,
            experiment.accuracy.evaluated,
            experiment.accuracy.ratio(),
            experiment.accuracy.avg_deviance(),
        )?;
    }

    writeln!(writer, "# ---")?;

    if let Some(best) = experiments.last() {
        for entry in rankings(&best.store, &best.config.rating_system, None)
            .iter()
            .take(10)
        {
            writeln!(
                writer,
                "# Best experiment rank {}: {} (ordinal: {:.2})",
                entry.rank,
                entry.label,
                f64::from(entry.ordinal)
            )?;
        }
        writeln!(writer, "# Distinct teams: {}", best.store.len())?;
    }

    writeln!(writer, "# ---")?;

    Ok(())
}

#[derive(clap::Parser)]
struct Opt {
    #[clap(long, default_value = "matches.json")]
    matches: std::path::PathBuf,
    #[clap(long, value_delimiter = ',', num_args = 1.., default_value = "1,5,10")]
    passes: Vec<u32>,
    #[clap(long, value_delimiter = ',', num_args = 1.., default_value = "90")]
    mu: Vec<f64>,
    #[clap(long, value_delimiter = ',', num_args = 1.., default_value = "30")]
    sigma: Vec<f64>,
    #[clap(long, value_delimiter = ',', num_args = 1.., default_value = "0.1,0.3,1")]
    tau: Vec<f64>,
    #[clap(long, value_delimiter = ',', num_args = 1.., default_value = "0,1")]
    prevent_sigma_increase: Vec<u8>,
    #[clap(long, value_delimiter = ',', num_args = 1.., allow_negative_numbers = true, default_value = "0,-0.00146")]
    mu_drift: Vec<f64>,
    #[clap(long, value_delimiter = ',', num_args = 1.., allow_negative_numbers = true, default_value = "0,-0.00042")]
    sigma_drift: Vec<f64>,
}

fn main() -> Result<(), Box<dyn StdError>> {
    init_tracing();
    let opt = Opt::parse();

    let process_uuid = Uuid::now_v7();

    let mut experiments = Vec::new();

    for &passes in &opt.passes {
        for &mu in &opt.mu {
            for &sigma in &opt.sigma {
                for &tau in &opt.tau {
                    for &prevent_sigma_increase in &opt.prevent_sigma_increase {
                        for &mu_drift in &opt.mu_drift {
                            for &sigma_drift in &opt.sigma_drift {
                                experiments.push(Experiment::new(ReplayConfig {
                                    rating_system: RatingSystem::builder()
                                        .mu(mu)
                                        .sigma(sigma)
                                        .tau(tau)
                                        .prevent_sigma_increase(prevent_sigma_increase != 0)
                                        .drift(Drift {
                                            mu_per_hour: mu_drift,
                                            sigma_per_hour: sigma_drift,
                                        })
                                        .build(),
                                    passes,
                                }));
                            }
                        }
                    }
                }
            }
        }
    }

    let matches = load_matches(&opt.matches)?;
    info!(
        experiments = experiments.len(),
        matches = matches.len(),
        "running parallel experiments"
    );

    experiments
        .par_iter_mut()
        .for_each(|experiment| experiment.run(&matches));

    experiments.sort_by_key(Experiment::sort_key);

    write_report(
        File::create(format!("report-{}.csv", process_uuid))?,
        &experiments,
    )?;
    write_report(io::stdout(), &experiments)?;

    Ok(())
}

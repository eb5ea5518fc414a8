use std::path::PathBuf;

use allianceskill::{Drift, RatingSystem, ReplayConfig};

/// Rating system parameters shared by the drivers.
#[derive(clap::Args, Debug, Clone)]
pub struct SystemOpt {
    /// Prior mean of a new team.
    #[clap(long, default_value = "90")]
    pub mu: f64,
    /// Prior uncertainty of a new team.
    #[clap(long, default_value = "30")]
    pub sigma: f64,
    /// Performance noise, defaults to half the prior uncertainty.
    #[clap(long)]
    pub beta: Option<f64>,
    #[clap(long, default_value = "0.3")]
    pub tau: f64,
    #[clap(long)]
    pub prevent_sigma_increase: bool,
    /// Number of standard deviations subtracted from the mean for rankings.
    #[clap(long, default_value = "3")]
    pub z: f64,
    /// Change of the mean per idle hour.
    #[clap(long, default_value = "-0.00146", allow_negative_numbers = true)]
    pub mu_drift: f64,
    /// Change of the uncertainty per idle hour.
    #[clap(long, default_value = "-0.00042", allow_negative_numbers = true)]
    pub sigma_drift: f64,
}

impl SystemOpt {
    pub fn rating_system(&self) -> RatingSystem {
        let mut builder = RatingSystem::builder();
        builder
            .mu(self.mu)
            .sigma(self.sigma)
            .tau(self.tau)
            .prevent_sigma_increase(self.prevent_sigma_increase)
            .z(self.z)
            .drift(Drift {
                mu_per_hour: self.mu_drift,
                sigma_per_hour: self.sigma_drift,
            });
        if let Some(beta) = self.beta {
            builder.beta(beta);
        }
        builder.build()
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReplayOpt {
    /// Cached match snapshot, a JSON array of RobotEvents matches.
    #[clap(long, default_value = "matches.json")]
    pub matches: PathBuf,
    #[clap(long, default_value = "10")]
    pub passes: u32,
    /// CSV file with an `id` column. Teams not listed are dropped from the
    /// rankings after rating.
    #[clap(long)]
    pub allowed_teams: Option<PathBuf>,
}

impl ReplayOpt {
    pub fn config(&self, system: &SystemOpt) -> ReplayConfig {
        ReplayConfig {
            rating_system: system.rating_system(),
            passes: self.passes,
        }
    }
}

use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::{Drift, Ordinal, Rating, Score};

#[derive(Debug, Clone)]
pub struct RatingSystemBuilder {
    mu: f64,
    sigma: f64,
    beta: Option<f64>,

    tau: f64,
    prevent_sigma_increase: bool,

    z: f64,
    kappa: f64,

    drift: Drift,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            mu: 90.0,
            sigma: 30.0,
            beta: None,

            tau: 0.3,
            prevent_sigma_increase: false,

            z: 3.0,
            kappa: 0.0001,

            drift: Drift::NONE,
        }
    }

    pub fn mu(&mut self, mu: f64) -> &mut Self {
        assert!(mu.is_finite());
        self.mu = mu;
        self
    }

    pub fn sigma(&mut self, sigma: f64) -> &mut Self {
        assert!(sigma > 0.0 && sigma.is_finite());
        self.sigma = sigma;
        self
    }

    /// Performance noise. Defaults to half the prior uncertainty.
    pub fn beta(&mut self, beta: f64) -> &mut Self {
        assert!(beta > 0.0 && beta.is_finite());
        self.beta = Some(beta);
        self
    }

    pub fn tau(&mut self, tau: f64) -> &mut Self {
        assert!(tau >= 0.0);
        self.tau = tau;
        self
    }

    pub fn prevent_sigma_increase(&mut self, prevent_sigma_increase: bool) -> &mut Self {
        self.prevent_sigma_increase = prevent_sigma_increase;
        self
    }

    pub fn z(&mut self, z: f64) -> &mut Self {
        assert!(!z.is_nan());
        self.z = z;
        self
    }

    pub fn kappa(&mut self, kappa: f64) -> &mut Self {
        assert!(kappa > 0.0 && kappa <= 1.0);
        self.kappa = kappa;
        self
    }

    pub fn drift(&mut self, drift: Drift) -> &mut Self {
        assert!(!drift.mu_per_hour.is_nan());
        assert!(!drift.sigma_per_hour.is_nan());
        self.drift = drift;
        self
    }

    pub fn build(&self) -> RatingSystem {
        RatingSystem {
            mu: self.mu,
            sigma: self.sigma,
            beta: self.beta.unwrap_or(self.sigma / 2.0),

            tau: self.tau,
            prevent_sigma_increase: self.prevent_sigma_increase,

            z: self.z,
            kappa: self.kappa,

            drift: self.drift,
        }
    }
}

/// Plackett-Luce flavored Weng-Lin rating system for matches between two
/// alliances of two teams.
#[derive(Debug, Clone)]
pub struct RatingSystem {
    mu: f64,
    sigma: f64,
    beta: f64,

    tau: f64,
    prevent_sigma_increase: bool,

    z: f64,
    kappa: f64,

    drift: Drift,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum UpdateError {
    #[error("rating update produced a non-finite ordinal")]
    NonFinite,
}

/// Aggregate of the two members of an alliance.
#[derive(Debug, Copy, Clone)]
struct AllianceStrength {
    mu: f64,
    sigma_sq: f64,
}

impl AllianceStrength {
    fn new(alliance: &[Rating; 2]) -> AllianceStrength {
        AllianceStrength {
            mu: alliance[0].mu + alliance[1].mu,
            sigma_sq: alliance[0].sigma_sq() + alliance[1].sigma_sq(),
        }
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().build()
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn prevent_sigma_increase(&self) -> bool {
        self.prevent_sigma_increase
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    pub fn drift(&self) -> Drift {
        self.drift
    }

    pub fn new_rating(&self) -> Rating {
        Rating {
            mu: self.mu,
            sigma: self.sigma,
        }
    }

    pub fn ordinal(&self, rating: &Rating) -> Ordinal {
        Ordinal(rating.mu - self.z * rating.sigma)
    }

    /// Probability that the first alliance outscores the second.
    pub fn win_probability(&self, first: &[Rating; 2], second: &[Rating; 2]) -> Score {
        let first = AllianceStrength::new(first);
        let second = AllianceStrength::new(second);

        let spread = (2.0 * self.beta * self.beta + first.sigma_sq + second.sigma_sq).sqrt();
        Score(Normal::standard().cdf((first.mu - second.mu) / spread))
    }

    /// Updates the ratings of all four teams after a match in which the
    /// first alliance scored `first_points` and the second alliance scored
    /// `second_points`.
    ///
    /// The inputs are left untouched. If the update breaks down numerically
    /// an error is returned and the previous ratings remain valid.
    pub fn update_ratings(
        &self,
        first: &[Rating; 2],
        second: &[Rating; 2],
        first_points: i32,
        second_points: i32,
    ) -> Result<([Rating; 2], [Rating; 2]), UpdateError> {
        let tau_sq = self.tau * self.tau;
        let inflate = |rating: &Rating| Rating {
            mu: rating.mu,
            sigma: (rating.sigma_sq() + tau_sq).sqrt(),
        };

        let alliances = [first.each_ref().map(inflate), second.each_ref().map(inflate)];
        let points = [first_points, second_points];
        let strengths = alliances.each_ref().map(AllianceStrength::new);

        let beta_sq = self.beta * self.beta;
        let c = strengths
            .iter()
            .map(|strength| strength.sigma_sq + beta_sq)
            .sum::<f64>()
            .sqrt();
        let exp = strengths.map(|strength| (strength.mu / c).exp());

        // Sum over alliances placed no better than q, and number of
        // alliances sharing the place of q.
        let sum_q = [0, 1].map(|q| {
            (0..2)
                .filter(|&i| points[i] <= points[q])
                .map(|i| exp[i])
                .sum::<f64>()
        });
        let ties = [0, 1].map(|q| (0..2).filter(|&i| points[i] == points[q]).count() as f64);

        let mut updated = alliances;
        for i in 0..2 {
            let mut omega = 0.0;
            let mut delta = 0.0;
            for q in (0..2).filter(|&q| points[q] >= points[i]) {
                let quotient = exp[i] / sum_q[q];
                omega += (if i == q { 1.0 - quotient } else { -quotient }) / ties[q];
                delta += quotient * (1.0 - quotient) / ties[q];
            }

            let sigma_sq = strengths[i].sigma_sq;
            let gamma = sigma_sq.sqrt() / c;
            let team_omega = omega * sigma_sq / c;
            let team_delta = gamma * delta * sigma_sq / (c * c);

            for rating in &mut updated[i] {
                let share = rating.sigma_sq() / sigma_sq;
                rating.mu += share * team_omega;
                rating.sigma *= f64::max(1.0 - share * team_delta, self.kappa).sqrt();
            }
        }

        if self.prevent_sigma_increase {
            for (alliance, previous) in updated.iter_mut().zip([first, second]) {
                for (rating, previous) in alliance.iter_mut().zip(previous) {
                    rating.sigma = f64::min(rating.sigma, previous.sigma);
                }
            }
        }

        if updated
            .iter()
            .flatten()
            .any(|rating| !self.ordinal(rating).is_finite())
        {
            return Err(UpdateError::NonFinite);
        }

        let [first, second] = updated;
        Ok((first, second))
    }
}

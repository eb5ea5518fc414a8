use crate::instant::Hours;

/// Lower bound for the uncertainty of a rating after decay.
pub const MIN_SIGMA: f64 = 1e-4;

/// Belief about the skill of a single team.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rating {
    /// Estimated skill. Higher is better. The sum over the members of an
    /// alliance is the strength of the alliance.
    pub mu: f64,
    /// Uncertainty in the estimate. Always positive. Teams with a high
    /// uncertainty move more with every match.
    pub sigma: f64,
}

impl Rating {
    /// Drifts the rating over an idle period. Time elapsed out of order
    /// (zero or negative) leaves the rating unchanged.
    #[must_use]
    pub fn decay(&self, elapsed: Hours, drift: Drift) -> Rating {
        if !elapsed.is_positive() {
            return *self;
        }

        let Hours(hours) = elapsed;
        Rating {
            mu: self.mu + drift.mu_per_hour * hours,
            sigma: f64::max(self.sigma + drift.sigma_per_hour * hours, MIN_SIGMA),
        }
    }

    #[inline]
    pub(crate) fn sigma_sq(&self) -> f64 {
        self.sigma * self.sigma
    }
}

/// Signed rates at which mean and uncertainty drift between matches.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Drift {
    pub mu_per_hour: f64,
    pub sigma_per_hour: f64,
}

impl Drift {
    pub const NONE: Drift = Drift {
        mu_per_hour: 0.0,
        sigma_per_hour: 0.0,
    };
}

/// Conservative skill estimate used to rank teams. Higher is better.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ordinal(pub f64);

impl From<Ordinal> for f64 {
    #[inline]
    fn from(Ordinal(ordinal): Ordinal) -> f64 {
        ordinal
    }
}

impl Ordinal {
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

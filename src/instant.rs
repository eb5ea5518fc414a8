use std::ops::Sub;

/// An instant in time, measured in hours since the Unix epoch.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Default)]
pub struct Instant(pub f64);

impl Instant {
    const MILLIS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;

    #[inline]
    pub fn from_unix_millis(millis: i64) -> Instant {
        Instant(millis as f64 / Instant::MILLIS_PER_HOUR)
    }
}

impl Sub for Instant {
    type Output = Hours;

    #[inline]
    fn sub(self, rhs: Instant) -> Hours {
        Hours(self.0 - rhs.0)
    }
}

/// Number of hours between two instants in time. Negative when the instants
/// are out of chronological order.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Default)]
pub struct Hours(pub f64);

impl Hours {
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

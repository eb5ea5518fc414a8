#![no_main]

use allianceskill::{Rating, RatingSystem, UpdateError};
use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary)]
struct ArbitraryRating {
    mu: f64,
    sigma: f64,
}

impl ArbitraryRating {
    fn into_clamped(self) -> Option<Rating> {
        if self.mu.is_nan() || self.sigma.is_nan() {
            None
        } else {
            Some(Rating {
                mu: self.mu.clamp(-10000.0, 10000.0),
                sigma: self.sigma.clamp(0.0001, 1000.0),
            })
        }
    }
}

#[derive(Arbitrary)]
struct Encounter {
    first: [ArbitraryRating; 2],
    second: [ArbitraryRating; 2],
    first_points: i32,
    second_points: i32,
    tau: f64,
}

fn assert_rating(rating: &Rating) {
    assert!(rating.mu.is_finite());
    assert!(rating.sigma.is_finite());
    assert!(rating.sigma > 0.0);
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(encounter) = Encounter::arbitrary(&mut u) else {
        return;
    };
    let [Some(a), Some(b)] = encounter.first.map(ArbitraryRating::into_clamped) else {
        return;
    };
    let [Some(c), Some(d)] = encounter.second.map(ArbitraryRating::into_clamped) else {
        return;
    };
    if !(0.0..=100.0).contains(&encounter.tau) {
        return;
    }

    let rating_system = RatingSystem::builder().tau(encounter.tau).build();

    match rating_system.update_ratings(
        &[a, b],
        &[c, d],
        encounter.first_points,
        encounter.second_points,
    ) {
        Ok((first, second)) => first.iter().chain(&second).for_each(assert_rating),
        Err(UpdateError::NonFinite) => {}
    }
});

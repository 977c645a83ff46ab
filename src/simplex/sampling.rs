use super::error::SimplexError;
use super::support::Point;
use crate::Probability;
use crate::RESAMPLE_LIMIT;
use rand::Rng;
use std::collections::BTreeSet;

/// Bounded rejection draw: a uniform point in [0, 1) distinct from
/// everything already taken. Gives up after RESAMPLE_LIMIT collisions
/// rather than spinning on a degenerate randomness source.
pub(crate) fn draw(taken: &BTreeSet<Point>, rng: &mut impl Rng) -> Result<Point, SimplexError> {
    for _ in 0..RESAMPLE_LIMIT {
        let point = Point::from(rng.random::<f64>());
        if !taken.contains(&point) {
            return Ok(point);
        }
    }
    Err(SimplexError::Saturated(RESAMPLE_LIMIT))
}

/// Bounded rejection draw of a strictly positive uniform in (0, 1).
fn positive(rng: &mut impl Rng) -> Result<f64, SimplexError> {
    for _ in 0..RESAMPLE_LIMIT {
        let x = rng.random::<f64>();
        if x > 0. {
            return Ok(x);
        }
    }
    Err(SimplexError::Saturated(RESAMPLE_LIMIT))
}

/// Strategies for assigning probability masses to a fresh support.
///
/// All three produce strictly positive masses summing to 1 up to float
/// error. Sticks is the default everywhere a strategy is not named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sampling {
    /// stick-breaking: split [0, 1] at n - 1 distinct interior cuts and
    /// take interval lengths as masses. uniform over the probability
    /// simplex, i.e. Dirichlet(1).
    #[default]
    Sticks,
    /// n independent uniform weights divided by their sum. not uniform
    /// over the simplex; kept as a named alternative.
    Naive,
    /// -ln of n independent uniform draws, divided by their sum.
    /// exponential spacings, so distributionally the same as Sticks.
    Expon,
}

impl Sampling {
    /// n strictly positive masses summing to 1, in the order they land
    /// on an ascending support.
    pub fn masses(&self, n: usize, rng: &mut impl Rng) -> Result<Vec<Probability>, SimplexError> {
        match (n, self) {
            (0, _) => Ok(vec![]),
            (n, Self::Sticks) => Self::sticks(n, rng),
            (n, Self::Naive) => Self::normalized((0..n).map(|_| positive(rng))),
            (n, Self::Expon) => Self::normalized((0..n).map(|_| positive(rng).map(|x| -x.ln()))),
        }
    }

    /// n - 1 distinct interior cuts plus the boundary, sorted, yield n
    /// positive interval lengths. the boundary sits in the taken set,
    /// so draws of exactly 0 collide and are rejected.
    fn sticks(n: usize, rng: &mut impl Rng) -> Result<Vec<Probability>, SimplexError> {
        let ref mut cuts = BTreeSet::from([Point::from(0.), Point::from(1.)]);
        for _ in 1..n {
            let cut = draw(cuts, rng)?;
            cuts.insert(cut);
        }
        Ok(cuts
            .iter()
            .zip(cuts.iter().skip(1))
            .map(|(a, b)| f64::from(*b) - f64::from(*a))
            .collect())
    }

    /// positive weights divided by their total.
    fn normalized(
        weights: impl Iterator<Item = Result<f64, SimplexError>>,
    ) -> Result<Vec<Probability>, SimplexError> {
        let weights = weights.collect::<Result<Vec<f64>, _>>()?;
        let total = weights.iter().sum::<f64>();
        Ok(weights.into_iter().map(|w| w / total).collect())
    }
}

impl std::str::FromStr for Sampling {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sticks" => Ok(Self::Sticks),
            "naive" => Ok(Self::Naive),
            "expon" => Ok(Self::Expon),
            _ => Err(format!("unknown sampling strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for Sampling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sticks => write!(f, "sticks"),
            Self::Naive => write!(f, "naive"),
            Self::Expon => write!(f, "expon"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// a randomness source that only ever produces one value.
    struct Stuck(u64);
    impl rand::RngCore for Stuck {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn strategies() -> [Sampling; 3] {
        [Sampling::Sticks, Sampling::Naive, Sampling::Expon]
    }

    #[test]
    fn is_mass_count_exact() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        for sampling in strategies() {
            assert!(sampling.masses(12, rng).unwrap().len() == 12);
        }
    }

    #[test]
    fn is_mass_strictly_positive() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        for sampling in strategies() {
            assert!(sampling.masses(32, rng).unwrap().iter().all(|&m| m > 0.));
        }
    }

    #[test]
    fn is_mass_normalized() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        for sampling in strategies() {
            let total = sampling.masses(32, rng).unwrap().iter().sum::<f64>();
            assert!((total - 1.).abs() < crate::TOLERANCE);
        }
    }

    #[test]
    fn is_single_mass_unit() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        assert!(Sampling::Sticks.masses(1, rng).unwrap() == vec![1.]);
    }

    #[test]
    fn is_degenerate_source_saturated() {
        let ref mut stuck = Stuck(u64::MAX / 3);
        assert!(Sampling::Sticks.masses(3, stuck) == Err(SimplexError::Saturated(RESAMPLE_LIMIT)));
    }

    #[test]
    fn is_zero_source_saturated() {
        let ref mut zeros = Stuck(0);
        assert!(Sampling::Naive.masses(2, zeros) == Err(SimplexError::Saturated(RESAMPLE_LIMIT)));
        assert!(Sampling::Expon.masses(2, zeros) == Err(SimplexError::Saturated(RESAMPLE_LIMIT)));
    }

    #[test]
    fn is_name_round_trip() {
        for sampling in strategies() {
            assert!(sampling.to_string().parse::<Sampling>() == Ok(sampling));
        }
        assert!("gibberish".parse::<Sampling>().is_err());
    }
}

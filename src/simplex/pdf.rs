use super::error::SimplexError;
use super::sampling::draw;
use super::sampling::Sampling;
use super::support::Point;
use crate::Distortion;
use crate::Energy;
use crate::Probability;
use crate::TOLERANCE;
use rand::Rng;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// A discrete probability distribution over points on the unit
/// interval, ordered by position.
///
/// Masses of a constructed or sampled Pdf are strictly positive and sum
/// to 1 within TOLERANCE. The one sanctioned exception: collapsing onto
/// a party slate keeps zero-mass parties in the support, so a collapsed
/// Pdf may report probability 0 at some of its points.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Pdf(BTreeMap<Point, Probability>);

impl Pdf {
    /// explicit construction from parallel slices of positions and
    /// masses. duplicate points, nonpositive masses, and totals off
    /// unity are rejected rather than repaired.
    pub fn new(points: &[f64], masses: &[Probability]) -> Result<Self, SimplexError> {
        if points.len() != masses.len() {
            return Err(SimplexError::Mismatched(points.len(), masses.len()));
        }
        if points.is_empty() {
            return Err(SimplexError::EmptySupport);
        }
        let mut supports = BTreeMap::new();
        for (&x, &mass) in points.iter().zip(masses.iter()) {
            let point = Point::from(x);
            if mass <= 0. {
                return Err(SimplexError::NonpositiveMass(point));
            }
            if supports.insert(point, mass).is_some() {
                return Err(SimplexError::DuplicatePoint(point));
            }
        }
        let total = supports.values().sum::<Probability>();
        if (total - 1.).abs() > TOLERANCE {
            return Err(SimplexError::Unnormalized(total));
        }
        Ok(Self(supports))
    }

    /// sample an n-point distribution: n distinct uniform positions
    /// renormalized to span [0, 1], with masses from the given strategy
    /// assigned in ascending position order.
    pub fn sample(n: usize, sampling: Sampling, rng: &mut impl Rng) -> Result<Self, SimplexError> {
        if n == 0 {
            return Err(SimplexError::EmptySupport);
        }
        let mut points = BTreeSet::new();
        while points.len() < n {
            let point = draw(&points, rng)?;
            points.insert(point);
        }
        let masses = sampling.masses(n, rng)?;
        Ok(Self(points.into_iter().zip(masses).collect()).normalize())
    }

    /// stick-breaking sample, the default strategy.
    pub fn random(n: usize, rng: &mut impl Rng) -> Result<Self, SimplexError> {
        Self::sample(n, Sampling::default(), rng)
    }

    /// the mass at a given support point. absent points are an explicit
    /// error, never a silent zero.
    pub fn probability(&self, point: &Point) -> Result<Probability, SimplexError> {
        self.0
            .get(point)
            .copied()
            .ok_or(SimplexError::MissingPoint(*point))
    }
    /// all support points, ascending
    pub fn support(&self) -> impl Iterator<Item = &Point> {
        self.0.keys()
    }
    /// ascending (position, mass) pairs
    pub fn pairs(&self) -> impl Iterator<Item = (Point, Probability)> + '_ {
        self.0.iter().map(|(&x, &mass)| (x, mass))
    }
    /// size of the support
    pub fn n(&self) -> usize {
        self.0.len()
    }
    /// the mass at a point, zero off support. internal shorthand for
    /// positions already known to be well formed.
    fn density(&self, x: &Point) -> Probability {
        self.0.get(x).copied().unwrap_or(0.)
    }

    /// the smallest support point at which the ascending cumulative
    /// mass reaches one half. None only for an empty distribution.
    pub fn median(&self) -> Option<Point> {
        let mut cumulative = 0.;
        for (&point, &mass) in self.0.iter() {
            cumulative += mass;
            if cumulative >= 0.5 {
                return Some(point);
            }
        }
        None
    }

    /// expected absolute distance from the candidate to the mass of the
    /// distribution. the electorate's collective dissatisfaction with
    /// the candidate as an outcome.
    pub fn social_cost(&self, candidate: &Point) -> Energy {
        self.0
            .iter()
            .map(|(x, mass)| mass * x.distance(candidate))
            .sum()
    }

    /// head-to-head winner: whichever candidate sits closer to the
    /// median, the first on an exact tie. None only for an empty
    /// distribution.
    pub fn winner(&self, p1: &Point, p2: &Point) -> Option<Point> {
        self.median()
            .map(|m| if m.distance(p2) < m.distance(p1) { *p2 } else { *p1 })
    }

    /// the ratio of the winner's social cost over the loser's when the
    /// winner costs strictly more, else 1. both candidates must be
    /// support points. at least 1 wherever defined.
    pub fn distortion(&self, p1: &Point, p2: &Point) -> Result<Distortion, SimplexError> {
        if !self.0.contains_key(p1) {
            return Err(SimplexError::InvalidPoint(*p1));
        }
        if !self.0.contains_key(p2) {
            return Err(SimplexError::InvalidPoint(*p2));
        }
        let winner = self.winner(p1, p2).ok_or(SimplexError::EmptySupport)?;
        let cost1 = self.social_cost(p1);
        let cost2 = self.social_cost(p2);
        if winner == *p1 && cost1 > cost2 {
            Ok(cost1 / cost2)
        } else if winner == *p2 && cost2 > cost1 {
            Ok(cost2 / cost1)
        } else {
            Ok(1.)
        }
    }

    /// probability-weighted distortion over all ordered support pairs,
    /// diagonal included. quadratic in the support size.
    pub fn expected_distortion(&self) -> Distortion {
        self.support()
            .flat_map(|x| self.support().map(move |y| (x, y)))
            .map(|(x, y)| {
                self.density(x)
                    * self.density(y)
                    * self.distortion(x, y).expect("support membership")
            })
            .sum()
    }

    /// pure affine renormalization of the support onto [0, 1],
    /// preserving masses and relative order. identity when the span is
    /// already the unit interval or degenerate to a single position.
    pub fn normalize(&self) -> Self {
        match (self.0.first_key_value(), self.0.last_key_value()) {
            (Some((&lo, _)), Some((&hi, _)))
                if lo != hi && !(lo == Point::from(0.) && hi == Point::from(1.)) =>
            {
                let (lo, hi) = (f64::from(lo), f64::from(hi));
                Self(
                    self.0
                        .iter()
                        .map(|(&x, &mass)| (Point::from((f64::from(x) - lo) / (hi - lo)), mass))
                        .collect(),
                )
            }
            _ => self.clone(),
        }
    }
}

/// trusted construction for callers that uphold the mass invariants
/// themselves. collapse uses it to carry zero-mass parties.
impl From<BTreeMap<Point, Probability>> for Pdf {
    fn from(supports: BTreeMap<Point, Probability>) -> Self {
        Self(supports)
    }
}

impl std::fmt::Display for Pdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (point, mass) in self.0.iter() {
            writeln!(f, "{} => {:.4}", point, mass)?;
        }
        writeln!(f, "expected distortion: {}", self.expected_distortion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn lopsided() -> Pdf {
        Pdf::new(&[0., 0.3, 1.], &[0.3, 0.2, 0.5]).unwrap()
    }

    #[test]
    fn is_explicit_construction_faithful() {
        let f = lopsided();
        assert!(f.n() == 3);
        assert!(f.probability(&Point::from(0.3)).unwrap() == 0.2);
    }

    #[test]
    fn is_empty_support_rejected() {
        assert!(Pdf::new(&[], &[]) == Err(SimplexError::EmptySupport));
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert!(Pdf::sample(0, Sampling::Sticks, rng) == Err(SimplexError::EmptySupport));
    }

    #[test]
    fn is_mismatched_rejected() {
        assert!(Pdf::new(&[0., 1.], &[1.]) == Err(SimplexError::Mismatched(2, 1)));
    }

    #[test]
    fn is_duplicate_rejected() {
        let duplicated = Pdf::new(&[0.5, 0.5], &[0.5, 0.5]);
        assert!(duplicated == Err(SimplexError::DuplicatePoint(Point::from(0.5))));
    }

    #[test]
    fn is_nonpositive_mass_rejected() {
        let zeroed = Pdf::new(&[0., 1.], &[1., 0.]);
        assert!(zeroed == Err(SimplexError::NonpositiveMass(Point::from(1.))));
        let negative = Pdf::new(&[0., 1.], &[1.5, -0.5]);
        assert!(negative == Err(SimplexError::NonpositiveMass(Point::from(1.))));
    }

    #[test]
    fn is_unnormalized_rejected() {
        let heavy = Pdf::new(&[0., 1.], &[0.5, 0.6]);
        assert!(matches!(heavy, Err(SimplexError::Unnormalized(_))));
    }

    #[test]
    fn is_sampled_mass_conserved() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        for sampling in [Sampling::Sticks, Sampling::Naive, Sampling::Expon] {
            let f = Pdf::sample(16, sampling, rng).unwrap();
            let total = f.pairs().map(|(_, mass)| mass).sum::<f64>();
            assert!((total - 1.).abs() < TOLERANCE);
        }
    }

    #[test]
    fn is_sampled_span_unit() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        let f = Pdf::random(8, rng).unwrap();
        assert!(*f.support().next().unwrap() == Point::from(0.));
        assert!(*f.support().last().unwrap() == Point::from(1.));
    }

    #[test]
    fn is_probability_error_off_support() {
        let f = lopsided();
        let off = Point::from(0.77);
        assert!(f.probability(&off) == Err(SimplexError::MissingPoint(off)));
    }

    #[test]
    fn is_median_smallest_majority_point() {
        let f = lopsided();
        assert!(f.median() == Some(Point::from(0.3)));
        let g = Pdf::new(&[0., 1.], &[0.5, 0.5]).unwrap();
        assert!(g.median() == Some(Point::from(0.)));
    }

    #[test]
    fn is_median_none_when_empty() {
        assert!(Pdf::default().median() == None);
    }

    #[test]
    fn is_social_cost_mass_weighted() {
        let f = Pdf::new(&[0., 0.5, 1.], &[0.25, 0.25, 0.5]).unwrap();
        assert!(f.social_cost(&Point::from(0.)) == 0.25 * 0.5 + 0.5 * 1.);
        assert!(f.social_cost(&Point::from(0.5)) == 0.25 * 0.5 + 0.5 * 0.5);
    }

    #[test]
    fn is_winner_tie_toward_first() {
        let f = Pdf::new(&[0., 0.5, 1.], &[0.25, 0.25, 0.5]).unwrap();
        assert!(f.median() == Some(Point::from(0.5)));
        assert!(f.winner(&Point::from(0.), &Point::from(1.)) == Some(Point::from(0.)));
        assert!(f.winner(&Point::from(1.), &Point::from(0.)) == Some(Point::from(1.)));
    }

    #[test]
    fn is_distortion_reflexive_unit() {
        let f = lopsided();
        for x in f.support() {
            assert!(f.distortion(x, x).unwrap() == 1.);
        }
    }

    #[test]
    fn is_distortion_symmetric() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let f = Pdf::random(6, rng).unwrap();
        for x in f.support() {
            for y in f.support() {
                assert!(f.distortion(x, y).unwrap() == f.distortion(y, x).unwrap());
            }
        }
    }

    #[test]
    fn is_distortion_error_off_support() {
        let f = lopsided();
        let off = Point::from(0.77);
        let on = Point::from(0.3);
        assert!(f.distortion(&off, &on) == Err(SimplexError::InvalidPoint(off)));
        assert!(f.distortion(&on, &off) == Err(SimplexError::InvalidPoint(off)));
    }

    #[test]
    fn is_expected_distortion_at_least_unit() {
        let exact = Pdf::new(&[0., 0.25, 0.75, 1.], &[0.25; 4]).unwrap();
        assert!(exact.expected_distortion() >= 1.);
        let ref mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..8 {
            let f = Pdf::random(10, rng).unwrap();
            assert!(f.expected_distortion() >= 1. - TOLERANCE);
        }
    }

    #[test]
    fn is_point_mass_undistorted() {
        let f = Pdf::new(&[0.5], &[1.]).unwrap();
        assert!(f.expected_distortion() == 1.);
    }

    #[test]
    fn is_normalize_affine_onto_unit() {
        let f = Pdf::new(&[0.25, 0.5, 0.75], &[0.25, 0.25, 0.5]).unwrap();
        let g = f.normalize();
        let support = g.support().copied().collect::<Vec<_>>();
        assert!(support == vec![Point::from(0.), Point::from(0.5), Point::from(1.)]);
        assert!(g.probability(&Point::from(0.5)).unwrap() == 0.25);
    }

    #[test]
    fn is_normalize_identity_on_unit_span() {
        let f = lopsided();
        assert!(f.normalize() == f);
    }

    #[test]
    fn is_normalize_identity_on_degenerate_span() {
        let f = Pdf::new(&[0.5], &[1.]).unwrap();
        assert!(f.normalize() == f);
    }

    #[test]
    fn is_display_four_decimal() {
        let rendered = lopsided().to_string();
        assert!(rendered.contains("0.3000 => 0.2000"));
        assert!(rendered.contains("expected distortion:"));
    }
}

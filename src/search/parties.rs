use crate::simplex::error::SimplexError;
use crate::simplex::pdf::Pdf;
use crate::simplex::sampling::draw;
use crate::simplex::support::Point;
use crate::Probability;
use rand::Rng;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// An ordered, deduplicated slate of candidate party positions on the
/// unit interval. Slates are cheap and transient: search strategies
/// mint one per scoring trial.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Parties(BTreeSet<Point>);

impl Parties {
    /// number of party positions
    pub fn n(&self) -> usize {
        self.0.len()
    }
    /// all party positions, ascending
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    /// n distinct party positions drawn uniformly from the continuum,
    /// free to land off any particular support.
    pub fn random(n: usize, rng: &mut impl Rng) -> Result<Self, SimplexError> {
        let mut points = BTreeSet::new();
        while points.len() < n {
            let point = draw(&points, rng)?;
            points.insert(point);
        }
        Ok(Self(points))
    }

    /// collapse: route every support point's mass to its nearest party.
    /// equidistant support points go to the numerically smaller party, a
    /// fixed contract rather than an iteration accident. every party
    /// keeps its seat in the result, zero mass included.
    pub fn gerrymander(&self, f: &Pdf) -> Result<Pdf, SimplexError> {
        if self.0.is_empty() {
            return Err(SimplexError::EmptyParties);
        }
        let mut supports = self
            .0
            .iter()
            .map(|&party| (party, 0.))
            .collect::<BTreeMap<Point, Probability>>();
        for (x, mass) in f.pairs() {
            let nearest = self.nearest(&x);
            *supports.get_mut(&nearest).expect("declared party") += mass;
        }
        Ok(Pdf::from(supports))
    }

    /// nearest party by absolute distance, smaller position on ties.
    fn nearest(&self, x: &Point) -> Point {
        self.0
            .iter()
            .copied()
            .map(|party| (party.distance(x), party))
            .min_by(|(d1, p1), (d2, p2)| d1.total_cmp(d2).then(p1.cmp(p2)))
            .map(|(_, party)| party)
            .expect("nonempty slate")
    }
}

/// the full support of a distribution as a slate, i.e. the identity
/// collapse.
impl From<&Pdf> for Parties {
    fn from(f: &Pdf) -> Self {
        Self(f.support().copied().collect())
    }
}

impl From<&[f64]> for Parties {
    fn from(points: &[f64]) -> Self {
        Self(points.iter().copied().map(Point::from).collect())
    }
}

impl FromIterator<Point> for Parties {
    fn from_iter<I: IntoIterator<Item = Point>>(points: I) -> Self {
        Self(points.into_iter().collect())
    }
}

impl std::fmt::Display for Parties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.0
                .iter()
                .map(|point| point.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

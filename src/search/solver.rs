use super::parties::Parties;
use crate::simplex::error::SimplexError;
use crate::simplex::pdf::Pdf;
use crate::subsets::ChooseIterator;
use crate::subsets::SubsetIterator;
use crate::Distortion;
use crate::MIN_PARTIES;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

/// a scored candidate: enumeration index, expected distortion, outcome
type Trial = (usize, Distortion, Pdf);

/// Search strategies over party slates, maximizing expected distortion
/// of the collapsed electorate.
///
/// Every strategy scores candidates against the incumbent baseline, the
/// distribution itself left uncollapsed, and returns the baseline clone
/// unless some slate strictly beats it. Scoring fans out on rayon; the
/// enumeration index carried beside each score pins the reduction to
/// the same winner a sequential scan would keep.
pub struct Solver;

impl Solver {
    /// every support subset of at least MIN_PARTIES points as a
    /// candidate slate. 2 ^ n candidates, so supports past ~20 points
    /// are better served by the randomized strategy.
    pub fn exhaustive(f: &Pdf) -> Pdf {
        let subsets = SubsetIterator::from(f);
        log::debug!("{:<32}{:<32}", "exhaustive slate search", subsets.combinations());
        Self::best(f, subsets.filter(|slate| slate.n() >= MIN_PARTIES))
    }

    /// every support subset of exactly k points, n choose k candidates.
    pub fn exhaustive_k(f: &Pdf, k: usize) -> Pdf {
        let subsets = ChooseIterator::from((f, k));
        log::debug!("{:<32}{:<32}", "fixed size slate search", subsets.combinations());
        Self::best(f, subsets)
    }

    /// multi-start search over the continuum: independent slates of
    /// distinct uniform positions, free to land off the support, which
    /// lets this strategy beat both exhaustive ones. each trial runs on
    /// its own seeded stream, so results are reproducible from the
    /// caller's rng state alone.
    pub fn random(
        f: &Pdf,
        parties: usize,
        trials: usize,
        rng: &mut impl Rng,
    ) -> Result<Pdf, SimplexError> {
        let seed = rng.random::<u64>();
        log::debug!("{:<32}{:<32}", "randomized slate search", trials);
        let slates = (0..trials)
            .map(|trial| SmallRng::seed_from_u64(seed.wrapping_add(trial as u64)))
            .map(|ref mut stream| Parties::random(parties, stream))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::best(f, slates.into_iter()))
    }

    /// score every candidate slate in parallel and keep the winner:
    /// higher expected distortion first, earlier enumeration on exact
    /// score ties, baseline unless strictly beaten.
    fn best<I>(f: &Pdf, candidates: I) -> Pdf
    where
        I: Iterator<Item = Parties> + Send,
    {
        use rayon::iter::ParallelBridge;
        use rayon::iter::ParallelIterator;
        let baseline = f.expected_distortion();
        candidates
            .enumerate()
            .par_bridge()
            .filter(|(_, slate)| slate.n() > 0)
            .map(|(i, slate)| {
                let g = slate.gerrymander(f).expect("nonempty slate");
                let distortion = g.expected_distortion();
                (i, distortion, g)
            })
            .reduce_with(Self::prefer)
            .filter(|(_, distortion, _)| *distortion > baseline)
            .map(|(_, distortion, g)| {
                log::debug!("{:<32}{:<32}", "slate beats baseline", distortion - baseline);
                g
            })
            .unwrap_or_else(|| f.clone())
    }

    /// two-way preference, associative and commutative, so the parallel
    /// reduction lands where a sequential scan would.
    fn prefer(a: Trial, b: Trial) -> Trial {
        if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) {
            b
        } else {
            a
        }
    }
}

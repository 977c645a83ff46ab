use crate::search::parties::Parties;
use crate::simplex::pdf::Pdf;
use crate::simplex::support::Point;

/// SubsetIterator walks every subset of an indexed point set, empty and
/// full subsets included, by incrementing a bitmask over indices.
/// - it is memory efficient because it materializes one subset at a time
/// - it is deterministic because the mask only ever increments
/// - it is exponential in the point count, which construction caps below 64
pub struct SubsetIterator {
    points: Vec<Point>,
    next: u64,
}

impl SubsetIterator {
    /// total number of subsets, 2 ^ n.
    pub fn combinations(&self) -> usize {
        1 << self.points.len()
    }

    fn exhausted(&self) -> bool {
        self.next >= 1 << self.points.len()
    }

    fn current(&self) -> Parties {
        self.points
            .iter()
            .enumerate()
            .filter(|(i, _)| self.next >> i & 1 == 1)
            .map(|(_, &point)| point)
            .collect()
    }

    fn advance(&mut self) {
        self.next += 1;
    }
}

impl Iterator for SubsetIterator {
    type Item = Parties;
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted() {
            None
        } else {
            let subset = self.current();
            self.advance();
            Some(subset)
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.combinations() - self.next as usize;
        (rest, Some(rest))
    }
}

impl From<Vec<Point>> for SubsetIterator {
    fn from(points: Vec<Point>) -> Self {
        assert!(points.len() < 64);
        Self { points, next: 0 }
    }
}
impl From<&Pdf> for SubsetIterator {
    fn from(pdf: &Pdf) -> Self {
        Self::from(pdf.support().copied().collect::<Vec<_>>())
    }
}

/// ChooseIterator walks every size-k subset of an indexed point set in
/// lexicographic order of index arrays. the index array advances in
/// place, so enumeration costs no recursion and no memoization; callers
/// scanning many k against one set should walk the power set instead.
pub struct ChooseIterator {
    points: Vec<Point>,
    k: usize,
    indices: Option<Vec<usize>>,
}

impl ChooseIterator {
    /// total number of size-k subsets, n choose k.
    pub fn combinations(&self) -> usize {
        let n = self.points.len();
        match self.k > n {
            true => 0,
            false => (0..self.k).fold(1, |x, i| x * (n - i) / (i + 1)),
        }
    }

    fn exhausted(&self) -> bool {
        self.indices.is_none()
    }

    fn current(&self) -> Parties {
        self.indices
            .as_ref()
            .expect("not exhausted")
            .iter()
            .map(|&i| self.points[i])
            .collect()
    }

    /// lexicographic step: bump the rightmost index with headroom and
    /// reset everything after it to run consecutively.
    fn advance(&mut self) {
        let n = self.points.len();
        if let Some(indices) = self.indices.as_mut() {
            let k = indices.len();
            if let Some(i) = (0..k).rev().find(|&i| indices[i] < n - k + i) {
                indices[i] += 1;
                for j in i + 1..k {
                    indices[j] = indices[j - 1] + 1;
                }
                return;
            }
        }
        self.indices = None;
    }
}

impl Iterator for ChooseIterator {
    type Item = Parties;
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted() {
            None
        } else {
            let subset = self.current();
            self.advance();
            Some(subset)
        }
    }
}

/// size is immutable and must be decided at construction
impl From<(Vec<Point>, usize)> for ChooseIterator {
    fn from((points, k): (Vec<Point>, usize)) -> Self {
        let indices = (k <= points.len()).then(|| (0..k).collect());
        Self { points, k, indices }
    }
}
impl From<(&Pdf, usize)> for ChooseIterator {
    fn from((pdf, k): (&Pdf, usize)) -> Self {
        Self::from((pdf.support().copied().collect::<Vec<_>>(), k))
    }
}

use super::support::Point;

/// Failure conditions across construction, lookup, sampling, and
/// collapse. Membership mistakes are explicit errors, never silent
/// zeros.
#[derive(Debug, Clone, PartialEq)]
pub enum SimplexError {
    /// probability queried at a point outside the support
    MissingPoint(Point),
    /// distortion requested for a candidate outside the support
    InvalidPoint(Point),
    /// collapse requires at least one party point
    EmptyParties,
    /// a distribution requires at least one support point
    EmptySupport,
    /// explicit masses must sum to 1 within tolerance
    Unnormalized(f64),
    /// points and masses must come in equal-length slices
    Mismatched(usize, usize),
    /// support points must be pairwise distinct
    DuplicatePoint(Point),
    /// probability masses must be strictly positive
    NonpositiveMass(Point),
    /// the randomness source kept repeating itself past its budget
    Saturated(usize),
}

impl std::fmt::Display for SimplexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPoint(p) => write!(f, "no mass recorded at {}", p),
            Self::InvalidPoint(p) => write!(f, "candidate {} is not a support point", p),
            Self::EmptyParties => write!(f, "empty party slate"),
            Self::EmptySupport => write!(f, "empty support"),
            Self::Unnormalized(total) => write!(f, "masses sum to {} instead of 1", total),
            Self::Mismatched(n, m) => write!(f, "{} points against {} masses", n, m),
            Self::DuplicatePoint(p) => write!(f, "duplicate point {}", p),
            Self::NonpositiveMass(p) => write!(f, "nonpositive mass at {}", p),
            Self::Saturated(budget) => write!(f, "no distinct draw within {} attempts", budget),
        }
    }
}

impl std::error::Error for SimplexError {}

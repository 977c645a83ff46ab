//! One-dimensional gerrymandering of simplex distributions.
//!
//! A [`simplex::Pdf`] places probability mass on points of the unit
//! interval. Collapsing each support point onto its nearest point in a
//! party slate ([`search::Parties::gerrymander`]) induces a coarser
//! electorate whose expected distortion, the mass-weighted ratio of
//! social costs between head-to-head winners and their rivals, can
//! exceed that of the original distribution. [`search::Solver`] hunts
//! for slates that maximize it, either by exhaustive enumeration of
//! support subsets ([`subsets`]) or by randomized multi-start sampling
//! over the continuum.

#[cfg(feature = "cli")]
pub mod explore;
pub mod search;
pub mod simplex;
pub mod subsets;

/// Mass weights, cumulative sums, and sampling distributions.
pub type Probability = f64;
/// Distances on the unit interval and expected social costs.
pub type Energy = f64;
/// Ratios of social costs; always at least 1 where defined.
pub type Distortion = f64;

/// Absolute tolerance for probability mass sums.
pub const TOLERANCE: f64 = 1e-9;
/// Rejection budget for one distinct uniform draw before giving up.
pub const RESAMPLE_LIMIT: usize = 64;
/// Smallest slate the all-subsets search will field.
pub const MIN_PARTIES: usize = 3;
/// Default multi-start trial budget for randomized search.
pub const TRIALS: usize = 100;

/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, the given
/// level to terminal.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        level,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

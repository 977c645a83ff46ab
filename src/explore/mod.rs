use crate::search::Solver;
use crate::simplex::Pdf;
use crate::simplex::Sampling;
use crate::Distortion;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// clap hook into the Sampling name parser
fn sampling(s: &str) -> Result<Sampling, String> {
    s.parse()
}

/// which candidate slates a sweep scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// every support subset of at least three points
    Exhaustive,
    /// every support subset of exactly --parties points
    Fixed,
    /// --trials random slates of --parties continuum points
    Random,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Explore {
    /// surface search internals in terminal logs
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    #[command(
        about = "Sweep random electorates under one search strategy",
        alias = "s"
    )]
    Search {
        /// candidate slates to score
        #[arg(long, value_enum, default_value = "random")]
        strategy: Strategy,
        /// smallest support size in the sweep
        #[arg(long, default_value_t = 5)]
        lo: usize,
        /// largest support size in the sweep, inclusive
        #[arg(long, default_value_t = 8)]
        hi: usize,
        /// slate size for the fixed and random strategies
        #[arg(long, default_value_t = crate::MIN_PARTIES)]
        parties: usize,
        /// random slates scored per electorate
        #[arg(long, default_value_t = crate::TRIALS)]
        trials: usize,
        /// electorates sampled per support size
        #[arg(long, default_value_t = 50)]
        samples: usize,
        /// mass assignment: sticks, naive, or expon
        #[arg(long, default_value_t = Sampling::Sticks, value_parser = sampling)]
        sampling: Sampling,
        /// reproducible sweeps from a fixed seed
        #[arg(long)]
        seed: Option<u64>,
    },
    #[command(
        about = "Hunt for an electorate where k + 1 parties out-distort k",
        alias = "c"
    )]
    Compare {
        /// support size of sampled electorates
        #[arg(long, default_value_t = 5)]
        supports: usize,
        /// smaller slate size k
        #[arg(long, default_value_t = crate::MIN_PARTIES)]
        parties: usize,
        /// random slates scored per electorate per slate size
        #[arg(long, default_value_t = crate::TRIALS)]
        trials: usize,
        /// electorates sampled before giving up
        #[arg(long, default_value_t = 50)]
        samples: usize,
        /// reproducible hunts from a fixed seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Explore {
    /// terminal log level implied by the flags
    pub fn verbosity(&self) -> log::LevelFilter {
        match self.verbose {
            true => log::LevelFilter::Debug,
            false => log::LevelFilter::Info,
        }
    }

    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Search {
                strategy,
                lo,
                hi,
                parties,
                trials,
                samples,
                sampling,
                seed,
            } => Self::search(strategy, lo..=hi, parties, trials, samples, sampling, seed),
            Command::Compare {
                supports,
                parties,
                trials,
                samples,
                seed,
            } => Self::compare(supports, parties, trials, samples, seed),
        }
    }

    /// sample electorates at each support size, search each one, and
    /// tabulate how often some slate beats leaving the electorate
    /// alone. renders the most distorted find per size.
    fn search(
        strategy: Strategy,
        sizes: std::ops::RangeInclusive<usize>,
        parties: usize,
        trials: usize,
        samples: usize,
        sampling: Sampling,
        seed: Option<u64>,
    ) -> Result<()> {
        let ref mut rng = Self::rng(seed);
        for n in sizes {
            let mut beaten = 0;
            let mut best: Option<(Pdf, Pdf, Distortion, Distortion)> = None;
            for _ in 0..samples {
                let f = Pdf::sample(n, sampling, rng)?;
                let baseline = f.expected_distortion();
                let g = match strategy {
                    Strategy::Exhaustive => Solver::exhaustive(&f),
                    Strategy::Fixed => Solver::exhaustive_k(&f, parties),
                    Strategy::Random => Solver::random(&f, parties, trials, rng)?,
                };
                let distortion = g.expected_distortion();
                if distortion > baseline {
                    beaten += 1;
                }
                if best.as_ref().is_none_or(|(_, _, record, _)| distortion > *record) {
                    best = Some((f, g, distortion, baseline));
                }
            }
            log::info!("{:<32}{:<32}", "support size", n);
            log::info!(
                "{:<32}{:<32}",
                "electorates gerrymandered",
                format!("{} / {}", beaten, samples)
            );
            if let Some((f, g, distortion, baseline)) = best {
                println!("{}", "most distorted electorate".bold());
                print!("{}", f);
                println!("{}", "after gerrymandering".bold());
                print!("{}", g);
                println!("{}", format!("gain {:+.4}", distortion - baseline).green());
            }
        }
        Ok(())
    }

    /// hunt for an electorate where the larger slate out-distorts the
    /// smaller, the monotonicity break that makes slate size an
    /// interesting knob at all. mirrors the smaller search but keeps
    /// only clean breaks: no zero-mass parties, no slate that merely
    /// reproduces the whole support.
    fn compare(
        supports: usize,
        parties: usize,
        trials: usize,
        samples: usize,
        seed: Option<u64>,
    ) -> Result<()> {
        let ref mut rng = Self::rng(seed);
        let mut found: Option<(Pdf, Pdf, Pdf)> = None;
        let mut record: Distortion = 1.;
        for _ in 0..samples {
            let f = Pdf::random(supports, rng)?;
            let smaller = Solver::random(&f, parties, trials, rng)?;
            let larger = Solver::random(&f, parties + 1, trials, rng)?;
            let distortion = larger.expected_distortion();
            if smaller.expected_distortion() < distortion
                && distortion > record
                && larger.pairs().all(|(_, mass)| mass > 0.)
                && smaller.n() != supports
                && larger.n() != supports
            {
                record = distortion;
                found = Some((f, smaller, larger));
            }
        }
        match found {
            None => {
                println!(
                    "{}",
                    format!("no monotonicity break within {} electorates", samples).yellow()
                );
            }
            Some((f, smaller, larger)) => {
                println!("{}", "electorate".bold());
                print!("{}", f);
                println!("{}", format!("collapsed onto {} parties", parties).bold());
                print!("{}", smaller);
                println!("{}", format!("collapsed onto {} parties", parties + 1).bold());
                print!("{}", larger);
                println!("{}", "larger slate distorts more".green());
            }
        }
        Ok(())
    }

    fn rng(seed: Option<u64>) -> SmallRng {
        match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}

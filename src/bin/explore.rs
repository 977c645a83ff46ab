//! Gerrymander exploration binary
//!
//! Sweeps random electorates, searches for distortion-maximizing party
//! slates, and tabulates how often collapse beats leaving the
//! electorate alone.

use clap::Parser;
use gerrymander::explore::Explore;

fn main() -> anyhow::Result<()> {
    let explore = Explore::parse();
    gerrymander::log(explore.verbosity());
    explore.run()
}

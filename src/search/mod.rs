pub mod parties;
pub use parties::*;

pub mod solver;
pub use solver::*;

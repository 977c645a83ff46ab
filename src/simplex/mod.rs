pub mod error;
pub use error::*;

pub mod pdf;
pub use pdf::*;

pub mod sampling;
pub use sampling::*;

pub mod support;
pub use support::*;

extern crate nalgebra as na;

pub mod error;
pub mod geometry;
pub mod viewport;
pub mod color;
pub mod pipeline;
pub mod features;
pub mod matching;
pub mod io;
pub mod visualize;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

/// Coefficients below this magnitude are treated as zero when projecting lines.
pub const LINE_EPSILON: Float = 1e-6;

pub use error::{EpipolarError, Result};
pub use io::runtime_config::{RuntimeConfig, load_runtime_config};

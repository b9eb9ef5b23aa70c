//! Implements the base structures for a landslide simulation

mod config;
mod constants;
mod enums;
mod fixed_point;
mod parallel;
mod parameters;
mod precision;
mod sample_params;
mod terrain;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::enums::*;
pub use crate::base::fixed_point::*;
pub use crate::base::parallel::*;
pub use crate::base::parameters::*;
pub use crate::base::precision::*;
pub use crate::base::sample_params::*;
pub use crate::base::terrain::*;

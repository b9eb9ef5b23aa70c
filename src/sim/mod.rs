//! Implements the time-stepping driver and the input/output structures

mod file_io;
mod rainfall;
mod sim_input;
mod simulation;
mod step_output;
pub use crate::sim::file_io::*;
pub use crate::sim::rainfall::*;
pub use crate::sim::sim_input::*;
pub use crate::sim::simulation::*;
pub use crate::sim::step_output::*;

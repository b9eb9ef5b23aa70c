//! Implements the transient infiltration and pore-water pressure models

mod green_ampt;
mod hydraulic_state;
mod pore_pressure;
mod swcc;
pub use crate::hydro::green_ampt::*;
pub use crate::hydro::hydraulic_state::*;
pub use crate::hydro::pore_pressure::*;
pub use crate::hydro::swcc::*;

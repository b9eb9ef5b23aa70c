//! Implements the slope-stability analyzers and the slip-surface grouping

mod boundary_code;
mod debris_flow;
mod infinite_slope;
mod janbu3d;
mod root;
mod slip_surface;
mod soil_column;
mod stability_result;
pub use crate::stability::boundary_code::*;
pub use crate::stability::debris_flow::*;
pub use crate::stability::infinite_slope::*;
pub use crate::stability::janbu3d::*;
pub use crate::stability::root::*;
pub use crate::stability::slip_surface::*;
pub use crate::stability::soil_column::*;
pub use crate::stability::stability_result::*;

//! Slidesim -- Coupled transient infiltration and slope-stability simulator
//!
//! This crate estimates where shallow soil columns on a gridded terrain fail during a rainfall
//! history and which failures may mobilize into debris flows. Each time step advances the
//! Green-Ampt infiltration state of every cell and then runs either an infinite-slope depth
//! search in each cell or a Janbu 3D analysis over superellipse groups of cells.
//!
//! # Examples
//!
//! ```
//! use slidesim::prelude::*;
//! use russell_lab::Matrix;
//!
//! fn main() -> Result<(), StrError> {
//!     let mut config = Config::new();
//!     config.set_param_soil(1, SampleParams::param_soil_sandy())?;
//!     let terrain = Terrain::new(
//!         10.0,
//!         10.0,
//!         Matrix::filled(2, 2, 100.0),
//!         Matrix::filled(2, 2, 98.5),
//!         Matrix::filled(2, 2, 35.0),
//!         &Matrix::filled(2, 2, 180.0),
//!     )?;
//!     let input = SimInput {
//!         config,
//!         terrain,
//!         materials: vec![1; 4],
//!         initial_suction: Matrix::filled(2, 2, 30.0),
//!         initial_groundwater: Matrix::filled(2, 2, 98.5),
//!         rainfall: RainfallHistory::new_uniform(3600.0, 2, 2, &[2e-5, 2e-5])?,
//!         initiation_mask: None,
//!     };
//!     let sim = Simulation::new(&input)?;
//!     let mut file_io = FileIo::new();
//!     let last = sim.run(&mut file_io)?;
//!     assert_eq!(last.step, 2);
//!     Ok(())
//! }
//! ```

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod hydro;
pub mod prelude;
pub mod sim;
pub mod stability;

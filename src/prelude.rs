//! Makes available common structures needed to run a simulation
//!
//! You may write `use slidesim::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Analysis, Aspect, Config, FixedPoint, MaterialId, Precision, SampleParams, Terrain};
pub use crate::base::{ParamCorrection, ParamGrouping, ParamRoot, ParamSoil, ParamSwcc};
pub use crate::base::{DEFAULT_OUT_DIR, DEFAULT_TEST_DIR, FS_STABLE_SENTINEL, FS_UNSTABLE_SENTINEL};
pub use crate::hydro::{ColumnHydraulics, HydraulicState, PorePressure, PressureRegime};
pub use crate::sim::{FileIo, RainfallHistory, SimInput, Simulation, StepOutput};
pub use crate::stability::{BoundaryCode, SlipSurfaceGroup, SlipSurfaceGrouper, SourceFlags, StabilityResult};
pub use crate::StrError;

/// Defines the directory where the simulation result files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/slidesim/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/slidesim/test";

/// Factor of safety reported when no failure can be analyzed (too thin or flat)
pub const FS_STABLE_SENTINEL: f64 = 10.0;

/// Factor of safety reported when the 3D solver does not produce a usable value
///
/// Groups carrying this value are excluded from failure consideration.
pub const FS_UNSTABLE_SENTINEL: f64 = 9999.0;

/// Smallest slope angle (radians) used in place of a flat surface
pub const EPSILON_ANGLE: f64 = 1e-4;

/// Smallest moisture deficit Δθ used by the infiltration formulas
pub const EPSILON_MOISTURE: f64 = 1e-4;

/// Smallest suction (kPa) used by the infiltration formulas
pub const EPSILON_SUCTION: f64 = 1e-4;

/// Lower limit of the Janbu mα term
pub const MIN_M_ALPHA: f64 = 0.2;

/// Largest relative difference between the last two 3D iterates accepted as a fallback
pub const FS_FALLBACK_TOLERANCE: f64 = 1e-2;

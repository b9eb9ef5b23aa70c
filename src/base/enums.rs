use serde::{Deserialize, Serialize};

/// Defines the stability analysis performed at each output time step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Analysis {
    /// Infinite-slope analysis with a depth search in each cell
    InfiniteSlope,

    /// Janbu 3D limit-equilibrium analysis over superellipse groups of cells
    Janbu3D,
}

/// Defines the class of shear-strength behavior used by the Janbu 3D correction factor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum StrengthClass {
    /// Cohesion only (φ = 0)
    Cohesive,

    /// Friction only (c = 0)
    Frictional,

    /// Both cohesion and friction
    Mixed,
}

impl StrengthClass {
    /// Classifies a material by its (average) cohesion and friction angle
    pub fn classify(cohesion: f64, phi: f64) -> Self {
        if phi <= 0.0 {
            StrengthClass::Cohesive
        } else if cohesion <= 0.0 {
            StrengthClass::Frictional
        } else {
            StrengthClass::Mixed
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

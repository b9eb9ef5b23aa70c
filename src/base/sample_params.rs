use super::{ParamGrouping, ParamRoot, ParamSoil, ParamSwcc};

/// Holds samples of material and grouping parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns sample parameters for a silty sand (SI units)
    pub fn param_soil_sandy() -> ParamSoil {
        ParamSoil {
            swcc: ParamSwcc::VanGenuchten {
                alpha: 0.1, // 1/kPa
                n: 1.8,     // [-]
                m: 0.444,   // [-]
            },
            theta_sat: 0.40,      // [-]
            theta_res: 0.05,      // [-]
            residual_factor: 0.2, // [-]
            k_sat: 1e-5,          // m/s
            unit_weight: 19.0,    // kN/m³
            phi: 32.0,            // degrees
            phi_b: 15.0,          // degrees
            cohesion: 2.0,        // kPa
            root: ParamRoot::None,
        }
    }

    /// Returns sample parameters for a clayey soil described by the Fredlund-Xing SWCC (SI units)
    pub fn param_soil_clayey() -> ParamSoil {
        ParamSoil {
            swcc: ParamSwcc::FredlundXing {
                a: 30.0,        // kPa
                n: 1.2,         // [-]
                m: 0.8,         // [-]
                psi_res: 500.0, // kPa
            },
            theta_sat: 0.48,      // [-]
            theta_res: 0.10,      // [-]
            residual_factor: 0.2, // [-]
            k_sat: 5e-7,          // m/s
            unit_weight: 18.0,    // kN/m³
            phi: 26.0,            // degrees
            phi_b: 13.0,          // degrees
            cohesion: 6.0,        // kPa
            root: ParamRoot::None,
        }
    }

    /// Returns sample parameters for a forested silty sand
    pub fn param_soil_rooted() -> ParamSoil {
        let mut p = SampleParams::param_soil_sandy();
        p.root = ParamRoot::Constant {
            cohesion: 3.0,  // kPa
            tensile: 5.0,   // kPa
            max_depth: 1.0, // m
            surcharge: 0.5, // kPa
        };
        p
    }

    /// Returns sample parameters for generating small superellipse groups
    pub fn param_grouping_small() -> ParamGrouping {
        ParamGrouping {
            min_side: 1,
            max_side: 3,
            powers: vec![2.0, 4.0],
            aspect_ratios: vec![1.0, 0.6],
            rotations: vec![0.0, 45.0, 90.0],
        }
    }
}

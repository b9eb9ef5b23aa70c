use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds parameters for soil-water characteristic curves (SWCC)
///
/// Suctions are in kPa and volumetric water contents are dimensionless.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamSwcc {
    /// van Genuchten model
    ///
    /// ```text
    /// θ(ψ) = θr + (θs - θr) / [1 + (α ψ)ⁿ]ᵐ
    /// ```
    VanGenuchten {
        /// α parameter (1/kPa); 1/α approximates the air-entry suction
        alpha: f64,

        /// n parameter
        n: f64,

        /// m parameter
        m: f64,
    },

    /// Fredlund-Xing model
    ///
    /// ```text
    /// θ(ψ) = C(ψ) θs / {ln[e + (ψ/a)ⁿ]}ᵐ
    /// C(ψ) = 1 - ln(1 + ψ/ψres) / ln(1 + 10⁶/ψres)
    /// ```
    FredlundXing {
        /// a parameter (kPa); approximates the air-entry suction
        a: f64,

        /// n parameter
        n: f64,

        /// m parameter
        m: f64,

        /// Suction at residual water content (kPa)
        psi_res: f64,
    },
}

/// Holds parameters for root reinforcement
///
/// Cohesions are in kPa, tensions in kPa, depths in m and the surcharge in kPa (weight per plan area).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamRoot {
    /// No roots
    None,

    /// Root cohesion and tensile strength constant down to `max_depth`
    Constant {
        /// Root cohesion
        cohesion: f64,

        /// Root tensile strength per unit area of the vertical face
        tensile: f64,

        /// Maximum rooting depth
        max_depth: f64,

        /// Weight of the vegetation per plan area
        surcharge: f64,
    },

    /// Root reinforcement distributed with depth following an exponential probability density
    ///
    /// ```text
    /// c_r(z) = C_tot p(z),   p(z) = exp(-z/λ)/λ
    /// ```
    Exponential {
        /// Depth-integrated root cohesion C_tot (kPa·m)
        total_cohesion: f64,

        /// Depth-integrated root tensile strength (kPa·m)
        total_tensile: f64,

        /// Decay (mean) depth λ
        decay_depth: f64,

        /// Weight of the vegetation per plan area
        surcharge: f64,
    },
}

/// Holds the material properties of a soil column
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamSoil {
    /// Soil-water characteristic curve
    pub swcc: ParamSwcc,

    /// Saturated volumetric water content θs
    pub theta_sat: f64,

    /// Residual volumetric water content θr
    pub theta_res: f64,

    /// Residual-suction factor: wetted-zone suction = factor × air-entry suction
    pub residual_factor: f64,

    /// Saturated hydraulic conductivity (m/s)
    pub k_sat: f64,

    /// Total unit weight of soil (kN/m³)
    pub unit_weight: f64,

    /// Effective friction angle φ' (degrees)
    pub phi: f64,

    /// Friction angle with respect to suction φᵇ (degrees)
    pub phi_b: f64,

    /// Effective cohesion c' (kPa)
    pub cohesion: f64,

    /// Root reinforcement
    pub root: ParamRoot,
}

impl ParamSoil {
    /// Validates the parameters
    pub fn validate(&self) -> Result<(), StrError> {
        if self.theta_sat <= 0.0 || self.theta_sat > 1.0 {
            return Err("theta_sat must satisfy 0 < θs ≤ 1");
        }
        if self.theta_res < 0.0 || self.theta_res >= self.theta_sat {
            return Err("theta_res must satisfy 0 ≤ θr < θs");
        }
        if self.residual_factor <= 0.0 {
            return Err("residual_factor must be > 0.0");
        }
        if self.k_sat <= 0.0 {
            return Err("k_sat must be > 0.0");
        }
        if self.unit_weight <= 0.0 {
            return Err("unit_weight must be > 0.0");
        }
        if self.phi < 0.0 || self.phi >= 90.0 {
            return Err("phi must satisfy 0 ≤ φ < 90");
        }
        if self.phi_b < 0.0 || self.phi_b >= 90.0 {
            return Err("phi_b must satisfy 0 ≤ φb < 90");
        }
        if self.cohesion < 0.0 {
            return Err("cohesion must be ≥ 0.0");
        }
        match self.swcc {
            ParamSwcc::VanGenuchten { alpha, n, m } => {
                if alpha <= 0.0 || n <= 0.0 || m <= 0.0 {
                    return Err("van Genuchten parameters must be > 0.0");
                }
            }
            ParamSwcc::FredlundXing { a, n, m, psi_res } => {
                if a <= 0.0 || n <= 0.0 || m <= 0.0 || psi_res <= 0.0 {
                    return Err("Fredlund-Xing parameters must be > 0.0");
                }
            }
        }
        match self.root {
            ParamRoot::None => (),
            ParamRoot::Constant {
                cohesion,
                tensile,
                max_depth,
                surcharge,
            } => {
                if cohesion < 0.0 || tensile < 0.0 || max_depth < 0.0 || surcharge < 0.0 {
                    return Err("constant root parameters must be ≥ 0.0");
                }
            }
            ParamRoot::Exponential {
                total_cohesion,
                total_tensile,
                decay_depth,
                surcharge,
            } => {
                if total_cohesion < 0.0 || total_tensile < 0.0 || surcharge < 0.0 {
                    return Err("exponential root parameters must be ≥ 0.0");
                }
                if decay_depth <= 0.0 {
                    return Err("decay_depth must be > 0.0");
                }
            }
        }
        Ok(())
    }
}

/// Holds parameters for generating superellipse slip-surface groups
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamGrouping {
    /// Minimum group side length (number of cells)
    pub min_side: usize,

    /// Maximum group side length (number of cells)
    pub max_side: usize,

    /// Superellipse powers n in |x/a|ⁿ + |y/b|ⁿ ≤ 1
    pub powers: Vec<f64>,

    /// Ratios b/a between the minor and major semi-axes (0 < ratio ≤ 1)
    pub aspect_ratios: Vec<f64>,

    /// Rotation angles of the major axis (degrees, counterclockwise from the column axis)
    pub rotations: Vec<f64>,
}

impl ParamGrouping {
    /// Validates the parameters
    pub fn validate(&self) -> Result<(), StrError> {
        if self.min_side < 1 {
            return Err("min_side must be ≥ 1");
        }
        if self.max_side < self.min_side {
            return Err("max_side must be ≥ min_side");
        }
        if self.powers.is_empty() || self.powers.iter().any(|n| *n <= 0.0) {
            return Err("powers must be non-empty and > 0.0");
        }
        if self.aspect_ratios.is_empty() || self.aspect_ratios.iter().any(|r| *r <= 0.0 || *r > 1.0) {
            return Err("aspect_ratios must be non-empty and satisfy 0 < ratio ≤ 1");
        }
        if self.rotations.is_empty() {
            return Err("rotations must be non-empty");
        }
        Ok(())
    }
}

/// Holds the regression coefficients of the Janbu 3D correction factor
///
/// ```text
/// f₀ = 1 + b₁ [d/L - 1.4 (d/L)²]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamCorrection {
    /// b₁ for cohesion-only materials (φ = 0)
    pub b1_cohesive: f64,

    /// b₁ for friction-only materials (c = 0)
    pub b1_frictional: f64,

    /// b₁ for c-φ materials
    pub b1_mixed: f64,
}

impl ParamCorrection {
    /// Returns the published coefficients (Janbu 1973)
    pub fn janbu() -> Self {
        ParamCorrection {
            b1_cohesive: 0.69,
            b1_frictional: 0.31,
            b1_mixed: 0.50,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ParamGrouping, ParamRoot, ParamSwcc};
    use crate::base::SampleParams;

    #[test]
    fn validate_soil_works() {
        let p = SampleParams::param_soil_sandy();
        assert_eq!(p.validate(), Ok(()));

        let mut q = p;
        q.theta_res = q.theta_sat;
        assert_eq!(q.validate().err(), Some("theta_res must satisfy 0 ≤ θr < θs"));

        let mut q = p;
        q.k_sat = 0.0;
        assert_eq!(q.validate().err(), Some("k_sat must be > 0.0"));

        let mut q = p;
        q.swcc = ParamSwcc::FredlundXing {
            a: 10.0,
            n: 1.5,
            m: 1.0,
            psi_res: 0.0,
        };
        assert_eq!(q.validate().err(), Some("Fredlund-Xing parameters must be > 0.0"));

        let mut q = p;
        q.root = ParamRoot::Exponential {
            total_cohesion: 1.0,
            total_tensile: 1.0,
            decay_depth: 0.0,
            surcharge: 0.0,
        };
        assert_eq!(q.validate().err(), Some("decay_depth must be > 0.0"));
    }

    #[test]
    fn validate_grouping_works() {
        let mut p = ParamGrouping {
            min_side: 2,
            max_side: 3,
            powers: vec![2.0],
            aspect_ratios: vec![1.0],
            rotations: vec![0.0],
        };
        assert_eq!(p.validate(), Ok(()));
        p.max_side = 1;
        assert_eq!(p.validate().err(), Some("max_side must be ≥ min_side"));
        p.max_side = 3;
        p.aspect_ratios = vec![1.5];
        assert_eq!(
            p.validate().err(),
            Some("aspect_ratios must be non-empty and satisfy 0 < ratio ≤ 1")
        );
    }
}

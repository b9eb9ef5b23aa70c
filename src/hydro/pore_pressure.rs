use crate::base::Precision;

/// Defines the distribution of pore-water pressure along a soil column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressureRegime {
    /// Wetted zone above the front; initial suction below; no groundwater
    TwoLayer,

    /// Wetted zone above the front; initial suction down to the groundwater table; hydrostatic below
    ThreeLayer,

    /// The wetting front merged with the rising groundwater table
    ///
    /// The lateral-flow factor cos²(slope) also reduces the hydrostatic part of this regime.
    Merged,

    /// The groundwater table reached the surface (ponding); hydrostatic everywhere
    Ponded,
}

/// Computes the pore-water pressure at any elevation of a soil column
///
/// Pressures are positive below the groundwater table and negative (suction) above.
/// All elevations are rounded to the thickness precision before the regime is selected,
/// and the results are rounded to the pressure precision.
#[derive(Clone, Copy, Debug)]
pub struct PorePressure {
    bottom: f64,      // bedrock elevation
    top: f64,         // ground surface elevation
    groundwater: f64, // groundwater elevation
    front: f64,       // wetting-front elevation
    psi_i: f64,       // initial suction
    psi_r: f64,       // residual suction of the wetted zone
    gamma_w: f64,     // unit weight of water
    lateral: f64,     // cos²(slope) or 1.0
    regime: PressureRegime,
    precision: Precision,
}

impl PorePressure {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `bottom`, `top` -- bedrock and ground surface elevations
    /// * `groundwater` -- groundwater elevation
    /// * `front` -- wetting-front elevation
    /// * `psi_i`, `psi_r` -- initial and residual suctions (kPa, positive)
    /// * `gamma_w` -- unit weight of water
    /// * `slope` -- slope angle (radians) for the lateral-flow reduction; None disables it
    /// * `precision` -- decimal places
    pub fn new(
        bottom: f64,
        top: f64,
        groundwater: f64,
        front: f64,
        psi_i: f64,
        psi_r: f64,
        gamma_w: f64,
        slope: Option<f64>,
        precision: &Precision,
    ) -> Self {
        let bottom = precision.thickness(bottom);
        let top = precision.thickness(top);
        let groundwater = precision.thickness(groundwater);
        let front = precision.thickness(front);
        let floor = f64::max(bottom, groundwater);
        let regime = if groundwater >= top {
            PressureRegime::Ponded
        } else if front > floor {
            if groundwater <= bottom {
                PressureRegime::TwoLayer
            } else {
                PressureRegime::ThreeLayer
            }
        } else {
            PressureRegime::Merged
        };
        let lateral = match slope {
            Some(alpha) => f64::powi(f64::cos(alpha), 2),
            None => 1.0,
        };
        PorePressure {
            bottom,
            top,
            groundwater,
            front,
            psi_i,
            psi_r,
            gamma_w,
            lateral,
            regime,
            precision: *precision,
        }
    }

    /// Returns the selected regime
    pub fn regime(&self) -> PressureRegime {
        self.regime
    }

    /// Calculates the pore-water pressure at the elevation z
    pub fn calc(&self, z: f64) -> f64 {
        let z = self.precision.thickness(z);
        let hydrostatic = |factor: f64| f64::max(0.0, self.gamma_w * (self.groundwater - z) * factor);
        let uw = match self.regime {
            PressureRegime::TwoLayer => {
                if z >= self.front {
                    -self.psi_r
                } else {
                    -self.psi_i
                }
            }
            PressureRegime::ThreeLayer => {
                if z >= self.front {
                    -self.psi_r
                } else if z > self.groundwater {
                    -self.psi_i
                } else {
                    hydrostatic(self.lateral)
                }
            }
            PressureRegime::Merged => {
                if z > self.groundwater {
                    -self.psi_r
                } else {
                    hydrostatic(self.lateral)
                }
            }
            PressureRegime::Ponded => hydrostatic(1.0),
        };
        self.precision.pressure(uw)
    }

    /// Calculates the pore-water pressure at a set of elevations
    pub fn calc_profile(&self, zz: &[f64]) -> Vec<f64> {
        zz.iter().map(|z| self.calc(*z)).collect()
    }

    /// Calculates the pore-water pressure at elevations spaced by `dz` from bottom to top (inclusive)
    ///
    /// Returns `(elevations, pressures)`.
    pub fn calc_column(&self, dz: f64) -> (Vec<f64>, Vec<f64>) {
        let mut zz = Vec::new();
        if dz > 0.0 {
            let n = ((self.top - self.bottom) / dz + 1e-9).floor() as usize;
            for k in 0..(n + 1) {
                zz.push(self.precision.thickness(self.bottom + k as f64 * dz));
            }
        }
        let uu = self.calc_profile(&zz);
        (zz, uu)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

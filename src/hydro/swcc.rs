use crate::base::{ParamSoil, ParamSwcc, EPSILON_MOISTURE, EPSILON_SUCTION};
use crate::StrError;

/// Defines the trait for soil-water characteristic curves
pub trait Swcc: Send + Sync {
    /// Returns the volumetric water content θ corresponding to the suction ψ (kPa)
    fn theta(&self, psi: f64) -> f64;

    /// Returns an estimate of the air-entry suction (kPa)
    fn air_entry(&self) -> f64;
}

/// Implements the van Genuchten SWCC
///
/// # Reference
///
/// * van Genuchten MT (1980) A closed-form equation for predicting the hydraulic conductivity
///   of unsaturated soils. Soil Science Society of America Journal, 44(5), 892-898
pub struct SwccVanGenuchten {
    alpha: f64,     // α parameter
    n: f64,         // n parameter
    m: f64,         // m parameter
    theta_sat: f64, // saturated water content
    theta_res: f64, // residual water content
}

/// Implements the Fredlund-Xing SWCC
///
/// # Reference
///
/// * Fredlund DG and Xing A (1994) Equations for the soil-water characteristic curve.
///   Canadian Geotechnical Journal, 31(4), 521-532
pub struct SwccFredlundXing {
    a: f64,         // a parameter
    n: f64,         // n parameter
    m: f64,         // m parameter
    psi_res: f64,   // suction at residual water content
    theta_sat: f64, // saturated water content
}

impl Swcc for SwccVanGenuchten {
    fn theta(&self, psi: f64) -> f64 {
        if psi <= 0.0 {
            return self.theta_sat;
        }
        let den = f64::powf(1.0 + f64::powf(self.alpha * psi, self.n), self.m);
        self.theta_res + (self.theta_sat - self.theta_res) / den
    }

    fn air_entry(&self) -> f64 {
        1.0 / self.alpha
    }
}

impl Swcc for SwccFredlundXing {
    fn theta(&self, psi: f64) -> f64 {
        if psi <= 0.0 {
            return self.theta_sat;
        }
        let correction = 1.0 - f64::ln(1.0 + psi / self.psi_res) / f64::ln(1.0 + 1e6 / self.psi_res);
        let den = f64::powf(f64::ln(std::f64::consts::E + f64::powf(psi / self.a, self.n)), self.m);
        f64::max(0.0, correction * self.theta_sat / den)
    }

    fn air_entry(&self) -> f64 {
        self.a
    }
}

/// Allocates a new SWCC model
pub fn new_swcc(param: &ParamSoil) -> Result<Box<dyn Swcc>, StrError> {
    param.validate()?;
    let model: Box<dyn Swcc> = match param.swcc {
        ParamSwcc::VanGenuchten { alpha, n, m } => Box::new(SwccVanGenuchten {
            alpha,
            n,
            m,
            theta_sat: param.theta_sat,
            theta_res: param.theta_res,
        }),
        ParamSwcc::FredlundXing { a, n, m, psi_res } => Box::new(SwccFredlundXing {
            a,
            n,
            m,
            psi_res,
            theta_sat: param.theta_sat,
        }),
    };
    Ok(model)
}

/// Holds the suctions and moisture deficit used by the infiltration model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WettingProperties {
    /// Initial suction ψi (kPa) of the unwetted zone
    pub psi_i: f64,

    /// Residual suction ψr (kPa) of the wetted zone
    pub psi_r: f64,

    /// Moisture deficit Δθ = θ(ψr) - θ(ψi)
    pub delta_theta: f64,
}

impl WettingProperties {
    /// Computes the wetting properties of a soil given the initial suction (kPa)
    ///
    /// Both ψr and Δθ are clamped to small positive values.
    pub fn new(param: &ParamSoil, psi_i: f64) -> Result<Self, StrError> {
        if psi_i < 0.0 {
            return Err("initial suction must be ≥ 0.0");
        }
        let swcc = new_swcc(param)?;
        let psi_r = f64::max(param.residual_factor * swcc.air_entry(), EPSILON_SUCTION);
        let delta_theta = f64::max(swcc.theta(psi_r) - swcc.theta(psi_i), EPSILON_MOISTURE);
        Ok(WettingProperties {
            psi_i,
            psi_r,
            delta_theta,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{new_swcc, WettingProperties};
    use crate::base::{SampleParams, EPSILON_MOISTURE};
    use russell_lab::approx_eq;

    #[test]
    fn van_genuchten_works() {
        let p = SampleParams::param_soil_sandy();
        let swcc = new_swcc(&p).unwrap();
        approx_eq(swcc.theta(0.0), 0.40, 1e-15);
        approx_eq(swcc.theta(-5.0), 0.40, 1e-15);
        approx_eq(swcc.air_entry(), 10.0, 1e-14);
        // θ(10) = 0.05 + 0.35 / (1 + 1^1.8)^0.444
        let correct = 0.05 + 0.35 / f64::powf(2.0, 0.444);
        approx_eq(swcc.theta(10.0), correct, 1e-14);
        // decreasing
        let mut prev = swcc.theta(0.0);
        for k in 1..50 {
            let theta = swcc.theta(k as f64 * 5.0);
            assert!(theta < prev);
            assert!(theta > 0.05);
            prev = theta;
        }
    }

    #[test]
    fn fredlund_xing_works() {
        let p = SampleParams::param_soil_clayey();
        let swcc = new_swcc(&p).unwrap();
        approx_eq(swcc.theta(0.0), 0.48, 1e-15);
        approx_eq(swcc.air_entry(), 30.0, 1e-15);
        approx_eq(swcc.theta(1e6), 0.0, 1e-12);
        let mut prev = swcc.theta(0.0);
        for k in 1..50 {
            let theta = swcc.theta(k as f64 * 20.0);
            assert!(theta < prev);
            prev = theta;
        }
    }

    #[test]
    fn wetting_properties_work() {
        let p = SampleParams::param_soil_sandy();
        assert_eq!(
            WettingProperties::new(&p, -1.0).err(),
            Some("initial suction must be ≥ 0.0")
        );
        let w = WettingProperties::new(&p, 50.0).unwrap();
        approx_eq(w.psi_r, 2.0, 1e-14);
        let swcc = new_swcc(&p).unwrap();
        approx_eq(w.delta_theta, swcc.theta(2.0) - swcc.theta(50.0), 1e-15);
        assert!(w.delta_theta > 0.1);

        // initial suction wetter than the wetted zone
        let w = WettingProperties::new(&p, 1.0).unwrap();
        assert_eq!(w.delta_theta, EPSILON_MOISTURE);
    }
}

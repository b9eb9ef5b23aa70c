use super::{RootReinforcement, SoilColumn, StabilityResult};
use crate::base::{Config, Precision, EPSILON_ANGLE, FS_STABLE_SENTINEL};
use crate::hydro::PorePressure;

/// Computes the infinite-slope factor of safety for unsaturated soils
///
/// ```text
///       c + σ cos²α tanφ - u tanφᵇ
/// FS = ----------------------------
///            σ sinα cosα
/// ```
///
/// where `φᵇ = φ` if `u ≥ 0` (saturated). Negative values are clamped to zero.
///
/// # Input
///
/// * `cohesion` -- total cohesion (soil plus roots)
/// * `sigma` -- total overburden stress at the slip surface (> 0)
/// * `alpha` -- slope angle in radians (> 0)
/// * `tan_phi`, `tan_phi_b` -- tangents of the friction angles
/// * `uw` -- pore-water pressure (negative means suction)
pub fn infinite_slope_fs(cohesion: f64, sigma: f64, alpha: f64, tan_phi: f64, tan_phi_b: f64, uw: f64) -> f64 {
    let (sin_a, cos_a) = f64::sin_cos(alpha);
    let tan_b = if uw >= 0.0 { tan_phi } else { tan_phi_b };
    let resisting = cohesion + sigma * cos_a * cos_a * tan_phi - uw * tan_b;
    let driving = sigma * sin_a * cos_a;
    f64::max(0.0, resisting / driving)
}

/// Implements the infinite-slope analysis with a depth search in each cell
#[derive(Clone, Copy, Debug)]
pub struct InfiniteSlope {
    fs_critical: f64,
    depth_increment: f64,
    lateral_flow: bool,
    root_resistance: bool,
    precision: Precision,
}

impl InfiniteSlope {
    /// Allocates a new instance
    pub fn new(config: &Config) -> Self {
        InfiniteSlope {
            fs_critical: config.fs_critical,
            depth_increment: config.depth_increment,
            lateral_flow: config.lateral_flow,
            root_resistance: config.root_resistance,
            precision: config.precision,
        }
    }

    /// Returns the factor of safety of a slip surface at `depth` below the ground surface
    pub fn factor_of_safety(&self, column: &SoilColumn, depth: f64) -> f64 {
        let pore = column.pore_pressure(self.lateral_flow, &self.precision);
        self.fs_at(column, &pore, column.hydraulics.top - depth)
    }

    /// Searches the depth with minimum factor of safety
    ///
    /// The slip surface is moved from the bedrock up to the surface in steps of the depth increment.
    /// The failure thickness is the deepest depth with `FS ≤ FS_critical` (or zero).
    pub fn analyze(&self, column: &SoilColumn) -> StabilityResult {
        let h = &column.hydraulics;
        let thickness = self.precision.thickness(column.thickness());
        if thickness <= self.depth_increment {
            return StabilityResult::stable();
        }
        let pore = column.pore_pressure(self.lateral_flow, &self.precision);
        let n = (thickness / self.depth_increment + 1e-9).floor() as usize;
        let mut fs_min = f64::INFINITY;
        let mut failure_thickness = 0.0;
        for k in 0..n {
            let z = self.precision.thickness(h.bottom + (k as f64) * self.depth_increment);
            let fs = self.fs_at(column, &pore, z);
            if fs < fs_min {
                fs_min = fs;
            }
            if fs <= self.fs_critical && failure_thickness == 0.0 {
                failure_thickness = self.precision.thickness(h.top - z);
            }
        }
        if !fs_min.is_finite() {
            return StabilityResult::stable();
        }
        StabilityResult {
            fs: fs_min,
            failure_thickness,
        }
    }

    /// Computes the factor of safety at the elevation z using a pre-built pressure model
    fn fs_at(&self, column: &SoilColumn, pore: &PorePressure, z: f64) -> f64 {
        let h = &column.hydraulics;
        let soil = &column.soil;
        let depth = h.top - z;
        if depth <= 0.0 {
            return FS_STABLE_SENTINEL;
        }
        let root = RootReinforcement::new(soil.root);
        let (root_cohesion, surcharge) = if self.root_resistance {
            (root.basal_cohesion(depth), root.surcharge())
        } else {
            (0.0, 0.0)
        };
        let sigma = soil.unit_weight * depth + h.gamma_w * column.ponding_depth() + surcharge;
        let alpha = f64::max(h.dip, EPSILON_ANGLE);
        let uw = pore.calc(z);
        let fs = infinite_slope_fs(
            soil.cohesion + root_cohesion,
            sigma,
            alpha,
            f64::tan(f64::to_radians(soil.phi)),
            f64::tan(f64::to_radians(soil.phi_b)),
            uw,
        );
        self.precision.fs(fs)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{infinite_slope_fs, InfiniteSlope};
    use crate::base::{Aspect, Config, Precision, SampleParams, FS_STABLE_SENTINEL};
    use crate::hydro::ColumnHydraulics;
    use crate::stability::SoilColumn;
    use russell_lab::approx_eq;

    fn column(top: f64, bottom: f64, dip_deg: f64, groundwater: f64, front: f64) -> SoilColumn {
        let p = Precision::new();
        let soil = SampleParams::param_soil_sandy();
        let hydraulics =
            ColumnHydraulics::new(top, bottom, f64::to_radians(dip_deg), &soil, 50.0, 9.81, 0.0).unwrap();
        let mut state = hydraulics.initialize(groundwater, 0.0, &p);
        state.groundwater = groundwater;
        state.front = front;
        SoilColumn {
            hydraulics,
            state,
            soil,
            aspect: Aspect::Flat,
            center: (0.5, -0.5),
        }
    }

    #[test]
    fn formula_is_monotonic() {
        let alpha = f64::to_radians(35.0);
        let (tp, tb) = (f64::tan(f64::to_radians(30.0)), f64::tan(f64::to_radians(15.0)));
        let mut prev = infinite_slope_fs(0.0, 20.0, alpha, tp, tb, -10.0);
        for c in [1.0, 2.0, 5.0, 10.0] {
            let fs = infinite_slope_fs(c, 20.0, alpha, tp, tb, -10.0);
            assert!(fs >= prev);
            prev = fs;
        }
        let mut prev = infinite_slope_fs(2.0, 20.0, alpha, tp, tb, -20.0);
        for u in [-10.0, -1.0, 0.0, 1.0, 5.0, 50.0] {
            let fs = infinite_slope_fs(2.0, 20.0, alpha, tp, tb, u);
            assert!(fs <= prev);
            prev = fs;
        }
        // very large pressure: clamped
        assert_eq!(infinite_slope_fs(0.0, 20.0, alpha, tp, tb, 1000.0), 0.0);
    }

    #[test]
    fn dry_cohesionless_matches_classical_solution() {
        let alpha = f64::to_radians(20.0);
        let tp = f64::tan(f64::to_radians(30.0));
        approx_eq(infinite_slope_fs(0.0, 19.0, alpha, tp, 0.0, 0.0), tp / f64::tan(alpha), 1e-14);
    }

    #[test]
    fn thin_column_is_stable() {
        let config = Config::new();
        let analyzer = InfiniteSlope::new(&config);
        let res = analyzer.analyze(&column(10.0, 9.95, 30.0, 9.95, 10.0));
        assert_eq!(res.fs, FS_STABLE_SENTINEL);
        assert_eq!(res.failure_thickness, 0.0);
    }

    #[test]
    fn saturated_slope_fails_at_bedrock() {
        // flat groundwater at the surface on a steep slope without lateral flow
        let mut config = Config::new();
        config.set_lateral_flow(false).unwrap();
        let analyzer = InfiniteSlope::new(&config);
        let col = column(10.0, 8.0, 40.0, 10.0, 10.0);
        let res = analyzer.analyze(&col);
        assert!(res.fs <= 1.0);
        assert_eq!(res.failure_thickness, 2.0);
        // check the value at the bedrock
        let soil = &col.soil;
        let alpha = f64::to_radians(40.0);
        let sigma = soil.unit_weight * 2.0;
        let uw = 9.81 * 2.0;
        let tp = f64::tan(f64::to_radians(soil.phi));
        let correct = (soil.cohesion + sigma * f64::powi(f64::cos(alpha), 2) * tp - uw * tp)
            / (sigma * f64::sin(alpha) * f64::cos(alpha));
        approx_eq(analyzer.factor_of_safety(&col, 2.0), correct, 1e-4);
    }

    #[test]
    fn dry_gentle_slope_is_stable() {
        let config = Config::new();
        let analyzer = InfiniteSlope::new(&config);
        let res = analyzer.analyze(&column(10.0, 8.0, 10.0, 8.0, 10.0));
        assert!(res.fs > 1.0);
        assert_eq!(res.failure_thickness, 0.0);
    }

    #[test]
    fn roots_increase_the_factor_of_safety() {
        let mut config = Config::new();
        let mut col = column(10.0, 9.0, 35.0, 9.5, 9.5);
        col.soil = SampleParams::param_soil_rooted();
        let without = InfiniteSlope::new(&config).factor_of_safety(&col, 0.5);
        config.set_root_resistance(true).unwrap();
        let with = InfiniteSlope::new(&config).factor_of_safety(&col, 0.5);
        assert!(with > without);
    }
}

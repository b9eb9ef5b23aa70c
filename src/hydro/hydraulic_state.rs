use super::{GreenAmpt, WettingProperties};
use crate::base::{FixedPoint, ParamSoil, Precision};
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the hydraulic state of a soil column at a time instant
///
/// Invariants: `bottom ≤ front ≤ top`, `bottom ≤ groundwater ≤ top + max_storage` and
/// `P + S₀ = F + S + RO`, where S₀ is the water ponded on the surface at t = 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HydraulicState {
    /// Time
    pub time: f64,

    /// Wetting-front elevation
    pub front: f64,

    /// Depth of the wetted zone measured from the surface
    pub depth: f64,

    /// Cumulative infiltration F
    pub infiltration: f64,

    /// Instantaneous infiltration rate f
    pub rate: f64,

    /// Depth of water stored (ponded) on the surface S
    pub storage: f64,

    /// Cumulative precipitation P
    pub precipitation: f64,

    /// Cumulative runoff RO
    pub runoff: f64,

    /// Water ponded on the surface at t = 0 (S₀)
    #[serde(default)]
    pub initial_storage: f64,

    /// Groundwater elevation
    pub groundwater: f64,

    /// Time to ponding Tp under the initial rainfall (None if ponding cannot occur)
    pub ponding_time: Option<f64>,

    /// Equivalent-time correction Tpp associated with Tp
    pub ponding_shift: f64,
}

impl HydraulicState {
    /// Returns the ponded Green-Ampt time `t - Tp + Tpp` given by the initial ponding clock
    ///
    /// The infiltration update does not read this clock; it shifts the Green-Ampt time by the
    /// equivalent time of the current cumulative infiltration, which also holds when the rainfall
    /// varies. Both agree while the initial rainfall persists, so this value reports when (and how
    /// far into) the first ponding episode a column is under the initial rainfall.
    ///
    /// Returns None if ponding cannot occur under the initial rainfall or has not started yet.
    pub fn ponded_time(&self) -> Option<f64> {
        match self.ponding_time {
            Some(tp) if self.time >= tp => Some(self.time - tp + self.ponding_shift),
            _ => None,
        }
    }
}

/// Holds the constant hydraulic data of a soil column and advances its state
///
/// Each update is a pure function of the previous state of the same column and
/// the current rainfall; no other column is involved.
#[derive(Clone, Copy, Debug)]
pub struct ColumnHydraulics {
    /// Ground surface elevation
    pub top: f64,

    /// Bedrock elevation
    pub bottom: f64,

    /// Slope of the surface (radians)
    pub dip: f64,

    /// Saturated hydraulic conductivity
    pub k_sat: f64,

    /// Suctions and moisture deficit
    pub wetting: WettingProperties,

    /// Unit weight of water
    pub gamma_w: f64,

    /// Maximum surface storage
    pub max_storage: f64,
}

impl ColumnHydraulics {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `top`, `bottom` -- ground surface and bedrock elevations
    /// * `dip` -- slope (radians)
    /// * `soil` -- material parameters
    /// * `psi_i` -- initial suction (kPa)
    /// * `gamma_w` -- unit weight of water
    /// * `max_storage` -- maximum surface storage
    pub fn new(
        top: f64,
        bottom: f64,
        dip: f64,
        soil: &ParamSoil,
        psi_i: f64,
        gamma_w: f64,
        max_storage: f64,
    ) -> Result<Self, StrError> {
        if bottom > top {
            return Err("bottom elevation must be ≤ top elevation");
        }
        if gamma_w <= 0.0 {
            return Err("unit weight of water must be > 0.0");
        }
        let wetting = WettingProperties::new(soil, psi_i)?;
        Ok(ColumnHydraulics {
            top,
            bottom,
            dip,
            k_sat: soil.k_sat,
            wetting,
            gamma_w,
            max_storage: f64::max(0.0, max_storage),
        })
    }

    /// Returns the Green-Ampt model of this column (suction head = ψr/γw)
    pub fn green_ampt(&self) -> GreenAmpt {
        let psi_head = self.wetting.psi_r / self.gamma_w;
        GreenAmpt::new(self.k_sat, self.dip, psi_head, self.wetting.delta_theta)
    }

    /// Initializes the state at t = 0
    ///
    /// # Input
    ///
    /// * `groundwater` -- initial groundwater elevation (clamped to the column)
    /// * `rain` -- rainfall intensity at t = 0
    /// * `precision` -- decimal places
    pub fn initialize(&self, groundwater: f64, rain: f64, precision: &Precision) -> HydraulicState {
        let ga = self.green_ampt();
        let supply = f64::max(0.0, rain) * f64::cos(self.dip);
        let (ponding_time, ponding_shift) = match ga.ponding_cumulative(supply) {
            Some(fp) => (
                Some(precision.time(fp / supply)),
                precision.time(ga.equivalent_time(fp)),
            ),
            None => (None, 0.0),
        };
        let gw = groundwater.clamp(self.bottom, self.top + self.max_storage);
        let storage = precision.volume(f64::max(0.0, gw - self.top));
        HydraulicState {
            time: 0.0,
            front: precision.thickness(self.top),
            depth: 0.0,
            infiltration: 0.0,
            rate: 0.0,
            storage,
            precipitation: 0.0,
            runoff: 0.0,
            initial_storage: storage,
            groundwater: precision.thickness(gw),
            ponding_time,
            ponding_shift,
        }
    }

    /// Computes the next state after a time step
    ///
    /// # Input
    ///
    /// * `prev` -- state at the beginning of the step
    /// * `rain` -- rainfall intensity during the step
    /// * `dt` -- time step
    /// * `solver` -- controls the Green-Ampt and ponding-clearance iterations
    /// * `precision` -- decimal places
    pub fn step(
        &self,
        prev: &HydraulicState,
        rain: f64,
        dt: f64,
        solver: &FixedPoint,
        precision: &Precision,
    ) -> HydraulicState {
        let supply = f64::max(0.0, rain) * f64::cos(self.dip);
        let water_in = supply * dt;
        let available = prev.storage + water_in;
        let thickness = self.top - self.bottom;

        // infiltration and groundwater/front update
        let (delta_f, rate, front, depth, groundwater) = if prev.groundwater >= self.top {
            // saturated up to the surface: no further infiltration
            (0.0, 0.0, prev.front, prev.depth, prev.groundwater)
        } else if prev.front <= self.bottom {
            // the wetting front already merged with the groundwater table
            let capacity = if prev.storage > 0.0 {
                self.k_sat
            } else {
                f64::min(supply, self.k_sat)
            };
            let delta_f = f64::min(capacity * dt, available);
            let gw = f64::min(f64::max(prev.groundwater, self.bottom) + delta_f, self.top);
            (delta_f, delta_f / dt, self.bottom, thickness, gw)
        } else {
            // Green-Ampt tracking of the wetting front
            let (delta_f, rate) = self.infiltrate(prev, supply, dt, solver);
            let z = prev.front - delta_f / self.wetting.delta_theta;
            let floor = f64::max(prev.groundwater, self.bottom);
            if z <= floor {
                // the front reached the groundwater table (or bedrock) during this step
                let excess = floor - z;
                let gw = f64::min(floor + excess, self.top);
                (delta_f, rate, self.bottom, thickness, gw)
            } else {
                (delta_f, rate, z, self.top - z, prev.groundwater)
            }
        };

        // surface water balance
        let excess = water_in - delta_f;
        let storage = if excess >= 0.0 {
            f64::min(prev.storage + excess, self.max_storage)
        } else {
            f64::max(prev.storage + excess, 0.0)
        };

        // ponding over a saturated column raises the water table above the surface
        let groundwater = if groundwater >= self.top {
            self.top + storage
        } else {
            groundwater
        };

        // rounding (cumulative quantities first, runoff closes the balance)
        let precipitation = precision.volume(prev.precipitation + water_in);
        let infiltration = precision.volume(prev.infiltration + delta_f);
        let storage = precision.volume(storage);
        let runoff = f64::max(
            prev.runoff,
            precision.volume(precipitation + prev.initial_storage - infiltration - storage),
        );
        HydraulicState {
            time: precision.time(prev.time + dt),
            front: precision.thickness(front),
            depth: precision.thickness(depth),
            infiltration,
            rate: precision.rate(rate),
            storage,
            precipitation,
            runoff,
            initial_storage: prev.initial_storage,
            groundwater: precision.thickness(groundwater),
            ponding_time: prev.ponding_time,
            ponding_shift: prev.ponding_shift,
        }
    }

    /// Computes the infiltration (ΔF, f) during a step while the wetting front is tracked
    fn infiltrate(&self, prev: &HydraulicState, supply: f64, dt: f64, solver: &FixedPoint) -> (f64, f64) {
        let ga = self.green_ampt();
        let f_prev = prev.infiltration;
        let available = prev.storage + supply * dt;

        if prev.storage <= 0.0 {
            // no stored water: ponding only if the supply exceeds the capacity by the end of the step
            if supply <= ga.capacity(f_prev + supply * dt) {
                return (supply * dt, supply);
            }
            // ponding begins within the step (or at its start)
            let fp = match ga.ponding_cumulative(supply) {
                Some(fp) => f64::max(fp, f_prev),
                None => return (supply * dt, supply),
            };
            let dt_pre = f64::min((fp - f_prev) / supply, dt);
            let tau = ga.equivalent_time(fp) + (dt - dt_pre);
            let f_new = ga.cumulative(tau, fp, solver);
            let delta_f = (f_new - f_prev).clamp(0.0, available);
            return (delta_f, ga.capacity(f_prev + delta_f));
        }

        // stored water: check whether the ponding episode ends within this step
        if let Some(t_clear) = ga.clearing_time(prev.storage, f_prev, supply, solver) {
            if t_clear < dt {
                return (available, supply);
            }
        }

        // ponding active during the whole step
        let tau = ga.equivalent_time(f_prev) + dt;
        let f_new = ga.cumulative(tau, f_prev, solver);
        let delta_f = (f_new - f_prev).clamp(0.0, available);
        (delta_f, ga.capacity(f_prev + delta_f))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ColumnHydraulics, HydraulicState};
    use crate::base::{FixedPoint, Precision, SampleParams};
    use russell_lab::approx_eq;

    fn column(dip: f64, max_storage: f64) -> ColumnHydraulics {
        let soil = SampleParams::param_soil_sandy();
        ColumnHydraulics::new(100.0, 98.0, dip, &soil, 50.0, 9.81, max_storage).unwrap()
    }

    fn check_balance(s: &HydraulicState) {
        approx_eq(s.precipitation + s.initial_storage, s.infiltration + s.storage + s.runoff, 3e-6);
    }

    #[test]
    fn new_captures_errors() {
        let soil = SampleParams::param_soil_sandy();
        assert_eq!(
            ColumnHydraulics::new(1.0, 2.0, 0.0, &soil, 50.0, 9.81, 0.0).err(),
            Some("bottom elevation must be ≤ top elevation")
        );
        assert_eq!(
            ColumnHydraulics::new(2.0, 1.0, 0.0, &soil, 50.0, 0.0, 0.0).err(),
            Some("unit weight of water must be > 0.0")
        );
    }

    #[test]
    fn initialize_works() {
        let p = Precision::new();
        let col = column(0.0, 0.0);
        let s = col.initialize(90.0, 0.0, &p);
        assert_eq!(s.front, 100.0);
        assert_eq!(s.depth, 0.0);
        assert_eq!(s.groundwater, 98.0); // clamped to bedrock
        assert_eq!(s.ponding_time, None);

        let s = col.initialize(99.0, 5e-5, &p);
        assert_eq!(s.groundwater, 99.0);
        assert!(s.ponding_time.unwrap() > 0.0);
        assert!(s.ponding_shift > 0.0);
        assert!(s.ponding_shift < s.ponding_time.unwrap());
    }

    #[test]
    fn light_rain_infiltrates_fully() {
        let p = Precision::new();
        let solver = FixedPoint::new(100, 1e-4).unwrap();
        let col = column(0.0, 0.0);
        let rain = 2e-6;
        let dt = 3600.0;
        let mut s = col.initialize(98.0, rain, &p);
        for _ in 0..10 {
            let next = col.step(&s, rain, dt, &solver, &p);
            assert_eq!(next.storage, 0.0);
            assert_eq!(next.runoff, 0.0);
            approx_eq(s.front - next.front, rain * dt / col.wetting.delta_theta, 2e-4);
            check_balance(&next);
            s = next;
        }
    }

    #[test]
    fn step_is_deterministic() {
        let p = Precision::new();
        let solver = FixedPoint::new(100, 1e-4).unwrap();
        let col = column(f64::to_radians(25.0), 0.005);
        let mut s = col.initialize(98.5, 4e-5, &p);
        for _ in 0..5 {
            s = col.step(&s, 4e-5, 600.0, &solver, &p);
        }
        let a = col.step(&s, 4e-5, 600.0, &solver, &p);
        let b = col.step(&s, 4e-5, 600.0, &solver, &p);
        assert_eq!(a, b);
    }

    #[test]
    fn storage_is_capped_and_drains() {
        let p = Precision::new();
        let solver = FixedPoint::new(100, 1e-4).unwrap();
        let max_storage = 0.002;
        let col = column(0.0, max_storage);
        let mut s = col.initialize(98.0, 1e-4, &p);
        for _ in 0..20 {
            s = col.step(&s, 1e-4, 600.0, &solver, &p);
            assert!(s.storage <= max_storage);
            check_balance(&s);
        }
        assert_eq!(s.storage, max_storage);
        assert!(s.runoff > 0.0);
        // rain stops: the stored water infiltrates
        for _ in 0..20 {
            s = col.step(&s, 0.0, 600.0, &solver, &p);
            check_balance(&s);
        }
        assert_eq!(s.storage, 0.0);
    }

    #[test]
    fn saturated_column_stops_infiltrating() {
        let p = Precision::new();
        let solver = FixedPoint::new(100, 1e-4).unwrap();
        let col = column(0.0, 0.01);
        let s = col.initialize(100.0, 0.0, &p);
        let next = col.step(&s, 1e-6, 3600.0, &solver, &p);
        assert_eq!(next.infiltration, 0.0);
        assert_eq!(next.storage, 0.0036);
        assert_eq!(next.groundwater, 100.0036);
        check_balance(&next);
        let mut s = next;
        for _ in 0..5 {
            s = col.step(&s, 1e-6, 3600.0, &solver, &p);
        }
        assert_eq!(s.storage, 0.01);
        assert_eq!(s.groundwater, 100.01);
        check_balance(&s);
    }

    #[test]
    fn merged_front_raises_groundwater() {
        let p = Precision::new();
        let solver = FixedPoint::new(100, 1e-4).unwrap();
        let col = column(0.0, 0.0);
        let mut s = col.initialize(99.0, 0.0, &p);
        s.front = 98.0;
        s.depth = 2.0;
        let next = col.step(&s, 5e-6, 1000.0, &solver, &p);
        approx_eq(next.groundwater, 99.0 + 5e-6 * 1000.0, 1e-4);
        assert_eq!(next.front, 98.0);
        assert_eq!(next.depth, 2.0);
        // rain exceeds k_sat: infiltration limited to k_sat
        let next = col.step(&s, 5e-5, 1000.0, &solver, &p);
        approx_eq(next.infiltration, 1e-5 * 1000.0, 1e-6);
        approx_eq(next.rate, 1e-5, 1e-12);
        check_balance(&next);
    }

    #[test]
    fn initially_ponded_column_keeps_the_balance() {
        let p = Precision::new();
        let solver = FixedPoint::new(100, 1e-4).unwrap();
        let col = column(0.0, 0.01);
        let mut s = col.initialize(100.005, 0.0, &p);
        assert_eq!(s.storage, 0.005);
        assert_eq!(s.initial_storage, 0.005);
        assert_eq!(s.groundwater, 100.005);
        check_balance(&s);
        for _ in 0..3 {
            s = col.step(&s, 0.0, 3600.0, &solver, &p);
            assert_eq!(s.precipitation, 0.0);
            assert_eq!(s.storage, 0.005);
            assert_eq!(s.runoff, 0.0);
            check_balance(&s);
        }
        // rain fills the remaining storage and the excess runs off
        for _ in 0..3 {
            s = col.step(&s, 1e-6, 3600.0, &solver, &p);
            check_balance(&s);
        }
        assert_eq!(s.storage, 0.01);
        assert_eq!(s.groundwater, 100.01);
        approx_eq(s.runoff, 3.0 * 0.0036 + 0.005 - 0.01, 1e-9);
    }

    #[test]
    fn ponding_clock_agrees_under_constant_rain() {
        let p = Precision::new();
        let solver = FixedPoint::new(100, 1e-8).unwrap();
        let col = column(0.0, 1.0);
        let ga = col.green_ampt();
        let rain = 1e-4;
        let mut s = col.initialize(98.0, rain, &p);
        let tp = s.ponding_time.unwrap();
        assert!(tp > 0.0 && tp < 600.0);
        assert_eq!(s.ponded_time(), None);
        for _ in 0..10 {
            s = col.step(&s, rain, 600.0, &solver, &p);
            assert!(s.storage > 0.0);
            let tau = s.ponded_time().unwrap();
            approx_eq(ga.equivalent_time(s.infiltration), tau, 1.0);
        }
        // no clock without ponding
        let s = col.initialize(98.0, 1e-6, &p);
        assert_eq!(s.ponded_time(), None);
    }
}

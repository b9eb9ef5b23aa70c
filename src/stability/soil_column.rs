use crate::base::{Aspect, ParamSoil, Precision};
use crate::hydro::{ColumnHydraulics, HydraulicState, PorePressure};

/// Holds a snapshot of one soil column as seen by the stability analyzers
#[derive(Clone, Copy, Debug)]
pub struct SoilColumn {
    /// Geometry and hydraulic constants
    pub hydraulics: ColumnHydraulics,

    /// Hydraulic state at the current time
    pub state: HydraulicState,

    /// Material parameters
    pub soil: ParamSoil,

    /// Aspect of the base
    pub aspect: Aspect,

    /// Plan coordinates (east, north) of the cell center
    pub center: (f64, f64),
}

impl SoilColumn {
    /// Returns the soil thickness
    pub fn thickness(&self) -> f64 {
        self.hydraulics.top - self.hydraulics.bottom
    }

    /// Returns the depth of water ponded above the ground surface
    pub fn ponding_depth(&self) -> f64 {
        f64::max(0.0, self.state.groundwater - self.hydraulics.top)
    }

    /// Returns the pore-water pressure model of the current state
    pub fn pore_pressure(&self, lateral_flow: bool, precision: &Precision) -> PorePressure {
        let h = &self.hydraulics;
        let slope = if lateral_flow { Some(h.dip) } else { None };
        PorePressure::new(
            h.bottom,
            h.top,
            self.state.groundwater,
            self.state.front,
            h.wetting.psi_i,
            h.wetting.psi_r,
            h.gamma_w,
            slope,
            precision,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SoilColumn;
    use crate::base::{Aspect, Precision, SampleParams};
    use crate::hydro::{ColumnHydraulics, PressureRegime};

    #[test]
    fn snapshot_works() {
        let p = Precision::new();
        let soil = SampleParams::param_soil_sandy();
        let hydraulics = ColumnHydraulics::new(10.0, 8.0, 0.5, &soil, 50.0, 9.81, 0.01).unwrap();
        let mut state = hydraulics.initialize(10.005, 0.0, &p);
        state.groundwater = 10.005;
        let column = SoilColumn {
            hydraulics,
            state,
            soil,
            aspect: Aspect::Flat,
            center: (0.5, -0.5),
        };
        assert_eq!(column.thickness(), 2.0);
        assert!(f64::abs(column.ponding_depth() - 0.005) < 1e-12);
        assert_eq!(column.pore_pressure(true, &p).regime(), PressureRegime::Ponded);
    }
}

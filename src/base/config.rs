use super::{Analysis, FixedPoint, ParamCorrection, ParamGrouping, ParamSoil, Precision};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identification number of a material (soil) zone
pub type MaterialId = usize;

/// Holds configuration data such as physical constants, flags and material parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Unit weight of water γw (kN/m³)
    pub unit_weight_water: f64,

    /// Critical factor of safety
    pub fs_critical: f64,

    /// Depth increment used by the depth/thickness searches (also the minimum resolvable depth)
    pub depth_increment: f64,

    /// Maximum depth of water stored on the surface before runoff begins
    pub max_surface_storage: f64,

    /// Decimal places for each physical quantity
    pub precision: Precision,

    /// Applies the cos²(slope) lateral-flow reduction to hydrostatic pressures
    pub lateral_flow: bool,

    /// Enables side resistance in the 3D analysis
    pub side_resistance: bool,

    /// Enables root reinforcement
    pub root_resistance: bool,

    /// Enables masking of debris-flow sources by an external initiation mask
    pub debris_flow_mask: bool,

    /// Stability analysis
    pub analysis: Analysis,

    /// Parameters for generating the 3D slip-surface groups
    pub grouping: Option<ParamGrouping>,

    /// Coefficients of the Janbu 3D correction factor (None disables the correction)
    pub correction: Option<ParamCorrection>,

    /// Controls the iterations of the Janbu 3D factor of safety
    pub fs_solver: FixedPoint,

    /// Controls the iterations of the Green-Ampt and ponding-clearance equations
    pub infiltration_solver: FixedPoint,

    /// Parameters for materials
    pub param_soils: HashMap<MaterialId, ParamSoil>,
}

impl Config {
    /// Allocates a new instance
    pub fn new() -> Self {
        Config {
            unit_weight_water: 9.81,
            fs_critical: 1.0,
            depth_increment: 0.1,
            max_surface_storage: 0.0,
            precision: Precision::new(),
            lateral_flow: true,
            side_resistance: false,
            root_resistance: false,
            debris_flow_mask: false,
            analysis: Analysis::InfiniteSlope,
            grouping: None,
            correction: None,
            fs_solver: FixedPoint {
                max_iterations: 100,
                tolerance: 1e-4,
                damping: 1.0,
            },
            infiltration_solver: FixedPoint {
                max_iterations: 100,
                tolerance: 1e-4,
                damping: 1.0,
            },
            param_soils: HashMap::new(),
        }
    }

    /// Sets the unit weight of water
    pub fn set_unit_weight_water(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("unit weight of water must be > 0.0");
        }
        self.unit_weight_water = value;
        Ok(self)
    }

    /// Sets the critical factor of safety
    pub fn set_fs_critical(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("critical factor of safety must be > 0.0");
        }
        self.fs_critical = value;
        Ok(self)
    }

    /// Sets the depth increment of the depth/thickness searches
    pub fn set_depth_increment(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("depth increment must be > 0.0");
        }
        self.depth_increment = value;
        Ok(self)
    }

    /// Sets the maximum surface storage
    pub fn set_max_surface_storage(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value < 0.0 {
            return Err("maximum surface storage must be ≥ 0.0");
        }
        self.max_surface_storage = value;
        Ok(self)
    }

    /// Sets the decimal places
    pub fn set_precision(&mut self, precision: Precision) -> Result<&mut Self, StrError> {
        precision.validate()?;
        self.precision = precision;
        Ok(self)
    }

    /// Enables or disables the lateral-flow reduction of hydrostatic pressures
    pub fn set_lateral_flow(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.lateral_flow = flag;
        Ok(self)
    }

    /// Enables or disables side resistance (3D analysis)
    pub fn set_side_resistance(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.side_resistance = flag;
        Ok(self)
    }

    /// Enables or disables root reinforcement
    pub fn set_root_resistance(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.root_resistance = flag;
        Ok(self)
    }

    /// Enables or disables the masking of debris-flow sources
    pub fn set_debris_flow_mask(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.debris_flow_mask = flag;
        Ok(self)
    }

    /// Selects the infinite-slope analysis
    pub fn set_infinite_slope(&mut self) -> Result<&mut Self, StrError> {
        self.analysis = Analysis::InfiniteSlope;
        Ok(self)
    }

    /// Selects the Janbu 3D analysis with the given grouping parameters
    pub fn set_janbu_3d(&mut self, grouping: ParamGrouping) -> Result<&mut Self, StrError> {
        grouping.validate()?;
        self.analysis = Analysis::Janbu3D;
        self.grouping = Some(grouping);
        Ok(self)
    }

    /// Sets the coefficients of the Janbu 3D correction factor (None disables the correction)
    pub fn set_correction(&mut self, correction: Option<ParamCorrection>) -> Result<&mut Self, StrError> {
        self.correction = correction;
        Ok(self)
    }

    /// Sets the iteration cap and tolerance of the Janbu 3D solver
    pub fn set_fs_solver(&mut self, max_iterations: usize, tolerance: f64) -> Result<&mut Self, StrError> {
        self.fs_solver = FixedPoint::new(max_iterations, tolerance)?;
        Ok(self)
    }

    /// Sets the iteration cap and tolerance of the infiltration solvers
    pub fn set_infiltration_solver(&mut self, max_iterations: usize, tolerance: f64) -> Result<&mut Self, StrError> {
        self.infiltration_solver = FixedPoint::new(max_iterations, tolerance)?;
        Ok(self)
    }

    /// Sets parameters for a material
    pub fn set_param_soil(&mut self, id: MaterialId, param: ParamSoil) -> Result<&mut Self, StrError> {
        param.validate()?;
        self.param_soils.insert(id, param);
        Ok(self)
    }

    /// Returns the parameters of a material
    pub fn param_soil(&self, id: MaterialId) -> Result<&ParamSoil, StrError> {
        self.param_soils.get(&id).ok_or("cannot find parameters for the material id")
    }

    /// Validates the whole configuration (e.g., after reading from a file)
    pub fn validate(&self) -> Result<(), StrError> {
        if self.unit_weight_water <= 0.0 {
            return Err("unit weight of water must be > 0.0");
        }
        if self.fs_critical <= 0.0 {
            return Err("critical factor of safety must be > 0.0");
        }
        if self.depth_increment <= 0.0 {
            return Err("depth increment must be > 0.0");
        }
        if self.max_surface_storage < 0.0 {
            return Err("maximum surface storage must be ≥ 0.0");
        }
        self.precision.validate()?;
        FixedPoint::new_damped(
            self.fs_solver.max_iterations,
            self.fs_solver.tolerance,
            self.fs_solver.damping,
        )?;
        FixedPoint::new_damped(
            self.infiltration_solver.max_iterations,
            self.infiltration_solver.tolerance,
            self.infiltration_solver.damping,
        )?;
        if self.analysis == Analysis::Janbu3D {
            match &self.grouping {
                Some(g) => g.validate()?,
                None => return Err("the Janbu 3D analysis requires grouping parameters"),
            }
        }
        if self.param_soils.is_empty() {
            return Err("at least one material is required");
        }
        for param in self.param_soils.values() {
            param.validate()?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n")?;
        write!(f, "==================\n")?;
        write!(f, "unit_weight_water = {:?}\n", self.unit_weight_water)?;
        write!(f, "fs_critical = {:?}\n", self.fs_critical)?;
        write!(f, "depth_increment = {:?}\n", self.depth_increment)?;
        write!(f, "max_surface_storage = {:?}\n", self.max_surface_storage)?;
        write!(f, "lateral_flow = {:?}\n", self.lateral_flow)?;
        write!(f, "side_resistance = {:?}\n", self.side_resistance)?;
        write!(f, "root_resistance = {:?}\n", self.root_resistance)?;
        write!(f, "debris_flow_mask = {:?}\n", self.debris_flow_mask)?;
        write!(f, "analysis = {:?}\n", self.analysis)?;

        write!(f, "\nParameters for materials\n")?;
        write!(f, "========================\n")?;
        let mut keys: Vec<_> = self.param_soils.keys().copied().collect();
        keys.sort();
        for key in keys {
            if let Some(p) = self.param_soils.get(&key) {
                write!(f, "{:?} → {:?}\n", key, p)?;
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::base::{Analysis, ParamGrouping, SampleParams};
    use crate::StrError;

    #[test]
    fn new_and_setters_work() -> Result<(), StrError> {
        let mut config = Config::new();
        assert_eq!(config.analysis, Analysis::InfiniteSlope);
        assert_eq!(config.validate().err(), Some("at least one material is required"));

        config
            .set_unit_weight_water(10.0)?
            .set_fs_critical(1.2)?
            .set_depth_increment(0.25)?
            .set_max_surface_storage(0.01)?
            .set_side_resistance(true)?
            .set_root_resistance(true)?
            .set_debris_flow_mask(true)?
            .set_fs_solver(50, 1e-3)?
            .set_param_soil(1, SampleParams::param_soil_sandy())?;
        assert_eq!(config.unit_weight_water, 10.0);
        assert_eq!(config.fs_solver.max_iterations, 50);
        assert_eq!(config.validate(), Ok(()));
        assert!(config.param_soil(1).is_ok());
        assert_eq!(
            config.param_soil(2).err(),
            Some("cannot find parameters for the material id")
        );

        config.set_janbu_3d(SampleParams::param_grouping_small())?;
        assert_eq!(config.analysis, Analysis::Janbu3D);
        config.grouping = None;
        assert_eq!(
            config.validate().err(),
            Some("the Janbu 3D analysis requires grouping parameters")
        );
        Ok(())
    }

    #[test]
    fn catch_some_errors() {
        let mut config = Config::new();
        assert_eq!(
            config.set_unit_weight_water(0.0).err(),
            Some("unit weight of water must be > 0.0")
        );
        assert_eq!(
            config.set_fs_critical(-1.0).err(),
            Some("critical factor of safety must be > 0.0")
        );
        assert_eq!(config.set_depth_increment(0.0).err(), Some("depth increment must be > 0.0"));
        assert_eq!(
            config.set_max_surface_storage(-0.1).err(),
            Some("maximum surface storage must be ≥ 0.0")
        );
        assert_eq!(config.set_fs_solver(0, 1e-4).err(), Some("max_iterations must be ≥ 1"));
        let bad = ParamGrouping {
            min_side: 0,
            max_side: 1,
            powers: vec![2.0],
            aspect_ratios: vec![1.0],
            rotations: vec![0.0],
        };
        assert_eq!(config.set_janbu_3d(bad).err(), Some("min_side must be ≥ 1"));
    }

    #[test]
    fn display_works() -> Result<(), StrError> {
        let mut config = Config::new();
        config.set_param_soil(1, SampleParams::param_soil_sandy())?;
        let text = format!("{}", config);
        assert!(text.starts_with("Configuration data\n==================\nunit_weight_water = 9.81\n"));
        assert!(text.contains("analysis = InfiniteSlope\n"));
        assert!(text.contains("1 → ParamSoil"));
        Ok(())
    }
}

use super::RainfallHistory;
use crate::base::{Config, MaterialId, Terrain};
use crate::StrError;
use russell_lab::Matrix;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds all data needed to run a simulation
///
/// Grids are given as matrices (row 0 is north) or as row-major vectors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimInput {
    /// Configuration and material parameters
    pub config: Config,

    /// Column geometry
    pub terrain: Terrain,

    /// Material id of each cell (row-major)
    pub materials: Vec<MaterialId>,

    /// Initial suction (kPa) of each cell
    pub initial_suction: Matrix,

    /// Initial groundwater elevation of each cell
    pub initial_groundwater: Matrix,

    /// Rainfall intensity grids
    pub rainfall: RainfallHistory,

    /// External debris-flow initiation mask (row-major); used only if enabled in the configuration
    pub initiation_mask: Option<Vec<bool>>,
}

impl SimInput {
    /// Checks the consistency of the input data
    pub fn validate(&self) -> Result<(), StrError> {
        self.config.validate()?;
        self.rainfall.validate()?;
        let dims = (self.terrain.nrow(), self.terrain.ncol());
        let ncell = self.terrain.ncell();
        if self.initial_suction.dims() != dims || self.initial_groundwater.dims() != dims {
            return Err("initial grids must have the same dimensions as the terrain");
        }
        if self.rainfall.dims() != dims {
            return Err("rainfall grids must have the same dimensions as the terrain");
        }
        if self.terrain.aspect.len() != ncell {
            return Err("the aspect grid must have one value per cell");
        }
        if self.materials.len() != ncell {
            return Err("the material grid must have one value per cell");
        }
        for id in &self.materials {
            self.config.param_soil(*id)?;
        }
        if let Some(mask) = &self.initiation_mask {
            if mask.len() != ncell {
                return Err("the initiation mask must have one value per cell");
            }
        }
        if self.config.debris_flow_mask && self.initiation_mask.is_none() {
            return Err("debris-flow masking requires an initiation mask");
        }
        Ok(())
    }

    /// Reads a JSON file containing the input data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let data = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(data)
    }

    /// Writes a JSON file with the input data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

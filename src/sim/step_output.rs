use crate::hydro::HydraulicState;
use crate::stability::{SourceFlags, StabilityResult};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the grids produced at the end of a time step (row-major, one entry per cell)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepOutput {
    /// Index of the time step (0 is the initial state)
    pub step: usize,

    /// Time
    pub t: f64,

    /// Hydraulic state of each cell
    pub states: Vec<HydraulicState>,

    /// Factor of safety and failure thickness of each cell
    pub stability: Vec<StabilityResult>,

    /// Landslide and debris-flow source flags of each cell
    pub sources: Vec<SourceFlags>,
}

impl StepOutput {
    /// Returns the number of landslide source cells
    pub fn n_landslide(&self) -> usize {
        self.sources.iter().filter(|s| s.landslide).count()
    }

    /// Returns the number of debris-flow source cells
    pub fn n_debris_flow(&self) -> usize {
        self.sources.iter().filter(|s| s.debris_flow).count()
    }

    /// Returns the minimum factor of safety over all cells
    pub fn fs_min(&self) -> f64 {
        self.stability.iter().map(|r| r.fs).fold(f64::INFINITY, f64::min)
    }

    /// Reads a JSON file containing the output
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
        let output = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(output)
    }

    /// Writes a JSON file with the output
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
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::StepOutput;
    use crate::base::DEFAULT_TEST_DIR;
    use crate::stability::{SourceFlags, StabilityResult};

    #[test]
    fn counters_and_json_work() {
        let output = StepOutput {
            step: 3,
            t: 1800.0,
            states: Vec::new(),
            stability: vec![
                StabilityResult {
                    fs: 0.75,
                    failure_thickness: 1.5,
                },
                StabilityResult::stable(),
            ],
            sources: vec![
                SourceFlags {
                    landslide: true,
                    debris_flow: false,
                },
                SourceFlags {
                    landslide: false,
                    debris_flow: false,
                },
            ],
        };
        assert_eq!(output.n_landslide(), 1);
        assert_eq!(output.n_debris_flow(), 0);
        assert_eq!(output.fs_min(), 0.75);

        let path = format!("{}/test_step_output.json", DEFAULT_TEST_DIR);
        output.write_json(&path).unwrap();
        let read = StepOutput::read_json(&path).unwrap();
        assert_eq!(read, output);
        assert_eq!(StepOutput::read_json("/tmp/slidesim/__not_found__.json").err(), Some("cannot open file"));
    }
}

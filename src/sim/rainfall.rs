use crate::StrError;
use russell_lab::Matrix;
use serde::{Deserialize, Serialize};

/// Holds the rainfall intensity grids of consecutive time intervals
///
/// Interval k covers the time range `[k·dt, (k+1)·dt)`. The first grid also
/// defines the rainfall at t = 0 used to initialize the ponding clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RainfallHistory {
    /// Duration of each interval
    pub dt: f64,

    /// Rainfall intensity (length/time) of each interval
    pub intensities: Vec<Matrix>,
}

impl RainfallHistory {
    /// Allocates a new instance
    pub fn new(dt: f64, intensities: Vec<Matrix>) -> Result<Self, StrError> {
        if dt <= 0.0 {
            return Err("time step must be > 0.0");
        }
        if intensities.is_empty() {
            return Err("at least one rainfall interval is required");
        }
        let dims = intensities[0].dims();
        for grid in &intensities {
            if grid.dims() != dims {
                return Err("all rainfall grids must have the same dimensions");
            }
            let (nrow, ncol) = grid.dims();
            for i in 0..nrow {
                for j in 0..ncol {
                    let value = grid.get(i, j);
                    if !value.is_finite() || value < 0.0 {
                        return Err("rainfall intensity must be ≥ 0.0");
                    }
                }
            }
        }
        Ok(RainfallHistory { dt, intensities })
    }

    /// Allocates a new instance with spatially uniform intensities
    pub fn new_uniform(dt: f64, nrow: usize, ncol: usize, values: &[f64]) -> Result<Self, StrError> {
        let intensities = values.iter().map(|v| Matrix::filled(nrow, ncol, *v)).collect();
        RainfallHistory::new(dt, intensities)
    }

    /// Returns the number of intervals
    pub fn n_interval(&self) -> usize {
        self.intensities.len()
    }

    /// Returns the grid dimensions
    pub fn dims(&self) -> (usize, usize) {
        self.intensities[0].dims()
    }

    /// Returns the intensity of an interval at a cell (row-major id)
    pub fn intensity(&self, interval: usize, id: usize) -> f64 {
        let grid = &self.intensities[interval];
        let ncol = grid.dims().1;
        grid.get(id / ncol, id % ncol)
    }

    /// Validates the history after deserialization
    pub fn validate(&self) -> Result<(), StrError> {
        RainfallHistory::new(self.dt, self.intensities.clone()).map(|_| ())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

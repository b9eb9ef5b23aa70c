use crate::StrError;
use serde::{Deserialize, Serialize};

/// Rounds a value to a number of decimal places
///
/// Negative zero is normalized to zero so that regime comparisons and
/// stored states are reproducible.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = f64::powi(10.0, decimals);
    let res = (value * scale).round() / scale;
    if res == 0.0 {
        0.0
    } else {
        res
    }
}

/// Holds the number of decimal places for each physical quantity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Precision {
    /// Thicknesses, depths and elevations
    pub thickness: i32,

    /// Rates such as rainfall intensity and infiltration rate
    pub rate: i32,

    /// Times
    pub time: i32,

    /// Volumetric moisture contents
    pub moisture: i32,

    /// Pressures and suctions
    pub pressure: i32,

    /// Cumulative volumes per area (infiltration, precipitation, runoff, storage)
    pub volume: i32,

    /// Factors of safety
    pub fs: i32,
}

impl Precision {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Precision {
            thickness: 4,
            rate: 12,
            time: 4,
            moisture: 5,
            pressure: 4,
            volume: 6,
            fs: 4,
        }
    }

    /// Checks that all decimal places are within a meaningful range
    pub fn validate(&self) -> Result<(), StrError> {
        let all = [
            self.thickness,
            self.rate,
            self.time,
            self.moisture,
            self.pressure,
            self.volume,
            self.fs,
        ];
        if all.iter().any(|d| *d < 0 || *d > 15) {
            return Err("decimal places must be in [0, 15]");
        }
        Ok(())
    }

    #[inline]
    pub fn thickness(&self, value: f64) -> f64 {
        round_to(value, self.thickness)
    }

    #[inline]
    pub fn rate(&self, value: f64) -> f64 {
        round_to(value, self.rate)
    }

    #[inline]
    pub fn time(&self, value: f64) -> f64 {
        round_to(value, self.time)
    }

    #[inline]
    pub fn moisture(&self, value: f64) -> f64 {
        round_to(value, self.moisture)
    }

    #[inline]
    pub fn pressure(&self, value: f64) -> f64 {
        round_to(value, self.pressure)
    }

    #[inline]
    pub fn volume(&self, value: f64) -> f64 {
        round_to(value, self.volume)
    }

    #[inline]
    pub fn fs(&self, value: f64) -> f64 {
        round_to(value, self.fs)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

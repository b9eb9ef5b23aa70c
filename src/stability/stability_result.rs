use super::SlipSurfaceGroup;
use crate::base::FS_STABLE_SENTINEL;
use serde::{Deserialize, Serialize};

/// Holds the factor of safety and failure thickness of a cell
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StabilityResult {
    /// Minimum factor of safety over the tested depths (or thicknesses)
    pub fs: f64,

    /// Soil thickness of the failure mass (zero if no failure)
    pub failure_thickness: f64,
}

impl StabilityResult {
    /// Returns the result of a cell that cannot fail (too thin or flat)
    pub fn stable() -> Self {
        StabilityResult {
            fs: FS_STABLE_SENTINEL,
            failure_thickness: 0.0,
        }
    }
}

/// Holds the result of the 3D analysis of a slip-surface group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    /// Factor of safety of the chosen (or least stable) failure mass
    pub fs: f64,

    /// Failure thickness of each member cell, in the order of the group cells
    pub thicknesses: Vec<f64>,
}

/// Collapses group results into cell results
///
/// Each cell takes the minimum factor of safety over the groups containing it together
/// with its failure thickness in that group. Ties keep the larger thickness.
/// Cells not covered by any group are reported as stable.
pub fn aggregate_groups(ncell: usize, groups: &[SlipSurfaceGroup], results: &[GroupResult]) -> Vec<StabilityResult> {
    let mut best: Vec<Option<StabilityResult>> = vec![None; ncell];
    for (group, result) in groups.iter().zip(results) {
        for (m, id) in group.cells.iter().enumerate() {
            let thickness = result.thicknesses.get(m).copied().unwrap_or(0.0);
            let candidate = StabilityResult {
                fs: result.fs,
                failure_thickness: thickness,
            };
            let replace = match &best[*id] {
                None => true,
                Some(current) => {
                    candidate.fs < current.fs
                        || (candidate.fs == current.fs && candidate.failure_thickness > current.failure_thickness)
                }
            };
            if replace {
                best[*id] = Some(candidate);
            }
        }
    }
    best.into_iter()
        .map(|r| r.unwrap_or_else(StabilityResult::stable))
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

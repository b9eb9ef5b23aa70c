use super::BoundaryCode;
use crate::base::{par_map, ParamGrouping};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Holds the cells of a candidate 3D failure mass and their boundary-exposure codes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlipSurfaceGroup {
    /// Cell ids sorted in ascending order
    pub cells: Vec<usize>,

    /// Boundary-exposure code of each cell (same order as `cells`)
    pub codes: Vec<BoundaryCode>,
}

impl SlipSurfaceGroup {
    /// Allocates a new group and classifies its cells
    ///
    /// # Input
    ///
    /// * `cells` -- cell ids (row-major); duplicates are removed
    /// * `nrow`, `ncol` -- grid dimensions
    pub fn new(mut cells: Vec<usize>, nrow: usize, ncol: usize) -> Self {
        cells.sort_unstable();
        cells.dedup();
        let contains = |id: usize| cells.binary_search(&id).is_ok();
        let codes = cells
            .iter()
            .map(|id| {
                let (i, j) = (id / ncol, id % ncol);
                let up = i > 0 && contains(id - ncol);
                let down = i + 1 < nrow && contains(id + ncol);
                let left = j > 0 && contains(id - 1);
                let right = j + 1 < ncol && contains(id + 1);
                BoundaryCode::from_neighbors(up, down, left, right)
            })
            .collect();
        SlipSurfaceGroup { cells, codes }
    }

    /// Returns the number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the group has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Holds a superellipse shape rasterized on a local grid
///
/// Offsets are (row, column) relative to the anchor cell; for even side lengths the
/// anchor is the cell up-left of the centroid.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalShape {
    /// Requested side length
    pub side: usize,

    /// Offsets of the member cells relative to the anchor
    pub offsets: Vec<(isize, isize)>,
}

/// Generates candidate 3D failure masses from rotated superellipses
///
/// A cell with center (x, y) relative to the centroid belongs to the shape if
///
/// ```text
/// |x'/a|ⁿ + |y'/b|ⁿ ≤ 1
/// ```
///
/// where (x', y') are the coordinates rotated by θ, `a = N/2` and `b = ratio · a`.
/// Coordinates are measured in cells.
pub struct SlipSurfaceGrouper {
    param: ParamGrouping,
}

impl SlipSurfaceGrouper {
    /// Allocates a new instance
    pub fn new(param: &ParamGrouping) -> Result<Self, StrError> {
        param.validate()?;
        Ok(SlipSurfaceGrouper { param: param.clone() })
    }

    /// Returns the distinct shapes with side length N that span N cells along a row, a column or a diagonal
    pub fn local_shapes(&self, side: usize) -> Vec<LocalShape> {
        let mut signatures = HashSet::new();
        let mut shapes = Vec::new();
        for power in &self.param.powers {
            for ratio in &self.param.aspect_ratios {
                for rotation in &self.param.rotations {
                    let shape = rasterize(side, *power, *ratio, f64::to_radians(*rotation));
                    if shape.is_empty() || !spans_side(&shape, side) {
                        continue;
                    }
                    let min_r = shape.iter().map(|(r, _)| *r).min().unwrap_or(0);
                    let min_c = shape.iter().map(|(_, c)| *c).min().unwrap_or(0);
                    let mut signature: Vec<(isize, isize)> = shape.iter().map(|(r, c)| (r - min_r, c - min_c)).collect();
                    signature.sort_unstable();
                    if signatures.insert(signature) {
                        let mut offsets = shape;
                        offsets.sort_unstable();
                        shapes.push(LocalShape { side, offsets });
                    }
                }
            }
        }
        shapes
    }

    /// Generates all unique groups on a grid
    ///
    /// Every shape is anchored at every cell; cells falling outside the grid are dropped.
    /// Even-sided shapes are centered on cell corners, so their anchors also include the row and
    /// column before the grid to truncate them at the north and west edges as well.
    /// The output is sorted for reproducibility.
    pub fn generate(&self, nrow: usize, ncol: usize) -> Vec<SlipSurfaceGroup> {
        let mut shapes = Vec::new();
        for side in self.param.min_side..=self.param.max_side {
            shapes.extend(self.local_shapes(side));
        }
        let placed: Vec<Vec<Vec<usize>>> = par_map(&shapes, |shape| {
            let mut all = Vec::with_capacity((nrow + 1) * (ncol + 1));
            let start: isize = if shape.side % 2 == 0 { -1 } else { 0 };
            for i in start..nrow as isize {
                for j in start..ncol as isize {
                    let mut ids: Vec<usize> = shape
                        .offsets
                        .iter()
                        .filter_map(|(di, dj)| {
                            let (r, c) = (i + di, j + dj);
                            if r < 0 || c < 0 || r >= nrow as isize || c >= ncol as isize {
                                None
                            } else {
                                Some(r as usize * ncol + c as usize)
                            }
                        })
                        .collect();
                    if !ids.is_empty() {
                        ids.sort_unstable();
                        all.push(ids);
                    }
                }
            }
            all
        });
        let mut unique: HashSet<Vec<usize>> = HashSet::new();
        for ids in placed.into_iter().flatten() {
            unique.insert(ids);
        }
        let mut sets: Vec<Vec<usize>> = unique.into_iter().collect();
        sets.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        log::debug!("generated {} slip-surface groups", sets.len());
        sets.into_iter()
            .map(|cells| SlipSurfaceGroup::new(cells, nrow, ncol))
            .collect()
    }
}

/// Rasterizes a rotated superellipse on a local grid large enough to hold it
fn rasterize(side: usize, power: f64, ratio: f64, rotation: f64) -> Vec<(isize, isize)> {
    let a = side as f64 / 2.0;
    let b = ratio * a;
    let pad = f64::ceil(a * (f64::sqrt(2.0) - 1.0)) as usize + 1;
    let width = side + 2 * pad; // same parity as side
    let center = (width as f64 - 1.0) / 2.0;
    let anchor = ((width - 1) / 2) as isize;
    let (sin_t, cos_t) = f64::sin_cos(rotation);
    let mut cells = Vec::new();
    for r in 0..width {
        for c in 0..width {
            let x = c as f64 - center;
            let y = center - r as f64;
            let xr = x * cos_t + y * sin_t;
            let yr = -x * sin_t + y * cos_t;
            let value = f64::powf(f64::abs(xr / a), power) + f64::powf(f64::abs(yr / b), power);
            if value <= 1.0 + 1e-9 {
                cells.push((r as isize - anchor, c as isize - anchor));
            }
        }
    }
    cells
}

/// Checks whether the shape spans the side length along a row, a column or a diagonal through the centroid
fn spans_side(cells: &[(isize, isize)], side: usize) -> bool {
    let span = |values: Vec<isize>| -> usize {
        match (values.iter().min(), values.iter().max()) {
            (Some(lo), Some(hi)) => (hi - lo + 1) as usize,
            _ => 0,
        }
    };
    let rows = span(cells.iter().map(|(r, _)| *r).collect());
    let cols = span(cells.iter().map(|(_, c)| *c).collect());
    // offsets are relative to the anchor; for even sides the centroid sits at (+0.5, +0.5)
    let shift = if side % 2 == 0 { 1 } else { 0 };
    let diagonal = cells.iter().filter(|(r, c)| r == c).count();
    let anti_diagonal = cells.iter().filter(|(r, c)| r + c == shift).count();
    rows == side || cols == side || diagonal == side || anti_diagonal == side
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{SlipSurfaceGroup, SlipSurfaceGrouper};
    use crate::base::{ParamGrouping, SampleParams};
    use crate::stability::BoundaryCode;
    use std::collections::HashSet;

    fn grouper(min_side: usize, max_side: usize) -> SlipSurfaceGrouper {
        let param = ParamGrouping {
            min_side,
            max_side,
            powers: vec![2.0],
            aspect_ratios: vec![1.0],
            rotations: vec![0.0],
        };
        SlipSurfaceGrouper::new(&param).unwrap()
    }

    #[test]
    fn new_captures_errors() {
        let mut param = SampleParams::param_grouping_small();
        param.powers = Vec::new();
        assert_eq!(
            SlipSurfaceGrouper::new(&param).err(),
            Some("powers must be non-empty and > 0.0")
        );
    }

    #[test]
    fn group_classification_works() {
        // 0 1 2
        // 3 4 5
        // 6 7 8
        let g = SlipSurfaceGroup::new(vec![4, 1, 3, 5, 7, 4], 3, 3);
        assert_eq!(g.cells, &[1, 3, 4, 5, 7]);
        assert_eq!(g.codes[0], BoundaryCode::AllButDown); // 1
        assert_eq!(g.codes[1], BoundaryCode::AllButRight); // 3
        assert_eq!(g.codes[2], BoundaryCode::Interior); // 4
        assert_eq!(g.codes[3], BoundaryCode::AllButLeft); // 5
        assert_eq!(g.codes[4], BoundaryCode::AllButUp); // 7
        let g = SlipSurfaceGroup::new(vec![0, 1, 3, 4], 3, 3);
        assert_eq!(g.codes, &[
            BoundaryCode::UpLeft,
            BoundaryCode::UpRight,
            BoundaryCode::DownLeft,
            BoundaryCode::DownRight
        ]);
        // wrapping around the row end is not a neighbor
        let g = SlipSurfaceGroup::new(vec![2, 3], 3, 3);
        assert_eq!(g.codes, &[BoundaryCode::Isolated, BoundaryCode::Isolated]);
    }

    #[test]
    fn local_shapes_work() {
        let gr = grouper(1, 3);
        let s1 = gr.local_shapes(1);
        assert_eq!(s1.len(), 1);
        assert_eq!(s1[0].offsets, &[(0, 0)]);
        let s2 = gr.local_shapes(2);
        assert_eq!(s2.len(), 1);
        assert_eq!(s2[0].offsets, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        // circle of diameter 3: a plus sign plus the corners at distance √2 ≤ 1.5
        let s3 = gr.local_shapes(3);
        assert_eq!(s3.len(), 1);
        assert_eq!(s3[0].offsets.len(), 9);
    }

    #[test]
    fn duplicated_shapes_are_removed() {
        let param = ParamGrouping {
            min_side: 2,
            max_side: 2,
            powers: vec![2.0, 3.0],
            aspect_ratios: vec![1.0],
            rotations: vec![0.0, 90.0],
        };
        let gr = SlipSurfaceGrouper::new(&param).unwrap();
        assert_eq!(gr.local_shapes(2).len(), 1);
    }

    #[test]
    fn generate_works() {
        let gr = grouper(1, 2);
        let groups = gr.generate(3, 3);
        // 9 single cells, 4 full squares and 8 pairs truncated at the four edges
        let mut sets = HashSet::new();
        for g in &groups {
            assert!(sets.insert(g.cells.clone()));
            assert_eq!(g.cells.len(), g.codes.len());
            for id in &g.cells {
                assert!(*id < 9);
            }
        }
        assert_eq!(groups.iter().filter(|g| g.len() == 1).count(), 9);
        assert_eq!(groups.iter().filter(|g| g.len() == 4).count(), 4);
        assert_eq!(groups.iter().filter(|g| g.len() == 2).count(), 8);
        assert_eq!(groups.len(), 21);
        // truncation is symmetric
        for pair in [[0, 1], [1, 2], [6, 7], [7, 8], [0, 3], [3, 6], [2, 5], [5, 8]] {
            assert!(sets.contains(&pair.to_vec()));
        }
        // single-cell groups are isolated
        for g in groups.iter().filter(|g| g.len() == 1) {
            assert_eq!(g.codes[0], BoundaryCode::Isolated);
        }
        // deterministic
        assert_eq!(groups, gr.generate(3, 3));
    }

    #[test]
    fn codes_agree_with_neighbor_counts() {
        let gr = SlipSurfaceGrouper::new(&SampleParams::param_grouping_small()).unwrap();
        let (nrow, ncol) = (5, 6);
        for g in gr.generate(nrow, ncol) {
            for (id, code) in g.cells.iter().zip(&g.codes) {
                let (i, j) = (id / ncol, id % ncol);
                let mut present = 0;
                if i > 0 && g.cells.contains(&(id - ncol)) {
                    present += 1;
                }
                if i + 1 < nrow && g.cells.contains(&(id + ncol)) {
                    present += 1;
                }
                if j > 0 && g.cells.contains(&(id - 1)) {
                    present += 1;
                }
                if j + 1 < ncol && g.cells.contains(&(id + 1)) {
                    present += 1;
                }
                assert_eq!(code.n_exposed(), 4 - present);
            }
        }
    }
}

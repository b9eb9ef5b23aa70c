use crate::StrError;
use russell_lab::Matrix;
use serde::{Deserialize, Serialize};

/// Defines the horizontal direction of the steepest descent of a surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Aspect {
    /// The surface is flat; there is no downslope direction
    Flat,

    /// Azimuth of the downslope direction in radians, clockwise from north
    Directional(f64),
}

impl Aspect {
    /// Converts a raw GIS aspect value in degrees
    ///
    /// Negative or non-finite values denote flat cells.
    pub fn from_degrees(value: f64) -> Self {
        if !value.is_finite() || value < 0.0 {
            Aspect::Flat
        } else {
            Aspect::Directional(f64::to_radians(value % 360.0))
        }
    }

    /// Returns the unit vector (east, north) of the downslope direction, if any
    pub fn unit_vector(&self) -> Option<(f64, f64)> {
        match self {
            Aspect::Flat => None,
            Aspect::Directional(azimuth) => Some((f64::sin(*azimuth), f64::cos(*azimuth))),
        }
    }
}

/// Holds the geometry of the soil columns on a regular grid
///
/// Row 0 is the northernmost row and columns increase eastward.
/// Cells are numbered row-major: `id = i * ncol + j`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Terrain {
    /// Cell size along x (east)
    pub dx: f64,

    /// Cell size along y (north)
    pub dy: f64,

    /// Ground surface elevation
    pub top: Matrix,

    /// Bedrock elevation
    pub bottom: Matrix,

    /// Dip of the base (degrees)
    pub dip: Matrix,

    /// Aspect of the base (row-major)
    pub aspect: Vec<Aspect>,
}

impl Terrain {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `dx`, `dy` -- cell sizes
    /// * `top` -- ground surface elevations
    /// * `bottom` -- bedrock elevations
    /// * `dip` -- base dip in degrees
    /// * `aspect` -- base aspect in degrees clockwise from north (negative or NaN means flat)
    pub fn new(dx: f64, dy: f64, top: Matrix, bottom: Matrix, dip: Matrix, aspect: &Matrix) -> Result<Self, StrError> {
        if dx <= 0.0 || dy <= 0.0 {
            return Err("cell sizes must be > 0.0");
        }
        let (nrow, ncol) = top.dims();
        if nrow < 1 || ncol < 1 {
            return Err("the grid must have at least one cell");
        }
        if bottom.dims() != (nrow, ncol) || dip.dims() != (nrow, ncol) || aspect.dims() != (nrow, ncol) {
            return Err("all grids must have the same dimensions");
        }
        for i in 0..nrow {
            for j in 0..ncol {
                if bottom.get(i, j) > top.get(i, j) {
                    return Err("bottom elevation must be ≤ top elevation");
                }
                let d = dip.get(i, j);
                if !d.is_finite() || d < 0.0 || d >= 90.0 {
                    return Err("dip must satisfy 0 ≤ dip < 90");
                }
            }
        }
        let mut aspects = Vec::with_capacity(nrow * ncol);
        for i in 0..nrow {
            for j in 0..ncol {
                aspects.push(Aspect::from_degrees(aspect.get(i, j)));
            }
        }
        Ok(Terrain {
            dx,
            dy,
            top,
            bottom,
            dip,
            aspect: aspects,
        })
    }

    /// Allocates a new instance computing dip and aspect from the bedrock surface (Horn's method)
    pub fn from_bedrock(dx: f64, dy: f64, top: Matrix, bottom: Matrix) -> Result<Self, StrError> {
        let (nrow, ncol) = bottom.dims();
        let mut dip = Matrix::new(nrow, ncol);
        let mut aspect = Matrix::new(nrow, ncol);
        for i in 0..nrow {
            for j in 0..ncol {
                let (d, a) = horn_dip_aspect(&bottom, i, j, dx, dy);
                dip.set(i, j, d);
                aspect.set(i, j, a);
            }
        }
        Terrain::new(dx, dy, top, bottom, dip, &aspect)
    }

    /// Returns the number of rows
    #[inline]
    pub fn nrow(&self) -> usize {
        self.top.dims().0
    }

    /// Returns the number of columns
    #[inline]
    pub fn ncol(&self) -> usize {
        self.top.dims().1
    }

    /// Returns the number of cells
    #[inline]
    pub fn ncell(&self) -> usize {
        self.nrow() * self.ncol()
    }

    /// Returns the (row, column) pair of a cell
    #[inline]
    pub fn ij(&self, id: usize) -> (usize, usize) {
        (id / self.ncol(), id % self.ncol())
    }

    /// Returns the ground surface elevation of a cell
    #[inline]
    pub fn top(&self, id: usize) -> f64 {
        let (i, j) = self.ij(id);
        self.top.get(i, j)
    }

    /// Returns the bedrock elevation of a cell
    #[inline]
    pub fn bottom(&self, id: usize) -> f64 {
        let (i, j) = self.ij(id);
        self.bottom.get(i, j)
    }

    /// Returns the soil thickness of a cell
    #[inline]
    pub fn thickness(&self, id: usize) -> f64 {
        self.top(id) - self.bottom(id)
    }

    /// Returns the base dip of a cell in radians
    #[inline]
    pub fn dip_rad(&self, id: usize) -> f64 {
        let (i, j) = self.ij(id);
        f64::to_radians(self.dip.get(i, j))
    }

    /// Returns the base aspect of a cell
    #[inline]
    pub fn aspect(&self, id: usize) -> Aspect {
        self.aspect[id]
    }
}

/// Computes dip (degrees) and aspect (degrees, -1 if flat) using Horn's 3×3 kernel
///
/// Neighbors outside the grid are replaced by the nearest valid cell.
fn horn_dip_aspect(z: &Matrix, i: usize, j: usize, dx: f64, dy: f64) -> (f64, f64) {
    let (nrow, ncol) = z.dims();
    let at = |di: isize, dj: isize| {
        let r = (i as isize + di).clamp(0, nrow as isize - 1) as usize;
        let c = (j as isize + dj).clamp(0, ncol as isize - 1) as usize;
        z.get(r, c)
    };
    // a b c
    // d e f
    // g h k
    let (a, b, c) = (at(-1, -1), at(-1, 0), at(-1, 1));
    let (d, f) = (at(0, -1), at(0, 1));
    let (g, h, k) = (at(1, -1), at(1, 0), at(1, 1));
    let dz_dx = ((c + 2.0 * f + k) - (a + 2.0 * d + g)) / (8.0 * dx); // eastward
    let dz_ds = ((g + 2.0 * h + k) - (a + 2.0 * b + c)) / (8.0 * dy); // southward
    let grad = f64::sqrt(dz_dx * dz_dx + dz_ds * dz_ds);
    if grad < 1e-12 {
        return (0.0, -1.0);
    }
    let dip = f64::to_degrees(f64::atan(grad));
    // steepest descent vector (east, north) = (-dz/dx, +dz/ds)
    let mut azimuth = f64::to_degrees(f64::atan2(-dz_dx, dz_ds));
    if azimuth < 0.0 {
        azimuth += 360.0;
    }
    (dip, azimuth)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Aspect, Terrain};
    use russell_lab::{approx_eq, Matrix};

    #[test]
    fn aspect_from_degrees_works() {
        assert_eq!(Aspect::from_degrees(-1.0), Aspect::Flat);
        assert_eq!(Aspect::from_degrees(f64::NAN), Aspect::Flat);
        match Aspect::from_degrees(90.0) {
            Aspect::Directional(a) => approx_eq(a, std::f64::consts::FRAC_PI_2, 1e-15),
            Aspect::Flat => panic!("should be directional"),
        }
        let (e, n) = Aspect::from_degrees(180.0).unit_vector().unwrap();
        approx_eq(e, 0.0, 1e-15);
        approx_eq(n, -1.0, 1e-15);
        assert_eq!(Aspect::Flat.unit_vector(), None);
    }

    #[test]
    fn new_captures_errors() {
        let top = Matrix::filled(2, 2, 10.0);
        let bottom = Matrix::filled(2, 2, 9.0);
        let dip = Matrix::filled(2, 2, 30.0);
        let aspect = Matrix::filled(2, 2, 180.0);
        assert_eq!(
            Terrain::new(0.0, 1.0, top.clone(), bottom.clone(), dip.clone(), &aspect).err(),
            Some("cell sizes must be > 0.0")
        );
        assert_eq!(
            Terrain::new(1.0, 1.0, top.clone(), Matrix::filled(2, 2, 11.0), dip.clone(), &aspect).err(),
            Some("bottom elevation must be ≤ top elevation")
        );
        assert_eq!(
            Terrain::new(1.0, 1.0, top.clone(), bottom.clone(), Matrix::filled(2, 2, 90.0), &aspect).err(),
            Some("dip must satisfy 0 ≤ dip < 90")
        );
        assert_eq!(
            Terrain::new(1.0, 1.0, top, Matrix::filled(3, 2, 9.0), dip, &aspect).err(),
            Some("all grids must have the same dimensions")
        );
    }

    #[test]
    fn accessors_work() {
        let top = Matrix::from(&[[10.0, 11.0, 12.0], [13.0, 14.0, 15.0]]);
        let bottom = Matrix::from(&[[9.0, 9.5, 10.0], [12.0, 12.5, 15.0]]);
        let dip = Matrix::filled(2, 3, 30.0);
        let aspect = Matrix::filled(2, 3, -1.0);
        let t = Terrain::new(2.0, 2.0, top, bottom, dip, &aspect).unwrap();
        assert_eq!(t.nrow(), 2);
        assert_eq!(t.ncol(), 3);
        assert_eq!(t.ncell(), 6);
        assert_eq!(t.ij(4), (1, 1));
        assert_eq!(t.thickness(4), 1.5);
        assert_eq!(t.thickness(5), 0.0);
        approx_eq(t.dip_rad(0), std::f64::consts::PI / 6.0, 1e-15);
        assert_eq!(t.aspect(2), Aspect::Flat);
    }

    #[test]
    fn from_bedrock_works() {
        // plane descending towards the south with slope 1:1 (45°)
        let (nrow, ncol) = (4, 4);
        let mut bottom = Matrix::new(nrow, ncol);
        let mut top = Matrix::new(nrow, ncol);
        for i in 0..nrow {
            for j in 0..ncol {
                bottom.set(i, j, 10.0 - i as f64);
                top.set(i, j, 11.0 - i as f64);
            }
        }
        let t = Terrain::from_bedrock(1.0, 1.0, top, bottom).unwrap();
        // interior cell
        approx_eq(t.dip.get(1, 1), 45.0, 1e-12);
        match t.aspect(1 * ncol + 1) {
            Aspect::Directional(a) => approx_eq(f64::to_degrees(a), 180.0, 1e-12),
            Aspect::Flat => panic!("should be directional"),
        }

        // flat bedrock
        let t = Terrain::from_bedrock(1.0, 1.0, Matrix::filled(3, 3, 2.0), Matrix::filled(3, 3, 1.0)).unwrap();
        assert_eq!(t.aspect(4), Aspect::Flat);
        assert_eq!(t.dip.get(1, 1), 0.0);
    }
}

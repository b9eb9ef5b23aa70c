use super::{BoundaryCode, Face, GroupResult, RootReinforcement, SlipSurfaceGroup, SoilColumn};
use crate::base::{Config, FixedPoint, FixedPointOutcome, ParamCorrection, Precision, StrengthClass};
use crate::base::{EPSILON_ANGLE, FS_FALLBACK_TOLERANCE, FS_STABLE_SENTINEL, FS_UNSTABLE_SENTINEL, MIN_M_ALPHA};

/// Holds the contribution of a member cell that does not depend on the factor of safety
#[derive(Clone, Copy, Debug)]
struct CellTerms {
    weight: f64,   // total weight W
    cohesion: f64, // (c + c_root) A
    suction: f64,  // u A tanφᵇ (tanφ if saturated)
    tan_phi: f64,  // tanφ
    sin_a: f64,    // sine of the apparent dip along the sliding direction
    cos_a: f64,    // cosine of the apparent dip along the sliding direction
}

/// Implements the Janbu simplified 3D limit-equilibrium analysis with side and root resistance
///
/// For a trial factor of safety F, the normal force on the base of each column is
///
/// ```text
///     W - (c A + c_r A - u A tanφᵇ) sinα / F
/// N = ---------------------------------------,   mα = cosα + sinα tanφ / F
///                      mα
/// ```
///
/// and the new estimate is
///
/// ```text
///     Σ (c A + c_r A + N tanφ - u A tanφᵇ) cosα + Σ R
/// F = ------------------------------------------------
///                        Σ N sinα
/// ```
///
/// where α is the apparent dip along the sliding direction and R are the side and root
/// resistances acting on the exposed faces of the failure mass.
///
/// # References
///
/// * Janbu N (1973) Slope stability computations. In: Embankment-dam engineering, Wiley
/// * Hovland HJ (1977) Three-dimensional slope stability analysis method.
///   Journal of the Geotechnical Engineering Division, 103(9), 971-986
pub struct Janbu3D {
    dx: f64,
    dy: f64,
    fs_critical: f64,
    depth_increment: f64,
    lateral_flow: bool,
    side_resistance: bool,
    root_resistance: bool,
    correction: Option<ParamCorrection>,
    solver: FixedPoint,
    precision: Precision,
}

impl Janbu3D {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `config` -- configuration
    /// * `dx`, `dy` -- cell sizes
    pub fn new(config: &Config, dx: f64, dy: f64) -> Self {
        Janbu3D {
            dx,
            dy,
            fs_critical: config.fs_critical,
            depth_increment: config.depth_increment,
            lateral_flow: config.lateral_flow,
            side_resistance: config.side_resistance,
            root_resistance: config.root_resistance,
            correction: config.correction,
            solver: config.fs_solver,
            precision: config.precision,
        }
    }

    /// Analyzes a group by sweeping uniform failure thicknesses
    ///
    /// The failure thickness of each cell is the trial thickness limited by the cell's soil thickness.
    /// The largest failing trial thickness is chosen (lowest FS on ties). Without failure, the thicknesses
    /// are zero and the minimum FS over all trials is returned.
    ///
    /// # Input
    ///
    /// * `group` -- the candidate failure mass
    /// * `columns` -- all columns of the grid (indexed by cell id)
    pub fn analyze(&self, group: &SlipSurfaceGroup, columns: &[SoilColumn]) -> GroupResult {
        let stable = GroupResult {
            fs: FS_STABLE_SENTINEL,
            thicknesses: vec![0.0; group.len()],
        };
        let max_thickness = group
            .cells
            .iter()
            .map(|id| self.precision.thickness(columns[*id].thickness()))
            .fold(0.0, f64::max);
        if max_thickness <= self.depth_increment {
            return stable;
        }
        let direction = match self.sliding_direction(group, columns) {
            Some(s) => s,
            None => return stable,
        };

        let n = (max_thickness / self.depth_increment + 1e-9).floor() as usize;
        let mut fs_min = f64::INFINITY;
        let mut chosen: Option<(f64, f64)> = None; // (thickness, fs)
        for k in 1..(n + 1) {
            let trial = self.precision.thickness((k as f64) * self.depth_increment);
            let fs = self.fs_with_direction(group, columns, trial, direction);
            fs_min = f64::min(fs_min, fs);
            if fs <= self.fs_critical {
                let better = match chosen {
                    None => true,
                    Some((h, f)) => trial > h || (trial == h && fs < f),
                };
                if better {
                    chosen = Some((trial, fs));
                }
            }
        }

        match chosen {
            Some((trial, fs)) => GroupResult {
                fs,
                thicknesses: group
                    .cells
                    .iter()
                    .map(|id| self.precision.thickness(f64::min(trial, f64::max(0.0, columns[*id].thickness()))))
                    .collect(),
            },
            None => GroupResult {
                fs: if fs_min.is_finite() { fs_min } else { FS_STABLE_SENTINEL },
                thicknesses: vec![0.0; group.len()],
            },
        }
    }

    /// Returns the factor of safety of a group failing at a uniform trial thickness
    ///
    /// Returns the stable sentinel if the group has no defined sliding direction and
    /// the unstable sentinel if the iterations fail.
    pub fn factor_of_safety(&self, group: &SlipSurfaceGroup, columns: &[SoilColumn], thickness: f64) -> f64 {
        match self.sliding_direction(group, columns) {
            Some(direction) => self.fs_with_direction(group, columns, thickness, direction),
            None => FS_STABLE_SENTINEL,
        }
    }

    /// Returns the horizontal resistance of the exposed faces of a member cell along the sliding direction
    ///
    /// Side shear acts on faces parallel to the sliding direction; root tension acts on
    /// upslope-facing (crown) faces.
    ///
    /// # Input
    ///
    /// * `column` -- the member cell
    /// * `code` -- boundary-exposure code of the cell within its group
    /// * `depth` -- failure depth of the cell
    /// * `direction` -- unit vector (east, north) of the sliding direction
    pub fn side_resistance(&self, column: &SoilColumn, code: BoundaryCode, depth: f64, direction: (f64, f64)) -> f64 {
        if depth <= 0.0 || code == BoundaryCode::Interior {
            return 0.0;
        }
        let soil = &column.soil;
        let tan_phi = f64::tan(f64::to_radians(soil.phi));
        let k0 = 1.0 - f64::sin(f64::to_radians(soil.phi));
        let root = RootReinforcement::new(soil.root);
        let (se, sn) = direction;
        let mut total = 0.0;
        for face in Face::ALL {
            if !code.is_exposed(face) {
                continue;
            }
            let length = match face {
                Face::Up | Face::Down => self.dx,
                Face::Left | Face::Right => self.dy,
            };
            let (ne, nn) = face.normal();
            let parallel = f64::abs(ne * sn - nn * se);
            let facing = ne * se + nn * sn;
            if self.side_resistance {
                total += side_shear(soil.cohesion, k0, soil.unit_weight, tan_phi, depth) * length * parallel;
            }
            if self.root_resistance {
                total += root.side_cohesion(depth) * length * parallel;
                if facing < 0.0 {
                    total += root.side_tensile(depth) * length * (-facing);
                }
            }
        }
        total
    }

    /// Computes the unit vector (east, north) of the sliding direction
    ///
    /// The direction is the circular mean of the member aspects. Returns None if the average dip
    /// is negligible or the aspects cancel out.
    fn sliding_direction(&self, group: &SlipSurfaceGroup, columns: &[SoilColumn]) -> Option<(f64, f64)> {
        let mut sum_dip = 0.0;
        let (mut se, mut sn) = (0.0, 0.0);
        for id in &group.cells {
            let column = &columns[*id];
            sum_dip += column.hydraulics.dip;
            if let Some((e, n)) = column.aspect.unit_vector() {
                se += e;
                sn += n;
            }
        }
        let avg_dip = sum_dip / (group.len() as f64);
        let norm = f64::sqrt(se * se + sn * sn);
        if !avg_dip.is_finite() || avg_dip < EPSILON_ANGLE || norm < 1e-12 {
            return None;
        }
        Some((se / norm, sn / norm))
    }

    /// Solves for the factor of safety given the sliding direction
    fn fs_with_direction(
        &self,
        group: &SlipSurfaceGroup,
        columns: &[SoilColumn],
        thickness: f64,
        direction: (f64, f64),
    ) -> f64 {
        let area = self.dx * self.dy;
        let mut terms = Vec::with_capacity(group.len());
        let mut drag = 0.0;
        for (id, code) in group.cells.iter().zip(&group.codes) {
            let column = &columns[*id];
            let depth = f64::min(thickness, column.thickness());
            if depth <= 0.0 {
                continue;
            }
            terms.push(self.cell_terms(column, depth, direction, area));
            drag += self.side_resistance(column, *code, depth, direction);
        }
        if terms.is_empty() {
            return FS_STABLE_SENTINEL;
        }

        let outcome = self.solver.solve(1.0, |fs| {
            if fs <= 0.0 {
                return None;
            }
            let mut resisting = drag;
            let mut driving = 0.0;
            for t in &terms {
                let m_alpha = f64::max(t.cos_a + t.sin_a * t.tan_phi / fs, MIN_M_ALPHA);
                let normal = f64::max(0.0, (t.weight - (t.cohesion - t.suction) * t.sin_a / fs) / m_alpha);
                let shear = f64::max(0.0, t.cohesion + normal * t.tan_phi - t.suction);
                resisting += shear * t.cos_a;
                driving += normal * t.sin_a;
            }
            if driving <= 0.0 {
                None
            } else {
                Some(resisting / driving)
            }
        });
        let fs = match outcome {
            FixedPointOutcome::Converged { x, .. } => x,
            FixedPointOutcome::NotConverged { last, previous } => {
                if f64::abs(last - previous) <= FS_FALLBACK_TOLERANCE * f64::max(1.0, f64::abs(last)) {
                    0.5 * (last + previous)
                } else {
                    log::debug!("3D factor of safety did not converge (last = {:?})", last);
                    return FS_UNSTABLE_SENTINEL;
                }
            }
            FixedPointOutcome::Aborted { .. } => return FS_UNSTABLE_SENTINEL,
        };
        let factor = self.correction_factor(group, columns, thickness, direction);
        self.precision.fs(f64::max(0.0, fs * factor))
    }

    /// Computes the terms of a member cell that do not depend on the factor of safety
    fn cell_terms(&self, column: &SoilColumn, depth: f64, direction: (f64, f64), area: f64) -> CellTerms {
        let h = &column.hydraulics;
        let soil = &column.soil;
        let dip = f64::max(h.dip, EPSILON_ANGLE);
        let base_area = area / f64::cos(dip);

        // apparent dip along the sliding direction
        let apparent = match column.aspect.unit_vector() {
            Some((ae, an)) => f64::atan(f64::tan(dip) * (ae * direction.0 + an * direction.1)),
            None => 0.0,
        };
        let (sin_a, cos_a) = f64::sin_cos(apparent);

        let root = RootReinforcement::new(soil.root);
        let (root_cohesion, surcharge) = if self.root_resistance {
            (root.basal_cohesion(depth), root.surcharge())
        } else {
            (0.0, 0.0)
        };
        let pore = column.pore_pressure(self.lateral_flow, &self.precision);
        let uw = pore.calc(h.top - depth);
        let tan_phi = f64::tan(f64::to_radians(soil.phi));
        let tan_b = if uw >= 0.0 {
            tan_phi
        } else {
            f64::tan(f64::to_radians(soil.phi_b))
        };
        let stress = soil.unit_weight * depth + h.gamma_w * column.ponding_depth() + surcharge;
        CellTerms {
            weight: stress * area,
            cohesion: (soil.cohesion + root_cohesion) * base_area,
            suction: uw * base_area * tan_b,
            tan_phi,
            sin_a,
            cos_a,
        }
    }

    /// Computes the Janbu correction factor f₀ ≥ 1 (one if disabled)
    fn correction_factor(
        &self,
        group: &SlipSurfaceGroup,
        columns: &[SoilColumn],
        thickness: f64,
        direction: (f64, f64),
    ) -> f64 {
        let param = match &self.correction {
            Some(p) => p,
            None => return 1.0,
        };
        let count = group.len() as f64;
        let cohesion = group.cells.iter().map(|id| columns[*id].soil.cohesion).sum::<f64>() / count;
        let phi = group.cells.iter().map(|id| columns[*id].soil.phi).sum::<f64>() / count;
        let b1 = match StrengthClass::classify(cohesion, phi) {
            StrengthClass::Cohesive => param.b1_cohesive,
            StrengthClass::Frictional => param.b1_frictional,
            StrengthClass::Mixed => param.b1_mixed,
        };
        let length = self.plan_length(group, columns, direction);
        if length <= 0.0 {
            return 1.0;
        }
        let ratio = thickness / length;
        f64::max(1.0, 1.0 + b1 * (ratio - 1.4 * ratio * ratio))
    }

    /// Returns the plan length of the group along the sliding direction
    fn plan_length(&self, group: &SlipSurfaceGroup, columns: &[SoilColumn], direction: (f64, f64)) -> f64 {
        let (se, sn) = direction;
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for id in &group.cells {
            let (x, y) = columns[*id].center;
            let p = x * se + y * sn;
            lo = f64::min(lo, p);
            hi = f64::max(hi, p);
        }
        hi - lo + f64::abs(se) * self.dx + f64::abs(sn) * self.dy
    }
}

/// Returns the side shear force per unit face length integrated from the surface to `depth`
///
/// ```text
/// ∫₀ᵈ (c + K₀ γ z tanφ) dz = c d + K₀ γ d² tanφ / 2
/// ```
pub fn side_shear(cohesion: f64, k0: f64, unit_weight: f64, tan_phi: f64, depth: f64) -> f64 {
    cohesion * depth + 0.5 * k0 * unit_weight * depth * depth * tan_phi
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

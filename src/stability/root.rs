use crate::base::ParamRoot;

/// Computes the root reinforcement of a soil column at a given failure depth
///
/// Basal quantities are stresses (kPa) acting on the slip surface. Side quantities are
/// integrated from the surface down to the failure depth, giving forces per unit face length (kN/m).
#[derive(Clone, Copy, Debug)]
pub struct RootReinforcement {
    param: ParamRoot,
}

impl RootReinforcement {
    /// Allocates a new instance
    pub fn new(param: ParamRoot) -> Self {
        RootReinforcement { param }
    }

    /// Returns the root cohesion acting on the base of a failure mass at `depth`
    pub fn basal_cohesion(&self, depth: f64) -> f64 {
        match self.param {
            ParamRoot::None => 0.0,
            ParamRoot::Constant {
                cohesion, max_depth, ..
            } => {
                if depth <= max_depth {
                    cohesion
                } else {
                    0.0
                }
            }
            ParamRoot::Exponential {
                total_cohesion,
                decay_depth,
                ..
            } => total_cohesion * f64::exp(-depth / decay_depth) / decay_depth,
        }
    }

    /// Returns the root cohesion integrated along a vertical face from the surface to `depth`
    pub fn side_cohesion(&self, depth: f64) -> f64 {
        let depth = f64::max(0.0, depth);
        match self.param {
            ParamRoot::None => 0.0,
            ParamRoot::Constant {
                cohesion, max_depth, ..
            } => cohesion * f64::min(depth, max_depth),
            ParamRoot::Exponential {
                total_cohesion,
                decay_depth,
                ..
            } => total_cohesion * (1.0 - f64::exp(-depth / decay_depth)),
        }
    }

    /// Returns the root tensile strength integrated along a vertical face from the surface to `depth`
    pub fn side_tensile(&self, depth: f64) -> f64 {
        let depth = f64::max(0.0, depth);
        match self.param {
            ParamRoot::None => 0.0,
            ParamRoot::Constant { tensile, max_depth, .. } => tensile * f64::min(depth, max_depth),
            ParamRoot::Exponential {
                total_tensile,
                decay_depth,
                ..
            } => total_tensile * (1.0 - f64::exp(-depth / decay_depth)),
        }
    }

    /// Returns the weight of the vegetation per plan area
    pub fn surcharge(&self) -> f64 {
        match self.param {
            ParamRoot::None => 0.0,
            ParamRoot::Constant { surcharge, .. } => surcharge,
            ParamRoot::Exponential { surcharge, .. } => surcharge,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::RootReinforcement;
    use crate::base::ParamRoot;
    use russell_lab::approx_eq;

    #[test]
    fn none_works() {
        let root = RootReinforcement::new(ParamRoot::None);
        assert_eq!(root.basal_cohesion(0.5), 0.0);
        assert_eq!(root.side_cohesion(0.5), 0.0);
        assert_eq!(root.side_tensile(0.5), 0.0);
        assert_eq!(root.surcharge(), 0.0);
    }

    #[test]
    fn constant_works() {
        let root = RootReinforcement::new(ParamRoot::Constant {
            cohesion: 3.0,
            tensile: 5.0,
            max_depth: 1.0,
            surcharge: 0.5,
        });
        assert_eq!(root.basal_cohesion(0.8), 3.0);
        assert_eq!(root.basal_cohesion(1.2), 0.0);
        assert_eq!(root.side_cohesion(0.5), 1.5);
        assert_eq!(root.side_cohesion(2.0), 3.0);
        assert_eq!(root.side_tensile(2.0), 5.0);
        assert_eq!(root.surcharge(), 0.5);
    }

    #[test]
    fn exponential_works() {
        let root = RootReinforcement::new(ParamRoot::Exponential {
            total_cohesion: 4.0,
            total_tensile: 6.0,
            decay_depth: 0.5,
            surcharge: 0.0,
        });
        approx_eq(root.basal_cohesion(0.0), 8.0, 1e-15);
        approx_eq(root.basal_cohesion(0.5), 8.0 / std::f64::consts::E, 1e-14);
        assert_eq!(root.side_cohesion(0.0), 0.0);
        approx_eq(root.side_cohesion(100.0), 4.0, 1e-12);
        approx_eq(root.side_tensile(0.5), 6.0 * (1.0 - 1.0 / std::f64::consts::E), 1e-14);
        // the side integral grows with depth while the basal value decays
        assert!(root.side_cohesion(1.0) > root.side_cohesion(0.5));
        assert!(root.basal_cohesion(1.0) < root.basal_cohesion(0.5));
    }
}

use serde::{Deserialize, Serialize};

/// Holds the source classification of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFlags {
    /// The cell fails (FS < FS_critical) and has enough soil to mobilize
    pub landslide: bool,

    /// The landslide may mobilize into a debris flow
    pub debris_flow: bool,
}

impl SourceFlags {
    /// Classifies a cell
    ///
    /// # Input
    ///
    /// * `fs` -- factor of safety of the cell
    /// * `soil_thickness` -- soil thickness of the cell
    /// * `fs_critical` -- critical factor of safety
    /// * `depth_increment` -- minimum resolvable depth
    /// * `initiation` -- external debris-flow initiation flag (None if masking is disabled)
    pub fn classify(
        fs: f64,
        soil_thickness: f64,
        fs_critical: f64,
        depth_increment: f64,
        initiation: Option<bool>,
    ) -> Self {
        let landslide = fs < fs_critical && soil_thickness > depth_increment;
        let debris_flow = match initiation {
            Some(flag) => landslide && flag,
            None => landslide,
        };
        SourceFlags { landslide, debris_flow }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

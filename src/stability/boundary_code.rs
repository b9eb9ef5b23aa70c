use serde::{Deserialize, Serialize};

/// Identifies a vertical face of a cell
///
/// Up is north (row i-1), down is south (row i+1), left is west (column j-1) and right is east (column j+1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Up,
    Down,
    Left,
    Right,
}

impl Face {
    /// Holds all faces
    pub const ALL: [Face; 4] = [Face::Up, Face::Down, Face::Left, Face::Right];

    /// Returns the outward unit normal (east, north)
    pub fn normal(&self) -> (f64, f64) {
        match self {
            Face::Up => (0.0, 1.0),
            Face::Down => (0.0, -1.0),
            Face::Left => (-1.0, 0.0),
            Face::Right => (1.0, 0.0),
        }
    }
}

/// Classifies a member cell of a slip-surface group by which faces are exposed
///
/// A face is exposed (free) when the neighbor across it does not belong to the same group.
/// Variant names list the exposed faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryCode {
    /// All four neighbors belong to the group
    Interior,

    /// One exposed face
    Up,
    Down,
    Left,
    Right,

    /// Two exposed faces meeting at a corner
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,

    /// Two opposite exposed faces
    UpDown,
    LeftRight,

    /// Three exposed faces (only the named face is shared)
    AllButUp,
    AllButDown,
    AllButLeft,
    AllButRight,

    /// No neighbor belongs to the group (e.g., single-cell group)
    Isolated,
}

impl BoundaryCode {
    /// Holds all codes
    pub const ALL: [BoundaryCode; 16] = [
        BoundaryCode::Interior,
        BoundaryCode::Up,
        BoundaryCode::Down,
        BoundaryCode::Left,
        BoundaryCode::Right,
        BoundaryCode::UpLeft,
        BoundaryCode::UpRight,
        BoundaryCode::DownLeft,
        BoundaryCode::DownRight,
        BoundaryCode::UpDown,
        BoundaryCode::LeftRight,
        BoundaryCode::AllButUp,
        BoundaryCode::AllButDown,
        BoundaryCode::AllButLeft,
        BoundaryCode::AllButRight,
        BoundaryCode::Isolated,
    ];

    /// Returns the code given which neighbors are members of the same group
    pub fn from_neighbors(up: bool, down: bool, left: bool, right: bool) -> Self {
        match (!up, !down, !left, !right) {
            (false, false, false, false) => BoundaryCode::Interior,
            (true, false, false, false) => BoundaryCode::Up,
            (false, true, false, false) => BoundaryCode::Down,
            (false, false, true, false) => BoundaryCode::Left,
            (false, false, false, true) => BoundaryCode::Right,
            (true, false, true, false) => BoundaryCode::UpLeft,
            (true, false, false, true) => BoundaryCode::UpRight,
            (false, true, true, false) => BoundaryCode::DownLeft,
            (false, true, false, true) => BoundaryCode::DownRight,
            (true, true, false, false) => BoundaryCode::UpDown,
            (false, false, true, true) => BoundaryCode::LeftRight,
            (false, true, true, true) => BoundaryCode::AllButUp,
            (true, false, true, true) => BoundaryCode::AllButDown,
            (true, true, false, true) => BoundaryCode::AllButLeft,
            (true, true, true, false) => BoundaryCode::AllButRight,
            (true, true, true, true) => BoundaryCode::Isolated,
        }
    }

    /// Returns whether a face is exposed
    pub fn is_exposed(&self, face: Face) -> bool {
        let (up, down, left, right) = self.exposed();
        match face {
            Face::Up => up,
            Face::Down => down,
            Face::Left => left,
            Face::Right => right,
        }
    }

    /// Returns the exposed flags (up, down, left, right)
    pub fn exposed(&self) -> (bool, bool, bool, bool) {
        match self {
            BoundaryCode::Interior => (false, false, false, false),
            BoundaryCode::Up => (true, false, false, false),
            BoundaryCode::Down => (false, true, false, false),
            BoundaryCode::Left => (false, false, true, false),
            BoundaryCode::Right => (false, false, false, true),
            BoundaryCode::UpLeft => (true, false, true, false),
            BoundaryCode::UpRight => (true, false, false, true),
            BoundaryCode::DownLeft => (false, true, true, false),
            BoundaryCode::DownRight => (false, true, false, true),
            BoundaryCode::UpDown => (true, true, false, false),
            BoundaryCode::LeftRight => (false, false, true, true),
            BoundaryCode::AllButUp => (false, true, true, true),
            BoundaryCode::AllButDown => (true, false, true, true),
            BoundaryCode::AllButLeft => (true, true, false, true),
            BoundaryCode::AllButRight => (true, true, true, false),
            BoundaryCode::Isolated => (true, true, true, true),
        }
    }

    /// Returns the number of exposed faces
    pub fn n_exposed(&self) -> usize {
        Face::ALL.iter().filter(|f| self.is_exposed(**f)).count()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

use std::fmt;

/// Coordinate system of the board.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GridTopology {
    #[default]
    Square,
    Hexagonal,
    /// Gridless board; positions are free points with no discrete cells.
    Continuous,
}

/// Discrete cell address.
///
/// Square boards use row/column offsets, hexagonal boards use cube
/// coordinates (`q + r + s == 0`). Continuous boards have no addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellAddress {
    Offset { i: i32, j: i32 },
    Cube { q: i32, r: i32, s: i32 },
}

impl CellAddress {
    pub const fn offset(i: i32, j: i32) -> Self {
        Self::Offset { i, j }
    }

    /// Builds a cube address from its axial part; `s` is derived.
    pub const fn cube(q: i32, r: i32) -> Self {
        Self::Cube { q, r, s: -q - r }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellAddress::Offset { i, j } => write!(f, "({i}, {j})"),
            CellAddress::Cube { q, r, s } => write!(f, "[{q}, {r}, {s}]"),
        }
    }
}

use serde::{Deserialize, Serialize};

/// How the two children of a sash are arranged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Children side by side (`child1` left, `child2` right)
    Horizontal,
    /// Children stacked (`child1` top, `child2` bottom)
    Vertical,
}

/// One of the two child slots of a sash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    /// Both slots in traversal order.
    pub const BOTH: [Slot; 2] = [Slot::First, Slot::Second];

    /// The sibling slot.
    pub fn other(self) -> Self {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

/// Side of an anchor part at which a new sibling part is inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    South,
    East,
    West,
}

impl Region {
    /// North/south stack vertically, east/west sit side by side.
    pub fn orientation(self) -> Orientation {
        match self {
            Region::North | Region::South => Orientation::Vertical,
            Region::East | Region::West => Orientation::Horizontal,
        }
    }

    /// Slot the new part occupies in the sash created around the anchor.
    pub fn new_part_slot(self) -> Slot {
        match self {
            Region::North | Region::West => Slot::First,
            Region::South | Region::East => Slot::Second,
        }
    }

    /// Parse a region from its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "north" => Some(Region::North),
            "south" => Some(Region::South),
            "east" => Some(Region::East),
            "west" => Some(Region::West),
            _ => None,
        }
    }

    pub fn all_variants() -> &'static [Region] {
        &[Region::North, Region::South, Region::East, Region::West]
    }
}

//! Layout engine for a tabbed, splittable workbench.
//!
//! Parts (tabbed containers) sit at the leaves of a binary tree of sashes.
//! Every edit returns a new [`LayoutTree`]; the whole arrangement can be
//! stored as a single URL-safe token through [`codec`].

pub mod codec;
pub mod error;
pub mod ids;
mod ops;
pub mod registry;
pub mod settings;
pub mod tree;
pub mod types;

pub use codec::{deserialize, deserialize_param, deserialize_with, serialize};
pub use error::{LayoutError, Result};
pub use ids::{next_part_id, next_part_id_with, next_sash_id};
pub use ops::{DEFAULT_SPLITTER_RATIO, is_valid_ratio};
pub use registry::{ActivationLog, ActivationRegistry, NoActivationHistory};
pub use settings::LayoutSettings;
pub use tree::{LayoutNode, LayoutTree, LayoutVisitor, PartLeaf, PartVisit, SashNode, SashStep, SashVisit};
pub use types::{Orientation, Region, Slot};

use serde::{Deserialize, Serialize};

/// Current settings schema version - increment when making breaking changes
pub const SETTINGS_VERSION: u32 = 1;

/// Id of the lone part in a freshly decoded empty layout.
pub const DEFAULT_PART_ID: &str = "part-1";

/// Prefix for generated part ids (`part-1`, `part-2`, ...).
pub const DEFAULT_PART_ID_PREFIX: &str = "part-";

fn default_settings_version() -> u32 {
    SETTINGS_VERSION
}

fn default_part_id() -> String {
    DEFAULT_PART_ID.to_string()
}

fn default_part_id_prefix() -> String {
    DEFAULT_PART_ID_PREFIX.to_string()
}

/// Knobs for id generation and default layouts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Settings schema version for migration support
    #[serde(default = "default_settings_version")]
    pub version: u32,
    /// Part id used when an empty token is decoded
    #[serde(default = "default_part_id")]
    pub default_part_id: String,
    /// Prefix for part ids handed out by the identity allocator
    #[serde(default = "default_part_id_prefix")]
    pub part_id_prefix: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            default_part_id: default_part_id(),
            part_id_prefix: default_part_id_prefix(),
        }
    }
}

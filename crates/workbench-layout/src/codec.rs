//! Layout <-> URL-safe token.
//!
//! A token is the unpadded URL-safe base64 of a JSON document
//! `{"version":1,"root":<node|null>}`, so it can sit in a query string
//! parameter without further escaping.

use crate::error::{LayoutError, Result};
use crate::settings::LayoutSettings;
use crate::tree::{LayoutNode, LayoutTree};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Current token format version - increment when making breaking changes
pub const LAYOUT_FORMAT_VERSION: u32 = 1;

fn default_format_version() -> u32 {
    1 // tokens written before versioning
}

#[derive(Serialize)]
struct EncodedLayout<'a> {
    version: u32,
    root: Option<&'a LayoutNode>,
}

#[derive(Deserialize)]
struct DecodedLayout {
    #[serde(default = "default_format_version")]
    version: u32,
    // Required even though it may be null
    #[serde(deserialize_with = "Option::deserialize")]
    root: Option<LayoutNode>,
}

/// Encode a tree as a token. An empty tree still produces a token (of a
/// `null` root) so that it survives a round trip.
pub fn serialize(tree: &LayoutTree) -> Result<String> {
    let json = serde_json::to_vec(&EncodedLayout {
        version: LAYOUT_FORMAT_VERSION,
        root: tree.root(),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a token with default settings.
pub fn deserialize(token: &str) -> Result<LayoutTree> {
    deserialize_with(token, &LayoutSettings::default())
}

/// Decode an optional query parameter; absence behaves like an empty token.
pub fn deserialize_param(param: Option<&str>, settings: &LayoutSettings) -> Result<LayoutTree> {
    deserialize_with(param.unwrap_or_default(), settings)
}

/// Decode a token. An empty (or blank) token yields a single default part.
pub fn deserialize_with(token: &str, settings: &LayoutSettings) -> Result<LayoutTree> {
    let token = token.trim();
    if token.is_empty() {
        log::info!("Empty layout token, starting with default part {}", settings.default_part_id);
        return Ok(LayoutTree::single_part(settings.default_part_id.clone()));
    }
    decode(token).inspect_err(|e| log::warn!("Rejected layout token: {}", e))
}

fn decode(token: &str) -> Result<LayoutTree> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| LayoutError::corrupt(format!("invalid base64: {}", e)))?;

    // Deep trees nest one JSON object per level, so lift serde_json's
    // recursion limit and let serde_stacker grow the stack instead.
    let mut json = serde_json::Deserializer::from_slice(&bytes);
    json.disable_recursion_limit();
    let layout = DecodedLayout::deserialize(serde_stacker::Deserializer::new(&mut json))
        .map_err(|e| LayoutError::corrupt(format!("invalid layout document: {}", e)))?;
    json.end()
        .map_err(|e| LayoutError::corrupt(format!("invalid layout document: {}", e)))?;

    if layout.version > LAYOUT_FORMAT_VERSION {
        return Err(LayoutError::corrupt(format!(
            "layout version {} is newer than supported version {}",
            layout.version, LAYOUT_FORMAT_VERSION
        )));
    }

    let tree = LayoutTree::from_root_unchecked(layout.root);
    tree.validate()?;
    Ok(tree)
}

//! Indexer configuration, read from TOML.
//!
//! Every key is optional:
//!
//! ```toml
//! scheme = "tsc"
//! id_prefix = "w"
//! embed_contents = true
//!
//! [group]
//! uri = "file:///demo"
//! name = "demo"
//! root_uri = "file:///demo"
//! ```

use crate::error::ConfigError;
use lsif_dom::IdAllocator;
use lsif_type::{ConflictResolution, Repository, ToolInfo, Uri};
use serde_derive::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Scheme of every moniker the pass emits.
    pub scheme: String,
    /// LSIF version written to `metaData`.
    pub version: String,
    pub tool_info: ToolInfo,
    /// Key stored in `metaData.toolState.data`.
    pub tool_state: Option<String>,
    pub group: Option<GroupConfig>,
    /// Emit string ids `"{prefix}{n}"` instead of numbers.
    pub id_prefix: Option<String>,
    /// Copy document contents into `document` vertices.
    pub embed_contents: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        IndexerConfig {
            scheme: "lsif".to_owned(),
            version: "0.6.0".to_owned(),
            tool_info: ToolInfo {
                name: "lsif".to_owned(),
                version: Some(env!("CARGO_PKG_VERSION").to_owned()),
                args: None,
            },
            tool_state: None,
            group: None,
            id_prefix: None,
            embed_contents: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub uri: Uri,
    pub name: String,
    pub root_uri: Uri,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "take_db")]
    pub conflict_resolution: ConflictResolution,
    #[serde(default)]
    pub repository: Option<Repository>,
}

fn take_db() -> ConflictResolution {
    ConflictResolution::TakeDB
}

impl IndexerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn id_allocator(&self) -> IdAllocator {
        match &self.id_prefix {
            Some(prefix) => IdAllocator::with_prefix(prefix.as_str()),
            None => IdAllocator::new(),
        }
    }
}

//! Node type → GNS3 template mapping tables

use crate::error::{ConvertError, ConvertResult, MappingFileError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Template used when a node type has no usable mapping
pub const FALLBACK_TEMPLATE: &str = "qemu";

/// Console used when a node type has no usable mapping
pub const FALLBACK_CONSOLE: &str = "telnet";

/// How one vendor node type is represented in GNS3
///
/// Both fields are optional in mapping files; missing ones fall back to
/// [`FALLBACK_TEMPLATE`] and [`FALLBACK_CONSOLE`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeMapping {
    #[serde(alias = "target_template", skip_serializing_if = "Option::is_none")]
    pub gns3_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_type: Option<String>,
}

impl NodeMapping {
    pub fn new(template: impl Into<String>, console_type: impl Into<String>) -> Self {
        Self {
            gns3_template: Some(template.into()),
            console_type: Some(console_type.into()),
        }
    }

    pub fn template(&self) -> &str {
        self.gns3_template.as_deref().unwrap_or(FALLBACK_TEMPLATE)
    }

    pub fn console(&self) -> &str {
        self.console_type.as_deref().unwrap_or(FALLBACK_CONSOLE)
    }
}

/// A set of node mappings keyed by vendor node type
///
/// Serializes as a plain JSON object: `{"iosv": {"gns3_template": ..., "console_type": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    entries: BTreeMap<String, NodeMapping>,
}

static BUILTIN: LazyLock<MappingTable> = LazyLock::new(|| {
    [
        ("iosv", "Cisco IOSv", "telnet"),
        ("iosvl2", "Cisco IOSvL2", "telnet"),
        ("csr1000v", "Cisco CSR1000v", "telnet"),
        ("iosxrv", "Cisco IOS XRv", "telnet"),
        ("nxosv", "Cisco NX-OSv", "telnet"),
        ("asav", "Cisco ASAv", "telnet"),
        ("linux", "Linux", "telnet"),
        ("ubuntu", "Ubuntu", "telnet"),
        ("external_connector", "Cloud", "none"),
    ]
    .into_iter()
    .map(|(node_type, template, console)| (node_type, NodeMapping::new(template, console)))
    .collect()
});

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table. Shared and immutable; use [`merged`](Self::merged)
    /// or `clone()` to derive a table with overrides.
    pub fn builtin() -> &'static MappingTable {
        &BUILTIN
    }

    /// A new table with `overrides` applied on top of `self`; overrides win per key
    pub fn merged(&self, overrides: &MappingTable) -> MappingTable {
        let mut entries = self.entries.clone();
        entries.extend(
            overrides
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        MappingTable { entries }
    }

    pub fn insert(&mut self, node_type: impl Into<String>, mapping: NodeMapping) {
        self.entries.insert(node_type.into(), mapping);
    }

    pub fn get(&self, node_type: &str) -> Option<&NodeMapping> {
        self.entries.get(node_type)
    }

    /// Entries ordered by node type
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeMapping)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a table from a JSON mapping file
    pub fn load(path: &Path) -> ConvertResult<MappingTable> {
        let wrap = |source: MappingFileError| ConvertError::MappingFile {
            path: path.to_path_buf(),
            source,
        };
        let content = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
        serde_json::from_str(&content).map_err(|e| wrap(e.into()))
    }

    /// Write the table as pretty-printed JSON, creating parent directories
    pub fn save(&self, path: &Path) -> ConvertResult<()> {
        let wrap = |source: MappingFileError| ConvertError::MappingFile {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| wrap(e.into()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| wrap(e.into()))?;
        std::fs::write(path, json).map_err(|e| wrap(e.into()))
    }
}

impl<K: Into<String>> FromIterator<(K, NodeMapping)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (K, NodeMapping)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Per-user mapping file (`~/.config/netbridge/mappings.json` on Linux)
pub fn user_mapping_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("netbridge").join("mappings.json"))
}

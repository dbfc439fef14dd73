//! GNS3 project document model
//!
//! Field order in these structs is the field order in the written file.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// GNS3 release the generated projects declare
pub const GNS3_VERSION: &str = "2.2.27";
pub const SCENE_WIDTH: u32 = 2000;
pub const SCENE_HEIGHT: u32 = 1000;
/// File extension of GNS3 project files
pub const PROJECT_EXTENSION: &str = "gns3";

/// A complete `.gns3` project document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: Uuid,
    pub name: String,
    pub auto_start: bool,
    pub auto_close: bool,
    pub scene_width: u32,
    pub scene_height: u32,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub topology: ProjectTopology,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectTopology {
    pub nodes: Vec<ProjectNode>,
    pub links: Vec<ProjectLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectNode {
    pub id: Uuid,
    pub name: String,
    /// GNS3 template name
    #[serde(rename = "type")]
    pub node_type: String,
    pub template_id: String,
    pub compute_id: String,
    pub console_type: String,
    pub console_auto_start: bool,
    pub symbol: String,
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLink {
    pub id: Uuid,
    pub link_type: String,
    pub nodes: [LinkEndpoint; 2],
    pub suspend: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEndpoint {
    pub node_id: Uuid,
    pub adapter_number: u32,
    pub port_number: i64,
}

impl Project {
    /// An empty project with the standard display defaults
    pub fn new(project_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            project_id,
            name: name.into(),
            auto_start: false,
            auto_close: true,
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,
            version: GNS3_VERSION.to_string(),
            kind: "topology".to_string(),
            topology: ProjectTopology::default(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.topology.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.topology.links.len()
    }
}

impl ProjectNode {
    /// A locally computed node with a fresh id.
    ///
    /// `template_id` and `symbol` are derived from the lowercased template name.
    pub fn new(
        name: impl Into<String>,
        template: &str,
        console_type: impl Into<String>,
        (x, y): (i64, i64),
    ) -> Self {
        let lowered = template.to_lowercase();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            node_type: template.to_string(),
            template_id: format!("template-{}", lowered),
            compute_id: "local".to_string(),
            console_type: console_type.into(),
            console_auto_start: false,
            symbol: format!(":/symbols/{}.svg", lowered),
            x,
            y,
            z: 1,
            properties: serde_json::Map::new(),
        }
    }
}

impl ProjectLink {
    /// An ethernet link with a fresh id between two (node, port) endpoints
    pub fn ethernet(a: (Uuid, i64), b: (Uuid, i64)) -> Self {
        let endpoint = |(node_id, port_number): (Uuid, i64)| LinkEndpoint {
            node_id,
            adapter_number: 0,
            port_number,
        };
        Self {
            id: Uuid::new_v4(),
            link_type: "ethernet".to_string(),
            nodes: [endpoint(a), endpoint(b)],
            suspend: false,
        }
    }
}

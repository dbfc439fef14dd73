//! Lab node representation shared by both source dialects

/// Node type used for lookups when the source declares none
pub const UNKNOWN_NODE_TYPE: &str = "unknown";

/// A device in a lab topology
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identifier from the source file, unique within the topology
    pub id: String,
    /// Display name
    pub label: String,
    /// Vendor node type (e.g., "iosv", "linux")
    pub node_type: Option<String>,
    pub x: f64,
    pub y: f64,
    /// Startup configuration text, empty when the source has none
    pub configuration: String,
    /// Image name or image definition
    pub image: Option<String>,
    /// Interface identifiers in document order
    pub interfaces: Vec<String>,
    /// GNS3 template, set by the node mapper
    pub target_template: Option<String>,
    /// Console access method, set by the node mapper
    pub console_type: Option<String>,
}

impl Node {
    /// Create a node whose label defaults to its id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            node_type: None,
            x: 0.0,
            y: 0.0,
            configuration: String::new(),
            image: None,
            interfaces: Vec::new(),
            target_template: None,
            console_type: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = configuration.into();
        self
    }

    pub fn add_interface(&mut self, interface: impl Into<String>) {
        self.interfaces.push(interface.into());
    }

    /// The type used as mapping-table key
    pub fn type_key(&self) -> &str {
        self.node_type.as_deref().unwrap_or(UNKNOWN_NODE_TYPE)
    }

    /// Whether the node mapper has run on this node
    pub fn is_mapped(&self) -> bool {
        self.target_template.is_some() && self.console_type.is_some()
    }
}

//! Topology: the unified in-memory form of a lab, whichever dialect it came from

use super::link::Link;
use super::node::Node;
use std::collections::BTreeMap;
use std::fmt;

/// Name given to topologies that arrive without one
pub const DEFAULT_TOPOLOGY_NAME: &str = "Unnamed Topology";

/// Source dialect a topology was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Cisco Modeling Labs YAML
    Cml,
    /// VIRL XML
    Virl,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cml => f.write_str("CML"),
            Self::Virl => f.write_str("VIRL"),
        }
    }
}

/// A parsed lab
///
/// Nodes and links are keyed by their source ids. Keys are ordered so that
/// converting the same file twice emits nodes and links in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub dialect: Dialect,
    pub name: String,
    pub description: String,
    pub notes: String,
    pub nodes: BTreeMap<String, Node>,
    pub links: BTreeMap<String, Link>,
}

impl Topology {
    /// Create an empty topology; a blank name falls back to the default
    pub fn new(dialect: Dialect, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            dialect,
            name: if name.trim().is_empty() {
                DEFAULT_TOPOLOGY_NAME.to_string()
            } else {
                name
            },
            description: String::new(),
            notes: String::new(),
            nodes: BTreeMap::new(),
            links: BTreeMap::new(),
        }
    }

    /// Add a node, replacing any node with the same id
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Add a link, replacing any link with the same id
    pub fn add_link(&mut self, link: Link) {
        self.links.insert(link.id.clone(), link);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

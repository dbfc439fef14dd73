//! Parser for Cisco Modeling Labs (CML) YAML topologies
//!
//! Expected shape:
//!
//! ```yaml
//! topology:
//!   name: branch-lab
//!   nodes:
//!     r1:
//!       label: edge-router
//!       node_definition: iosv
//!       x: 100
//!       y: 200
//!       configuration: |
//!         hostname r1
//!   links:
//!     l0:
//!       node_a: r1
//!       interface_a: GigabitEthernet0/1
//!       node_b: h1
//!       interface_b: eth0
//! ```

use super::TopologyParser;
use crate::error::SourceError;
use crate::topology::{Dialect, InterfaceRef, Link, Node, Topology};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Parser for CML YAML files
#[derive(Debug, Default, Clone, Copy)]
pub struct CmlParser;

impl TopologyParser for CmlParser {
    fn dialect(&self) -> Dialect {
        Dialect::Cml
    }

    fn parse_str(&self, content: &str, fallback_name: &str) -> Result<Topology, SourceError> {
        let document: serde_yaml::Value = serde_yaml::from_str(content)?;

        let section = match document.get("topology") {
            Some(serde_yaml::Value::Mapping(map)) if !map.is_empty() => map.clone(),
            _ => {
                return Err(SourceError::Structure(
                    "Missing 'topology' section in CML file".to_string(),
                ))
            }
        };
        let section: TopologySection = serde_yaml::from_value(serde_yaml::Value::Mapping(section))?;

        let name = section
            .name
            .map(Scalar::into_string)
            .unwrap_or_else(|| fallback_name.to_string());
        let mut topology = Topology::new(Dialect::Cml, name);
        topology.description = section.description.unwrap_or_default();
        topology.notes = section.notes.unwrap_or_default();

        for (id, record) in section.nodes.unwrap_or_default() {
            topology.add_node(record.unwrap_or_default().into_node(id.into_string()));
        }

        for (id, record) in section.links.unwrap_or_default() {
            topology.add_link(record.unwrap_or_default().into_link(id.into_string()));
        }

        Ok(topology)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TopologySection {
    name: Option<Scalar>,
    description: Option<String>,
    notes: Option<String>,
    nodes: Option<BTreeMap<Scalar, Option<NodeRecord>>>,
    links: Option<BTreeMap<Scalar, Option<LinkRecord>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NodeRecord {
    label: Option<Scalar>,
    node_definition: Option<Scalar>,
    x: Option<f64>,
    y: Option<f64>,
    configuration: Option<String>,
    image_definition: Option<Scalar>,
}

impl NodeRecord {
    fn into_node(self, id: String) -> Node {
        let mut node = Node::new(id);
        if let Some(label) = self.label {
            node.label = label.into_string();
        }
        node.node_type = self.node_definition.map(Scalar::into_string);
        node.x = self.x.unwrap_or(0.0);
        node.y = self.y.unwrap_or(0.0);
        node.configuration = self.configuration.unwrap_or_default();
        node.image = self.image_definition.map(Scalar::into_string);
        node
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LinkRecord {
    node_a: Option<Scalar>,
    interface_a: Option<InterfaceRef>,
    node_b: Option<Scalar>,
    interface_b: Option<InterfaceRef>,
}

impl LinkRecord {
    /// A missing node reference becomes an empty id, which the validator rejects
    fn into_link(self, id: String) -> Link {
        Link {
            id,
            node1_id: self.node_a.map(Scalar::into_string).unwrap_or_default(),
            interface1: self.interface_a,
            node2_id: self.node_b.map(Scalar::into_string).unwrap_or_default(),
            interface2: self.interface_b,
        }
    }
}

/// Any YAML scalar, kept as text. Lab files routinely use bare numbers as
/// node keys (`1:`) or labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Scalar(String);

impl Scalar {
    fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

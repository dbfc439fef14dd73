//! Parser for VIRL XML topologies
//!
//! VIRL files in the wild disagree on element and attribute names, so every
//! field is looked up through an ordered list of candidates and the first
//! present, non-empty value wins.

use super::xml::{parse_document, Element};
use super::TopologyParser;
use crate::error::SourceError;
use crate::topology::{Dialect, InterfaceRef, Link, Node, Topology};
use tracing::debug;

const NODE_TAGS: &[&str] = &["node", "device"];
const NODE_ID_ATTRS: &[&str] = &["id", "name"];
const NODE_TYPE_ATTRS: &[&str] = &["type", "subtype"];
const NODE_LABEL_ATTRS: &[&str] = &["name", "label"];
const CONFIG_TAGS: &[&str] = &["configuration", "config"];
const INTERFACE_ID_ATTRS: &[&str] = &["id", "name"];
const LINK_TAGS: &[&str] = &["link", "connection"];
const ENDPOINT_TAGS: &[&str] = &["endpoint", "interface"];
const ENDPOINT_NODE_ATTRS: &[&str] = &["node", "device"];
const ENDPOINT_INTERFACE_ATTRS: &[&str] = &["interface", "port"];

/// Parser for VIRL XML files
#[derive(Debug, Default, Clone, Copy)]
pub struct VirlParser;

impl TopologyParser for VirlParser {
    fn dialect(&self) -> Dialect {
        Dialect::Virl
    }

    fn parse_str(&self, content: &str, fallback_name: &str) -> Result<Topology, SourceError> {
        let root = parse_document(content)?;
        let scope = Scope {
            namespace: root.namespace.as_deref(),
        };

        let mut topology = Topology::new(Dialect::Virl, fallback_name);
        topology.description = scope
            .first_child(&root, &["annotation"])
            .map(|e| e.text.clone())
            .unwrap_or_default();

        for element in scope.children(&root, NODE_TAGS) {
            if let Some(node) = scope.node(element)? {
                topology.add_node(node);
            }
        }

        for element in scope.children(&root, LINK_TAGS) {
            let endpoints: Vec<(&str, Option<&str>)> = scope
                .children(element, ENDPOINT_TAGS)
                .into_iter()
                .filter_map(|ep| {
                    let node = ep.first_attr(ENDPOINT_NODE_ATTRS)?;
                    Some((node, ep.first_attr(ENDPOINT_INTERFACE_ATTRS)))
                })
                .collect();

            // Multi-point links are out of scope: only the first two endpoints count.
            let [(node1, iface1), (node2, iface2), ..] = endpoints[..] else {
                debug!("Skipping link with {} endpoint(s)", endpoints.len());
                continue;
            };

            let id = element
                .first_attr(&["id"])
                .map(str::to_string)
                .unwrap_or_else(|| format!("link_{}", topology.link_count() + 1));
            topology.add_link(Link::new(
                id,
                (node1, iface1.map(InterfaceRef::from)),
                (node2, iface2.map(InterfaceRef::from)),
            ));
        }

        Ok(topology)
    }
}

/// Element lookups restricted to the document's namespace
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    namespace: Option<&'a str>,
}

impl Scope<'_> {
    /// Children matching any candidate tag, grouped in candidate order
    fn children<'e>(&self, parent: &'e Element, tags: &[&str]) -> Vec<&'e Element> {
        tags.iter()
            .flat_map(|tag| {
                parent
                    .children
                    .iter()
                    .filter(move |child| child.is(self.namespace, tag))
            })
            .collect()
    }

    /// First child matching the first candidate tag that is present
    fn first_child<'e>(&self, parent: &'e Element, tags: &[&str]) -> Option<&'e Element> {
        self.children(parent, tags).into_iter().next()
    }

    /// Build a node; elements without any identifier are skipped
    fn node(&self, element: &Element) -> Result<Option<Node>, SourceError> {
        let Some(id) = element.first_attr(NODE_ID_ATTRS) else {
            debug!("Skipping <{}> without id or name", element.name);
            return Ok(None);
        };

        let mut node = Node::new(id);
        if let Some(label) = element.first_attr(NODE_LABEL_ATTRS) {
            node.label = label.to_string();
        }
        node.node_type = element.first_attr(NODE_TYPE_ATTRS).map(str::to_string);
        node.image = element.first_attr(&["image"]).map(str::to_string);

        if let Some(position) = self.first_child(element, &["position"]) {
            node.x = coordinate(position, "x")?;
            node.y = coordinate(position, "y")?;
        }

        if let Some(config) = self.first_child(element, CONFIG_TAGS) {
            node.configuration = config.text.clone();
        }

        for interface in self.children(element, &["interface"]) {
            if let Some(interface_id) = interface.first_attr(INTERFACE_ID_ATTRS) {
                node.add_interface(interface_id);
            }
        }

        Ok(Some(node))
    }
}

fn coordinate(position: &Element, axis: &str) -> Result<f64, SourceError> {
    match position.attr(axis) {
        None => Ok(0.0),
        Some(raw) => raw.trim().parse().map_err(|_| {
            SourceError::Structure(format!("invalid {} coordinate '{}'", axis, raw))
        }),
    }
}

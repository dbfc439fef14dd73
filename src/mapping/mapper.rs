//! Assigns GNS3 templates and console types to parsed nodes

use super::table::{MappingTable, FALLBACK_CONSOLE, FALLBACK_TEMPLATE};
use crate::error::ConversionWarning;
use crate::topology::Topology;
use tracing::{debug, warn};

/// Map every node of `topology` through `table`, in place.
///
/// Never fails: afterwards every node has both `target_template` and
/// `console_type` set. Node types missing from the table get the fallback
/// template and console, and each miss is returned as a warning. The
/// topology is updated in place, not returned; the return value is the
/// warnings.
pub fn map_nodes(topology: &mut Topology, table: &MappingTable) -> Vec<ConversionWarning> {
    let mut warnings = Vec::new();

    for (node_id, node) in topology.nodes.iter_mut() {
        let node_type = node.type_key().to_string();
        match table.get(&node_type) {
            Some(mapping) => {
                node.target_template = Some(mapping.template().to_string());
                node.console_type = Some(mapping.console().to_string());
                debug!(
                    "Mapped node {} ({}) to {}",
                    node_id,
                    node_type,
                    mapping.template()
                );
            }
            None => {
                node.target_template = Some(FALLBACK_TEMPLATE.to_string());
                node.console_type = Some(FALLBACK_CONSOLE.to_string());
                let miss = ConversionWarning::MappingMiss {
                    node_id: node_id.clone(),
                    node_type,
                };
                warn!("{}", miss);
                warnings.push(miss);
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::NodeMapping;
    use crate::topology::{Dialect, Node};

    fn topology(nodes: Vec<Node>) -> Topology {
        let mut topo = Topology::new(Dialect::Cml, "lab");
        for node in nodes {
            topo.add_node(node);
        }
        topo
    }

    #[test]
    fn known_types_use_table_entries() {
        let mut topo = topology(vec![
            Node::new("r1").with_type("iosv"),
            Node::new("h1").with_type("linux"),
        ]);
        let warnings = map_nodes(&mut topo, MappingTable::builtin());
        assert!(warnings.is_empty());
        assert_eq!(topo.nodes["r1"].target_template.as_deref(), Some("Cisco IOSv"));
        assert_eq!(topo.nodes["r1"].console_type.as_deref(), Some("telnet"));
        assert_eq!(topo.nodes["h1"].target_template.as_deref(), Some("Linux"));
    }

    #[test]
    fn unknown_and_missing_types_fall_back() {
        let mut topo = topology(vec![
            Node::new("fw").with_type("paloalto"),
            Node::new("mystery"),
        ]);
        let warnings = map_nodes(&mut topo, MappingTable::builtin());

        for node in topo.nodes.values() {
            assert_eq!(node.target_template.as_deref(), Some(FALLBACK_TEMPLATE));
            assert_eq!(node.console_type.as_deref(), Some(FALLBACK_CONSOLE));
        }
        assert_eq!(
            warnings,
            vec![
                ConversionWarning::MappingMiss {
                    node_id: "fw".to_string(),
                    node_type: "paloalto".to_string(),
                },
                ConversionWarning::MappingMiss {
                    node_id: "mystery".to_string(),
                    node_type: "unknown".to_string(),
                },
            ]
        );
    }

    #[test]
    fn table_can_map_the_unknown_key() {
        let mut table = MappingTable::new();
        table.insert("unknown", NodeMapping::new("Generic", "vnc"));
        let mut topo = topology(vec![Node::new("x")]);
        assert!(map_nodes(&mut topo, &table).is_empty());
        assert_eq!(topo.nodes["x"].console_type.as_deref(), Some("vnc"));
    }

    #[test]
    fn mapping_is_stable_across_runs() {
        let run = || {
            let mut topo = topology(vec![Node::new("a").with_type("nope")]);
            map_nodes(&mut topo, MappingTable::builtin());
            topo.nodes["a"].clone()
        };
        assert_eq!(run(), run());
    }
}

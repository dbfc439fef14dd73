//! Structural checks run on every parsed topology before mapping

use super::lab::{Topology, DEFAULT_TOPOLOGY_NAME};
use crate::error::{ConvertError, ConvertResult};
use tracing::{error, info, warn};

/// Check that a topology can be converted.
///
/// Fails when there are no nodes or when a link references a node id that
/// is not in the node set. A blank name is replaced with the default name;
/// nothing else is modified. Interfaces are not inspected.
pub fn validate_topology(topology: &mut Topology) -> ConvertResult<()> {
    if topology.name.trim().is_empty() {
        warn!("Topology has no name, using default");
        topology.name = DEFAULT_TOPOLOGY_NAME.to_string();
    }

    if topology.nodes.is_empty() {
        error!("Topology has no nodes");
        return Err(ConvertError::InvalidTopology("No nodes found".to_string()));
    }

    for (link_id, link) in &topology.links {
        for node_id in link.endpoints() {
            if !topology.nodes.contains_key(node_id) {
                error!(link = %link_id, node = %node_id, "Link references non-existent node");
                return Err(ConvertError::InvalidTopology(format!(
                    "link {} references unknown node '{}'",
                    link_id, node_id
                )));
            }
        }
    }

    info!(
        nodes = topology.node_count(),
        links = topology.link_count(),
        "Topology validation passed"
    );
    Ok(())
}

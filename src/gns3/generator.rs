//! Writes GNS3 projects from mapped topologies

use super::port::port_number;
use super::project::{Project, ProjectLink, ProjectNode, PROJECT_EXTENSION};
use crate::error::{ConversionWarning, ConvertError, ConvertResult};
use crate::mapping::{FALLBACK_CONSOLE, FALLBACK_TEMPLATE};
use crate::topology::Topology;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Subdirectory of the output directory holding node configurations
pub const CONFIG_DIR: &str = "configs";

/// What a generation run produced
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Path of the written `.gns3` file
    pub project_file: PathBuf,
    pub node_count: usize,
    pub link_count: usize,
    /// Links that were skipped
    pub warnings: Vec<ConversionWarning>,
}

/// Generator for GNS3 project files
#[derive(Debug, Default, Clone, Copy)]
pub struct Gns3Generator;

impl Gns3Generator {
    pub fn new() -> Self {
        Self
    }

    /// Build the project document for `topology` without touching the disk.
    ///
    /// Returns the project, the source node id → generated node id map, and
    /// a warning for every link that could not be resolved through that map.
    pub fn build(
        &self,
        topology: &Topology,
        project_id: Option<Uuid>,
    ) -> (Project, HashMap<String, Uuid>, Vec<ConversionWarning>) {
        let mut project = Project::new(project_id.unwrap_or_else(Uuid::new_v4), &topology.name);
        let mut node_map = HashMap::with_capacity(topology.node_count());
        let mut warnings = Vec::new();

        for node in topology.nodes.values() {
            if !node.is_mapped() {
                debug!("Node {} was not mapped, using fallback template", node.id);
            }
            let entry = ProjectNode::new(
                &node.label,
                node.target_template.as_deref().unwrap_or(FALLBACK_TEMPLATE),
                node.console_type.as_deref().unwrap_or(FALLBACK_CONSOLE),
                (node.x as i64, node.y as i64),
            );
            node_map.insert(node.id.clone(), entry.id);
            project.topology.nodes.push(entry);
        }

        for link in topology.links.values() {
            let resolve = |id: &str| node_map.get(id).copied();
            match (resolve(&link.node1_id), resolve(&link.node2_id)) {
                (Some(a), Some(b)) => project.topology.links.push(ProjectLink::ethernet(
                    (a, port_number(link.interface1.as_ref())),
                    (b, port_number(link.interface2.as_ref())),
                )),
                (a, _) => {
                    let missing = if a.is_none() { &link.node1_id } else { &link.node2_id };
                    let skipped = ConversionWarning::DanglingLink {
                        link_id: link.id.clone(),
                        node_id: missing.clone(),
                    };
                    warn!(link = %link, "{}", skipped);
                    warnings.push(skipped);
                }
            }
        }

        (project, node_map, warnings)
    }

    /// Generate the project under `output_dir`.
    ///
    /// Writes `<name>.gns3` and, for every node with configuration text,
    /// `configs/<label>_<node id>.cfg`. The output directory is created if
    /// needed. Files already written are left in place if a later write fails.
    pub fn generate(
        &self,
        topology: &Topology,
        output_dir: &Path,
        project_id: Option<Uuid>,
    ) -> ConvertResult<GenerationStats> {
        let file_stem = sanitize_file_component(&topology.name);
        self.generate_as(topology, output_dir, &file_stem, project_id)
    }

    /// Like [`generate`](Self::generate), but the project file is
    /// `<file_stem>.gns3`. The project name inside the file is unchanged.
    pub fn generate_as(
        &self,
        topology: &Topology,
        output_dir: &Path,
        file_stem: &str,
        project_id: Option<Uuid>,
    ) -> ConvertResult<GenerationStats> {
        info!("Generating GNS3 project in {}", output_dir.display());
        std::fs::create_dir_all(output_dir)
            .map_err(|e| ConvertError::generation_io(output_dir, e))?;

        let (project, node_map, warnings) = self.build(topology, project_id);

        for node in topology.nodes.values().filter(|n| !n.configuration.is_empty()) {
            if let Some(generated_id) = node_map.get(&node.id) {
                let config_file = write_config(output_dir, &node.label, *generated_id, &node.configuration)?;
                debug!("Saved configuration for node {} to {}", node.id, config_file.display());
            }
        }

        let project_file = output_dir.join(format!(
            "{}.{}",
            sanitize_file_component(file_stem),
            PROJECT_EXTENSION
        ));
        let json = serde_json::to_string_pretty(&project)?;
        std::fs::write(&project_file, json)
            .map_err(|e| ConvertError::generation_io(&project_file, e))?;
        info!("Created GNS3 project file: {}", project_file.display());

        Ok(GenerationStats {
            project_file,
            node_count: project.node_count(),
            link_count: project.link_count(),
            warnings,
        })
    }
}

fn write_config(
    output_dir: &Path,
    label: &str,
    node_id: Uuid,
    configuration: &str,
) -> ConvertResult<PathBuf> {
    let config_dir = output_dir.join(CONFIG_DIR);
    std::fs::create_dir_all(&config_dir).map_err(|e| ConvertError::generation_io(&config_dir, e))?;

    let config_file = config_dir.join(format!("{}_{}.cfg", sanitize_file_component(label), node_id));
    std::fs::write(&config_file, configuration)
        .map_err(|e| ConvertError::generation_io(&config_file, e))?;
    Ok(config_file)
}

/// Make a name safe to use as a single path component
pub fn sanitize_file_component(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{map_nodes, MappingTable};
    use crate::topology::{Dialect, Link, Node};
    use std::collections::HashSet;

    fn mapped_lab() -> Topology {
        let mut topo = Topology::new(Dialect::Cml, "branch lab");
        topo.add_node(
            Node::new("r1")
                .with_label("edge/router")
                .with_type("iosv")
                .with_position(10.9, -3.7)
                .with_configuration("hostname r1\n"),
        );
        topo.add_node(Node::new("h1").with_type("linux"));
        topo.add_link(Link::new(
            "l0",
            ("r1", Some("GigabitEthernet0/1".into())),
            ("h1", Some("eth5".into())),
        ));
        map_nodes(&mut topo, MappingTable::builtin());
        topo
    }

    #[test]
    fn build_assigns_fresh_distinct_ids() {
        let topo = mapped_lab();
        let (project, node_map, warnings) = Gns3Generator::new().build(&topo, None);
        assert!(warnings.is_empty());
        assert_eq!(project.node_count(), 2);

        let ids: HashSet<String> = project.topology.nodes.iter().map(|n| n.id.to_string()).collect();
        assert_eq!(ids.len(), 2);
        for source_id in topo.nodes.keys() {
            assert!(!ids.contains(source_id));
            assert!(node_map.contains_key(source_id));
        }
    }

    #[test]
    fn build_wires_ports_and_positions() {
        let topo = mapped_lab();
        let project_id = Uuid::new_v4();
        let (project, node_map, _) = Gns3Generator::new().build(&topo, Some(project_id));
        assert_eq!(project.project_id, project_id);
        assert_eq!(project.name, "branch lab");

        let r1 = project.topology.nodes.iter().find(|n| n.id == node_map["r1"]).unwrap();
        assert_eq!(r1.name, "edge/router");
        assert_eq!(r1.node_type, "Cisco IOSv");
        assert_eq!((r1.x, r1.y), (10, -3));

        let link = &project.topology.links[0];
        assert_eq!(link.nodes[0].node_id, node_map["r1"]);
        assert_eq!(link.nodes[0].port_number, 1);
        assert_eq!(link.nodes[1].node_id, node_map["h1"]);
        assert_eq!(link.nodes[1].port_number, 5);
    }

    #[test]
    fn unresolved_links_are_skipped_with_warning() {
        let mut topo = mapped_lab();
        topo.add_link(Link::new("l1", ("r1", None), ("gone", None)));
        let (project, _, warnings) = Gns3Generator::new().build(&topo, None);
        assert_eq!(project.link_count(), 1);
        assert_eq!(
            warnings,
            vec![ConversionWarning::DanglingLink {
                link_id: "l1".to_string(),
                node_id: "gone".to_string(),
            }]
        );
    }

    #[test]
    fn unmapped_nodes_use_fallbacks() {
        let mut topo = Topology::new(Dialect::Virl, "raw");
        topo.add_node(Node::new("x"));
        let (project, _, _) = Gns3Generator::new().build(&topo, None);
        assert_eq!(project.topology.nodes[0].node_type, FALLBACK_TEMPLATE);
        assert_eq!(project.topology.nodes[0].console_type, FALLBACK_CONSOLE);
    }

    #[test]
    fn generate_writes_project_and_configs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let stats = Gns3Generator::new().generate(&mapped_lab(), &out, None).unwrap();

        assert_eq!(stats.project_file, out.join("branch lab.gns3"));
        assert_eq!((stats.node_count, stats.link_count), (2, 1));

        let configs: Vec<_> = std::fs::read_dir(out.join(CONFIG_DIR))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(configs.len(), 1, "only nodes with configuration get a file");
        assert!(configs[0].starts_with("edge_router_"));
        assert!(configs[0].ends_with(".cfg"));

        let written = std::fs::read_to_string(&stats.project_file).unwrap();
        let project: Project = serde_json::from_str(&written).unwrap();
        assert_eq!(project.node_count(), 2);
        assert!(written.contains("\n  \"name\": \"branch lab\""));
    }

    #[test]
    fn generate_as_picks_the_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let stats = Gns3Generator::new()
            .generate_as(&mapped_lab(), dir.path(), "branch lab_b", None)
            .unwrap();
        assert_eq!(stats.project_file, dir.path().join("branch lab_b.gns3"));

        let project: Project =
            serde_json::from_str(&std::fs::read_to_string(&stats.project_file).unwrap()).unwrap();
        assert_eq!(project.name, "branch lab");
    }

    #[test]
    fn no_config_dir_without_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let mut topo = Topology::new(Dialect::Cml, "bare");
        topo.add_node(Node::new("h1").with_type("linux"));
        Gns3Generator::new().generate(&topo, dir.path(), None).unwrap();
        assert!(!dir.path().join(CONFIG_DIR).exists());
    }

    #[test]
    fn unwritable_output_is_generation_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let err = Gns3Generator::new()
            .generate(&mapped_lab(), &blocker.join("out"), None)
            .unwrap_err();
        assert!(matches!(err, ConvertError::GenerationIo { .. }));
    }

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_file_component("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_file_component("core-sw 1.2_x"), "core-sw 1.2_x");
    }
}

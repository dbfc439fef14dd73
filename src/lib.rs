//! NetBridge: CML/VIRL to GNS3 topology conversion
//!
//! Converts lab topologies written for Cisco Modeling Labs (YAML) or VIRL
//! (XML) into GNS3 project files.
//!
//! # Pipeline
//!
//! - **Detect**: sniff the start of the file to pick a dialect
//! - **Parse**: read the dialect into a [`Topology`]
//! - **Validate**: require nodes and resolvable link endpoints
//! - **Map**: bind each node type to a GNS3 template via a [`MappingTable`]
//! - **Generate**: write the `.gns3` project and per-node config files
//!
//! # Example
//!
//! ```no_run
//! use netbridge::{Converter, MappingTable};
//! use std::path::Path;
//!
//! let converter = Converter::new(MappingTable::builtin().clone());
//! let report = converter.convert(Path::new("lab.yaml"), Path::new("out")).unwrap();
//! println!("{} nodes, {} links", report.stats.node_count, report.stats.link_count);
//! ```

mod converter;
pub mod detect;
mod error;
pub mod gns3;
pub mod mapping;
pub mod parser;
pub mod topology;

pub use converter::{ConversionReport, Converter};
pub use detect::detect_format;
pub use error::{ConversionWarning, ConvertError, ConvertResult, MappingFileError, SourceError};
pub use gns3::{GenerationStats, Gns3Generator, Project};
pub use mapping::{map_nodes, MappingTable, NodeMapping};
pub use parser::{CmlParser, TopologyParser, VirlParser};
pub use topology::{validate_topology, Dialect, InterfaceRef, Link, Node, Topology};

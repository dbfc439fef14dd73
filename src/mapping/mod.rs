//! Vendor node type → GNS3 template mapping

mod mapper;
mod table;

pub use mapper::map_nodes;
pub use table::{user_mapping_path, MappingTable, NodeMapping, FALLBACK_CONSOLE, FALLBACK_TEMPLATE};

//! Topology data structures shared by parsers, validator, mapper and generator

mod lab;
mod link;
mod node;
mod validate;

pub use lab::{Dialect, Topology, DEFAULT_TOPOLOGY_NAME};
pub use link::{InterfaceRef, Link};
pub use node::{Node, UNKNOWN_NODE_TYPE};
pub use validate::validate_topology;

//! GNS3 project generation

mod generator;
mod port;
mod project;

pub use generator::{sanitize_file_component, GenerationStats, Gns3Generator, CONFIG_DIR};
pub use port::port_number;
pub use project::{
    LinkEndpoint, Project, ProjectLink, ProjectNode, ProjectTopology, GNS3_VERSION,
    PROJECT_EXTENSION, SCENE_HEIGHT, SCENE_WIDTH,
};

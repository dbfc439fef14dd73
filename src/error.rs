//! Error and warning types for the conversion pipeline

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a source file could not be turned into a topology
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Structure(String),
}

/// Why a mapping file could not be loaded or saved
#[derive(Debug, Error)]
pub enum MappingFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal errors; any of these aborts the conversion of a file
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Unknown file format for {}. Must be CML or VIRL.", .0.display())]
    FormatUnrecognized(PathBuf),

    #[error("Cannot read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse {}: {source}", path.display())]
    MalformedSource {
        path: PathBuf,
        #[source]
        source: SourceError,
    },

    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    #[error("Cannot write {}: {source}", path.display())]
    GenerationIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Mapping file {}: {source}", path.display())]
    MappingFile {
        path: PathBuf,
        #[source]
        source: MappingFileError,
    },
}

impl ConvertError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, source: impl Into<SourceError>) -> Self {
        Self::MalformedSource {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn generation_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::GenerationIo {
            path: path.into(),
            source,
        }
    }
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Non-fatal conditions recorded while converting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionWarning {
    /// The node's type has no entry in the mapping table
    MappingMiss { node_id: String, node_type: String },
    /// A link endpoint has no generated node to attach to
    DanglingLink { link_id: String, node_id: String },
    /// Another file in the same batch already wrote a project under this name
    RenamedProject { name: String, file_stem: String },
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MappingMiss { node_id, node_type } => write!(
                f,
                "No mapping found for node type '{}' (node ID: {})",
                node_type, node_id
            ),
            Self::DanglingLink { link_id, node_id } => write!(
                f,
                "Skipping link {}: endpoint {} not found in node map",
                link_id, node_id
            ),
            Self::RenamedProject { name, file_stem } => write!(
                f,
                "Project name '{}' already written in this batch, saving as {}",
                name, file_stem
            ),
        }
    }
}

//! Source dialect parsers
//!
//! Each parser turns one file into a [`Topology`]. Parsers do not check
//! referential integrity; that is the validator's job.

mod cml;
mod virl;
mod xml;

pub use cml::CmlParser;
pub use virl::VirlParser;

use crate::error::{ConvertError, ConvertResult, SourceError};
use crate::topology::{Dialect, Topology};
use std::path::Path;
use tracing::{error, info};

/// The contract both dialect parsers implement.
pub trait TopologyParser {
    /// Which dialect this parser reads
    fn dialect(&self) -> Dialect;

    /// Parse source text. `fallback_name` names the topology when the
    /// source does not.
    fn parse_str(&self, content: &str, fallback_name: &str) -> Result<Topology, SourceError>;

    /// Parse a file; the file stem is the fallback name.
    fn parse(&self, path: &Path) -> ConvertResult<Topology> {
        info!("Parsing {} file: {}", self.dialect(), path.display());
        let bytes = std::fs::read(path).map_err(|source| ConvertError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|source| {
            error!("{} is not UTF-8 encoded", path.display());
            ConvertError::malformed(path, source)
        })?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let topology = self.parse_str(&content, &stem).map_err(|source| {
            error!("Error parsing {} file {}: {}", self.dialect(), path.display(), source);
            ConvertError::malformed(path, source)
        })?;

        info!(
            nodes = topology.node_count(),
            links = topology.link_count(),
            "Successfully parsed {}",
            path.display()
        );
        Ok(topology)
    }
}

/// Parser for a detected dialect
pub fn parser_for(dialect: Dialect) -> Box<dyn TopologyParser> {
    match dialect {
        Dialect::Cml => Box::new(CmlParser),
        Dialect::Virl => Box::new(VirlParser),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_utf8_source_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin.virl");
        let mut content = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<topology><node name=\"caf".to_vec();
        content.extend_from_slice(&[0xE9, b'"', b'/', b'>']);
        content.extend_from_slice(b"</topology>");
        std::fs::write(&path, content).unwrap();

        let err = VirlParser.parse(&path).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MalformedSource {
                source: SourceError::Encoding(_),
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CmlParser.parse(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConvertError::ReadInput { .. }));
    }

    #[test]
    fn file_stem_names_unnamed_topologies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edge-lab.virl");
        std::fs::write(&path, "<topology><node name=\"r1\"/></topology>").unwrap();
        let topology = parser_for(Dialect::Virl).parse(&path).unwrap();
        assert_eq!(topology.name, "edge-lab");
    }
}

//! Source format detection
//!
//! Classification is a substring heuristic over the start of the file, not a
//! schema check. Tests run in a fixed order: YAML key tokens first, then XML
//! root tags. An XML file whose first characters happen to contain
//! `topology:` or `nodes:` (in a comment, say) is reported as CML. This is a
//! known limitation.

use crate::error::{ConvertError, ConvertResult};
use crate::topology::Dialect;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{error, info};

/// Number of characters inspected
pub const SNIFF_CHARS: usize = 1000;

const CML_MARKERS: [&str; 2] = ["topology:", "nodes:"];
const VIRL_MARKERS: [&str; 2] = ["<topology", "<lab"];

/// Classify the contents of `path`
pub fn detect_format(path: &Path) -> ConvertResult<Dialect> {
    let read_err = |source| ConvertError::ReadInput {
        path: path.to_path_buf(),
        source,
    };
    let mut bytes = Vec::new();
    File::open(path)
        .map_err(read_err)?
        // a char is at most four bytes
        .take((SNIFF_CHARS * 4) as u64)
        .read_to_end(&mut bytes)
        .map_err(read_err)?;

    let text = String::from_utf8_lossy(&bytes);
    match sniff(&text) {
        Some(dialect) => {
            info!("Detected {} format for {}", dialect, path.display());
            Ok(dialect)
        }
        None => {
            error!("Could not determine file type for {}", path.display());
            Err(ConvertError::FormatUnrecognized(path.to_path_buf()))
        }
    }
}

/// Classify a text prefix; only the first [`SNIFF_CHARS`] characters count
pub fn sniff(text: &str) -> Option<Dialect> {
    let prefix = match text.char_indices().nth(SNIFF_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    };

    if CML_MARKERS.iter().any(|m| prefix.contains(m)) {
        Some(Dialect::Cml)
    } else if VIRL_MARKERS.iter().any(|m| prefix.contains(m)) {
        Some(Dialect::Virl)
    } else {
        None
    }
}

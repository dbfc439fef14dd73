//! Converter: runs the detect → parse → validate → map → generate pipeline

use crate::detect::detect_format;
use crate::error::{ConversionWarning, ConvertResult};
use crate::gns3::{sanitize_file_component, GenerationStats, Gns3Generator};
use crate::mapping::{map_nodes, MappingTable};
use crate::parser::parser_for;
use crate::topology::{validate_topology, Dialect};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome of converting one file
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub dialect: Dialect,
    pub stats: GenerationStats,
    /// Every non-fatal condition met along the way, mapping misses first
    pub warnings: Vec<ConversionWarning>,
}

/// Converts CML/VIRL files into GNS3 projects
///
/// Each converter owns its mapping table, so converters built from the same
/// base table never affect each other.
#[derive(Debug, Clone)]
pub struct Converter {
    mappings: MappingTable,
    generator: Gns3Generator,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(MappingTable::builtin().clone())
    }
}

impl Converter {
    pub fn new(mappings: MappingTable) -> Self {
        Self {
            mappings,
            generator: Gns3Generator::new(),
        }
    }

    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    /// Convert one file, writing the project into `output_dir`
    pub fn convert(&self, input: &Path, output_dir: &Path) -> ConvertResult<ConversionReport> {
        self.convert_with_id(input, output_dir, None)
    }

    /// Like [`convert`](Self::convert) with a caller-chosen project id
    pub fn convert_with_id(
        &self,
        input: &Path,
        output_dir: &Path,
        project_id: Option<Uuid>,
    ) -> ConvertResult<ConversionReport> {
        self.convert_into(input, output_dir, project_id, &mut HashSet::new())
    }

    /// Convert several files into the same output directory.
    ///
    /// Files are independent: a failure is reported for that file and the
    /// remaining files are still converted. Results keep input order. When a
    /// topology name was already written by an earlier file, the project file
    /// becomes `<name>_<input stem>.gns3` and a warning is recorded.
    pub fn convert_batch<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        output_dir: &Path,
    ) -> Vec<(PathBuf, ConvertResult<ConversionReport>)> {
        let mut claimed = HashSet::new();
        inputs
            .iter()
            .map(|input| {
                let input = input.as_ref();
                let result = self.convert_into(input, output_dir, None, &mut claimed);
                (input.to_path_buf(), result)
            })
            .collect()
    }

    /// `claimed` holds the project file stems already used in this run
    fn convert_into(
        &self,
        input: &Path,
        output_dir: &Path,
        project_id: Option<Uuid>,
        claimed: &mut HashSet<String>,
    ) -> ConvertResult<ConversionReport> {
        info!(
            "Starting conversion of {} to {}",
            input.display(),
            output_dir.display()
        );

        let dialect = detect_format(input)?;
        let mut topology = parser_for(dialect).parse(input)?;
        validate_topology(&mut topology)?;

        let mut warnings = map_nodes(&mut topology, &self.mappings);

        let file_stem = unclaimed_stem(&topology.name, input, claimed);
        if file_stem != sanitize_file_component(&topology.name) {
            let renamed = ConversionWarning::RenamedProject {
                name: topology.name.clone(),
                file_stem: file_stem.clone(),
            };
            warn!("{}", renamed);
            warnings.push(renamed);
        }
        claimed.insert(file_stem.clone());

        let stats = self
            .generator
            .generate_as(&topology, output_dir, &file_stem, project_id)?;
        warnings.extend(stats.warnings.iter().cloned());

        info!(
            "Conversion complete. Created {} nodes and {} links",
            stats.node_count, stats.link_count
        );
        Ok(ConversionReport {
            input: input.to_path_buf(),
            dialect,
            stats,
            warnings,
        })
    }
}

/// The sanitized topology name, or `<name>_<input stem>` (then a numeric
/// suffix) if that is already taken
fn unclaimed_stem(name: &str, input: &Path, claimed: &HashSet<String>) -> String {
    let base = sanitize_file_component(name);
    if !claimed.contains(&base) {
        return base;
    }

    let input_stem = input
        .file_stem()
        .map(|s| sanitize_file_component(&s.to_string_lossy()))
        .unwrap_or_default();
    let preferred = format!("{}_{}", base, input_stem);
    if !claimed.contains(&preferred) {
        return preferred;
    }
    (2usize..)
        .map(|n| format!("{}_{}", preferred, n))
        .find(|candidate| !claimed.contains(candidate))
        .unwrap_or(preferred)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::mapping::NodeMapping;

    const LAB: &str = "topology:\n  name: pair\n  nodes:\n    r1:\n      node_definition: iosv\n    r2:\n      node_definition: vyos\n  links:\n    l0:\n      node_a: r1\n      interface_a: Gi0/2\n      node_b: r2\n      interface_b: eth3\n";

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn convert_reports_stats_and_mapping_misses() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "pair.yaml", LAB);
        let report = Converter::default().convert(&input, &dir.path().join("out")).unwrap();

        assert_eq!(report.dialect, Dialect::Cml);
        assert_eq!(report.stats.node_count, 2);
        assert_eq!(report.stats.link_count, 1);
        assert_eq!(report.stats.project_file, dir.path().join("out").join("pair.gns3"));
        assert_eq!(
            report.warnings,
            vec![ConversionWarning::MappingMiss {
                node_id: "r2".to_string(),
                node_type: "vyos".to_string(),
            }]
        );
    }

    #[test]
    fn converter_tables_are_independent() {
        let base = MappingTable::builtin().clone();
        let mut extra = MappingTable::new();
        extra.insert("vyos", NodeMapping::new("VyOS", "telnet"));

        let plain = Converter::new(base.clone());
        let extended = Converter::new(base.merged(&extra));
        assert!(plain.mappings().get("vyos").is_none());
        assert!(extended.mappings().get("vyos").is_some());

        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "pair.yaml", LAB);
        let report = extended.convert(&input, &dir.path().join("out")).unwrap();
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn caller_supplied_project_id_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "pair.yaml", LAB);
        let id = Uuid::new_v4();
        let report = Converter::default()
            .convert_with_id(&input, dir.path(), Some(id))
            .unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report.stats.project_file).unwrap())
                .unwrap();
        assert_eq!(written["project_id"], id.to_string());
    }

    #[test]
    fn batch_keeps_projects_with_the_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.yaml", LAB);
        let b = write(dir.path(), "b.yaml", LAB);
        let out = dir.path().join("out");

        let results = Converter::default().convert_batch(&[&a, &b], &out);
        let first = results[0].1.as_ref().unwrap();
        let second = results[1].1.as_ref().unwrap();
        assert_eq!(first.stats.project_file, out.join("pair.gns3"));
        assert_eq!(second.stats.project_file, out.join("pair_b.gns3"));
        assert!(second.warnings.contains(&ConversionWarning::RenamedProject {
            name: "pair".to_string(),
            file_stem: "pair_b".to_string(),
        }));

        let mut written: Vec<String> = std::fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        written.sort();
        assert_eq!(written, vec!["pair.gns3", "pair_b.gns3"]);
    }

    #[test]
    fn same_stem_inputs_get_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("one");
        let second = dir.path().join("two");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        let inputs = [
            write(dir.path(), "pair.yaml", LAB),
            write(&first, "pair.yaml", LAB),
            write(&second, "pair.yaml", LAB),
        ];
        let out = dir.path().join("out");

        let files: Vec<PathBuf> = Converter::default()
            .convert_batch(&inputs, &out)
            .into_iter()
            .map(|(_, result)| result.unwrap().stats.project_file)
            .collect();
        assert_eq!(
            files,
            vec![
                out.join("pair.gns3"),
                out.join("pair_pair.gns3"),
                out.join("pair_pair_2.gns3"),
            ]
        );
    }

    #[test]
    fn single_conversions_do_not_rename() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "pair.yaml", LAB);
        let converter = Converter::default();
        let first = converter.convert(&input, dir.path()).unwrap();
        let second = converter.convert(&input, dir.path()).unwrap();
        assert_eq!(first.stats.project_file, second.stats.project_file);
    }

    #[test]
    fn batch_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "pair.yaml", LAB);
        let bad = write(dir.path(), "notes.txt", "nothing to see");
        let empty = write(dir.path(), "empty.yaml", "topology:\n  name: empty\n  nodes: {}\n");

        let results = Converter::default().convert_batch(&[&bad, &good, &empty], &dir.path().join("out"));
        assert_eq!(results.len(), 3);
        assert!(matches!(results[0].1, Err(ConvertError::FormatUnrecognized(_))));
        assert!(results[1].1.is_ok());
        assert!(matches!(results[2].1, Err(ConvertError::InvalidTopology(_))));
        assert_eq!(results[1].0, good);
    }
}

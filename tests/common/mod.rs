//! Shared helpers for the conversion integration tests

#![allow(dead_code)]

use serde_json::Value;
use std::path::{Path, PathBuf};

/// Path of a file under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Write `content` to `dir/name` and return the path
pub fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write test input");
    path
}

/// Parse a written project file
pub fn read_project(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read project file");
    serde_json::from_str(&text).expect("project file is JSON")
}

/// Replace every generated identifier with a stable placeholder.
///
/// Node ids are numbered by first appearance so link references stay
/// comparable between runs.
pub fn normalize_ids(project: &Value) -> Value {
    let mut project = project.clone();
    project["project_id"] = Value::from("<project>");

    let mut node_ids = Vec::new();
    if let Some(nodes) = project["topology"]["nodes"].as_array_mut() {
        for (i, node) in nodes.iter_mut().enumerate() {
            node_ids.push(node["id"].as_str().unwrap_or_default().to_string());
            node["id"] = Value::from(format!("<node-{}>", i));
        }
    }
    if let Some(links) = project["topology"]["links"].as_array_mut() {
        for link in links.iter_mut() {
            link["id"] = Value::from("<link>");
            if let Some(ends) = link["nodes"].as_array_mut() {
                for end in ends.iter_mut() {
                    let id = end["node_id"].as_str().unwrap_or_default();
                    let index = node_ids.iter().position(|n| n == id);
                    end["node_id"] = Value::from(format!("<node-{:?}>", index));
                }
            }
        }
    }
    project
}

/// Node entry with the given name
pub fn node_named<'a>(project: &'a Value, name: &str) -> &'a Value {
    project["topology"]["nodes"]
        .as_array()
        .and_then(|nodes| nodes.iter().find(|n| n["name"] == name))
        .unwrap_or_else(|| panic!("no node named {}", name))
}

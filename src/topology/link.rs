//! Point-to-point links between node interfaces

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a link endpoint names its interface
///
/// Sources usually give a name (`GigabitEthernet0/1`) but YAML labs may
/// also give a bare slot number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterfaceRef {
    Index(i64),
    Fractional(f64),
    Name(String),
}

impl fmt::Display for InterfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{}", i),
            Self::Fractional(v) => write!(f, "{}", v),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for InterfaceRef {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for InterfaceRef {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<i64> for InterfaceRef {
    fn from(i: i64) -> Self {
        Self::Index(i)
    }
}

/// A link joining two (node, interface) endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: String,
    pub node1_id: String,
    pub interface1: Option<InterfaceRef>,
    pub node2_id: String,
    pub interface2: Option<InterfaceRef>,
}

impl Link {
    pub fn new(
        id: impl Into<String>,
        (node1_id, interface1): (impl Into<String>, Option<InterfaceRef>),
        (node2_id, interface2): (impl Into<String>, Option<InterfaceRef>),
    ) -> Self {
        Self {
            id: id.into(),
            node1_id: node1_id.into(),
            interface1,
            node2_id: node2_id.into(),
            interface2,
        }
    }

    /// Both endpoint node ids, first endpoint first
    pub fn endpoints(&self) -> [&str; 2] {
        [&self.node1_id, &self.node2_id]
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let iface = |i: &Option<InterfaceRef>| i.as_ref().map(|i| i.to_string()).unwrap_or_default();
        write!(
            f,
            "{} ({}:{} <-> {}:{})",
            self.id,
            self.node1_id,
            iface(&self.interface1),
            self.node2_id,
            iface(&self.interface2)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_ref_deserializes_numbers_and_names() {
        let refs: Vec<InterfaceRef> = serde_json::from_str(r#"[3, 1.5, "eth0"]"#).unwrap();
        assert_eq!(
            refs,
            vec![
                InterfaceRef::Index(3),
                InterfaceRef::Fractional(1.5),
                InterfaceRef::Name("eth0".to_string()),
            ]
        );
    }

    #[test]
    fn display_shows_both_endpoints() {
        let link = Link::new("l0", ("r1", Some("eth0".into())), ("r2", None));
        assert_eq!(link.to_string(), "l0 (r1:eth0 <-> r2:)");
    }
}

//! Interface name → GNS3 port number

use crate::topology::InterfaceRef;
use regex_lite::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Trailing `N` or `N/M` of an interface name
static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)/?(\d+)?$").expect("trailing number pattern compiles"));

/// Port number for an interface reference.
///
/// Numbers are used as-is (fractions truncated). Names use their trailing
/// number, preferring the part after a slash: `GigabitEthernet0/1` → 1,
/// `eth5` → 5. Missing interfaces and names without digits give 0. Numbers
/// too large for `i64` saturate to `i64::MAX`.
pub fn port_number(interface: Option<&InterfaceRef>) -> i64 {
    match interface {
        None => 0,
        Some(InterfaceRef::Index(i)) => *i,
        Some(InterfaceRef::Fractional(v)) => v.trunc() as i64,
        Some(InterfaceRef::Name(name)) => port_from_name(name),
    }
}

fn port_from_name(name: &str) -> i64 {
    TRAILING_NUMBER
        .captures(name)
        .and_then(|caps| caps.get(2).or_else(|| caps.get(1)))
        .map(|m| {
            // The match is all digits, so parsing only fails on overflow.
            m.as_str().parse().unwrap_or_else(|_| {
                debug!("Port number in '{}' exceeds i64, saturating", name);
                i64::MAX
            })
        })
        .unwrap_or(0)
}

//! Indexed host container providing O(1) lookup by ID.
//!
//! [`Hosts`] holds the flattened catalog and hands out a [`HostId`] per
//! entry, which front ends use as menu item IDs or list indices.

use crate::flatten::flatten;
use crate::host::Host;
use crate::types::Catalog;
use std::fmt;

/// Unique identifier for a host within a [`Hosts`] container.
///
/// # Display Format
///
/// Formats as `"host_{index}"` for use as menu item IDs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HostId(usize);

impl HostId {
    const PREFIX: &'static str = "host_";

    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }

    /// Parses the display form back into an ID.
    ///
    /// Returns `None` for anything that is not `host_{index}`, such as the
    /// IDs of fixed menu items.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        s.strip_prefix(Self::PREFIX)?.parse().ok().map(Self)
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// Flattened hosts in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Hosts {
    hosts: Vec<Host>,
}

impl Hosts {
    /// Flattens the catalog, assigning IDs in pre-order.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            hosts: flatten(catalog),
        }
    }

    /// O(1) lookup by ID.
    #[must_use]
    pub fn get(&self, id: HostId) -> Option<&Host> {
        self.hosts.get(id.0)
    }

    /// Iterate all hosts with their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (HostId, &Host)> + '_ {
        self.hosts
            .iter()
            .enumerate()
            .map(|(i, host)| (HostId::from_index(i), host))
    }

    /// Hosts matching `query`, see [`Host::matches`].
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = (HostId, &'a Host)> {
        self.iter().filter(move |(_, host)| host.matches(query))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl From<Vec<Host>> for Hosts {
    fn from(hosts: Vec<Host>) -> Self {
        Self { hosts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        serde_json::from_str(
            r#"[
                {"name": "Deploy", "cmd": "deploy.sh"},
                {"Servers": [
                    {"name": "Prod", "cmd": "ssh ops@prod # p4ss"},
                    {"name": "Stage", "cmd": "ssh ops@stage"}
                ]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_by_id() {
        let hosts = Hosts::from_catalog(&catalog());

        let deploy = hosts.get(HostId::from_index(0)).expect("should find index 0");
        assert_eq!(deploy.name, "Deploy");

        let prod = hosts.get(HostId::from_index(1)).expect("should find index 1");
        assert_eq!(prod.name, "Prod");
        assert_eq!(prod.comment, "p4ss");
    }

    #[test]
    fn test_invalid_id_returns_none() {
        let hosts = Hosts::from_catalog(&catalog());
        assert!(hosts.get(HostId::from_index(999)).is_none());
    }

    #[test]
    fn test_iter_yields_ids_in_order() {
        let hosts = Hosts::from_catalog(&catalog());
        let ids: Vec<_> = hosts.iter().map(|(id, _)| id.index()).collect();
        assert_eq!(ids, [0, 1, 2]);
        assert_eq!(hosts.len(), 3);
    }

    #[test]
    fn test_search_keeps_ids() {
        let hosts = Hosts::from_catalog(&catalog());
        let found: Vec<_> = hosts.search("servers st").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.index(), 2);
        assert_eq!(found[0].1.name, "Stage");
    }

    #[test]
    fn test_empty_container() {
        let hosts = Hosts::default();
        assert!(hosts.is_empty());
        assert_eq!(hosts.len(), 0);
        assert!(hosts.get(HostId::from_index(0)).is_none());
    }

    #[test]
    fn test_host_id_display_and_parse() {
        let id = HostId::from_index(42);
        assert_eq!(id.to_string(), "host_42");
        assert_eq!(HostId::parse("host_42"), Some(id));
    }

    #[test]
    fn test_host_id_parse_rejects_other_ids() {
        assert_eq!(HostId::parse("quit"), None);
        assert_eq!(HostId::parse("host_"), None);
        assert_eq!(HostId::parse("host_x"), None);
    }
}

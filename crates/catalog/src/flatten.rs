use crate::host::Host;
use crate::types::{Catalog, CatalogNode};

/// Flattens the catalog into one [`Host`] per leaf.
///
/// Traversal is depth-first and pre-order. Categories and their children are
/// visited in document order, and each host's path is the chain of category
/// names above it. Flattening never fails: commands without an address simply
/// produce hosts without `ip` and `user`.
#[must_use]
pub fn flatten(catalog: &Catalog) -> Vec<Host> {
    let mut hosts = Vec::new();
    let mut path = Vec::new();
    visit(catalog.nodes(), &mut path, &mut hosts);

    log::debug!("flattened catalog into {} hosts", hosts.len());
    hosts
}

fn visit(nodes: &[CatalogNode], path: &mut Vec<String>, hosts: &mut Vec<Host>) {
    for node in nodes {
        match node {
            CatalogNode::Leaf(leaf) => hosts.push(Host::from_leaf(path.clone(), leaf)),
            CatalogNode::Group(categories) => {
                for category in categories {
                    path.push(category.name.clone());
                    visit(&category.children, path, hosts);
                    path.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Leaf};

    fn leaf(name: &str, cmd: &str) -> CatalogNode {
        CatalogNode::Leaf(Leaf {
            name: name.into(),
            cmd: cmd.into(),
        })
    }

    fn group(categories: Vec<(&str, Vec<CatalogNode>)>) -> CatalogNode {
        CatalogNode::Group(
            categories
                .into_iter()
                .map(|(name, children)| Category {
                    name: name.into(),
                    children,
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_catalog() {
        assert!(flatten(&Catalog::default()).is_empty());
    }

    #[test]
    fn test_pre_order_with_paths() {
        let catalog = Catalog::new(vec![
            leaf("Root", "ssh r@root"),
            group(vec![
                (
                    "Prod",
                    vec![
                        leaf("Web", "ssh w@web"),
                        group(vec![("EU", vec![leaf("Db", "ssh d@db")])]),
                        leaf("Cache", "ssh c@cache"),
                    ],
                ),
                ("Dev", vec![leaf("Box", "ssh b@box")]),
            ]),
            leaf("Last", "ssh l@last"),
        ]);

        let hosts = flatten(&catalog);
        let flat: Vec<_> = hosts
            .iter()
            .map(|h| (h.path.join("/"), h.name.as_str()))
            .collect();

        assert_eq!(
            flat,
            [
                (String::new(), "Root"),
                ("Prod".to_string(), "Web"),
                ("Prod/EU".to_string(), "Db"),
                ("Prod".to_string(), "Cache"),
                ("Dev".to_string(), "Box"),
                (String::new(), "Last"),
            ]
        );
    }

    #[test]
    fn test_one_host_per_leaf_from_json() {
        let catalog: Catalog = serde_json::from_str(
            r#"[
                {"Production": [
                    {"name": "Web 1", "cmd": "ssh root@10.0.0.1 # hunter2"},
                    {"name": "Web 2", "cmd": "ssh root@10.0.0.2"}
                ]},
                {"Staging": [
                    {"Databases": [
                        {"name": "Primary", "cmd": "ssh pg@db.staging"}
                    ]}
                ]}
            ]"#,
        )
        .unwrap();

        let hosts = flatten(&catalog);
        assert_eq!(hosts.len(), 3);

        assert_eq!(hosts[0].path, ["Production"]);
        assert_eq!(hosts[0].comment, "hunter2");
        assert_eq!(hosts[1].ip.as_deref(), Some("10.0.0.2"));
        assert_eq!(hosts[2].path, ["Staging", "Databases"]);
        assert_eq!(hosts[2].user.as_deref(), Some("pg"));
    }

    #[test]
    fn test_unparseable_command_does_not_stop_flatten() {
        let catalog = Catalog::new(vec![
            leaf("Local", "echo hello"),
            leaf("Remote", "ssh me@remote"),
        ]);

        let hosts = flatten(&catalog);
        assert_eq!(hosts.len(), 2);
        assert!(hosts[0].ip.is_none());
        assert_eq!(hosts[1].ip.as_deref(), Some("remote"));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let catalog: Catalog = serde_json::from_str(
            r#"[
                {"name": "No command"},
                "stray",
                {"Group": "not a list"},
                {"Group": [{"name": "Ok", "cmd": "ssh a@b"}]}
            ]"#,
        )
        .unwrap();

        let hosts = flatten(&catalog);
        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts[0].title(), "Group / Ok");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let catalog = Catalog::new(vec![leaf("Same", "ssh a@b"), leaf("Same", "ssh a@b")]);
        let hosts = flatten(&catalog);
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0], hosts[1]);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let catalog = Catalog::new(vec![group(vec![(
            "A",
            vec![leaf("One", "ssh u@one # c"), leaf("Two", "echo two")],
        )])]);

        assert_eq!(flatten(&catalog), flatten(&catalog));
    }
}

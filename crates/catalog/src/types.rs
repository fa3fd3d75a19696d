//! Catalog tree as declared under the `hosts` key of the config document.
//!
//! Deserialization is lenient: anything that is not an array of nodes is
//! read as an empty group, so a partial or malformed catalog yields fewer
//! hosts instead of an error.

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// A launchable entry with a display name and a shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub name: String,
    pub cmd: String,
}

/// A named category holding nested nodes.
/// Declared in JSON as `{"Category": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub children: Vec<CatalogNode>,
}

/// A node in the catalog: either a leaf or a group of categories.
///
/// An object with a non-empty string `name` and a non-empty string `cmd` is a
/// leaf, and any other keys on it are ignored. Every other object is a group
/// with one category per key whose value is an array, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNode {
    Leaf(Leaf),
    Group(Vec<Category>),
}

/// Root of the catalog tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    nodes: Vec<CatalogNode>,
}

impl Catalog {
    #[must_use]
    pub fn new(nodes: Vec<CatalogNode>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes in document order.
    #[must_use]
    pub fn nodes(&self) -> &[CatalogNode] {
        &self.nodes
    }
}

/// Value found under an object key while reading a node.
#[derive(Deserialize)]
#[serde(untagged)]
enum Field {
    Text(String),
    Nodes(Vec<RawNode>),
    Other(IgnoredAny),
}

/// Array items that are not objects (strings, numbers, null) become empty groups.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Object(CatalogNode),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    Nodes(Vec<RawNode>),
    Other(IgnoredAny),
}

fn into_nodes(raw: Vec<RawNode>) -> Vec<CatalogNode> {
    raw.into_iter()
        .map(|node| match node {
            RawNode::Object(node) => node,
            RawNode::Other(_) => CatalogNode::Group(Vec::new()),
        })
        .collect()
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nodes = match RawList::deserialize(deserializer)? {
            RawList::Nodes(nodes) => into_nodes(nodes),
            RawList::Other(_) => {
                log::warn!("catalog root is not an array, treating it as empty");
                Vec::new()
            }
        };
        Ok(Catalog { nodes })
    }
}

impl<'de> Deserialize<'de> for CatalogNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = CatalogNode;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a leaf with name and cmd, or a map of category names")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name = None;
                let mut cmd = None;
                let mut categories = Vec::new();

                while let Some((key, field)) = access.next_entry::<String, Field>()? {
                    match field {
                        Field::Text(text) if key == "name" => name = Some(text),
                        Field::Text(text) if key == "cmd" => cmd = Some(text),
                        Field::Nodes(children) => categories.push(Category {
                            name: key,
                            children: into_nodes(children),
                        }),
                        Field::Text(_) | Field::Other(_) => {
                            log::debug!("skipping catalog key {key:?}: value is not an array");
                        }
                    }
                }

                match (name, cmd) {
                    (Some(name), Some(cmd)) if !name.is_empty() && !cmd.is_empty() => {
                        Ok(CatalogNode::Leaf(Leaf { name, cmd }))
                    }
                    _ => Ok(CatalogNode::Group(categories)),
                }
            }
        }

        deserializer.deserialize_map(NodeVisitor)
    }
}

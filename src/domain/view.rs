//! Plain-data views handed to presentation layers.
//!
//! Both views serialize to the JSON shapes expected by force-graph and
//! hierarchy renderers: `{nodes, links}` and `{name, children}`.

use serde::{Deserialize, Serialize};
use termtree::Tree;

/// Recursive `{name, children}` view of a zone tree.
///
/// `children` is always present, empty at leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeView {
    pub name: String,
    pub children: Vec<TreeView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// Node/edge view of the city network; every undirected edge appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Conversion into a printable text tree.
pub trait TreeViewConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeViewConvert for TreeView {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|child| child.to_tree_string())
            .collect();
        Tree::new(self.name.clone()).with_leaves(leaves)
    }
}

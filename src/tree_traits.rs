//! Conversion into `termtree` for box-drawing output.
use std::fmt;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::node::NodeRef;
use crate::tree::Tree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<T: fmt::Display> TreeNodeConvert for NodeRef<T> {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> TermTree<String> {
        let label = self
            .with_value(|v| v.to_string())
            .unwrap_or_else(|| crate::node::NULL_MARKER.to_string());

        // Tombstones are not part of the structure, leave them out
        let leaves: Vec<_> = self
            .live_children()
            .iter()
            .map(|c| c.to_tree_string())
            .collect();

        TermTree::new(label).with_leaves(leaves)
    }
}

impl<T: fmt::Display> TreeNodeConvert for Tree<T> {
    fn to_tree_string(&self) -> TermTree<String> {
        match self.root() {
            Some(root) => root.to_tree_string(),
            None => TermTree::new("Empty tree".to_string()),
        }
    }
}

//! Generic, ordered, rooted multi-way tree.
//!
//! Nodes are built with [`Tree::create_root`] and [`NodeRef::add_child`],
//! removed with [`Tree::delete_subtree`], tombstones are swept with
//! [`Tree::compress`], and [`render`] draws the tree as a vertical diagram.
//!
//! ```
//! use gentree::Tree;
//!
//! let mut tree = Tree::new();
//! let a = tree.create_root("A").unwrap();
//! let b = a.add_child("B").unwrap();
//! a.add_child("C").unwrap();
//! tree.delete_subtree(&b).unwrap();
//! tree.compress().unwrap();
//! assert_eq!(gentree::render(&tree), "A\n|\n|_ C\n");
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod node;
pub mod render;
pub mod tree;
pub mod tree_traits;
pub mod util;

pub use errors::{TreeError, TreeResult};
pub use node::NodeRef;
pub use render::{render, EMPTY_TREE_MARKER};
pub use tree::Tree;

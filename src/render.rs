//! Vertical text diagram of a tree.
//!
//! ```text
//! A
//! |
//! |_ B
//! |  |
//! |  |_ E
//! |
//! |_ C
//! ```
//!
//! Each node gets two margin rows. A column keeps its `|` while a later
//! sibling at that level is still to be printed below.

use std::fmt;
use std::io;
use std::rc::Rc;

use tracing::debug;

use crate::node::{describe, Link};
use crate::tree::Tree;

/// Printed in place of a diagram when the tree has no root.
pub const EMPTY_TREE_MARKER: &str = "[empty tree]";

const LAST_ROW: usize = 2;

struct Frame<T> {
    node: Option<Link<T>>,
    depth: usize,
    /// One flag per ancestor level: draw a stem in this node's margin
    margin: Vec<bool>,
    /// Flags inherited by this node's children
    trailing: Vec<bool>,
}

/// Writes the diagram (or, with debug messages on, the `Depth: Data:` listing).
pub fn write_tree<T: fmt::Display, W: fmt::Write>(tree: &Tree<T>, out: &mut W) -> fmt::Result {
    let Some(root) = tree.root_link() else {
        return writeln!(out, "{}", EMPTY_TREE_MARKER);
    };

    let mut to_explore = vec![Frame {
        node: Some(Rc::clone(root)),
        depth: 0,
        margin: Vec::new(),
        trailing: Vec::new(),
    }];

    while let Some(Frame {
        node,
        depth,
        margin,
        trailing,
    }) = to_explore.pop()
    {
        let label = describe(node.as_ref());
        if tree.debug_messages() {
            debug!(depth, data = %label, "Visiting node");
            writeln!(out, "Depth: {} Data: {}", depth, label)?;
        } else {
            write_margin(out, &margin)?;
            writeln!(out, "{}", label)?;
        }

        let Some(node) = node else {
            continue;
        };
        let node = node.borrow();
        let rightmost = node.children.len().saturating_sub(1);
        // Reverse push so the leftmost child is printed next.
        for (i, child) in node.children.iter().enumerate().rev() {
            let mut child_margin = trailing.clone();
            child_margin.push(true);
            // The rightmost child is drawn lowest, nothing trails below it.
            let mut child_trailing = trailing.clone();
            child_trailing.push(i != rightmost);
            to_explore.push(Frame {
                node: child.clone(),
                depth: depth + 1,
                margin: child_margin,
                trailing: child_trailing,
            });
        }
    }
    Ok(())
}

fn write_margin<W: fmt::Write>(out: &mut W, margin: &[bool]) -> fmt::Result {
    for row in 1..=LAST_ROW {
        for (col, &show_stem) in margin.iter().enumerate() {
            let stem = if show_stem { "|" } else { " " };
            let is_last_col = col + 1 == margin.len();
            if !is_last_col {
                write!(out, "{}  ", stem)?;
            } else if row == LAST_ROW {
                write!(out, "{}_ ", stem)?;
            } else if show_stem {
                writeln!(out, "{}", stem)?;
            } else {
                // no trailing spaces before the newline
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Diagram as a string.
pub fn render<T: fmt::Display>(tree: &Tree<T>) -> String {
    tree.to_string()
}

impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(self, f)
    }
}

impl<T: fmt::Display> Tree<T> {
    /// Streams the diagram to `os`.
    pub fn print<W: io::Write>(&self, os: &mut W) -> io::Result<()> {
        os.write_all(render(self).as_bytes())
    }
}

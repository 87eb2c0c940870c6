//! The tree container: root ownership, subtree deletion and compaction.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, error, instrument};

use crate::config::Settings;
use crate::errors::{TreeError, TreeResult};
use crate::node::{describe, Link, Node, NodeRef, Slot};

/// Ordered, rooted multi-way tree.
///
/// The tree holds the only strong reference to its root; every node holds the
/// only strong references to its children. Dropping the tree releases every
/// node with the same enumerate-then-release pass used by
/// [`delete_subtree`](Tree::delete_subtree).
pub struct Tree<T: fmt::Display> {
    root: Option<Link<T>>,
    /// Emit `Exploring node` / `Deleting node` / `Depth` diagnostics
    debug_messages: bool,
}

impl<T: fmt::Display> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root.as_ref().map(|r| describe(Some(r))))
            .field("nodes", &self.node_count())
            .field("debug_messages", &self.debug_messages)
            .finish()
    }
}

impl<T: fmt::Display> Tree<T> {
    pub fn new() -> Self {
        Self {
            root: None,
            debug_messages: false,
        }
    }

    /// Tree with a root holding `value`.
    pub fn with_root(value: T) -> Self {
        let mut tree = Self::new();
        tree.root = Some(Node::new_link(value, Weak::new()));
        tree
    }

    /// Empty tree configured from `settings`.
    pub fn with_settings(settings: &Settings) -> Self {
        let mut tree = Self::new();
        tree.debug_messages = settings.debug_messages;
        tree
    }

    pub fn debug_messages(&self) -> bool {
        self.debug_messages
    }

    pub fn set_debug_messages(&mut self, enabled: bool) {
        self.debug_messages = enabled;
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Installs a root holding `value`. Valid only on an empty tree.
    #[instrument(level = "debug", skip(self, value))]
    pub fn create_root(&mut self, value: T) -> TreeResult<NodeRef<T>> {
        if self.root.is_some() {
            let e = TreeError::AlreadyInitialized;
            error!("{}", e);
            return Err(e);
        }
        let root = Node::new_link(value, Weak::new());
        let handle = NodeRef::from_link(&root);
        self.root = Some(root);
        Ok(handle)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<NodeRef<T>> {
        self.root.as_ref().map(NodeRef::from_link)
    }

    pub(crate) fn root_link(&self) -> Option<&Link<T>> {
        self.root.as_ref()
    }

    /// True when `node` is live and its parent chain ends at this tree's root.
    pub fn owns(&self, node: &NodeRef<T>) -> bool {
        match (node.upgrade(), &self.root) {
            (Some(node), Some(root)) => Rc::ptr_eq(&terminal_ancestor(&node), root),
            _ => false,
        }
    }

    /// Removes `target` and everything below it, releasing each node exactly once.
    ///
    /// A released handle is a no-op. A node that does not trace back to this
    /// tree's root fails with [`TreeError::CrossTree`] and nothing changes.
    ///
    /// The target's slot in its parent becomes a tombstone; call
    /// [`compress`](Tree::compress) after a batch of deletions to sweep them.
    #[instrument(level = "debug", skip(self, target))]
    pub fn delete_subtree(&mut self, target: &NodeRef<T>) -> TreeResult<()> {
        let Some(target) = target.upgrade() else {
            debug!("Target handle is absent, nothing to delete");
            return Ok(());
        };

        match &self.root {
            Some(root) if Rc::ptr_eq(&terminal_ancestor(&target), root) => {}
            _ => return Err(TreeError::CrossTree),
        }

        // Phase 1: detach. The parent keeps a tombstone so siblings stay put.
        let parent = target.borrow().parent.upgrade();
        let targeting_root = parent.is_none();
        let detached = match parent {
            Some(parent) => {
                let mut parent = parent.borrow_mut();
                let slot = parent
                    .children
                    .iter_mut()
                    .find(|slot| matches!(slot, Some(c) if Rc::ptr_eq(c, &target)))
                    .ok_or_else(|| {
                        let e = TreeError::Corruption(
                            "target node to delete was not listed as a child of its parent"
                                .to_string(),
                        );
                        error!("{}", e);
                        e
                    })?;
                slot.take()
            }
            None => self.root.take(),
        };
        drop(target);
        let detached = detached.ok_or_else(|| {
            TreeError::Corruption("detached slot was already empty".to_string())
        })?;

        // Phase 2: enumerate. Children slots are moved out of each node, so the
        // release list ends up holding the only strong reference to every node
        // and nothing is dropped before the whole subtree has been read.
        let mut to_explore: Vec<Slot<T>> = vec![Some(detached)];
        let mut to_release: Vec<Link<T>> = Vec::new();
        while let Some(slot) = to_explore.pop() {
            if self.debug_messages {
                debug!("Exploring node: {}", describe(slot.as_ref()));
            }
            let Some(node) = slot else {
                continue;
            };
            let children = std::mem::take(&mut node.borrow_mut().children);
            to_explore.extend(children);
            to_release.push(node);
        }

        // Phase 3: release, last enumerated first.
        let released = to_release.len();
        while let Some(node) = to_release.pop() {
            if self.debug_messages {
                debug!("Deleting node: {}", describe(Some(&node)));
            }
            drop(node);
        }

        if targeting_root {
            self.root = None;
        }
        debug!(released, targeting_root, "Subtree deleted");
        Ok(())
    }

    /// Deletes the whole tree.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) -> TreeResult<()> {
        if let Some(root) = self.root() {
            self.delete_subtree(&root)?;
        }
        if self.root.is_some() {
            return Err(TreeError::InternalInvariant(
                "clear() detected that delete_subtree() had not reset the root".to_string(),
            ));
        }
        Ok(())
    }

    /// Sweeps tombstones breadth-first, keeping the order of live children.
    ///
    /// Live nodes are neither released nor reordered. No-op on an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn compress(&mut self) -> TreeResult<()> {
        let Some(root) = &self.root else {
            return Ok(());
        };

        let mut swept = 0usize;
        let mut to_explore: VecDeque<Weak<RefCell<Node<T>>>> = VecDeque::new();
        to_explore.push_back(Rc::downgrade(root));

        while let Some(front) = to_explore.pop_front() {
            // Only live children are ever queued.
            let link = front.upgrade().ok_or_else(|| {
                TreeError::Corruption("compression exploration queued a released node".to_string())
            })?;
            let mut node = link.borrow_mut();
            let before = node.children.len();
            let compacted: Vec<Slot<T>> = std::mem::take(&mut node.children)
                .into_iter()
                .flatten()
                .inspect(|child| to_explore.push_back(Rc::downgrade(child)))
                .map(Some)
                .collect();
            swept += before - compacted.len();
            node.children = compacted;
        }

        debug!(swept, "Tree compressed");
        Ok(())
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<Link<T>> = self.root.iter().cloned().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.borrow().children.iter().flatten().cloned());
        }
        count
    }
}

impl<T: fmt::Display> Drop for Tree<T> {
    fn drop(&mut self) {
        if let Err(e) = self.clear() {
            error!("Failed to release tree: {}", e);
        }
    }
}

/// Follows parent links up to the node that has none.
fn terminal_ancestor<T>(node: &Link<T>) -> Link<T> {
    let mut walk_back = Rc::clone(node);
    loop {
        let parent = walk_back.borrow().parent.upgrade();
        match parent {
            Some(parent) => walk_back = parent,
            None => return walk_back,
        }
    }
}

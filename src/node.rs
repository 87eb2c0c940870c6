//! Tree nodes and the handles callers use to reach them.
//!
//! Ownership runs strictly downwards: a [`Tree`](crate::Tree) holds the only
//! strong reference to its root and every node holds the only strong
//! references to its children. Parent links and caller handles are `Weak`, so
//! they never keep a node alive and never drive its release.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::instrument;

use crate::errors::{TreeError, TreeResult};

/// Strong, owning link to a node.
pub(crate) type Link<T> = Rc<RefCell<Node<T>>>;

/// One position in a children sequence. `None` is a tombstone left behind by
/// a deletion until the next compaction.
pub(crate) type Slot<T> = Option<Link<T>>;

/// Marker printed for tombstones in diagnostics and diagrams.
pub const NULL_MARKER: &str = "[null]";

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) children: Vec<Slot<T>>,
    /// Dangling for the root
    pub(crate) parent: Weak<RefCell<Node<T>>>,
}

impl<T> Node<T> {
    pub(crate) fn new_link(value: T, parent: Weak<RefCell<Node<T>>>) -> Link<T> {
        Rc::new(RefCell::new(Node {
            value,
            children: Vec::new(),
            parent,
        }))
    }
}

/// Textual form of a slot for diagnostics: the value, or [`NULL_MARKER`].
pub(crate) fn describe<T: fmt::Display>(slot: Option<&Link<T>>) -> String {
    match slot {
        Some(node) => node.borrow().value.to_string(),
        None => NULL_MARKER.to_string(),
    }
}

/// Non-owning handle to a node.
///
/// A handle stays valid as long as its node is part of a tree. Once the node
/// is released by a deletion the handle is *absent*: reads return `None`,
/// `add_child` fails, and deleting it again is a no-op.
pub struct NodeRef<T> {
    inner: Weak<RefCell<Node<T>>>,
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(node) => f
                .debug_struct("NodeRef")
                .field("value", &node.borrow().value)
                .field("children", &node.borrow().children.len())
                .finish(),
            None => f.write_str("NodeRef(<released>)"),
        }
    }
}

impl<T> NodeRef<T> {
    pub(crate) fn from_link(link: &Link<T>) -> Self {
        Self {
            inner: Rc::downgrade(link),
        }
    }

    pub(crate) fn upgrade(&self) -> Option<Link<T>> {
        self.inner.upgrade()
    }

    /// False once the node has been released.
    pub fn is_live(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Appends a new rightmost child holding `value` and returns its handle.
    ///
    /// The receiver is not checked for membership in any particular tree.
    #[instrument(level = "trace", skip(self, value))]
    pub fn add_child(&self, value: T) -> TreeResult<NodeRef<T>> {
        let parent = self.upgrade().ok_or(TreeError::ReleasedNode)?;
        let child = Node::new_link(value, Rc::downgrade(&parent));
        let handle = NodeRef::from_link(&child);
        parent.borrow_mut().children.push(Some(child));
        Ok(handle)
    }

    /// Runs `f` against the node's value.
    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.upgrade().map(|node| f(&node.borrow().value))
    }

    /// Copy of the node's value, `None` if released.
    pub fn value(&self) -> Option<T>
    where
        T: Clone,
    {
        self.with_value(T::clone)
    }

    pub fn parent(&self) -> Option<NodeRef<T>> {
        let node = self.upgrade()?;
        let parent = node.borrow().parent.upgrade()?;
        Some(NodeRef::from_link(&parent))
    }

    /// A live node without a parent.
    pub fn is_root(&self) -> bool {
        self.is_live() && self.parent().is_none()
    }

    /// Children slots in order, tombstones included as `None`.
    pub fn children(&self) -> Vec<Option<NodeRef<T>>> {
        match self.upgrade() {
            Some(node) => node
                .borrow()
                .children
                .iter()
                .map(|slot| slot.as_ref().map(NodeRef::from_link))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Children in order, tombstones skipped.
    pub fn live_children(&self) -> Vec<NodeRef<T>> {
        self.children().into_iter().flatten().collect()
    }

    /// Number of slots, tombstones included.
    pub fn slot_count(&self) -> usize {
        self.upgrade()
            .map(|node| node.borrow().children.len())
            .unwrap_or(0)
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(&self, other: &NodeRef<T>) -> bool {
        self.is_live() && Weak::ptr_eq(&self.inner, &other.inner)
    }
}

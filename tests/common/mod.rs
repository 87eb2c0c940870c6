#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use gentree::{NodeRef, Tree};

/// Value that records its label in a shared log when dropped.
pub struct Tracked {
    pub label: &'static str,
    pub released: Rc<RefCell<Vec<&'static str>>>,
}

impl fmt::Display for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.released.borrow_mut().push(self.label);
    }
}

pub fn tracked(label: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Tracked {
    Tracked {
        label,
        released: Rc::clone(log),
    }
}

/// Values of the live children of `node`, left to right.
pub fn child_values(node: &NodeRef<&'static str>) -> Vec<&'static str> {
    node.live_children()
        .iter()
        .filter_map(NodeRef::value)
        .collect()
}

/// Walks the tree and checks parent/child consistency and acyclicity.
/// Returns the number of nodes visited.
pub fn assert_invariants<T: fmt::Display>(tree: &Tree<T>) -> usize {
    let Some(root) = tree.root() else {
        return 0;
    };
    assert!(root.is_root(), "root must not have a parent");

    let mut seen: HashSet<*const ()> = HashSet::new();
    let mut stack = vec![root];
    let mut visited = 0;
    while let Some(node) = stack.pop() {
        visited += 1;
        assert!(visited <= tree.node_count(), "cycle detected");
        for child in node.live_children() {
            let parent = child.parent().expect("child without parent");
            assert!(parent.ptr_eq(&node), "child points at a different parent");
            let occurrences = node
                .live_children()
                .iter()
                .filter(|c| c.ptr_eq(&child))
                .count();
            assert_eq!(occurrences, 1, "child listed more than once");
            assert!(tree.owns(&child));
            stack.push(child);
        }
        let id = node.with_value(|v| v as *const T as *const ()).unwrap();
        assert!(seen.insert(id), "node visited twice");
    }
    assert_eq!(visited, tree.node_count());
    visited
}

pub fn init() {
    gentree::util::testing::init_test_setup();
}

struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a capturing subscriber and returns the node trace lines
/// (`Exploring node: ..` / `Deleting node: ..`) in emission order.
pub fn capture_node_trace(f: impl FnOnce()) -> Vec<String> {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let writer = Arc::clone(&buf);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_level(false)
        .with_writer(move || SharedBuf(Arc::clone(&writer)))
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let text = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
    text.lines()
        .filter_map(|line| {
            ["Exploring node: ", "Deleting node: "]
                .iter()
                .find_map(|marker| line.find(marker).map(|i| line[i..].to_string()))
        })
        .collect()
}

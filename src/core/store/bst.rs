//! Binary search tree store keyed by course id

use crate::core::models::Course;
use crate::core::store::CourseStore;
use std::cmp::Ordering;

/// A tree node owning its course and both subtrees.
#[derive(Debug)]
struct BstNode {
    course: Course,
    left: Option<Box<BstNode>>,
    right: Option<Box<BstNode>>,
}

impl BstNode {
    const fn new(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

/// Unbalanced binary search tree ordered by course id.
///
/// Search and mutation are O(height); with no rebalancing the height
/// degrades to O(n) when courses arrive in sorted order. Inserting an id
/// that is already present overwrites the stored course in place, so the
/// tree never holds two nodes with the same id.
#[derive(Debug, Default)]
pub struct BstStore {
    root: Option<Box<BstNode>>,
    len: usize,
}

impl BstStore {
    /// Create an empty tree
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Visit every course in ascending id order
    pub fn in_order(&self, mut visit: impl FnMut(&Course)) {
        Self::in_order_node(self.root.as_deref(), &mut visit);
    }

    /// Visit every course in pre-order (node before subtrees)
    pub fn pre_order(&self, mut visit: impl FnMut(&Course)) {
        Self::pre_order_node(self.root.as_deref(), &mut visit);
    }

    /// Visit every course in post-order (subtrees before node)
    pub fn post_order(&self, mut visit: impl FnMut(&Course)) {
        Self::post_order_node(self.root.as_deref(), &mut visit);
    }

    // Returns true when a new node was created, false on in-place update.
    fn insert_node(node: &mut Option<Box<BstNode>>, course: Course) -> bool {
        match node {
            None => {
                *node = Some(Box::new(BstNode::new(course)));
                true
            }
            Some(n) => match course.id.cmp(&n.course.id) {
                Ordering::Less => Self::insert_node(&mut n.left, course),
                Ordering::Greater => Self::insert_node(&mut n.right, course),
                Ordering::Equal => {
                    n.course = course;
                    false
                }
            },
        }
    }

    // Rewrites the subtree rooted at `node`; returns true when a node
    // was removed.
    fn remove_node(node: &mut Option<Box<BstNode>>, id: &str) -> bool {
        let Some(n) = node.as_mut() else {
            return false;
        };
        match id.cmp(n.course.id.as_str()) {
            Ordering::Less => Self::remove_node(&mut n.left, id),
            Ordering::Greater => Self::remove_node(&mut n.right, id),
            Ordering::Equal => {
                if let (Some(_), Some(right)) = (n.left.as_deref(), n.right.as_deref()) {
                    // Two children: adopt the in-order successor (the
                    // leftmost course of the right subtree), then remove
                    // the successor from its old position.
                    let successor = Self::leftmost(right).clone();
                    Self::remove_node(&mut n.right, &successor.id);
                    n.course = successor;
                    return true;
                }
                // Zero or one child: splice the child (if any) into place.
                let child = n.left.take().or_else(|| n.right.take());
                *node = child;
                true
            }
        }
    }

    fn leftmost(mut node: &BstNode) -> &Course {
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        &node.course
    }

    fn in_order_node<F: FnMut(&Course)>(node: Option<&BstNode>, visit: &mut F) {
        if let Some(n) = node {
            Self::in_order_node(n.left.as_deref(), visit);
            visit(&n.course);
            Self::in_order_node(n.right.as_deref(), visit);
        }
    }

    fn pre_order_node<F: FnMut(&Course)>(node: Option<&BstNode>, visit: &mut F) {
        if let Some(n) = node {
            visit(&n.course);
            Self::pre_order_node(n.left.as_deref(), visit);
            Self::pre_order_node(n.right.as_deref(), visit);
        }
    }

    fn post_order_node<F: FnMut(&Course)>(node: Option<&BstNode>, visit: &mut F) {
        if let Some(n) = node {
            Self::post_order_node(n.left.as_deref(), visit);
            Self::post_order_node(n.right.as_deref(), visit);
            visit(&n.course);
        }
    }
}

impl CourseStore for BstStore {
    fn insert(&mut self, course: Course) {
        if Self::insert_node(&mut self.root, course) {
            self.len += 1;
        }
    }

    fn remove(&mut self, id: &str) {
        if Self::remove_node(&mut self.root, id) {
            self.len -= 1;
        }
    }

    fn search(&self, id: &str) -> Option<&Course> {
        let mut curr = self.root.as_deref();
        while let Some(node) = curr {
            match id.cmp(node.course.id.as_str()) {
                Ordering::Equal => return Some(&node.course),
                Ordering::Less => curr = node.left.as_deref(),
                Ordering::Greater => curr = node.right.as_deref(),
            }
        }
        None
    }

    fn for_each(&self, visit: impl FnMut(&Course)) {
        self.in_order(visit);
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }
}

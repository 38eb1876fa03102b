//! Course storage backends
//!
//! Provides three interchangeable structures for the catalog: a binary
//! search tree, a flat vector, and a prerequisite graph.

pub mod bst;
pub mod dag;
pub mod vector;

pub use bst::BstStore;
pub use dag::{DagStore, TopologyReport};
pub use vector::VectorStore;

use crate::core::models::Course;
use std::fmt;
use std::str::FromStr;

/// Common contract shared by every catalog backend.
///
/// Inserting an id that is already present replaces the stored course
/// in place; the catalog never holds two courses with the same id.
/// Enumeration order is backend-defined: sorted by id for the tree and
/// the vector, topological for the graph.
pub trait CourseStore {
    /// Add a course, replacing any stored course with the same id
    fn insert(&mut self, course: Course);

    /// Remove the course with this id, if present
    fn remove(&mut self, id: &str);

    /// Look up a course by id
    fn search(&self, id: &str) -> Option<&Course>;

    /// Visit every course in this backend's enumeration order
    fn for_each(&self, visit: impl FnMut(&Course));

    /// Whether the catalog holds no courses
    fn is_empty(&self) -> bool;

    /// Number of stored courses
    fn len(&self) -> usize;

    /// Drop every stored course
    fn clear(&mut self);

    /// Clone out every course in this backend's enumeration order
    fn courses(&self) -> Vec<Course> {
        let mut result = Vec::with_capacity(self.len());
        self.for_each(|course| result.push(course.clone()));
        result
    }
}

/// Storage backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Pointer-based binary search tree ordered by course id
    Bst,
    /// Flat vector with linear search
    Vector,
    /// Prerequisite graph with topological ordering
    Dag,
}

impl StoreKind {
    /// Canonical backend names, one per variant
    #[must_use]
    pub const fn available() -> [&'static str; 3] {
        ["binary_search_tree", "vector", "dag"]
    }

    /// Performance characteristics text shown by the interactive menu
    #[must_use]
    pub const fn performance_notes(self) -> &'static str {
        match self {
            Self::Bst => concat!(
                "Binary Search Tree:\n",
                "  - Search: O(log n) average, O(n) worst case\n",
                "  - Insert: O(log n) average, O(n) worst case\n",
                "  - Remove: O(log n) average, O(n) worst case\n",
                "  - Memory: O(n) with additional pointer overhead\n",
                "  - Maintains sorted order automatically",
            ),
            Self::Vector => concat!(
                "Vector (Linear):\n",
                "  - Search: O(n)\n",
                "  - Insert: O(1) at end, O(n) for duplicates check\n",
                "  - Remove: O(n)\n",
                "  - Memory: O(n) with good cache locality\n",
                "  - Simple implementation, good for small datasets",
            ),
            Self::Dag => concat!(
                "Directed Acyclic Graph (DAG):\n",
                "  - Search: O(1) average via hash lookup\n",
                "  - Insert: O(V + E), every insert rebuilds the edge set\n",
                "  - Remove: O(V + E) worst case to unlink neighbors\n",
                "  - Memory: O(V + E) for nodes plus adjacency lists\n",
                "  - Supports prerequisite relationships and topological ordering",
            ),
        }
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bst" | "binary_search_tree" | "tree" => Ok(Self::Bst),
            "vector" | "array" => Ok(Self::Vector),
            "dag" | "directed_acyclic_graph" => Ok(Self::Dag),
            _ => Err(format!("Unknown data structure type: {s}")),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bst => write!(f, "Binary Search Tree"),
            Self::Vector => write!(f, "Vector"),
            Self::Dag => write!(f, "Directed Acyclic Graph"),
        }
    }
}

/// A catalog store with a caller-selected backing structure.
///
/// Wraps the three backends behind one value type so callers can hold
/// "some store" without generics, while backend-only features stay
/// reachable through the projection methods.
#[derive(Debug)]
pub enum CatalogStore {
    /// Binary search tree backend
    Bst(BstStore),
    /// Flat vector backend
    Vector(VectorStore),
    /// Dependency graph backend
    Dag(DagStore),
}

impl CatalogStore {
    /// Create an empty store backed by the requested structure
    #[must_use]
    pub fn new(kind: StoreKind) -> Self {
        match kind {
            StoreKind::Bst => Self::Bst(BstStore::new()),
            StoreKind::Vector => Self::Vector(VectorStore::new()),
            StoreKind::Dag => Self::Dag(DagStore::new()),
        }
    }

    /// Create an empty store from a backend name or alias
    ///
    /// # Errors
    ///
    /// Returns an error naming the unknown backend when `name` matches
    /// no known alias.
    pub fn from_name(name: &str) -> Result<Self, String> {
        name.parse::<StoreKind>().map(Self::new)
    }

    /// Which backend this store is using
    #[must_use]
    pub const fn kind(&self) -> StoreKind {
        match self {
            Self::Bst(_) => StoreKind::Bst,
            Self::Vector(_) => StoreKind::Vector,
            Self::Dag(_) => StoreKind::Dag,
        }
    }

    /// Graph view, present when backed by the dependency graph
    #[must_use]
    pub const fn as_dag(&self) -> Option<&DagStore> {
        match self {
            Self::Dag(store) => Some(store),
            _ => None,
        }
    }

    /// Vector view, present when backed by the flat vector
    #[must_use]
    pub const fn as_vector(&self) -> Option<&VectorStore> {
        match self {
            Self::Vector(store) => Some(store),
            _ => None,
        }
    }
}

impl CourseStore for CatalogStore {
    fn insert(&mut self, course: Course) {
        match self {
            Self::Bst(store) => store.insert(course),
            Self::Vector(store) => store.insert(course),
            Self::Dag(store) => store.insert(course),
        }
    }

    fn remove(&mut self, id: &str) {
        match self {
            Self::Bst(store) => store.remove(id),
            Self::Vector(store) => store.remove(id),
            Self::Dag(store) => store.remove(id),
        }
    }

    fn search(&self, id: &str) -> Option<&Course> {
        match self {
            Self::Bst(store) => store.search(id),
            Self::Vector(store) => store.search(id),
            Self::Dag(store) => store.search(id),
        }
    }

    fn for_each(&self, visit: impl FnMut(&Course)) {
        match self {
            Self::Bst(store) => store.for_each(visit),
            Self::Vector(store) => store.for_each(visit),
            Self::Dag(store) => store.for_each(visit),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Bst(store) => store.is_empty(),
            Self::Vector(store) => store.is_empty(),
            Self::Dag(store) => store.is_empty(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Bst(store) => store.len(),
            Self::Vector(store) => store.len(),
            Self::Dag(store) => store.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Bst(store) => store.clear(),
            Self::Vector(store) => store.clear(),
            Self::Dag(store) => store.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_kind_from_canonical_names() {
        assert_eq!("binary_search_tree".parse::<StoreKind>(), Ok(StoreKind::Bst));
        assert_eq!("vector".parse::<StoreKind>(), Ok(StoreKind::Vector));
        assert_eq!("dag".parse::<StoreKind>(), Ok(StoreKind::Dag));
    }

    #[test]
    fn test_store_kind_from_aliases() {
        assert_eq!("bst".parse::<StoreKind>(), Ok(StoreKind::Bst));
        assert_eq!("tree".parse::<StoreKind>(), Ok(StoreKind::Bst));
        assert_eq!("array".parse::<StoreKind>(), Ok(StoreKind::Vector));
        assert_eq!(
            "directed_acyclic_graph".parse::<StoreKind>(),
            Ok(StoreKind::Dag)
        );
    }

    #[test]
    fn test_store_kind_parse_is_case_insensitive() {
        assert_eq!("BST".parse::<StoreKind>(), Ok(StoreKind::Bst));
        assert_eq!("Vector".parse::<StoreKind>(), Ok(StoreKind::Vector));
        assert_eq!("DAG".parse::<StoreKind>(), Ok(StoreKind::Dag));
    }

    #[test]
    fn test_store_kind_unknown_name_errors() {
        let err = "heap".parse::<StoreKind>().unwrap_err();
        assert_eq!(err, "Unknown data structure type: heap");
    }

    #[test]
    fn test_store_kind_display_names() {
        assert_eq!(StoreKind::Bst.to_string(), "Binary Search Tree");
        assert_eq!(StoreKind::Vector.to_string(), "Vector");
        assert_eq!(StoreKind::Dag.to_string(), "Directed Acyclic Graph");
    }

    #[test]
    fn test_available_lists_every_backend() {
        let names = StoreKind::available();
        assert_eq!(names.len(), 3);
        for name in names {
            assert!(name.parse::<StoreKind>().is_ok());
        }
    }

    #[test]
    fn test_performance_notes_name_their_backend() {
        assert!(StoreKind::Bst.performance_notes().starts_with("Binary Search Tree:"));
        assert!(StoreKind::Vector.performance_notes().starts_with("Vector (Linear):"));
        assert!(StoreKind::Dag
            .performance_notes()
            .contains("topological ordering"));
    }

    #[test]
    fn test_catalog_store_reports_its_kind() {
        for kind in [StoreKind::Bst, StoreKind::Vector, StoreKind::Dag] {
            assert_eq!(CatalogStore::new(kind).kind(), kind);
        }
    }

    #[test]
    fn test_from_name_accepts_aliases_and_rejects_unknown() {
        assert_eq!(
            CatalogStore::from_name("tree").map(|s| s.kind()),
            Ok(StoreKind::Bst)
        );
        assert!(CatalogStore::from_name("heap").is_err());
    }

    #[test]
    fn test_projections_match_backend() {
        let dag = CatalogStore::new(StoreKind::Dag);
        assert!(dag.as_dag().is_some());
        assert!(dag.as_vector().is_none());

        let vector = CatalogStore::new(StoreKind::Vector);
        assert!(vector.as_vector().is_some());
        assert!(vector.as_dag().is_none());
    }

    #[test]
    fn test_operations_delegate_to_backend() {
        for kind in [StoreKind::Bst, StoreKind::Vector, StoreKind::Dag] {
            let mut store = CatalogStore::new(kind);
            assert!(store.is_empty());

            store.insert(Course::new("CS101".to_string(), "Intro".to_string()));
            store.insert(Course::new("CS102".to_string(), "Next".to_string()));
            assert_eq!(store.len(), 2);
            assert_eq!(store.search("CS101").map(|c| c.title.as_str()), Some("Intro"));

            store.remove("CS101");
            assert!(store.search("CS101").is_none());
            assert_eq!(store.courses().len(), 1);
        }
    }
}

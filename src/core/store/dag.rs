//! Prerequisite graph store with topological ordering

use crate::core::models::Course;
use crate::core::store::CourseStore;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// A graph node owning its course plus adjacency by course id.
///
/// Edges run prerequisite -> dependent. Both directions are kept as id
/// lists so removal can unlink from either side without a full rebuild.
#[derive(Debug)]
struct DagNode {
    course: Course,
    prerequisites: Vec<String>,
    dependents: Vec<String>,
    in_degree: usize,
}

impl DagNode {
    const fn new(course: Course) -> Self {
        Self {
            course,
            prerequisites: Vec::new(),
            dependents: Vec::new(),
            in_degree: 0,
        }
    }
}

/// Hash-indexed dependency graph over the course catalog.
///
/// Edges are never supplied by the caller; every insert re-derives the
/// whole edge set from the stored courses' prerequisite lists, so the
/// graph always matches current course data. A prerequisite id with no
/// matching course contributes no edge until that course arrives, at
/// which point the next rebuild picks it up.
///
/// `order` records course ids in insertion order. `HashMap` iteration is
/// unordered, so every derived sequence (edge lists, topological ties,
/// report rows) walks `order` instead to stay deterministic.
#[derive(Debug, Default)]
pub struct DagStore {
    nodes: HashMap<String, DagNode>,
    order: Vec<String>,
}

impl DagStore {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Course ids in topological order, ties broken by insertion order.
    ///
    /// Kahn's algorithm over a private in-degree snapshot; the stored
    /// in-degrees are left untouched. Courses on a cycle never reach
    /// in-degree zero and are omitted from the result. Callers needing
    /// cycle awareness use [`has_cycle`](Self::has_cycle).
    #[must_use]
    pub fn topological_sort(&self) -> Vec<String> {
        let mut result = Vec::with_capacity(self.order.len());
        let mut queue: VecDeque<&str> = VecDeque::new();

        let mut remaining: HashMap<&str, usize> = HashMap::with_capacity(self.nodes.len());
        for id in &self.order {
            if let Some(node) = self.nodes.get(id) {
                remaining.insert(id.as_str(), node.in_degree);
                if node.in_degree == 0 {
                    queue.push_back(id.as_str());
                }
            }
        }

        while let Some(current) = queue.pop_front() {
            result.push(current.to_string());
            if let Some(node) = self.nodes.get(current) {
                for dependent in &node.dependents {
                    if let Some(in_degree) = remaining.get_mut(dependent.as_str()) {
                        *in_degree -= 1;
                        if *in_degree == 0 {
                            queue.push_back(dependent.as_str());
                        }
                    }
                }
            }
        }

        result
    }

    /// Whether the prerequisite data contains a dependency cycle
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: HashSet<&str> = HashSet::new();

        for id in &self.order {
            if !visited.contains(id.as_str()) && self.cycle_from(id, &mut visited, &mut stack) {
                return true;
            }
        }
        false
    }

    /// Prerequisite ids of a course; empty when the id is unknown
    #[must_use]
    pub fn get_prerequisites(&self, id: &str) -> Vec<String> {
        self.nodes
            .get(id)
            .map_or_else(Vec::new, |node| node.prerequisites.clone())
    }

    /// Ids of the courses that list this one as a prerequisite
    #[must_use]
    pub fn get_dependents(&self, id: &str) -> Vec<String> {
        self.nodes
            .get(id)
            .map_or_else(Vec::new, |node| node.dependents.clone())
    }

    /// Build the dependency-graph report view
    #[must_use]
    pub fn topology_report(&self) -> TopologyReport {
        let entries = self
            .topological_sort()
            .into_iter()
            .filter_map(|id| self.nodes.get(&id))
            .map(|node| ReportEntry {
                id: node.course.id.clone(),
                title: node.course.title.clone(),
                prerequisites: node.prerequisites.clone(),
                dependents: node.dependents.clone(),
            })
            .collect();

        // Classification counts cover every node, including any a cycle
        // kept out of the topological order.
        let mut foundation = 0;
        let mut intermediate = 0;
        let mut advanced = 0;
        for node in self.nodes.values() {
            match node.prerequisites.len() {
                0 => foundation += 1,
                1 | 2 => intermediate += 1,
                _ => advanced += 1,
            }
        }

        TopologyReport {
            entries,
            total: self.nodes.len(),
            foundation,
            intermediate,
            advanced,
            has_cycle: self.has_cycle(),
        }
    }

    // Clears all adjacency and in-degree data, then re-derives every
    // prerequisite -> dependent edge from current course data. Walks
    // `order` so edge list ordering is deterministic.
    fn build_edges(&mut self) {
        for node in self.nodes.values_mut() {
            node.prerequisites.clear();
            node.dependents.clear();
            node.in_degree = 0;
        }

        let mut edges: Vec<(String, String)> = Vec::new();
        for id in &self.order {
            if let Some(node) = self.nodes.get(id) {
                for prereq in &node.course.prerequisites {
                    // A prereq with no matching course contributes no edge.
                    if !prereq.is_empty() && self.nodes.contains_key(prereq) {
                        edges.push((prereq.clone(), id.clone()));
                    }
                }
            }
        }

        for (from, to) in edges {
            self.add_edge(&from, &to);
        }
    }

    // Adds one edge, suppressing duplicates by scanning the existing
    // dependents list. Both endpoints are known to exist.
    fn add_edge(&mut self, from: &str, to: &str) {
        if let Some(from_node) = self.nodes.get_mut(from) {
            if from_node.dependents.iter().any(|d| d == to) {
                return;
            }
            from_node.dependents.push(to.to_string());
        }
        if let Some(to_node) = self.nodes.get_mut(to) {
            to_node.prerequisites.push(from.to_string());
            to_node.in_degree += 1;
        }
    }

    fn cycle_from<'a>(
        &'a self,
        id: &'a str,
        visited: &mut HashSet<&'a str>,
        stack: &mut HashSet<&'a str>,
    ) -> bool {
        visited.insert(id);
        stack.insert(id);

        if let Some(node) = self.nodes.get(id) {
            for dependent in &node.dependents {
                if stack.contains(dependent.as_str()) {
                    return true; // back edge
                }
                if !visited.contains(dependent.as_str())
                    && self.cycle_from(dependent, visited, stack)
                {
                    return true;
                }
            }
        }

        stack.remove(id);
        false
    }
}

impl CourseStore for DagStore {
    fn insert(&mut self, course: Course) {
        match self.nodes.entry(course.id.clone()) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().course = course;
            }
            Entry::Vacant(slot) => {
                self.order.push(course.id.clone());
                slot.insert(DagNode::new(course));
            }
        }
        self.build_edges();
    }

    fn remove(&mut self, id: &str) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        self.order.retain(|entry| entry != id);

        // Drop the back-reference each prerequisite holds to this course.
        for prereq_id in &node.prerequisites {
            if let Some(prereq) = self.nodes.get_mut(prereq_id) {
                prereq.dependents.retain(|d| d != id);
            }
        }

        // Unlink from each dependent and release its satisfied in-degree.
        for dependent_id in &node.dependents {
            if let Some(dependent) = self.nodes.get_mut(dependent_id) {
                dependent.prerequisites.retain(|p| p != id);
                dependent.in_degree -= 1;
            }
        }
    }

    fn search(&self, id: &str) -> Option<&Course> {
        self.nodes.get(id).map(|node| &node.course)
    }

    fn for_each(&self, mut visit: impl FnMut(&Course)) {
        for id in self.topological_sort() {
            if let Some(node) = self.nodes.get(&id) {
                visit(&node.course);
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
    }
}

/// Text view of the dependency graph: every course in topological order
/// with its local edges, followed by a statistics block.
#[derive(Debug)]
pub struct TopologyReport {
    entries: Vec<ReportEntry>,
    total: usize,
    foundation: usize,
    intermediate: usize,
    advanced: usize,
    has_cycle: bool,
}

#[derive(Debug)]
struct ReportEntry {
    id: String,
    title: String,
    prerequisites: Vec<String>,
    dependents: Vec<String>,
}

impl TopologyReport {
    /// Cycle-detection result captured when the report was built
    #[must_use]
    pub const fn has_cycle(&self) -> bool {
        self.has_cycle
    }

    /// Number of courses in the graph, cyclic ones included
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }
}

impl fmt::Display for TopologyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== COURSE DEPENDENCY GRAPH ==========")?;
        writeln!(f)?;

        for entry in &self.entries {
            writeln!(f, "[{}] {}", entry.id, entry.title)?;
            if !entry.prerequisites.is_empty() {
                writeln!(f, "  Prerequisites: {}", entry.prerequisites.join(", "))?;
            }
            if !entry.dependents.is_empty() {
                writeln!(f, "  Enables: {}", entry.dependents.join(", "))?;
            }
            if !entry.prerequisites.is_empty() || !entry.dependents.is_empty() {
                write!(f, "  Graph: ")?;
                for prereq in &entry.prerequisites {
                    write!(f, "{prereq} → ")?;
                }
                write!(f, "[{}]", entry.id)?;
                if !entry.dependents.is_empty() {
                    write!(f, " → {}", entry.dependents.join(", "))?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "========== GRAPH STATISTICS ==========")?;
        writeln!(f, "Total Courses: {}", self.total)?;
        writeln!(f, "Foundation Courses (no prerequisites): {}", self.foundation)?;
        writeln!(f, "Intermediate Courses (1-2 prerequisites): {}", self.intermediate)?;
        writeln!(f, "Advanced Courses (3+ prerequisites): {}", self.advanced)?;
        writeln!(f, "Has Cycles: {}", if self.has_cycle { "Yes" } else { "No" })?;
        write!(f, "=============================================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, prereqs: &[&str]) -> Course {
        Course::with_prerequisites(
            id.to_string(),
            format!("{id} title"),
            prereqs.iter().map(|p| (*p).to_string()).collect(),
        )
    }

    fn chain_store() -> DagStore {
        let mut store = DagStore::new();
        store.insert(course("A", &[]));
        store.insert(course("B", &["A"]));
        store.insert(course("C", &["B"]));
        store
    }

    #[test]
    fn test_chain_topological_order() {
        let store = chain_store();

        assert_eq!(store.topological_sort(), vec!["A", "B", "C"]);
        assert!(!store.has_cycle());
    }

    #[test]
    fn test_for_each_follows_topological_order() {
        let store = chain_store();

        let mut visited = Vec::new();
        store.for_each(|c| visited.push(c.id.clone()));
        assert_eq!(visited, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_forward_reference_resolves_on_later_insert() {
        let mut store = DagStore::new();
        // B arrives first, naming a prerequisite that does not exist yet.
        store.insert(course("B", &["A"]));
        assert!(store.get_prerequisites("B").is_empty());

        // The rebuild on A's insert derives the pending edge.
        store.insert(course("A", &[]));
        assert_eq!(store.get_prerequisites("B"), vec!["A"]);
        assert_eq!(store.get_dependents("A"), vec!["B"]);
        assert_eq!(store.topological_sort(), vec!["A", "B"]);
    }

    #[test]
    fn test_missing_prerequisite_is_skipped() {
        let mut store = DagStore::new();
        store.insert(course("B", &["GHOST"]));
        store.insert(course("C", &["B"]));

        assert!(store.get_prerequisites("B").is_empty());
        assert_eq!(store.topological_sort(), vec!["B", "C"]);
    }

    #[test]
    fn test_duplicate_prerequisite_entries_make_one_edge() {
        let mut store = DagStore::new();
        store.insert(course("A", &[]));
        store.insert(Course::with_prerequisites(
            "B".to_string(),
            "B title".to_string(),
            vec!["A".to_string(), "A".to_string()],
        ));

        assert_eq!(store.get_dependents("A"), vec!["B"]);
        assert_eq!(store.get_prerequisites("B"), vec!["A"]);
    }

    #[test]
    fn test_duplicate_insert_updates_and_rebuilds() {
        let mut store = chain_store();

        // C's prerequisite moves from B to A; the rebuild must reflect it.
        store.insert(course("C", &["A"]));
        assert_eq!(store.len(), 3);
        assert_eq!(store.get_prerequisites("C"), vec!["A"]);
        assert_eq!(store.get_dependents("A"), vec!["B", "C"]);
        assert!(store.get_dependents("B").is_empty());
    }

    #[test]
    fn test_two_node_cycle_detected_and_omitted() {
        let mut store = DagStore::new();
        store.insert(course("X", &["Y"]));
        store.insert(course("Y", &["X"]));
        store.insert(course("Z", &[]));

        assert!(store.has_cycle());
        assert_eq!(store.topological_sort(), vec!["Z"]);

        let report = store.topology_report();
        assert!(report.has_cycle());
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_remove_unlinks_both_directions() {
        let store = {
            let mut s = chain_store();
            s.remove("B");
            s
        };

        assert_eq!(store.len(), 2);
        assert!(store.search("B").is_none());
        assert!(store.get_dependents("A").is_empty());
        assert!(store.get_prerequisites("C").is_empty());
        // Without the in-degree release C would never reach the queue.
        assert_eq!(store.topological_sort(), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = chain_store();
        store.remove("GHOST");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_search_returns_stored_course() {
        let store = chain_store();
        assert_eq!(store.search("B").map(|c| c.id.as_str()), Some("B"));
        assert!(store.search("GHOST").is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = chain_store();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.topological_sort(), Vec::<String>::new());

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_topology_report_display() {
        let mut store = chain_store();
        store.insert(course("D", &["A", "B", "C"]));

        let text = store.topology_report().to_string();
        assert!(text.contains("COURSE DEPENDENCY GRAPH"));
        assert!(text.contains("[B] B title"));
        assert!(text.contains("  Prerequisites: A"));
        assert!(text.contains("  Enables: C"));
        assert!(text.contains("A → [B] → C"));
        assert!(text.contains("Total Courses: 4"));
        assert!(text.contains("Foundation Courses (no prerequisites): 1"));
        assert!(text.contains("Intermediate Courses (1-2 prerequisites): 2"));
        assert!(text.contains("Advanced Courses (3+ prerequisites): 1"));
        assert!(text.contains("Has Cycles: No"));
    }

    #[test]
    fn test_tie_break_follows_insertion_order() {
        let mut store = DagStore::new();
        store.insert(course("M", &[]));
        store.insert(course("K", &[]));
        store.insert(course("Z", &["M", "K"]));

        // M and K both start at in-degree zero; insertion order wins.
        assert_eq!(store.topological_sort(), vec!["M", "K", "Z"]);
    }
}

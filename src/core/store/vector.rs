//! Flat vector store with linear scans

use crate::core::models::Course;
use crate::core::store::CourseStore;

/// Courses held in a plain vector, in insertion order.
///
/// Every keyed operation is a linear scan. Enumeration sorts a temporary
/// view so callers always see ascending id order while the stored order
/// stays untouched; [`as_slice`](Self::as_slice) exposes the raw order and
/// [`sort_by_id`](Self::sort_by_id) sorts the live collection in place.
#[derive(Debug, Default)]
pub struct VectorStore {
    courses: Vec<Course>,
}

impl VectorStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            courses: Vec::new(),
        }
    }

    /// Courses in raw insertion order
    #[must_use]
    pub fn as_slice(&self) -> &[Course] {
        &self.courses
    }

    /// Sort the live collection by course id
    pub fn sort_by_id(&mut self) {
        self.courses.sort();
    }
}

impl CourseStore for VectorStore {
    fn insert(&mut self, course: Course) {
        if let Some(existing) = self.courses.iter_mut().find(|c| c.id == course.id) {
            *existing = course;
        } else {
            self.courses.push(course);
        }
    }

    fn remove(&mut self, id: &str) {
        self.courses.retain(|c| c.id != id);
    }

    fn search(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    fn for_each(&self, mut visit: impl FnMut(&Course)) {
        let mut sorted: Vec<&Course> = self.courses.iter().collect();
        sorted.sort();
        for course in sorted {
            visit(course);
        }
    }

    fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    fn len(&self) -> usize {
        self.courses.len()
    }

    fn clear(&mut self) {
        self.courses.clear();
    }
}

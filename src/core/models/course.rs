//! Course model

use std::cmp::Ordering;
use std::fmt;

/// A catalog entry identified by a unique course id.
///
/// Equality and ordering are defined solely by `id`, so two courses with
/// the same id compare equal even when their titles or prerequisite lists
/// differ. Every store keys on this.
#[derive(Debug, Clone)]
pub struct Course {
    /// Course id (e.g., "CSCI200"); unique key, case-normalized by the loader
    pub id: String,

    /// Course title (e.g., "Data Structures")
    pub title: String,

    /// Prerequisite course ids, in catalog order; may reference ids that
    /// are not (yet) present in any store
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Create a new course with no prerequisites
    #[must_use]
    pub const fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            prerequisites: Vec::new(),
        }
    }

    /// Create a new course with the given prerequisite ids
    #[must_use]
    pub const fn with_prerequisites(id: String, title: String, prerequisites: Vec<String>) -> Self {
        Self {
            id,
            title,
            prerequisites,
        }
    }

    /// Add a prerequisite id, suppressing duplicates
    pub fn add_prerequisite(&mut self, prereq_id: String) {
        if !self.prerequisites.contains(&prereq_id) {
            self.prerequisites.push(prereq_id);
        }
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}

impl PartialOrd for Course {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Course {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.id, self.title)
    }
}

//! CSV catalog loading

use crate::core::models::Course;
use crate::core::store::CourseStore;
use crate::warn;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Outcome of loading a catalog file into a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Courses held by the store once the load finished
    pub loaded: usize,
    /// Rows skipped for a missing course id or title
    pub skipped: usize,
}

/// Courses recovered from one CSV document
struct ParsedCatalog {
    courses: Vec<Course>,
    skipped: usize,
}

/// Load a catalog CSV file into a store, replacing its contents
///
/// Every row is `ID,Title[,PREREQ...]`; there is no header row. Course
/// ids and prerequisite ids are uppercased so lookups are
/// case-insensitive at the source.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `store` - Destination store, cleared before inserting
///
/// # Returns
/// A `LoadSummary` with the resulting store size and the skipped row count
///
/// # Errors
/// Returns an error if the file cannot be read; the store is left
/// untouched in that case.
pub fn load_courses<P: AsRef<Path>, S: CourseStore>(
    path: P,
    store: &mut S,
) -> Result<LoadSummary, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    let parsed = parse_content(&content);

    store.clear();
    for course in parsed.courses {
        store.insert(course);
    }

    // Counting from the store folds duplicate-id rows into one entry.
    Ok(LoadSummary {
        loaded: store.len(),
        skipped: parsed.skipped,
    })
}

/// Parse a catalog CSV file without touching any store
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Returns
/// Every well-formed course row, in file order
///
/// # Errors
/// Returns an error if the file cannot be read
pub fn parse_courses_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Course>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_content(&content).courses)
}

/// Parse CSV content into courses, warning on malformed rows
fn parse_content(content: &str) -> ParsedCatalog {
    let mut courses = Vec::new();
    let mut skipped = 0;

    for (index, line) in content.lines().enumerate() {
        let fields = parse_csv_line(line);

        let id = fields
            .first()
            .map_or_else(String::new, |field| field.to_ascii_uppercase());
        let title = fields.get(1).cloned().unwrap_or_default();

        if id.is_empty() || title.is_empty() {
            warn!("Skipping row {} due to missing course ID or title", index + 1);
            skipped += 1;
            continue;
        }

        let mut course = Course::new(id, title);
        for prereq in fields.iter().skip(2) {
            if !prereq.is_empty() {
                course.add_prerequisite(prereq.to_ascii_uppercase());
            }
        }
        courses.push(course);
    }

    ParsedCatalog { courses, skipped }
}

/// Split one CSV row into trimmed fields
///
/// A double quote toggles quoted mode and commas inside quotes do not
/// split; the quote characters themselves are dropped from the output.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line() {
        let fields = parse_csv_line("CSCI200,Data Structures,CSCI101");

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], "CSCI200");
        assert_eq!(fields[1], "Data Structures");
        assert_eq!(fields[2], "CSCI101");
    }

    #[test]
    fn test_parse_csv_line_keeps_quoted_commas() {
        let fields = parse_csv_line("CSCI150,\"Algorithms, Part I\",CSCI100");

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1], "Algorithms, Part I");
    }

    #[test]
    fn test_parse_csv_line_trims_fields() {
        let fields = parse_csv_line("  CSCI100 ,  Intro to CS  ");

        assert_eq!(fields, vec!["CSCI100", "Intro to CS"]);
    }

    #[test]
    fn test_parse_content_builds_courses_in_file_order() {
        let parsed = parse_content("CSCI100,Intro\nCSCI200,Data Structures,CSCI100\n");

        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.courses.len(), 2);
        assert_eq!(parsed.courses[0].id, "CSCI100");
        assert_eq!(parsed.courses[1].prerequisites, vec!["CSCI100"]);
    }

    #[test]
    fn test_parse_content_uppercases_ids_not_titles() {
        let parsed = parse_content("csci101,Intro to Programming,csci100");

        let course = &parsed.courses[0];
        assert_eq!(course.id, "CSCI101");
        assert_eq!(course.title, "Intro to Programming");
        assert_eq!(course.prerequisites, vec!["CSCI100"]);
    }

    #[test]
    fn test_parse_content_skips_incomplete_rows() {
        let parsed = parse_content("CSCI100,Intro\nCSCI999\n,Missing Id\nCSCI200,Data Structures");

        assert_eq!(parsed.skipped, 2);
        assert_eq!(parsed.courses.len(), 2);
    }

    #[test]
    fn test_parse_content_drops_empty_prereq_fields() {
        let parsed = parse_content("CSCI300,Algorithms,CSCI200,,MATH201,");

        assert_eq!(parsed.courses[0].prerequisites, vec!["CSCI200", "MATH201"]);
    }

    #[test]
    fn test_parse_content_collapses_duplicate_prereqs() {
        let parsed = parse_content("CSCI300,Algorithms,CSCI200,csci200");

        assert_eq!(parsed.courses[0].prerequisites, vec!["CSCI200"]);
    }
}

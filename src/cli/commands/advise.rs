//! Interactive advising command handler

use course_planner::config::Config;
use course_planner::core::{
    loader,
    models::Course,
    store::{CatalogStore, CourseStore, StoreKind},
};
use course_planner::{debug, error, info, warn};
use std::io::{self, Write};
use std::path::PathBuf;

/// Run the interactive advising session.
///
/// # Arguments
/// * `csv_file` - Catalog CSV path from the command line, if given
/// * `store_arg` - Backend name from `--store`, if given
/// * `config` - Loaded configuration with catalog defaults
pub fn run(csv_file: Option<PathBuf>, store_arg: Option<&str>, config: &Config) {
    println!("Welcome to the Course Planner!");

    let kind = match resolve_store_kind(store_arg, config) {
        Ok(kind) => kind,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };
    debug!("Resolved store backend: {kind}");

    print_performance_info(kind);

    let store = CatalogStore::new(kind);
    println!("\nData structure created successfully.");

    let csv_path = csv_file.unwrap_or_else(|| default_csv_path(config));
    info!(
        "Advising session started ({kind} store, catalog {})",
        csv_path.display()
    );

    let mut session = Session { store, csv_path };
    session.menu_loop();
}

/// Pick the storage backend for this session.
///
/// An explicit `--store` flag must name a valid backend; a bad value in
/// the config file is only warned about, falling through to the prompt.
fn resolve_store_kind(store_arg: Option<&str>, config: &Config) -> Result<StoreKind, String> {
    if let Some(name) = store_arg {
        return name.parse();
    }

    if !config.catalog.store.is_empty() {
        match config.catalog.store.parse::<StoreKind>() {
            Ok(kind) => return Ok(kind),
            Err(e) => warn!("Ignoring configured store: {e}"),
        }
    }

    Ok(prompt_store_kind())
}

fn prompt_store_kind() -> StoreKind {
    println!("\nSelect Data Structure Type:");
    println!("  1. Binary Search Tree (BST)");
    println!("  2. Vector (Linear Search)");
    println!("  3. Directed Acyclic Graph (DAG)");
    print!("Enter choice (1-3): ");
    io::stdout().flush().ok();

    match read_trimmed_line().as_deref() {
        Some("1") => StoreKind::Bst,
        Some("2") => StoreKind::Vector,
        Some("3") => StoreKind::Dag,
        _ => {
            println!("Invalid choice, defaulting to Binary Search Tree.");
            StoreKind::Bst
        }
    }
}

fn print_performance_info(kind: StoreKind) {
    let banner = "=".repeat(50);
    println!("\n{banner}");
    println!("Data Structure Performance Characteristics:");
    println!("{banner}");
    println!("{}", kind.performance_notes());
    println!("{banner}");
}

fn default_csv_path(config: &Config) -> PathBuf {
    if config.catalog.csv_file.is_empty() {
        PathBuf::from("ABCU_Advising_Program_Input.csv")
    } else {
        PathBuf::from(&config.catalog.csv_file)
    }
}

/// Reads one line from stdin; `None` once stdin is closed.
fn read_trimmed_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// One interactive advising session over a chosen store
struct Session {
    store: CatalogStore,
    csv_path: PathBuf,
}

impl Session {
    fn menu_loop(&mut self) {
        loop {
            println!();
            println!("  1. Load Data Structure.");
            println!("  2. Print Course List.");
            println!("  3. Print Course.");
            println!("  4. Display Data Structure Info.");
            println!("  5. Print Dependency Graph.");
            println!("  9. Exit");
            print!("\nWhat would you like to do? ");
            io::stdout().flush().ok();

            // Closed stdin ends the session instead of spinning on the menu.
            let Some(choice) = read_trimmed_line() else {
                break;
            };

            match choice.as_str() {
                "1" => self.load_catalog(),
                "2" => self.print_course_list(),
                "3" => self.print_course(),
                "4" => self.print_store_info(),
                "5" => self.print_dependency_graph(),
                "9" => {
                    println!("Thank you for using the course planner!");
                    break;
                }
                other => println!("{other} is not a valid option."),
            }
        }
    }

    fn load_catalog(&mut self) {
        println!("Loading CSV file {}", self.csv_path.display());

        match loader::load_courses(&self.csv_path, &mut self.store) {
            Ok(summary) => {
                println!("Successfully loaded {} courses.", summary.loaded);
                if summary.skipped > 0 {
                    info!("Skipped {} malformed rows", summary.skipped);
                }
            }
            Err(e) => {
                error!("Failed to load {}: {e}", self.csv_path.display());
                eprintln!("✗ Error loading courses: {e}");
            }
        }
    }

    fn print_course_list(&self) {
        if self.store.is_empty() {
            println!("No courses loaded. Please load data first.");
            return;
        }

        println!("Here is a sample schedule:\n");
        self.store.for_each(|course| println!("{course}"));
    }

    fn print_course(&self) {
        if self.store.is_empty() {
            println!("No courses loaded. Please load data first.");
            return;
        }

        print!("What course do you want to know about? ");
        io::stdout().flush().ok();

        let id = read_trimmed_line().unwrap_or_default().to_ascii_uppercase();
        if id.is_empty() {
            println!("Invalid course ID. Please enter a valid course ID.");
            return;
        }

        match self.store.search(&id) {
            Some(course) => self.display_course(course),
            None => println!("Course Id {id} not found."),
        }
    }

    // Prints a course with its prerequisites; the graph backend also
    // shows which courses it enables.
    fn display_course(&self, course: &Course) {
        println!("{course}");
        if !course.prerequisites.is_empty() {
            println!("Prerequisites: {}", course.prerequisites.join(", "));
        }
        if let Some(dag) = self.store.as_dag() {
            let dependents = dag.get_dependents(&course.id);
            if !dependents.is_empty() {
                println!("Enables: {}", dependents.join(", "));
            }
        }
    }

    fn print_store_info(&self) {
        print_performance_info(self.store.kind());
        println!("Current data structure statistics:");
        println!("  - Number of courses: {}", self.store.len());
        println!(
            "  - Is empty: {}",
            if self.store.is_empty() { "Yes" } else { "No" }
        );
    }

    fn print_dependency_graph(&self) {
        if self.store.is_empty() {
            println!("No courses loaded. Please load data first.");
            return;
        }

        match self.store.as_dag() {
            Some(dag) => println!("\n{}", dag.topology_report()),
            None => println!(
                "The dependency graph is only available with the Directed Acyclic Graph store; current store is {}.",
                self.store.kind()
            ),
        }
    }
}

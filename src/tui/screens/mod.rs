//! Screen modules for the univman TUI

pub mod courses;
pub mod universities;

pub use courses::CoursesScreen;
pub use universities::UniversitiesScreen;

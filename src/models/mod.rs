mod project;

pub use project::{NewProject, Project, DATE_FORMAT};

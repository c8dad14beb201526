mod studio;
pub use studio::Studio;

mod project;
pub use project::Project;

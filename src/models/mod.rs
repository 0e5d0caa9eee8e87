pub mod project;
pub mod task;
pub mod user;

pub use project::{NewProject, Project, ProjectInput, ProjectView, TaskCounts};
pub use task::{NewTask, Task, TaskInput, TaskUpdate};
pub use user::{NewUser, User};

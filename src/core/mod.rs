pub mod due_date;
pub mod filter;
pub mod form;
pub mod project;
pub mod route;
pub mod task;

pub use filter::{TaskFilterSpec, collect_tags, filter_tasks, sort_tasks_by_due_date};
pub use project::{CreateProjectDto, Project, UpdateProjectDto};
pub use task::{CreateTaskDto, Tag, Task, TaskStatus, UpdateTaskDto};

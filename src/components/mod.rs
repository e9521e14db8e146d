pub mod project_row;
pub mod task_card;

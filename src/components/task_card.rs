use chrono::NaiveDate;

use taskdeck::core::due_date;
use taskdeck::core::{Project, Task};

/// Plain-text card for one task.
pub fn render(task: &Task, projects: &[Project], today: NaiveDate) -> String {
    let mut out = format!("#{} {} [{}]\n", task.id, task.title, task.status.label());

    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("    {}\n", description));
    }

    let project = task
        .project_label(projects)
        .unwrap_or_else(|| "No project".to_string());
    out.push_str(&format!("    Project: {}\n", project));

    let due = due_date::format_display(task.due_date.as_deref());
    if task.is_overdue(today) {
        out.push_str(&format!("    Due Date: {} (overdue)\n", due));
    } else {
        out.push_str(&format!("    Due Date: {}\n", due));
    }

    if !task.tags().is_empty() {
        let names: Vec<&str> = task.tags().iter().map(|t| t.name.as_str()).collect();
        out.push_str(&format!("    Tags: {}\n", names.join(", ")));
    }

    out
}

use std::io::{BufRead, Write};

use taskdeck::Result;
use taskdeck::api::Client;
use taskdeck::core::form::{TaskEdit, TaskForm};
use taskdeck::core::{
    Project, Task, TaskFilterSpec, collect_tags, filter_tasks, sort_tasks_by_due_date,
};

use crate::cli::{FilterArgs, TaskEditFields, TaskFields};
use crate::components::task_card;

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

impl From<&FilterArgs> for TaskFilterSpec {
    fn from(args: &FilterArgs) -> Self {
        Self {
            project_id: args.project,
            tag_id: args.tag,
            due_date: args.due.clone(),
        }
    }
}

/// Tasks and projects, fetched side by side.
async fn load(client: &Client) -> Result<(Vec<Task>, Vec<Project>)> {
    let (tasks, projects) = tokio::join!(client.tasks.get_all(), client.projects.get_all());
    Ok((tasks?, projects))
}

/// What the list view prints for a given load and filter.
pub fn render_list(tasks: &[Task], projects: &[Project], spec: &TaskFilterSpec) -> String {
    let shown = sort_tasks_by_due_date(&filter_tasks(tasks, spec));
    if shown.is_empty() {
        return if tasks.is_empty() {
            "No tasks found. Create your first task!\n".to_string()
        } else {
            "No tasks match the selected filters.\n".to_string()
        };
    }
    let today = today();
    let mut out = String::new();
    if let Some(summary) = spec.summary() {
        out.push_str(&format!("Filters: {}\n\n", summary));
    }
    for task in &shown {
        out.push_str(&task_card::render(task, projects, today));
        out.push('\n');
    }
    out
}

pub async fn list(client: &Client, args: &FilterArgs) -> Result<()> {
    let (tasks, projects) = load(client).await?;
    log::debug!("Loaded {} tasks, {} projects", tasks.len(), projects.len());
    print!("{}", render_list(&tasks, &projects, &TaskFilterSpec::from(args)));
    Ok(())
}

pub async fn show(client: &Client, id: i64) -> Result<()> {
    let (task, projects) = tokio::join!(client.tasks.get_by_id(id), client.projects.get_all());
    print!("{}", task_card::render(&task?, &projects, today()));
    Ok(())
}

pub async fn create(client: &Client, fields: TaskFields) -> Result<()> {
    let form = TaskForm {
        title: fields.title,
        description: fields.description.unwrap_or_default(),
        project_id: fields.project,
        due_date: fields.due.unwrap_or_default(),
        status: Some(fields.status),
        tags: fields.tag,
    };
    let dto = form.validate()?;
    let task = client.tasks.create(dto).await?;
    println!("Created task #{} {}", task.id, task.title);
    Ok(())
}

/// Send only the given changes. The stored task is fetched when tags are toggled.
pub async fn edit(client: &Client, id: i64, fields: TaskEditFields) -> Result<()> {
    let mut edit = TaskEdit {
        title: fields.title,
        description: fields.description,
        project_id: fields.project,
        due_date: fields.due,
        status: fields.status,
        tags: fields.tag,
    };
    if !fields.toggle_tag.is_empty() {
        let task = client.tasks.get_by_id(id).await?;
        for tag_id in fields.toggle_tag {
            edit.toggle_tag(&task, tag_id);
        }
    }
    let task = client.tasks.update(id, edit.validate()?).await?;
    println!("Updated task #{} {}", task.id, task.title);
    Ok(())
}

pub async fn delete(client: &Client, id: i64, yes: bool) -> Result<()> {
    if !yes && !confirm("Are you sure you want to delete this task?")? {
        println!("Cancelled.");
        return Ok(());
    }
    client.tasks.delete(id).await?;
    println!("Deleted task #{}", id);
    Ok(())
}

pub async fn tags(client: &Client) -> Result<()> {
    let tasks = client.tasks.get_all().await?;
    let tags = collect_tags(&tasks);
    if tags.is_empty() {
        println!("No tags found.");
    }
    for tag in tags {
        println!("#{} {}", tag.id, tag.name);
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

use taskdeck::core::Project;

pub fn render(project: &Project) -> String {
    match project.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => format!("#{} {}\n    {}\n", project.id, project.title, description),
        None => format!("#{} {}\n", project.id, project.title),
    }
}

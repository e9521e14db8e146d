use taskdeck::Result;
use taskdeck::api::Client;
use taskdeck::core::UpdateProjectDto;
use taskdeck::core::form::ProjectForm;

use crate::components::project_row;

pub async fn list(client: &Client) -> Result<()> {
    let projects = client.projects.get_all().await;
    if projects.is_empty() {
        println!("No projects found. Create your first project!");
    }
    for project in &projects {
        print!("{}", project_row::render(project));
    }
    Ok(())
}

pub async fn show(client: &Client, id: i64) -> Result<()> {
    let project = client.projects.get_by_id(id).await?;
    print!("{}", project_row::render(&project));
    Ok(())
}

pub async fn create(client: &Client, name: String, description: Option<String>) -> Result<()> {
    let dto = ProjectForm {
        title: name,
        description: description.unwrap_or_default(),
    }
    .validate()?;
    let project = client.projects.create(dto).await?;
    println!("Created project #{} {}", project.id, project.title);
    Ok(())
}

pub async fn edit(
    client: &Client,
    id: i64,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let project = client.projects.get_by_id(id).await?;
    let mut form = ProjectForm::from_project(&project);
    if let Some(name) = name {
        form.title = name;
    }
    if let Some(description) = description {
        form.description = description;
    }
    let dto = form.validate()?;
    let update = UpdateProjectDto {
        title: dto.title,
        name: dto.name,
        description: dto.description,
    };
    let project = client.projects.update(id, update).await?;
    println!("Updated project #{} {}", project.id, project.title);
    Ok(())
}

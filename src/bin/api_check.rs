use std::collections::{HashMap, HashSet};

#[tokio::main]
async fn main() {
    if let Ok(journal) = systemd_journal_logger::JournalLog::new() {
        let _ = journal
            .with_syslog_identifier("taskdeck-api-check".to_string())
            .install();
    }
    log::set_max_level(log::LevelFilter::Info);

    let config = taskdeck::config::AppConfig::load(&taskdeck::config::AppConfig::default_path());

    println!("=== API check: {} ===\n", config.api_base_url);

    let client = match taskdeck::api::Client::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            println!("Client error: {}", e);
            return;
        }
    };

    if !client.tokens().is_authenticated() {
        println!("No session token stored. Run `taskdeck login` first.");
        return;
    }

    let (tasks, projects) = tokio::join!(client.tasks.get_all(), client.projects.get_all());
    let tasks = match tasks {
        Ok(t) => t,
        Err(e) => {
            println!("Task fetch failed: {}", e);
            return;
        }
    };

    println!("Remote: {} tasks, {} projects", tasks.len(), projects.len());

    let project_ids: HashSet<i64> = projects.iter().map(|p| p.id).collect();
    let orphans: Vec<_> = tasks
        .iter()
        .filter(|t| !project_ids.contains(&t.project_id))
        .collect();

    let mut by_status: HashMap<&str, usize> = HashMap::new();
    for task in &tasks {
        *by_status.entry(task.status.as_str()).or_default() += 1;
    }
    let mut statuses: Vec<_> = by_status.into_iter().collect();
    statuses.sort();
    for (status, count) in statuses {
        println!("  {:<12} {}", status, count);
    }

    let undated = tasks.iter().filter(|t| t.due_on().is_none()).count();
    println!("  {:<12} {}", "undated", undated);

    let tags = taskdeck::core::collect_tags(&tasks);
    println!("\nTags: {}", tags.len());
    for tag in &tags {
        println!("  #{} {}", tag.id, tag.name);
    }

    if orphans.is_empty() {
        println!("\nAll tasks belong to a known project.");
    } else {
        println!("\nTasks referencing unknown projects: {}", orphans.len());
        for task in orphans {
            println!("  #{} {} (project {})", task.id, task.title, task.project_id);
        }
    }
}

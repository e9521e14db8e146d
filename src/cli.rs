use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use taskdeck::core::TaskStatus;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskdeck",
    version,
    about = "Manage projects and tasks on a remote task service.",
    after_help = "Examples:\n  taskdeck login --email jane@example.com\n  taskdeck tasks list --project 2 --due 2024-01-15\n  taskdeck tasks create --title \"Write report\" --project 2 --due 2024-01-20 --tag 1,3"
)]
pub struct Cli {
    /// Config file to read (defaults to the platform config dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Enable debug logging, including request tracing
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Sign in and store the session token
    Login(LoginArgs),
    /// Forget the stored session token
    Logout,
    /// Show whether a session token is stored
    Status,
    /// List and manage tasks
    #[command(subcommand)]
    Tasks(TasksCommand),
    /// List and manage projects
    #[command(subcommand)]
    Projects(ProjectsCommand),
    /// List tags in use on loaded tasks
    #[command(subcommand)]
    Tags(TagsCommand),
    /// Show or change the stored configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    /// Password (falls back to the TASKDECK_PASSWORD environment variable)
    #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TasksCommand {
    /// List tasks sorted by due date
    List(FilterArgs),
    /// Show one task
    Show { id: i64 },
    /// Create a task
    Create(TaskFields),
    /// Edit a task; omitted fields are left unchanged
    Edit {
        id: i64,
        #[command(flatten)]
        fields: TaskEditFields,
    },
    /// Delete a task
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only tasks in this project
    #[arg(long, value_name = "ID")]
    pub project: Option<i64>,

    /// Only tasks carrying this tag
    #[arg(long, value_name = "ID")]
    pub tag: Option<i64>,

    /// Only tasks due on this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct TaskFields {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Owning project id
    #[arg(long, value_name = "ID")]
    pub project: Option<i64>,

    /// Due date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,

    #[arg(long, value_enum, default_value_t = TaskStatus::Todo)]
    pub status: TaskStatus,

    /// Tag ids (comma-separated or repeated flag)
    #[arg(long, value_delimiter = ',', action = ArgAction::Append, value_name = "ID")]
    pub tag: Vec<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct TaskEditFields {
    #[arg(long)]
    pub title: Option<String>,

    /// New description; an empty value clears it
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_name = "ID")]
    pub project: Option<i64>,

    /// New due date (YYYY-MM-DD); an empty value clears it
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,

    /// Replace the task's tags (comma-separated or repeated flag)
    #[arg(long, value_delimiter = ',', action = ArgAction::Append, value_name = "ID")]
    pub tag: Option<Vec<i64>>,

    /// Add the tag if missing, remove it if present
    #[arg(long, value_delimiter = ',', action = ArgAction::Append, value_name = "ID")]
    pub toggle_tag: Vec<i64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectsCommand {
    /// List projects
    List,
    /// Show one project
    Show { id: i64 },
    /// Create a project
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit a project; omitted fields are left unchanged
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TagsCommand {
    /// List tags collected from all tasks
    List,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Update the config file; omitted settings are left unchanged
    Set(ConfigSetArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigSetArgs {
    /// Base URL of the task service
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Mark the session cookie secure
    #[arg(long, value_name = "BOOL")]
    pub production: Option<bool>,

    /// Persist debug logging
    #[arg(long, value_name = "BOOL")]
    pub debug_logging: Option<bool>,
}

impl CliCommand {
    /// The view this command stands for, as checked by the route guard.
    /// Session housekeeping commands are not views.
    pub fn route(&self) -> Option<String> {
        let route = match self {
            Self::Logout | Self::Status | Self::Config(_) => return None,
            Self::Login(_) => "/login".into(),
            Self::Tasks(TasksCommand::List(_)) | Self::Tags(_) => "/tasks".into(),
            Self::Tasks(TasksCommand::Show { id }) => format!("/tasks/{id}"),
            Self::Tasks(TasksCommand::Create(_)) => "/tasks/new".into(),
            Self::Tasks(TasksCommand::Edit { id, .. }) => format!("/tasks/{id}/edit"),
            Self::Tasks(TasksCommand::Delete { .. }) => "/tasks".into(),
            Self::Projects(ProjectsCommand::List) => "/projects".into(),
            Self::Projects(ProjectsCommand::Show { id }) => format!("/projects/{id}"),
            Self::Projects(ProjectsCommand::Create { .. }) => "/projects/new".into(),
            Self::Projects(ProjectsCommand::Edit { id, .. }) => format!("/projects/{id}/edit"),
        };
        Some(route)
    }
}

use std::path::Path;

use clap::Parser;

mod cli;
mod components;
mod pages;

use taskdeck::Error;
use taskdeck::api::Client;
use taskdeck::config::AppConfig;
use taskdeck::core::route::{self, RouteDecision};

use cli::{
    Cli, CliCommand, ConfigCommand, FilterArgs, ProjectsCommand, TagsCommand, TasksCommand,
};

/// Journal logger that keeps our own targets at info/debug (per config) and
/// everything else at warn.
struct FilteredJournal {
    inner: systemd_journal_logger::JournalLog,
}

impl log::Log for FilteredJournal {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        if metadata.target().starts_with("taskdeck") {
            let max = if taskdeck::debug_logging() {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            };
            metadata.level() <= max
        } else {
            metadata.level() <= log::LevelFilter::Warn
        }
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Log to the systemd user journal (`journalctl --user -t taskdeck -f`) when it is reachable.
fn init_logging(debug: bool) {
    taskdeck::set_debug_logging(debug);
    let journal = match systemd_journal_logger::JournalLog::new() {
        Ok(journal) => journal.with_syslog_identifier("taskdeck".to_string()),
        Err(_) => return,
    };
    if log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).is_ok() {
        // Global max must be Debug so debug logs can pass through when toggled
        log::set_max_level(log::LevelFilter::Debug);
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load(&config_path);
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }
    init_logging(config.debug_logging || cli.debug);

    if let Err(e) = config.ensure_dirs() {
        log::warn!("Failed to create data directory: {}", e);
    }

    if let Err(e) = run(&config, &config_path, cli.command).await {
        log::error!("Command failed: {}", e);
        if e.is_unauthorized() {
            eprintln!("Your session has expired. Run `taskdeck login` to sign in again.");
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run(
    config: &AppConfig,
    config_path: &Path,
    command: CliCommand,
) -> taskdeck::Result<()> {
    // Settings work without a usable client, so a bad base URL can be fixed.
    if let CliCommand::Config(cmd) = &command {
        return match cmd {
            ConfigCommand::Show => {
                pages::settings::show(config, config_path);
                Ok(())
            }
            ConfigCommand::Set(args) => pages::settings::set(config_path, args.clone()),
        };
    }

    let client = &Client::from_config(config)?;
    if let Some(path) = command.route() {
        match route::guard(&path, client.tokens().is_authenticated()) {
            RouteDecision::Allow => {}
            RouteDecision::Redirect(target) if target.starts_with(route::LOGIN_ROUTE) => {
                return Err(Error::NotSignedIn { redirect: target });
            }
            RouteDecision::Redirect(_) => {
                println!("Already signed in.\n");
                return pages::tasks::list(client, &FilterArgs::default()).await;
            }
        }
    }

    match command {
        CliCommand::Login(args) => {
            if pages::login::login(client, args).await? {
                println!();
                pages::tasks::list(client, &FilterArgs::default()).await?;
            }
            Ok(())
        }
        CliCommand::Logout => pages::login::logout(client),
        CliCommand::Status => {
            pages::login::status(client);
            Ok(())
        }
        CliCommand::Tasks(cmd) => match cmd {
            TasksCommand::List(args) => pages::tasks::list(client, &args).await,
            TasksCommand::Show { id } => pages::tasks::show(client, id).await,
            TasksCommand::Create(fields) => pages::tasks::create(client, fields).await,
            TasksCommand::Edit { id, fields } => pages::tasks::edit(client, id, fields).await,
            TasksCommand::Delete { id, yes } => pages::tasks::delete(client, id, yes).await,
        },
        CliCommand::Projects(cmd) => match cmd {
            ProjectsCommand::List => pages::projects::list(client).await,
            ProjectsCommand::Show { id } => pages::projects::show(client, id).await,
            ProjectsCommand::Create { name, description } => {
                pages::projects::create(client, name, description).await
            }
            ProjectsCommand::Edit {
                id,
                name,
                description,
            } => pages::projects::edit(client, id, name, description).await,
        },
        CliCommand::Tags(TagsCommand::List) => pages::tasks::tags(client).await,
        CliCommand::Config(_) => Ok(()),
    }
}

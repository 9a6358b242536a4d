mod api;
mod app;
mod backoffice;
mod config;
mod db;
mod models;
mod remote;
mod seed;
mod session;
mod store;
mod ui;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::ContactForm;
use crate::remote::{RemoteClient, RemoteError, category_filters, filter_by_category};
use crate::store::Draft;

#[derive(Parser)]
#[command(name = "ardent")]
#[command(about = "Ardent Soft site back-office")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the back-office terminal UI
    Admin,
    /// Serve the projects and settings HTTP API
    Serve {
        /// Address to bind, overrides BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Read the public site's data from the remote service
    #[command(subcommand)]
    Public(PublicCommands),
    /// Send a contact form to the remote service
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Subcommand)]
enum PublicCommands {
    /// List projects, optionally narrowed to one category slug
    Projects {
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Show one project
    Project { id: i64 },
    /// List the team
    Team,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"))
}

/// The terminal UI owns stdout, so it logs to a file instead
fn init_tracing(config: &Config, to_file: bool) -> Result<()> {
    if to_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init()?;
    init_tracing(&config, matches!(cli.command, Commands::Admin))?;

    match cli.command {
        Commands::Admin => app::run(config).await,
        Commands::Serve { bind } => api::serve(&config, bind).await,
        Commands::Public(command) => run_public(&config, command).await,
        Commands::Contact {
            name,
            email,
            phone,
            message,
        } => {
            let form = ContactForm {
                name,
                phone,
                email,
                message,
            };
            form.validate()?;
            RemoteClient::new(&config.remote_api_url)
                .submit_contact(&form)
                .await?;
            println!("Message sent. We will get back to you soon.");
            Ok(())
        }
    }
}

async fn run_public(config: &Config, command: PublicCommands) -> Result<()> {
    let client = RemoteClient::new(&config.remote_api_url);

    match command {
        PublicCommands::Projects { category } => {
            let (projects, categories) = tokio::join!(client.fetch_projects(), client.fetch_categories());
            let filters = category_filters(&categories);
            if !filters.iter().any(|(slug, _)| *slug == category) {
                let known: Vec<&str> = filters.iter().map(|(slug, _)| slug.as_str()).collect();
                bail!("unknown category '{}', expected one of: {}", category, known.join(", "));
            }

            let shown = filter_by_category(&projects, &category);
            if shown.is_empty() {
                println!("No projects found.");
            }
            for project in shown {
                println!(
                    "{:>5}  {}  [{}]  {}",
                    project.id,
                    project.title,
                    project.category,
                    project.technologies.join(", ")
                );
            }
        }
        PublicCommands::Project { id } => match client.fetch_project(id).await {
            Ok(project) => println!("{}", serde_json::to_string_pretty(&project)?),
            Err(RemoteError::NotFound(id)) => bail!("project {} not found", id),
            Err(e) => return Err(e.into()),
        },
        PublicCommands::Team => {
            let team = client.fetch_team().await;
            if team.is_empty() {
                println!("No team members found.");
            }
            for member in team {
                println!(
                    "{}  {}  ({}, {} projects)  {}",
                    member.name,
                    member.role,
                    member.experience,
                    member.projects,
                    member.skills.join(", ")
                );
            }
        }
    }
    Ok(())
}

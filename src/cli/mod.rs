pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::config;
use crate::context::AppContext;
use crate::error::ClientError;

#[derive(Parser)]
#[command(name = "cbadmin")]
#[command(about = "Chatbot admin CLI - manage companies, chatbots, token quotas, plans and admins")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, conflicts_with = "json", help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Override the API base URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Dashboard totals")]
    Overview,

    #[command(about = "Company (tenant) management")]
    Company {
        #[command(subcommand)]
        cmd: commands::company::CompanyCommands,
    },

    #[command(about = "Chatbots, token limits, message history and reports")]
    Chatbot {
        #[command(subcommand)]
        cmd: commands::chatbot::ChatbotCommands,
    },

    #[command(about = "Subscription plan catalogue")]
    Plan {
        #[command(subcommand)]
        cmd: commands::plan::PlanCommands,
    },

    #[command(about = "Chatbot subscriptions")]
    Subscription {
        #[command(subcommand)]
        cmd: commands::subscription::SubscriptionCommands,
    },

    #[command(about = "Admin accounts")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Text unless `--json` is given; `--text` selects it explicitly
    pub fn from_cli(cli: &Cli) -> Self {
        match (cli.text, cli.json) {
            (false, true) => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let mut ctx = AppContext::from_config(config(), cli.base_url.as_deref())?;

    let result = match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &mut ctx, output_format.clone()).await,
        Commands::Overview => commands::overview::handle(&mut ctx, output_format.clone()).await,
        Commands::Company { cmd } => commands::company::handle(cmd, &mut ctx, output_format.clone()).await,
        Commands::Chatbot { cmd } => commands::chatbot::handle(cmd, &mut ctx, output_format.clone()).await,
        Commands::Plan { cmd } => commands::plan::handle(cmd, &mut ctx, output_format.clone()).await,
        Commands::Subscription { cmd } => commands::subscription::handle(cmd, &mut ctx, output_format.clone()).await,
        Commands::Admin { cmd } => commands::admin::handle(cmd, &mut ctx, output_format.clone()).await,
    };

    // JSON callers get the error envelope on stdout as well as the exit status
    if let (Err(err), OutputFormat::Json) = (&result, &output_format) {
        if let Some(client_err) = err.downcast_ref::<ClientError>() {
            utils::output_error(&output_format, client_err)?;
        }
    }

    result
}

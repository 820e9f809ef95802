use std::path::PathBuf;

use clap::Subcommand;
use serde_json::{json, Value};

use crate::api::AdminApi;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::export;
use crate::guard::Route;
use crate::types::RecordId;
use crate::views::ChatbotsView;

#[derive(Subcommand)]
pub enum ChatbotCommands {
    #[command(about = "List chatbots with usage and quota")]
    List {
        #[arg(long, help = "Only chatbots whose name contains this text")]
        search: Option<String>,
        #[arg(long, help = "Also fetch each chatbot's active subscription")]
        subscriptions: bool,
    },

    #[command(about = "Change a chatbot's monthly token limit")]
    SetLimit {
        #[arg(help = "Chatbot ID")]
        id: String,
        #[arg(help = "New token limit (whole number)")]
        limit: String,
    },

    #[command(about = "Show message history")]
    Messages {
        #[arg(help = "Chatbot ID")]
        id: String,
        #[arg(long = "export", help = "Write user/bot exchanges to this CSV file")]
        csv: Option<PathBuf>,
    },

    #[command(about = "Download a chatbot's PDF report")]
    Report {
        #[arg(help = "Chatbot ID")]
        id: String,
        #[arg(long, help = "Output file path")]
        output: Option<PathBuf>,
    },

    #[command(about = "Show or replace a chatbot's client widget config")]
    Config {
        #[arg(help = "Chatbot ID")]
        id: String,
        #[arg(long, help = "New config as a JSON object")]
        set: Option<String>,
    },
}

pub async fn handle<A: AdminApi>(
    cmd: ChatbotCommands,
    ctx: &mut AppContext<A>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.open(Route::Chatbots)?;
    let mut view = ChatbotsView::new();

    match cmd {
        ChatbotCommands::List { search, subscriptions } => {
            view.refresh(&ctx.api).await?;
            if subscriptions {
                view.load_subscriptions(&ctx.api).await;
            }

            let chatbots = view.search(search.as_deref().unwrap_or(""));
            if chatbots.is_empty() {
                return output_empty_collection(&output_format, "chatbots", "No chatbots found");
            }

            match output_format {
                OutputFormat::Json => {
                    let rows: Vec<Value> = chatbots
                        .iter()
                        .map(|bot| {
                            json!({
                                "chatbot": bot,
                                "remaining_tokens": bot.remaining_tokens().to_string(),
                                "subscription": view.subscription(&bot.id),
                            })
                        })
                        .collect();
                    output_json("chatbots", &rows)?;
                }
                OutputFormat::Text => {
                    println!(
                        "{:<8} {:<22} {:<18} {:>10} {:>12} {:>12} {:>9} {:>7}  {}",
                        "ID", "NAME", "COMPANY", "USED", "LIMIT", "REMAINING", "MESSAGES", "USERS", "PLAN"
                    );
                    println!("{}", "-".repeat(120));
                    for bot in chatbots {
                        let plan = match view.subscription(&bot.id) {
                            Some(sub) => match sub.end_date {
                                Some(end) => format!("{} (until {})", sub.name, end.format("%Y-%m-%d")),
                                None => sub.name.clone(),
                            },
                            None => "-".to_string(),
                        };
                        println!(
                            "{:<8} {:<22} {:<18} {:>10} {:>12} {:>12} {:>9} {:>7}  {}",
                            bot.id,
                            truncate(&bot.name, 22),
                            truncate(bot.company_name.as_deref().unwrap_or("-"), 18),
                            bot.used_tokens.unwrap_or(0),
                            bot.limit_display().to_string(),
                            bot.remaining_tokens().to_string(),
                            bot.total_messages.unwrap_or(0),
                            bot.unique_users.unwrap_or(0),
                            plan,
                        );
                    }
                }
            }
            Ok(())
        }
        ChatbotCommands::SetLimit { id, limit } => {
            let id = RecordId::from(id);
            view.refresh(&ctx.api).await?;
            view.begin_edit(&id)?;
            view.set_input(&limit)?;
            let applied = view.confirm_edit(&ctx.api).await?;

            let remaining = view
                .find(&id)
                .map(|bot| bot.remaining_tokens().to_string())
                .unwrap_or_else(|| "-".to_string());
            output_success(
                &output_format,
                &format!("Token limit for chatbot {} set to {} (remaining {})", id, applied, remaining),
                Some(json!({ "id": id, "token_limit": applied, "remaining_tokens": remaining })),
            )
        }
        ChatbotCommands::Messages { id, csv } => {
            let id = RecordId::from(id);
            let messages = view.messages(&ctx.api, &id).await?;

            if let Some(path) = csv {
                let rows = export::write_csv(&path, &messages)?;
                return output_success(
                    &output_format,
                    &format!("Exported {} exchanges to {}", rows, path.display()),
                    Some(json!({ "path": path, "rows": rows })),
                );
            }

            if messages.is_empty() {
                return output_empty_collection(&output_format, "messages", "No messages found.");
            }

            match output_format {
                OutputFormat::Json => output_json("messages", &messages)?,
                OutputFormat::Text => {
                    let plural = if messages.len() == 1 { "" } else { "s" };
                    println!("Showing {} message{}", messages.len(), plural);
                    for message in &messages {
                        println!("{}  {}: {}", message.timestamp.format("%Y-%m-%d %H:%M:%S"), message.sender, message.content);
                    }
                }
            }
            Ok(())
        }
        ChatbotCommands::Report { id, output } => {
            let id = RecordId::from(id);
            let bytes = view.report(&ctx.api, &id).await?;
            let path = output.unwrap_or_else(|| export::default_report_path(&id));
            export::write_report(&path, &bytes)?;

            output_success(
                &output_format,
                &format!("Report saved to {} ({} bytes)", path.display(), bytes.len()),
                Some(json!({ "path": path, "bytes": bytes.len() })),
            )
        }
        ChatbotCommands::Config { id, set } => {
            let id = RecordId::from(id);
            let config = match set {
                Some(raw) => {
                    let value: Value = serde_json::from_str(&raw)
                        .map_err(|e| anyhow::anyhow!("--set must be valid JSON: {}", e))?;
                    if !value.is_object() {
                        anyhow::bail!("--set must be a JSON object");
                    }
                    ctx.api.update_client_config(&id, &value).await?
                }
                None => ctx.api.client_config(&id).await?,
            };

            match output_format {
                OutputFormat::Json => output_json("config", &config)?,
                OutputFormat::Text => println!("{}", serde_json::to_string_pretty(&config)?),
            }
            Ok(())
        }
    }
}

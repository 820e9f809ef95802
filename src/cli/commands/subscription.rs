use clap::Subcommand;
use serde_json::json;

use crate::api::AdminApi;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::guard::Route;
use crate::types::{RecordId, Subscription};
use crate::views::subscriptions;

#[derive(Subcommand)]
pub enum SubscriptionCommands {
    #[command(about = "Show a chatbot's active subscription")]
    Show {
        #[arg(help = "Chatbot ID")]
        chatbot: String,
    },

    #[command(about = "Renew or change a chatbot's subscription")]
    Renew {
        #[arg(help = "Chatbot ID")]
        chatbot: String,
        #[arg(help = "Plan ID")]
        plan: String,
        #[arg(long, help = "Number of months", default_value = "1")]
        months: u32,
    },
}

fn print_subscription(output_format: &OutputFormat, chatbot: &RecordId, subscription: Option<&Subscription>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json("subscription", &subscription)?,
        OutputFormat::Text => match subscription {
            Some(sub) => {
                println!("Chatbot: {}", chatbot);
                println!("Plan: {} ({})", sub.name, sub.plan_id);
                if let Some(days) = sub.duration_days {
                    println!("Duration: {} days", days);
                }
                if let Some(users) = sub.max_users {
                    println!("Max users: {}", users);
                }
                if let Some(price) = sub.price {
                    println!("Price: {}", price);
                }
                if let Some(end) = sub.end_date {
                    println!("Ends: {}", end.format("%Y-%m-%d %H:%M UTC"));
                }
            }
            None => println!("Chatbot {} has no active subscription", chatbot),
        },
    }
    Ok(())
}

pub async fn handle<A: AdminApi>(
    cmd: SubscriptionCommands,
    ctx: &mut AppContext<A>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.open(Route::Chatbots)?;

    match cmd {
        SubscriptionCommands::Show { chatbot } => {
            let chatbot = RecordId::from(chatbot);
            let subscription = subscriptions::active_subscription(&ctx.api, &chatbot).await?;
            print_subscription(&output_format, &chatbot, subscription.as_ref())
        }
        SubscriptionCommands::Renew { chatbot, plan, months } => {
            let chatbot = RecordId::from(chatbot);
            let plan = RecordId::from(plan);
            let subscription = subscriptions::renew(&ctx.api, &chatbot, &plan, months).await?;

            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    "Subscription renewed",
                    Some(json!({ "chatbot": chatbot, "subscription": subscription })),
                ),
                OutputFormat::Text => {
                    output_success(&output_format, &format!("Renewed chatbot {} on plan {} for {} month(s)", chatbot, plan, months), None)?;
                    print_subscription(&output_format, &chatbot, subscription.as_ref())
                }
            }
        }
    }
}

use clap::Subcommand;

use crate::api::AdminApi;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::guard::Route;
use crate::views::PlansView;

#[derive(Subcommand)]
pub enum PlanCommands {
    #[command(about = "List the subscription plan catalogue")]
    List,
}

pub async fn handle<A: AdminApi>(
    cmd: PlanCommands,
    ctx: &mut AppContext<A>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.open(Route::Chatbots)?;

    match cmd {
        PlanCommands::List => {
            let mut view = PlansView::new();
            let plans = view.refresh(&ctx.api).await?;

            if plans.is_empty() {
                return output_empty_collection(&output_format, "plans", "No plans available");
            }

            match output_format {
                OutputFormat::Json => output_json("plans", &plans)?,
                OutputFormat::Text => {
                    println!("{:<10} {:<24} {:>8} {:>10} {:>10}", "ID", "NAME", "DAYS", "MAX USERS", "PRICE");
                    println!("{}", "-".repeat(66));
                    for plan in plans {
                        println!(
                            "{:<10} {:<24} {:>8} {:>10} {:>10}",
                            plan.id,
                            truncate(&plan.name, 24),
                            or_dash(plan.duration_days),
                            or_dash(plan.max_users),
                            or_dash(plan.price),
                        );
                    }
                }
            }
            Ok(())
        }
    }
}

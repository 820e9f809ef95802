use clap::Subcommand;
use serde_json::json;

use crate::api::AdminApi;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::guard::Route;
use crate::views::CompaniesView;

#[derive(Subcommand)]
pub enum CompanyCommands {
    #[command(about = "List companies")]
    List {
        #[arg(long, help = "Only companies whose name contains this text")]
        search: Option<String>,
    },

    #[command(about = "Create a company")]
    Create {
        #[arg(help = "Company name")]
        name: String,
        #[arg(help = "Company domain")]
        url: String,
    },
}

pub async fn handle<A: AdminApi>(
    cmd: CompanyCommands,
    ctx: &mut AppContext<A>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.open(Route::Companies)?;
    let mut view = CompaniesView::new();

    match cmd {
        CompanyCommands::List { search } => {
            view.refresh(&ctx.api).await?;
            let companies = view.search(search.as_deref().unwrap_or(""));

            if companies.is_empty() {
                return output_empty_collection(&output_format, "companies", "No companies found");
            }

            match output_format {
                OutputFormat::Json => output_json("companies", &companies)?,
                OutputFormat::Text => {
                    println!("{:<10} {:<30} {}", "ID", "NAME", "DOMAIN");
                    println!("{}", "-".repeat(70));
                    for company in companies {
                        println!("{:<10} {:<30} {}", company.id, truncate(&company.name, 30), company.url);
                    }
                }
            }
            Ok(())
        }
        CompanyCommands::Create { name, url } => {
            view.create(&ctx.api, &name, &url).await?;
            output_success(
                &output_format,
                &format!("Company '{}' added", name.trim()),
                Some(json!({ "companies": view.companies() })),
            )
        }
    }
}

use clap::Subcommand;
use serde_json::json;

use crate::api::AdminApi;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::guard::Route;
use crate::views::{AdminForm, AdminsView};

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "List admin accounts")]
    List,

    #[command(about = "Create an admin account")]
    Create {
        #[arg(help = "Admin name")]
        name: String,
        #[arg(help = "Admin email")]
        email: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Password confirmation (read from stdin if not provided)")]
        confirm_password: Option<String>,
    },
}

pub async fn handle<A: AdminApi>(
    cmd: AdminCommands,
    ctx: &mut AppContext<A>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.open(Route::AddAdmin)?;
    let mut view = AdminsView::new();

    match cmd {
        AdminCommands::List => {
            let admins = view.refresh(&ctx.api).await?;
            if admins.is_empty() {
                return output_empty_collection(&output_format, "admins", "No admins found.");
            }

            match output_format {
                OutputFormat::Json => output_json("admins", &admins)?,
                OutputFormat::Text => {
                    println!("{:<8} {:<24} {:<32} {}", "ID", "NAME", "EMAIL", "CREATED");
                    println!("{}", "-".repeat(84));
                    for admin in admins {
                        let created = admin
                            .created_at
                            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_else(|| "-".to_string());
                        println!("{:<8} {:<24} {:<32} {}", admin.id, truncate(&admin.name, 24), admin.email, created);
                    }
                }
            }
            Ok(())
        }
        AdminCommands::Create { name, email, password, confirm_password } => {
            let password = resolve_secret(password, "Password")?;
            let confirm_password = resolve_secret(confirm_password, "Confirm password")?;
            let form = AdminForm {
                name,
                email,
                password,
                confirm_password,
            };

            view.create(&ctx.api, &form).await?;
            output_success(
                &output_format,
                "Admin created successfully.",
                Some(json!({ "email": form.email.trim(), "admins": view.admins().len() })),
            )
        }
    }
}

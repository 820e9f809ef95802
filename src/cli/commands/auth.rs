use clap::Subcommand;
use serde_json::json;

use crate::api::AdminApi;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::guard::Route;
use crate::views::LoginFlow;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login with an admin account")]
    Login {
        #[arg(help = "Admin email")]
        email: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Clear the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle<A: AdminApi>(
    cmd: AuthCommands,
    ctx: &mut AppContext<A>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            ctx.open(Route::Login)?;
            let password = resolve_secret(password, "Password")?;

            let mut flow = LoginFlow::new();
            let route = flow.submit(ctx, &email, &password).await?;

            output_success(
                &output_format,
                "Login successful",
                Some(json!({ "email": email, "route": route.path() })),
            )
        }
        AuthCommands::Logout => {
            ctx.logout()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let authenticated = ctx.session.is_authenticated()?;
            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({
                        "authenticated": authenticated,
                    }))?);
                }
                OutputFormat::Text => {
                    if authenticated {
                        println!("Logged in");
                    } else {
                        println!("Not logged in");
                    }
                }
            }
            Ok(())
        }
    }
}

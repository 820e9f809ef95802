use crate::api::AdminApi;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::guard::Route;
use crate::views::OverviewView;

pub async fn handle<A: AdminApi>(ctx: &mut AppContext<A>, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.open(Route::Overview)?;

    let mut view = OverviewView::new();
    let stats = view.refresh(&ctx.api).await?;

    match output_format {
        OutputFormat::Json => output_json("stats", stats)?,
        OutputFormat::Text => {
            for (label, value) in stats.tiles() {
                println!("{:<18} {}", label, value);
            }
        }
    }

    Ok(())
}

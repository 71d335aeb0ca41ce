use anyhow::{Result, anyhow};
use colored::Colorize;

use remainders_core::RemaindersError;

use crate::commands::output;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let snapshot = ctx.session.snapshot().await;
    if snapshot.wallpaper_url.is_none() && ctx.session.generate().await.is_none() {
        return Err(RemaindersError::Incomplete(output::missing_fields(&snapshot)).into());
    }

    ctx.session
        .copy_url()
        .await
        .map_err(|e| anyhow!("Failed to copy URL: {}", e))?;

    let snapshot = ctx.session.snapshot().await;
    if snapshot.copied {
        println!("{}", "Copied!".bright_green());
    }
    if let Some(url) = snapshot.wallpaper_url {
        println!("{}", url);
    }
    Ok(())
}

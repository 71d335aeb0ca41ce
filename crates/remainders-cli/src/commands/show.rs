use anyhow::Result;

use crate::commands::output;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let snapshot = ctx.session.snapshot().await;
    output::print_snapshot(&snapshot);
    output::print_storage(&ctx.config);
    Ok(())
}

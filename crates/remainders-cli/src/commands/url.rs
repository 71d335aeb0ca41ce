use anyhow::Result;

use remainders_core::RemaindersError;

use crate::commands::output;
use crate::context::AppContext;

/// Prints the current URL, generating it when the stored one is stale.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let snapshot = ctx.session.snapshot().await;

    let url = match snapshot.wallpaper_url.clone() {
        Some(url) => url,
        None => match ctx.session.generate().await {
            Some(url) => url,
            None => {
                return Err(RemaindersError::Incomplete(output::missing_fields(&snapshot)).into());
            }
        },
    };

    println!("{}", url);
    Ok(())
}

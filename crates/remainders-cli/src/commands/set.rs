use anyhow::Result;

use remainders_core::device::DeviceProfile;
use remainders_core::profile::ViewMode;

use crate::commands::output;
use crate::context::AppContext;

pub struct DeviceArgs {
    pub brand: String,
    pub model: String,
    pub width: u32,
    pub height: u32,
}

pub struct Changes {
    pub mode: Option<ViewMode>,
    pub birth_date: Option<String>,
    pub device: Option<DeviceArgs>,
    pub clear_device: bool,
}

pub async fn run(ctx: &AppContext, changes: Changes) -> Result<()> {
    // Validate before touching the session so a bad device leaves nothing half-applied.
    let device = changes
        .device
        .map(|args| DeviceProfile::new(args.brand, args.model, args.width, args.height))
        .transpose()?;

    if let Some(mode) = changes.mode {
        ctx.session.set_view_mode(mode).await;
    }
    if let Some(birth_date) = changes.birth_date {
        ctx.session.set_birth_date(birth_date).await;
    }
    if changes.clear_device {
        ctx.session.select_device(None).await;
    } else if let Some(device) = device {
        ctx.session.select_device(Some(device)).await;
    }

    // Refresh the URL so it reflects this invocation's changes.
    ctx.session.generate().await;

    output::print_snapshot(&ctx.session.snapshot().await);
    Ok(())
}

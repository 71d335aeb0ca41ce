use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remainders_core::profile::ViewMode;

mod commands;
mod context;

use commands::input::parse_birth_date;
use context::{AppContext, GlobalOptions};

#[derive(Parser)]
#[command(name = "remainders")]
#[command(about = "Remainders - configure your time-remaining wallpaper and get its URL", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the saved profile and its wallpaper URL
    Show,
    /// Change the profile; changes apply in the order mode, birth date, device
    Set {
        /// View mode (year or life)
        #[arg(long)]
        mode: Option<ViewMode>,

        /// Birth date as YYYY-MM-DD (empty string clears it)
        #[arg(long, value_parser = parse_birth_date)]
        birth_date: Option<String>,

        /// Device brand
        #[arg(long, requires = "model")]
        brand: Option<String>,

        /// Device model name
        #[arg(long, requires_all = ["width", "height"], conflicts_with = "clear_device")]
        model: Option<String>,

        /// Screen width in pixels
        #[arg(long, requires = "model")]
        width: Option<u32>,

        /// Screen height in pixels
        #[arg(long, requires = "model")]
        height: Option<u32>,

        /// Forget the selected device
        #[arg(long)]
        clear_device: bool,
    },
    /// Print the wallpaper URL; fails when the profile is incomplete
    Url,
    /// Copy the wallpaper URL to the clipboard
    Copy,
    /// Start an interactive session
    Interactive,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.options.verbose);

    let ctx = AppContext::open(&cli.options).await?;

    let result = match cli.command {
        Commands::Show => commands::show::run(&ctx).await,
        Commands::Set {
            mode,
            birth_date,
            brand,
            model,
            width,
            height,
            clear_device,
        } => {
            let device = match (model, width, height) {
                (Some(model), Some(width), Some(height)) => Some(commands::set::DeviceArgs {
                    brand: brand.unwrap_or_default(),
                    model,
                    width,
                    height,
                }),
                _ => None,
            };
            let changes = commands::set::Changes {
                mode,
                birth_date,
                device,
                clear_device,
            };
            commands::set::run(&ctx, changes).await
        }
        Commands::Url => commands::url::run(&ctx).await,
        Commands::Copy => commands::copy::run(&ctx).await,
        Commands::Interactive => commands::interactive::run(&ctx).await,
    };

    ctx.session.shutdown();
    result
}

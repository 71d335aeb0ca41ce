//! Interactive REPL over one profile session.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::{Result, bail};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use remainders_core::device::DeviceProfile;
use remainders_core::profile::ViewMode;

use crate::commands::{input, output};
use crate::context::AppContext;

const COMMANDS: &[&str] = &[
    "mode", "birth", "device", "generate", "copy", "show", "help", "quit",
];

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Mode(ViewMode),
    Birth(String),
    Device(Option<DeviceProfile>),
    Generate,
    Copy,
    Show,
    Help,
    Quit,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            bail!("Empty command");
        };
        let args: Vec<&str> = words.collect();

        let parsed = match command {
            "mode" => match args.as_slice() {
                [mode] => Self::Mode(input::parse_view_mode(mode)?),
                _ => bail!("Usage: mode <year|life>"),
            },
            "birth" => match args.as_slice() {
                [] => Self::Birth(String::new()),
                [date] => Self::Birth(input::parse_birth_date(date).map_err(anyhow::Error::msg)?),
                _ => bail!("Usage: birth [YYYY-MM-DD]"),
            },
            "device" => Self::Device(input::parse_device(&args)?),
            "generate" => Self::Generate,
            "copy" => Self::Copy,
            "show" => Self::Show,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("Unknown command '{}'. Type 'help' for a list.", other),
        };
        Ok(parsed)
    }
}

/// Completion, highlighting and hints for command names.
#[derive(Clone)]
struct ReplHelper {
    commands: Vec<String>,
}

impl ReplHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let command = line.split_whitespace().next().unwrap_or_default();
        if self.commands.iter().any(|cmd| cmd == command) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.is_empty() || line.contains(' ') {
            return None;
        }

        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ReplHelper {}

fn print_help() {
    println!("{}", "Commands:".bright_yellow());
    println!("  mode <year|life>                         switch view mode");
    println!("  birth [YYYY-MM-DD]                       set or clear the birth date");
    println!("  device <width> <height> <brand|-> <model> select a device");
    println!("  device none                              forget the device");
    println!("  generate                                 regenerate the wallpaper URL");
    println!("  copy                                     copy the URL to the clipboard");
    println!("  show                                     show the profile");
    println!("  quit                                     exit");
}

async fn execute(ctx: &AppContext, command: ReplCommand) {
    let session = &ctx.session;

    match command {
        ReplCommand::Mode(mode) => {
            session.set_view_mode(mode).await;
            report_edit(ctx).await;
        }
        ReplCommand::Birth(date) => {
            session.set_birth_date(date).await;
            report_edit(ctx).await;
        }
        ReplCommand::Device(device) => {
            session.select_device(device).await;
            report_edit(ctx).await;
        }
        ReplCommand::Generate => match session.generate().await {
            Some(url) => println!("{}", url.bright_cyan()),
            None => {
                let snapshot = session.snapshot().await;
                println!(
                    "{}",
                    format!("Cannot generate: {}", output::missing_fields(&snapshot)).yellow()
                );
            }
        },
        ReplCommand::Copy => match session.copy_url().await {
            Ok(()) => println!("{}", "Copied!".bright_green()),
            Err(e) => println!("{}", format!("Copy failed: {}", e).red()),
        },
        ReplCommand::Show => {
            let snapshot = session.snapshot().await;
            output::print_snapshot(&snapshot);
            if snapshot.copied {
                println!("  {}", "Copied!".bright_green());
            }
        }
        ReplCommand::Help => print_help(),
        ReplCommand::Quit => {}
    }
}

/// One-line status after an edit.
async fn report_edit(ctx: &AppContext) {
    let snapshot = ctx.session.snapshot().await;

    match &snapshot.wallpaper_url {
        Some(url) => println!("{}", url.bright_cyan()),
        None if snapshot.can_generate => println!(
            "{}",
            "Profile changed. Type 'generate' to refresh the URL.".bright_black()
        ),
        None => println!(
            "{}",
            format!("Still incomplete: {}", output::missing_fields(&snapshot)).bright_black()
        ),
    }
}

pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    println!("{}", "=== Remainders ===".bright_magenta().bold());
    println!(
        "{}",
        "Type 'help' for commands, or 'quit' to exit.".bright_black()
    );
    output::print_snapshot(&ctx.session.snapshot().await);
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match ReplCommand::parse(trimmed) {
                    Ok(ReplCommand::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Ok(command) => execute(ctx, command).await,
                    Err(e) => println!("{}", e.to_string().red()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

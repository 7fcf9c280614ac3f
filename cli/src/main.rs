use std::io::Write;
use std::time::Duration;

use brewlog_cli::CliContext;
use brewlog_cli::commands;
use brewlog_cli::logging;
use brewlog_cli::readline;
use brewlog_core::context::{AppConfig, AppConfigExt, Language};
use clap::{Parser, Subcommand};

/// Guided pour-over brewing from the terminal
#[derive(Parser)]
#[command(version, about = "brewlog")]
struct Args {
    /// Recipe JSON to load on startup
    #[arg(short, long)]
    recipe: Option<String>,

    /// Override the tick interval in milliseconds (demo / fast-forward)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Brew log card language: en, zh-TW or ja
    #[arg(long, value_parser = commands::parse_language)]
    lang: Option<Language>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let mut config = AppConfig::load();
    if let Some(tick_ms) = args.tick_ms {
        config.tick_interval_ms = tick_ms.max(1);
        tracing::info!(
            tick_interval = ?Duration::from_millis(config.tick_interval_ms),
            "Tick interval overridden"
        );
    }
    if let Some(language) = args.lang {
        config.language = language;
    }
    let ctx = CliContext::new(config);

    if let Some(path) = &args.recipe {
        if let Err(err) = commands::load_recipe(path, &ctx).await {
            eprint!("{err}");
        }
    }

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(disable_version_flag = true)]
struct Repl {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a recipe and start a fresh session
    Load {
        #[arg(short, long)]
        path: String,
    },
    /// Start, pause or resume the brew
    #[command(visible_aliases = ["start", "pause"])]
    Toggle,
    Reset,
    /// Turn cues on or off; flips the current setting without an argument
    Sound { state: Option<Switch> },
    Status,
    Steps,
    /// Render and deliver the brew log image
    Export,
    Config,
    Exit,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Switch {
    On,
    Off,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting\n")?;
    args.insert(0, "brewlog".to_string());
    let cli = Repl::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Load { path }) => commands::load_recipe(path, ctx).await?,
        Some(Commands::Toggle) => commands::toggle(ctx).await?,
        Some(Commands::Reset) => commands::reset(ctx).await?,
        Some(Commands::Sound { state }) => {
            let enabled = state.map(|s| matches!(s, Switch::On));
            commands::set_sound(enabled, ctx).await?
        }
        Some(Commands::Status) => commands::show_status(ctx).await?,
        Some(Commands::Steps) => commands::list_steps(ctx).await?,
        Some(Commands::Export) => commands::export(ctx).await?,
        Some(Commands::Config) => commands::show_settings(ctx).await?,
        Some(Commands::Exit) => {
            commands::exit(ctx).await;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use brewlog_core::context::{AppConfig, AppConfigExt, Language};
use brewlog_core::recipe::load_recipe_file;
use brewlog_core::timer::{
    StepStatus, TimerState, format_digital_time, format_friendly_time, step_progress,
    step_remaining_secs, step_status, toggle_label,
};
use brewlog_snapshot::{ExportError, ExportReport};

use crate::CliContext;

const NO_RECIPE: &str = "No recipe loaded. Use `load --path <file>` first.\n";

pub async fn load_recipe(path: &str, ctx: &CliContext) -> Result<(), String> {
    let plan = load_recipe_file(Path::new(path)).map_err(|e| format!("{e:#}\n"))?;
    println!(
        "Loaded {} steps, {} total",
        plan.timeline.len(),
        format_friendly_time(plan.timeline.total_duration_secs())
    );
    ctx.start_brew(plan).await;
    Ok(())
}

fn print_state(state: &TimerState) {
    println!(
        "{} {} / {} [{}]",
        state.run_state,
        format_digital_time(state.elapsed_secs),
        format_digital_time(state.total_secs),
        toggle_label(state).as_str()
    );
}

pub async fn toggle(ctx: &CliContext) -> Result<(), String> {
    let brew = ctx.brew().await;
    let brew = brew.as_ref().ok_or(NO_RECIPE)?;
    let state = brew.session.toggle().await.map_err(|e| format!("{e}\n"))?;
    print_state(&state);
    Ok(())
}

pub async fn reset(ctx: &CliContext) -> Result<(), String> {
    let brew = ctx.brew().await;
    let brew = brew.as_ref().ok_or(NO_RECIPE)?;
    let state = brew.session.reset().await.map_err(|e| format!("{e}\n"))?;
    print_state(&state);
    Ok(())
}

pub async fn set_sound(enabled: Option<bool>, ctx: &CliContext) -> Result<(), String> {
    let brew = ctx.brew().await;
    let brew = brew.as_ref().ok_or(NO_RECIPE)?;
    let enabled = enabled.unwrap_or(!brew.session.state().sound_enabled);
    let state = brew
        .session
        .set_sound(enabled)
        .await
        .map_err(|e| format!("{e}\n"))?;
    println!("Sound {}", if state.sound_enabled { "on" } else { "off" });
    Ok(())
}

pub async fn show_status(ctx: &CliContext) -> Result<(), String> {
    let brew = ctx.brew().await;
    let brew = brew.as_ref().ok_or(NO_RECIPE)?;
    let state = brew.session.state();
    let timeline = brew.session.timeline();

    print_state(&state);
    match state.current_step.and_then(|i| timeline.step(i).map(|s| (i, s))) {
        Some((index, step)) => println!(
            "Step {}/{}: {} - {} left ({:.0}%)",
            index + 1,
            timeline.len(),
            step.action,
            format_digital_time(step_remaining_secs(&state, timeline)),
            step_progress(&state, timeline) * 100.0
        ),
        None if state.is_finished() => println!("Brew complete"),
        None => println!("Between steps"),
    }
    println!("Sound {}", if state.sound_enabled { "on" } else { "off" });
    Ok(())
}

pub async fn list_steps(ctx: &CliContext) -> Result<(), String> {
    let brew = ctx.brew().await;
    let brew = brew.as_ref().ok_or(NO_RECIPE)?;
    let state = brew.session.state();
    let timeline = brew.session.timeline();

    if timeline.is_empty() {
        println!("This recipe has no steps");
        return Ok(());
    }

    println!("{:<3} {:<4} {:<17} {:>8}  Action", "", "#", "Time", "Water");
    println!("{}", "-".repeat(60));
    for (index, step) in timeline.steps().iter().enumerate() {
        let marker = match step_status(&state, index) {
            StepStatus::Past => "✓",
            StepStatus::Current => ">",
            StepStatus::Upcoming => "",
        };
        let window = format!(
            "{} - {}",
            format_friendly_time(step.start_offset_secs),
            format_friendly_time(step.end_secs())
        );
        println!(
            "{:<3} {:<4} {:<17} {:>6}ml  {}",
            marker,
            index + 1,
            window,
            step.cumulative_water_ml,
            step.action
        );
    }
    Ok(())
}

/// Start an export in the background; the result is printed when it lands.
pub async fn export(ctx: &CliContext) -> Result<(), String> {
    let plan = ctx.plan().await.ok_or(NO_RECIPE)?;
    if ctx.exporter.is_busy() {
        println!("An export is already running");
        return Ok(());
    }

    let exporter = Arc::clone(&ctx.exporter);
    println!("Saving brew log...");
    tokio::spawn(async move {
        let result = exporter.export(&plan.timeline, &plan.metadata).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Export did not complete");
        }
        println!("\n{}", export_summary(&result));
    });
    Ok(())
}

/// The one line that ends a "Saving brew log..." in the console
pub fn export_summary(result: &Result<ExportReport, ExportError>) -> String {
    match result {
        Ok(report) => format!(
            "Brew log {} ({}x{}) {}",
            report.file_name, report.width, report.height, report.target
        ),
        Err(ExportError::Busy) => "An export is already running".to_string(),
        Err(e) => e
            .user_notice()
            .unwrap_or("Brew log not saved")
            .to_string(),
    }
}

/// `--lang` value parser
pub fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).ok_or_else(|| format!("unknown language `{code}` (en, zh-TW, ja)"))
}

pub async fn show_settings(ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.read().await;
    match AppConfig::config_path() {
        Ok(path) => println!("Config file: {}", path.display()),
        Err(e) => println!("Config file: unavailable ({e})"),
    }
    println!("Language: {:?}", config.language);
    println!("Tick interval: {}ms", config.tick_interval_ms);
    println!(
        "Audio: {} at volume {}",
        if config.audio.enabled { "on" } else { "off" },
        config.audio.volume
    );
    println!(
        "Export: {}-<millis>.png at {}x, downloads to {}",
        config.export.file_prefix,
        config.export.scale,
        config
            .export
            .download_dir
            .as_deref()
            .unwrap_or("the downloads folder")
    );
    if let Some(command) = &config.export.share_command {
        println!("Share command: {command}");
    }
    Ok(())
}

pub async fn exit(ctx: &CliContext) {
    ctx.close_brew().await;
    let mut stdout = std::io::stdout();
    if write!(stdout, "quitting...").and_then(|_| stdout.flush()).is_err() {
        tracing::debug!("stdout closed before exit");
    }
}

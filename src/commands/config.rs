use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use daybook_core::config::DaybookConfig;
use daybook_core::layout::ColumnStrategy;
use daybook_core::time_of_day::MINUTES_PER_DAY;
use owo_colors::OwoColorize;

use crate::render::parse_hex_color;

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Column layout for overlapping events: "sequential" or "packed"
    #[arg(long)]
    pub strategy: Option<String>,

    /// Length of timed events without an end time (e.g. "45m", "1h")
    #[arg(long)]
    pub duration: Option<String>,

    /// Color for events without a label (e.g. "#007aff")
    #[arg(long)]
    pub color: Option<String>,

    /// Event dots per day in the month view
    #[arg(long)]
    pub preview_limit: Option<usize>,
}

fn parse_strategy(input: &str) -> Result<ColumnStrategy> {
    match input.trim().to_lowercase().as_str() {
        "sequential" => Ok(ColumnStrategy::Sequential),
        "packed" => Ok(ColumnStrategy::Packed),
        _ => anyhow::bail!("Unknown strategy '{}'. Expected sequential or packed", input),
    }
}

fn strategy_name(strategy: ColumnStrategy) -> &'static str {
    match strategy {
        ColumnStrategy::Sequential => "sequential",
        ColumnStrategy::Packed => "packed",
    }
}

fn parse_default_duration(input: &str) -> Result<u32> {
    let std_dur = humantime::parse_duration(input)
        .map_err(|e| anyhow::anyhow!("Could not parse duration: \"{}\" ({})", input, e))?;
    let minutes = u32::try_from(std_dur.as_secs() / 60).context("Duration too large")?;

    if minutes == 0 || minutes >= MINUTES_PER_DAY {
        anyhow::bail!("Default duration must be between 1 minute and 24 hours, got \"{}\"", input);
    }
    Ok(minutes)
}

/// Apply the given settings to `config`. Returns whether anything was set.
fn apply(config: &mut DaybookConfig, args: ConfigArgs) -> Result<bool> {
    let mut changed = false;

    if let Some(strategy) = args.strategy {
        config.column_strategy = parse_strategy(&strategy)?;
        changed = true;
    }
    if let Some(duration) = args.duration {
        config.default_duration_minutes = parse_default_duration(&duration)?;
        changed = true;
    }
    if let Some(color) = args.color {
        if parse_hex_color(&color).is_none() {
            anyhow::bail!("Invalid color '{}'. Expected #rrggbb", color);
        }
        config.default_label_color = color.trim().to_string();
        changed = true;
    }
    if let Some(limit) = args.preview_limit {
        config.preview_limit = limit;
        changed = true;
    }

    Ok(changed)
}

/// Apply `args`, write `config_path` if anything changed, and describe the
/// resulting settings.
pub fn update(config_path: &Path, mut config: DaybookConfig, args: ConfigArgs) -> Result<String> {
    let mut lines = Vec::new();

    if apply(&mut config, args)? {
        config.save_to(config_path)?;
        lines.push(format!("  Saved {}", config_path.display()).green().to_string());
        lines.push(String::new());
    }

    lines.push("Paths".bold().to_string());
    lines.push(format!("  Config:  {}", config_path.display()));
    lines.push(format!("  Events:  {}", config.events_path().display()));
    lines.push(String::new());
    lines.push("Settings".bold().to_string());
    lines.push(format!("  column_strategy           {}", strategy_name(config.column_strategy)));
    lines.push(format!("  default_duration_minutes  {}", config.default_duration_minutes));
    lines.push(format!("  default_label_color       {}", config.default_label_color));
    lines.push(format!("  preview_limit             {}", config.preview_limit));

    Ok(lines.join("\n"))
}

pub fn run(config: &DaybookConfig, args: ConfigArgs) -> Result<()> {
    let config_path = DaybookConfig::config_path()?;
    println!("{}", update(&config_path, config.clone(), args)?);
    Ok(())
}

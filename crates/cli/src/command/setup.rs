use activity_pattern::{
    ClockMode, Intensity, PatternOptions, PlacementMode, Window, RECOMMENDED_VERSIONS,
};
use anyhow::{Context as AnyhowContext, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::path::Path;

use super::generate;
use crate::{print_stdout, resolve_today, JitterArgs};

/// Walk through the options interactively, then generate.
pub(crate) async fn setup(repo: &Path, jitter: &JitterArgs, quiet: bool) -> Result<()> {
    let theme = ColorfulTheme::default();
    let today = resolve_today(ClockMode::Local)?;
    let window = Window::current(today);
    print_stdout(&format!(
        "Current activity window: {} to {}\n",
        window.start, window.end
    ))?;

    let mut choices: Vec<String> = RECOMMENDED_VERSIONS
        .iter()
        .map(|v| format!("{:<10} {} ({})", v.message, v.description, v.visibility))
        .collect();
    choices.push("Custom...".to_string());
    let picked = Select::with_theme(&theme)
        .with_prompt("Choose a message")
        .items(&choices)
        .default(0)
        .interact()
        .context("Setup needs an interactive terminal")?;
    let message = match RECOMMENDED_VERSIONS.get(picked) {
        Some(version) => version.message.to_string(),
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Custom message")
            .interact_text()
            .context("Failed to read the message")?,
    };

    let levels: Vec<String> = Intensity::ALL
        .iter()
        .map(|level| format!("{level} ({} commits per active day)", level.commits_per_day()))
        .collect();
    let default_level = Intensity::ALL
        .iter()
        .position(|level| *level == Intensity::default())
        .unwrap_or(0);
    let level = Select::with_theme(&theme)
        .with_prompt("Choose an intensity")
        .items(&levels)
        .default(default_level)
        .interact()
        .context("Failed to read the intensity")?;

    let center = confirm(&theme, "Center the message in the window?", true)?;
    let force_replace = confirm(&theme, "Replace the existing history completely?", false)?;
    let keep_in_view = confirm(&theme, "Record a refresh schedule to keep it in view?", false)?;

    let options = PatternOptions {
        intensity: Intensity::ALL.get(level).copied().unwrap_or_default(),
        placement: if center {
            PlacementMode::Centered
        } else {
            PlacementMode::LeftAligned
        },
        force_replace,
        keep_in_view,
        jitter: jitter.mode(),
        ..PatternOptions::default()
    };

    print_stdout(&format!(
        "\nMessage: \"{}\", intensity {}, {}, force replace: {}, keep in view: {}\n",
        message.to_uppercase(),
        options.intensity,
        if center { "centered" } else { "left-aligned" },
        if force_replace { "yes" } else { "no" },
        if keep_in_view { "yes" } else { "no" }
    ))?;
    if !confirm(&theme, "Proceed with this setup?", true)? {
        return print_stdout("Setup cancelled.");
    }

    generate(repo, &message, options, quiet).await
}

fn confirm(theme: &ColorfulTheme, prompt: &str, default: bool) -> Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .with_context(|| format!("Failed to read answer to {prompt:?}"))
}

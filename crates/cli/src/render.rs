use activity_pattern::{ActivityPlan, PreviewGrid};
use activity_protocol::{placement_label, StatusReport, VersionsReport, WindowReport};
use console::style;

const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub(crate) fn board(preview: &PreviewGrid) -> String {
    let mut out = String::new();
    for (label, row) in DAY_LABELS.iter().zip(preview.rows()) {
        out.push_str(label);
        out.push_str(": ");
        for on in row {
            if *on {
                out.push_str(&style("█").green().to_string());
            } else {
                out.push_str(&style("·").dim().to_string());
            }
        }
        out.push('\n');
    }
    out
}

pub(crate) fn preview(plan: &ActivityPlan) -> String {
    let window = plan.window();
    let placement = plan.placement();
    let preview = plan.preview();

    let mut out = String::new();
    out.push_str(&format!(
        "Preview: \"{}\" ({} weeks wide)\n",
        style(plan.message()).bold(),
        plan.width()
    ));
    if let Some(version) = activity_pattern::lookup_recommended(plan.message().as_str()) {
        out.push_str(&format!(
            "  {} ({} visibility)\n",
            version.description, version.visibility
        ));
    }
    out.push_str(&format!("  Window:    {} to {}\n", window.start, window.end));
    out.push_str(&format!(
        "  Placement: {} from {} (offset {} weeks)\n",
        placement_label(placement.kind),
        placement.start_date,
        placement.offset_weeks
    ));
    out.push_str(&format!(
        "  Intensity: {} ({} commits per active day)\n",
        plan.options().intensity,
        plan.commits_per_day()
    ));
    out.push_str(&format!(
        "  Commits:   {} over {} days\n",
        plan.total_commits(),
        plan.active_days()
    ));
    if !plan.skipped().is_empty() {
        let skipped: String = plan.skipped().iter().collect();
        out.push_str(&format!(
            "  {} unsupported characters skipped: {:?}\n",
            style("!").yellow(),
            skipped
        ));
    }
    if preview.clipped_days() > 0 {
        out.push_str(&format!(
            "  {} {} active days fall outside the visible window\n",
            style("!").yellow(),
            preview.clipped_days()
        ));
    }
    out.push('\n');
    out.push_str(&board(&preview));

    if !plan.refresh_dates().is_empty() {
        out.push_str("\nRefresh schedule:\n");
        for date in plan.refresh_dates() {
            out.push_str(&format!("  - {date}\n"));
        }
    }
    out
}

pub(crate) fn window(report: &WindowReport) -> String {
    let mut out = String::new();
    out.push_str("Current activity window:\n");
    out.push_str(&format!("  Start: {}\n", report.start_date));
    out.push_str(&format!("  End:   {}\n", report.end_date));
    out.push_str(&format!("  Total weeks: {}\n", report.total_weeks));
    out.push_str(&format!(
        "  Current position: week {} of {}\n",
        report.current_week, report.total_weeks
    ));
    if report.rollover_warning {
        out.push_str(&format!(
            "  {} The window is close to rollover, consider refreshing patterns\n",
            style("!").yellow()
        ));
    }
    out
}

pub(crate) fn status(report: &StatusReport) -> String {
    let snapshot = &report.snapshot;
    let options = &snapshot.options;

    let mut out = String::new();
    out.push_str("Current configuration:\n");
    out.push_str(&format!("  Version: \"{}\"\n", snapshot.version));
    out.push_str(&format!("  Intensity: {}\n", options.intensity));
    out.push_str(&format!("  Commits per active day: {}\n", options.commits_per_day));
    out.push_str(&format!(
        "  Positioning: {}\n",
        if options.center_message {
            "centered"
        } else {
            "left-aligned"
        }
    ));
    out.push_str(&format!(
        "  Keep in view: {}\n",
        if options.keep_in_view { "yes" } else { "no" }
    ));
    out.push_str(&format!("  Message width: {} weeks\n", snapshot.message_width));
    out.push_str(&format!("  Created: {}\n", snapshot.created.date_naive()));
    out.push_str(&format!(
        "\nWindow when created: {} to {}\n",
        snapshot.window_info.start_date.date_naive(),
        snapshot.window_info.end_date.date_naive()
    ));

    if options.keep_in_view {
        out.push_str("\nRefresh schedule:\n");
        match (report.next_refresh, report.days_until_refresh) {
            (Some(next), Some(days)) if days > 0 => {
                out.push_str(&format!("  Next refresh: {next} (in {days} days)\n"));
            }
            _ => out.push_str(&format!(
                "  {} Refresh needed now, run `activity refresh`\n",
                style("!").yellow()
            )),
        }
    }

    out.push('\n');
    out.push_str(match report.working_tree_clean {
        Some(true) => "Repository is up to date\n",
        Some(false) => "Uncommitted changes detected\n",
        None => "Not a git repository\n",
    });
    out
}

pub(crate) fn versions(report: &VersionsReport) -> String {
    let mut out = String::new();
    out.push_str("Recommended versions:\n");
    for version in &report.versions {
        out.push_str(&format!(
            "  {:<10} {:>2} weeks  {:<11}  {}\n",
            version.message, version.width, version.visibility, version.description
        ));
    }
    out.push_str(&format!(
        "\nMaximum width: {} weeks\n\nIntensity levels:\n",
        report.max_width
    ));
    for level in &report.intensities {
        out.push_str(&format!(
            "  {:<8} {:>2} commits per active day{}\n",
            level.name,
            level.commits_per_day,
            if level.default { " (default)" } else { "" }
        ));
    }
    out
}

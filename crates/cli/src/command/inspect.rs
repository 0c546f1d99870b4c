use activity_pattern::{ActivityPlan, ClockMode, Window};
use activity_protocol::{
    load_snapshot, serialize_json_pretty, PreviewReport, StatusReport, VersionsReport,
    WindowReport,
};
use activity_writer::Git;
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;

use crate::{clock_for, print_stdout, render, resolve_today, PatternArgs};

pub(crate) fn preview(args: &PatternArgs, json: bool) -> Result<()> {
    let options = args.options();
    let today = resolve_today(options.clock)?;
    let plan = ActivityPlan::build(&args.message, options, today)
        .with_context(|| format!("Failed to plan \"{}\"", args.message.trim()))?;

    if json {
        return print_stdout(&serialize_json_pretty(&PreviewReport::from_plan(&plan))?);
    }
    print_stdout(render::preview(&plan).trim_end())
}

pub(crate) async fn status(repo: &Path, json: bool) -> Result<()> {
    let snapshot = load_snapshot(repo).context("Failed to load pattern configuration")?;
    let today = resolve_today(clock_for(snapshot.options.use_utc))?;
    let clean = Git::new(repo).is_clean().await;
    let report = StatusReport::new(snapshot, today, clean);

    if json {
        return print_stdout(&serialize_json_pretty(&report)?);
    }
    print_stdout(render::status(&report).trim_end())
}

pub(crate) fn window(clock: ClockMode, json: bool) -> Result<()> {
    let today = resolve_today(clock)?;
    let report = WindowReport::new(Window::current(today), today);

    if json {
        return print_stdout(&serialize_json_pretty(&report)?);
    }
    print_stdout(render::window(&report).trim_end())
}

pub(crate) fn versions(json: bool) -> Result<()> {
    let report = VersionsReport::catalog();
    if json {
        return print_stdout(&serialize_json_pretty(&report)?);
    }
    print_stdout(render::versions(&report).trim_end())
}

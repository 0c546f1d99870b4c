use activity_pattern::{ActivityPlan, PatternOptions, PlacementMode};
use activity_protocol::{load_snapshot, save_snapshot, ConfigSnapshot, SNAPSHOT_FILE};
use activity_writer::{
    write_support_files, CancelToken, CommitRunner, Git, GitCommitWriter, HistoryReplacement,
};
use anyhow::{Context as AnyhowContext, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tokio::task::JoinHandle;

use crate::{print_stdout, render, resolve_today, JitterArgs, PatternArgs};

pub(crate) async fn create(repo: &Path, args: &PatternArgs, quiet: bool) -> Result<()> {
    generate(repo, &args.message, args.options(), quiet).await
}

pub(crate) async fn replace(repo: &Path, args: &PatternArgs, quiet: bool) -> Result<()> {
    let options = PatternOptions {
        force_replace: true,
        placement: PlacementMode::Centered,
        ..args.options()
    };
    generate(repo, &args.message, options, quiet).await
}

pub(crate) async fn refresh(
    repo: &Path,
    dry_run: bool,
    jitter: &JitterArgs,
    quiet: bool,
) -> Result<()> {
    let snapshot = load_snapshot(repo).context("Failed to load pattern configuration")?;
    let saved = snapshot
        .options
        .to_options()
        .context("Failed to read pattern configuration")?;
    log::info!("Refreshing \"{}\"", snapshot.version);

    let options = PatternOptions {
        force_replace: true,
        placement: PlacementMode::Centered,
        start_date: None,
        dry_run,
        jitter: jitter.mode(),
        ..saved
    };
    generate(repo, &snapshot.version, options, quiet).await
}

/// Plan, then write files and commits. Nothing touches the repository until
/// the plan is valid, and the snapshot is only saved once every commit exists.
pub(crate) async fn generate(
    repo: &Path,
    message: &str,
    options: PatternOptions,
    quiet: bool,
) -> Result<()> {
    let clock = options.clock;
    let today = resolve_today(clock)?;
    let plan = ActivityPlan::build(message, options, today)
        .with_context(|| format!("Failed to plan \"{}\"", message.trim()))?;
    for ch in plan.skipped() {
        log::warn!("Skipped unsupported character {ch:?}");
    }
    print_stdout(&render::preview(&plan))?;

    if plan.options().dry_run {
        return print_stdout(&format!(
            "Dry run: {} commits would be written to {}",
            plan.total_commits(),
            repo.display()
        ));
    }

    tokio::fs::create_dir_all(repo)
        .await
        .with_context(|| format!("Failed to create {}", repo.display()))?;
    let git = Git::new(repo);
    git.ensure_repo()
        .await
        .context("Failed to initialize git repository")?;
    write_support_files(repo, &plan, &[SNAPSHOT_FILE])
        .await
        .context("Failed to write support files")?;

    let replacement = if plan.options().force_replace {
        HistoryReplacement::begin(&git)
            .await
            .context("Failed to start history replacement")?
    } else {
        None
    };

    let mut jitter = plan.options().jitter.build();
    let commits = plan.schedule(jitter.as_mut());

    let cancel = CancelToken::new();
    let watcher = watch_interrupt(cancel.clone());
    let progress = progress_bar(commits.len() as u64, quiet);
    let mut runner = CommitRunner::new(
        GitCommitWriter::new(git.clone()),
        plan.message().as_str(),
        cancel,
    );
    let result = runner
        .run(&commits, |p| progress.set_position(p.done as u64))
        .await;
    watcher.abort();
    progress.finish_and_clear();

    let summary = match result {
        Ok(summary) if !summary.cancelled => summary,
        Ok(summary) => {
            keep_original_notice(replacement.as_ref());
            anyhow::bail!(
                "Interrupted after {} of {} commits",
                summary.created,
                summary.total
            );
        }
        Err(err) => {
            keep_original_notice(replacement.as_ref());
            return Err(err).context("Failed to write commits");
        }
    };

    let replaced = replacement.is_some();
    let branch = match replacement {
        Some(replacement) => Some(
            replacement
                .finish()
                .await
                .context("Failed to replace history")?,
        ),
        None => git.current_branch().await.ok().flatten(),
    };
    save_snapshot(repo, &ConfigSnapshot::from_plan(&plan, clock.now()))
        .context("Failed to save pattern configuration")?;
    let has_remote = git
        .run(&["remote"])
        .await
        .map(|out| !out.is_empty())
        .unwrap_or(false);

    let mut out = format!(
        "Created {} commits for \"{}\" in {}\n",
        summary.created,
        plan.message(),
        repo.display()
    );
    if let Some(next) = plan.refresh_dates().first() {
        out.push_str(&format!(
            "Next refresh: {next} (run `activity refresh`)\n"
        ));
    }
    let branch = branch.unwrap_or_else(|| "main".to_string());
    out.push_str("\nNext steps:\n");
    if !has_remote {
        out.push_str("  git remote add origin <URL>\n");
    }
    if replaced {
        out.push_str(&format!("  git push -f origin {branch}\n"));
    } else {
        out.push_str(&format!("  git push -u origin {branch}\n"));
    }
    print_stdout(out.trim_end())
}

fn keep_original_notice(replacement: Option<&HistoryReplacement>) {
    if let Some(replacement) = replacement {
        log::warn!(
            "Original history is still on branch {}; the new commits are on the checked-out orphan branch",
            replacement.original_branch()
        );
    }
}

fn watch_interrupt(cancel: CancelToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, stopping after the current commit");
            cancel.cancel();
        }
    })
}

fn progress_bar(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.green/dim}] {pos}/{len} commits ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░"),
    );
    bar
}

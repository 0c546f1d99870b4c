use activity_pattern::{ActivityPlan, ClockMode, EvenJitter, PatternOptions};
use activity_writer::{
    write_support_files, CancelToken, CommitRunner, Git, GitCommitWriter, HistoryReplacement,
    ACTIVITY_LOG_FILE,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::path::Path;
use tokio::process::Command;

async fn git_ok(repo: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .await
        .expect("git command");
    assert!(out.status.success(), "git {:?} failed", args);
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

async fn init_repo(repo: &Path) -> Git {
    git_ok(repo, &["init", "-q"]).await;
    git_ok(repo, &["config", "user.email", "test@example.com"]).await;
    git_ok(repo, &["config", "user.name", "Test"]).await;
    Git::new(repo)
}

fn plan(message: &str, commits_per_day: u32) -> ActivityPlan {
    let options = PatternOptions {
        clock: ClockMode::Utc,
        commits_per_day: Some(commits_per_day),
        ..PatternOptions::default()
    };
    let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
    ActivityPlan::build(message, options, today).unwrap()
}

async fn draw(git: &Git, plan: &ActivityPlan) -> usize {
    let commits = plan.schedule(&mut EvenJitter);
    let mut runner = CommitRunner::new(
        GitCommitWriter::new(git.clone()),
        plan.message().as_str(),
        CancelToken::new(),
    );
    runner.run(&commits, |_| {}).await.expect("run").created
}

#[tokio::test]
async fn commits_carry_the_scheduled_dates() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let repo = dir.path();
    let git = init_repo(repo).await;

    let plan = plan("I", 1);
    write_support_files(repo, &plan, &[]).await.expect("files");
    let created = draw(&git, &plan).await;
    assert_eq!(created, 15);
    assert_eq!(git.commit_count().await.unwrap(), 15);

    let log = git_ok(repo, &["log", "--reverse", "--format=%ad|%cd|%s", "--date=short"]).await;
    let expected: Vec<_> = plan
        .schedule(&mut EvenJitter)
        .iter()
        .map(|c| {
            let day = c.at.date_naive();
            format!("{day}|{day}|I: activity {}", c.sequence)
        })
        .collect();
    assert_eq!(log.lines().collect::<Vec<_>>(), expected);

    let activity = std::fs::read_to_string(repo.join(ACTIVITY_LOG_FILE)).unwrap();
    let lines: Vec<_> = activity.lines().collect();
    assert_eq!(lines.len(), 15);
    assert!(lines[0].starts_with("I: "));
    assert!(lines[0].ends_with("| Commit 1"));
    assert_eq!(git.is_clean().await, Some(true));
}

#[tokio::test]
async fn replacement_swaps_history_but_keeps_the_log() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let repo = dir.path();
    let git = init_repo(repo).await;

    draw(&git, &plan("I", 1)).await;
    let branch = git.current_branch().await.unwrap().expect("branch");

    let replacement = HistoryReplacement::begin(&git)
        .await
        .expect("begin")
        .expect("history to replace");
    assert_eq!(replacement.original_branch(), branch);
    let created = draw(&git, &plan("L", 1)).await;
    assert_eq!(replacement.finish().await.expect("finish"), branch);

    assert_eq!(git.current_branch().await.unwrap(), Some(branch.clone()));
    assert_eq!(git.commit_count().await.unwrap(), created);
    let subjects = git_ok(repo, &["log", "--format=%s"]).await;
    assert!(subjects.lines().all(|s| s.starts_with("L: ")));

    let branches = git_ok(repo, &["branch", "--format=%(refname:short)"]).await;
    assert_eq!(branches, branch);

    let activity = std::fs::read_to_string(repo.join(ACTIVITY_LOG_FILE)).unwrap();
    assert_eq!(activity.lines().count(), 15 + created);
}

#[tokio::test]
async fn nothing_to_replace_in_a_fresh_repo() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let git = init_repo(dir.path()).await;
    assert!(HistoryReplacement::begin(&git).await.unwrap().is_none());
}

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::fmt;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

use crate::error::{Result, WriterError};
use crate::git::Git;

/// Append-only file that receives one line per commit
pub const ACTIVITY_LOG_FILE: &str = "activity-log.txt";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(pub String);

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One backdated commit to be written
#[derive(Debug, Clone, Copy)]
pub struct ActivityCommit<'a> {
    /// The message being drawn, e.g. `AI`
    pub label: &'a str,
    pub at: DateTime<FixedOffset>,
    /// 1-based position in the run
    pub sequence: usize,
}

impl ActivityCommit<'_> {
    pub fn message(&self) -> String {
        format!("{}: activity {}", self.label, self.sequence)
    }

    pub fn log_line(&self) -> String {
        format!(
            "{}: {} | Commit {}",
            self.label,
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.sequence
        )
    }
}

/// Anything that can record a commit at a given time
#[async_trait]
pub trait CommitWriter: Send {
    async fn create(&mut self, commit: &ActivityCommit<'_>) -> Result<CommitId>;
}

/// Writes commits into a real repository through the `git` binary.
pub struct GitCommitWriter {
    git: Git,
    log_path: PathBuf,
}

impl GitCommitWriter {
    pub fn new(git: Git) -> Self {
        let log_path = git.repo().join(ACTIVITY_LOG_FILE);
        Self { git, log_path }
    }

    async fn append_log(&self, line: &str) -> Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await
            .map_err(|err| WriterError::io(&self.log_path, err))?;
        file.write_all(format!("{line}\n").as_bytes())
            .await
            .map_err(|err| WriterError::io(&self.log_path, err))?;
        file.flush()
            .await
            .map_err(|err| WriterError::io(&self.log_path, err))
    }
}

#[async_trait]
impl CommitWriter for GitCommitWriter {
    async fn create(&mut self, commit: &ActivityCommit<'_>) -> Result<CommitId> {
        self.append_log(&commit.log_line()).await?;
        self.git.run(&["add", "."]).await?;

        let date = commit.at.to_rfc3339_opts(SecondsFormat::Secs, false);
        let message = commit.message();
        self.git
            .run_with_env(
                &["commit", "-q", "-m", message.as_str(), "--date", date.as_str()],
                &[("GIT_COMMITTER_DATE", date.as_str())],
            )
            .await?;

        Ok(CommitId(self.git.head().await?))
    }
}

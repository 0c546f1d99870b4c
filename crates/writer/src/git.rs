use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::error::{Result, WriterError};

/// Thin async wrapper around the `git` binary, always run with `-C <repo>`.
#[derive(Debug, Clone)]
pub struct Git {
    repo: PathBuf,
}

impl Git {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Run `git <args>` and return trimmed stdout.
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        self.run_with_env(args, &[]).await
    }

    pub async fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        log::trace!("{command}");

        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.repo).args(args);
        for (key, value) in env {
            cmd.env(key, value);
        }
        let output = cmd.output().await.map_err(|source| WriterError::Spawn {
            command: command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(WriterError::CommandFailed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run a probe; any failure counts as `false`.
    async fn check(&self, args: &[&str]) -> bool {
        self.run(args).await.is_ok()
    }

    pub async fn is_repo(&self) -> bool {
        self.check(&["rev-parse", "--is-inside-work-tree"]).await
    }

    pub async fn init(&self) -> Result<()> {
        self.run(&["init", "-q"]).await?;
        log::info!("Initialized git repository in {}", self.repo.display());
        Ok(())
    }

    /// Initialize the repository unless one already exists. Returns whether
    /// `git init` ran.
    pub async fn ensure_repo(&self) -> Result<bool> {
        if self.is_repo().await {
            return Ok(false);
        }
        self.init().await?;
        Ok(true)
    }

    pub async fn has_commits(&self) -> bool {
        self.check(&["rev-parse", "--verify", "-q", "HEAD"]).await
    }

    /// Name of the checked-out branch; `None` on a detached HEAD.
    pub async fn current_branch(&self) -> Result<Option<String>> {
        match self.run(&["symbolic-ref", "--short", "-q", "HEAD"]).await {
            Ok(name) if !name.is_empty() => Ok(Some(name)),
            Ok(_) => Ok(None),
            Err(WriterError::CommandFailed { code: Some(1), .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn head(&self) -> Result<String> {
        self.run(&["rev-parse", "HEAD"]).await
    }

    pub async fn commit_count(&self) -> Result<usize> {
        if !self.has_commits().await {
            return Ok(0);
        }
        let raw = self.run(&["rev-list", "--count", "HEAD"]).await?;
        Ok(raw.parse().unwrap_or(0))
    }

    /// `Some(true)` for a clean work tree, `None` outside a repository.
    pub async fn is_clean(&self) -> Option<bool> {
        if !self.is_repo().await {
            return None;
        }
        self.run(&["status", "--porcelain"])
            .await
            .ok()
            .map(|out| out.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plain_directory_is_not_a_repo() {
        let dir = tempfile::TempDir::new().unwrap();
        let git = Git::new(dir.path());
        assert!(!git.is_repo().await);
        assert_eq!(git.is_clean().await, None);
        assert_eq!(git.commit_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn ensure_repo_runs_init_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let git = Git::new(dir.path());
        assert!(git.ensure_repo().await.unwrap());
        assert!(!git.ensure_repo().await.unwrap());
        assert!(git.is_repo().await);
        assert!(!git.has_commits().await);
        assert!(git.current_branch().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn failing_command_keeps_stderr() {
        let dir = tempfile::TempDir::new().unwrap();
        let git = Git::new(dir.path());
        git.init().await.unwrap();
        let err = git.run(&["rev-parse", "--verify", "nope"]).await.unwrap_err();
        match err {
            WriterError::CommandFailed { command, code, .. } => {
                assert_eq!(command, "git rev-parse --verify nope");
                assert_ne!(code, Some(0));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

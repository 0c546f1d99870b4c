use crate::error::Result;
use crate::git::Git;

const REWRITE_BRANCH: &str = "activity-pattern-rewrite";

/// Rebuilds history on an orphan branch that takes over the original
/// branch name once the new commits are in place.
///
/// Working files are never touched: only the index is cleared, so the
/// activity log keeps growing across replacements.
#[derive(Debug)]
pub struct HistoryReplacement {
    git: Git,
    original_branch: String,
}

impl HistoryReplacement {
    /// Switch to a fresh orphan branch. Returns `None` when there is no
    /// history to replace (unborn branch) or HEAD is detached.
    pub async fn begin(git: &Git) -> Result<Option<Self>> {
        if !git.has_commits().await {
            log::debug!("No existing history, nothing to replace");
            return Ok(None);
        }
        let Some(original_branch) = git.current_branch().await? else {
            log::warn!("HEAD is detached; appending instead of replacing history");
            return Ok(None);
        };

        // A leftover from an interrupted replacement would block the checkout.
        if git
            .run(&["rev-parse", "--verify", "-q", REWRITE_BRANCH])
            .await
            .is_ok()
        {
            git.run(&["branch", "-D", REWRITE_BRANCH]).await?;
        }

        git.run(&["checkout", "-q", "--orphan", REWRITE_BRANCH]).await?;
        git.run(&["rm", "-r", "-q", "--cached", "--ignore-unmatch", "."])
            .await?;
        log::info!("Replacing history of branch {original_branch}");

        Ok(Some(Self {
            git: git.clone(),
            original_branch,
        }))
    }

    pub fn original_branch(&self) -> &str {
        &self.original_branch
    }

    /// Drop the old branch and give its name to the rewritten history.
    pub async fn finish(self) -> Result<String> {
        if !self.git.has_commits().await {
            log::warn!(
                "No commits were written; restoring branch {}",
                self.original_branch
            );
            let target = format!("refs/heads/{}", self.original_branch);
            self.git
                .run(&["symbolic-ref", "HEAD", target.as_str()])
                .await?;
            self.git.run(&["reset", "-q"]).await?;
            return Ok(self.original_branch);
        }
        self.git
            .run(&["branch", "-D", self.original_branch.as_str()])
            .await?;
        self.git
            .run(&["branch", "-m", self.original_branch.as_str()])
            .await?;
        log::info!("History of {} replaced", self.original_branch);
        Ok(self.original_branch)
    }
}

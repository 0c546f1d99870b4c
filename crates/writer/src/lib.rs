//! Repository side of activity generation: backdated commits through the
//! `git` binary, history replacement and the auxiliary files kept next to
//! the activity log.
//!
//! ## Architecture
//!
//! ```text
//! [ScheduledCommit] ──> CommitRunner ──(batches, CancelToken)──> CommitWriter
//!                                                                   │
//!                                            GitCommitWriter ───────┘
//!                                              ├─ append activity-log.txt
//!                                              ├─ git add .
//!                                              └─ git commit --date (+ GIT_COMMITTER_DATE)
//!
//! HistoryReplacement: orphan branch ─> commits ─> takes over the branch name
//! ```

mod commit;
mod error;
mod files;
mod git;
mod replace;
mod runner;

pub use commit::{ActivityCommit, CommitId, CommitWriter, GitCommitWriter, ACTIVITY_LOG_FILE};
pub use error::{Result, WriterError};
pub use files::{
    render_pattern_doc, write_support_files, GITIGNORE_FILE, PATTERN_DOC_FILE, README_FILE,
};
pub use git::Git;
pub use replace::HistoryReplacement;
pub use runner::{CancelToken, CommitRunner, Progress, RunSummary, DEFAULT_BATCH_SIZE};

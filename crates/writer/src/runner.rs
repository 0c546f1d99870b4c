use activity_pattern::ScheduledCommit;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::commit::{ActivityCommit, CommitId, CommitWriter};
use crate::error::{Result, WriterError};

/// Commits per progress update
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Shared stop flag, set from a signal handler and polled between commits.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub created: usize,
    pub total: usize,
    /// Stopped early by the cancel token
    pub cancelled: bool,
    pub last_commit: Option<CommitId>,
}

/// Feeds a schedule to a [`CommitWriter`] one commit at a time.
pub struct CommitRunner<W> {
    writer: W,
    label: String,
    batch_size: usize,
    cancel: CancelToken,
}

impl<W: CommitWriter> CommitRunner<W> {
    pub fn new(writer: W, label: impl Into<String>, cancel: CancelToken) -> Self {
        Self {
            writer,
            label: label.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            cancel,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write every commit in order. Progress is reported after each batch and
    /// once at the end. A cancelled run returns normally with what was
    /// created; a failed commit aborts with the number already written.
    pub async fn run(
        &mut self,
        commits: &[ScheduledCommit],
        mut on_progress: impl FnMut(Progress),
    ) -> Result<RunSummary> {
        let total = commits.len();
        let mut created = 0usize;
        let mut last_commit = None;
        let mut cancelled = false;

        log::info!("Writing {total} commits for \"{}\"", self.label);

        for batch in commits.chunks(self.batch_size) {
            for scheduled in batch {
                if self.cancel.is_cancelled() {
                    cancelled = true;
                    break;
                }
                let commit = ActivityCommit {
                    label: &self.label,
                    at: scheduled.at,
                    sequence: scheduled.sequence,
                };
                match self.writer.create(&commit).await {
                    Ok(id) => {
                        created += 1;
                        last_commit = Some(id);
                    }
                    Err(err) => {
                        log::error!("Commit {} failed: {err}", scheduled.sequence);
                        return Err(WriterError::Aborted {
                            created,
                            source: Box::new(err),
                        });
                    }
                }
            }
            on_progress(Progress {
                done: created,
                total,
            });
            if cancelled {
                log::warn!("Interrupted after {created} of {total} commits");
                break;
            }
            log::debug!("Batch done: {created}/{total}");
        }

        Ok(RunSummary {
            created,
            total,
            cancelled,
            last_commit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_pattern::{ClockMode, CommitScheduler, EvenJitter, GridComposer, Message};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingWriter {
        messages: Vec<String>,
        fail_at: Option<usize>,
        cancel_at: Option<(usize, CancelToken)>,
    }

    #[async_trait]
    impl CommitWriter for RecordingWriter {
        async fn create(&mut self, commit: &ActivityCommit<'_>) -> Result<CommitId> {
            if self.fail_at == Some(commit.sequence) {
                return Err(WriterError::CommandFailed {
                    command: "git commit".to_string(),
                    code: Some(128),
                    stderr: "boom".to_string(),
                });
            }
            self.messages.push(commit.message());
            if let Some((at, token)) = &self.cancel_at {
                if *at == commit.sequence {
                    token.cancel();
                }
            }
            Ok(CommitId(format!("c{}", commit.sequence)))
        }
    }

    fn schedule() -> Vec<ScheduledCommit> {
        let grid = GridComposer::default().compose(&Message::new("L")).grid;
        let start = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        CommitScheduler::new(25, ClockMode::Utc)
            .unwrap()
            .schedule(&grid, start, &mut EvenJitter)
    }

    #[tokio::test]
    async fn writes_in_order_and_reports_batches() {
        let commits = schedule();
        let total = commits.len();
        assert_eq!(total, 11 * 25);

        let mut runner = CommitRunner::new(RecordingWriter::default(), "L", CancelToken::new());
        let mut seen = Vec::new();
        let summary = runner.run(&commits, |p| seen.push(p.done)).await.unwrap();

        assert_eq!(summary.created, total);
        assert!(!summary.cancelled);
        assert_eq!(summary.last_commit, Some(CommitId(format!("c{total}"))));
        assert_eq!(seen, vec![100, 200, total]);

        let writer = runner.into_writer();
        assert_eq!(writer.messages[0], "L: activity 1");
        assert_eq!(writer.messages[total - 1], format!("L: activity {total}"));
    }

    #[tokio::test]
    async fn cancel_stops_before_the_next_commit() {
        let commits = schedule();
        let token = CancelToken::new();
        let writer = RecordingWriter {
            cancel_at: Some((42, token.clone())),
            ..RecordingWriter::default()
        };
        let mut runner = CommitRunner::new(writer, "L", token).with_batch_size(10);
        let mut last = None;
        let summary = runner.run(&commits, |p| last = Some(p)).await.unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.created, 42);
        assert_eq!(last.map(|p| p.done), Some(42));
        assert_eq!(runner.into_writer().messages.len(), 42);
    }

    #[tokio::test]
    async fn failure_aborts_with_partial_count() {
        let commits = schedule();
        let writer = RecordingWriter {
            fail_at: Some(7),
            ..RecordingWriter::default()
        };
        let mut runner = CommitRunner::new(writer, "L", CancelToken::new());
        let err = runner.run(&commits, |_| {}).await.unwrap_err();
        match &err {
            WriterError::Aborted { created, .. } => assert_eq!(*created, 6),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(err.root(), WriterError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn empty_schedule_is_a_no_op() {
        let mut runner = CommitRunner::new(RecordingWriter::default(), "L", CancelToken::new());
        let summary = runner.run(&[], |_| panic!("no progress expected")).await.unwrap();
        assert_eq!(summary.created, 0);
        assert_eq!(summary.last_commit, None);
    }
}

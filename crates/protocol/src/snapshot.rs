use activity_pattern::{ActivityPlan, ClockMode, Intensity, JitterMode, PatternOptions, PlacementMode};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ProtocolError, Result};

/// Snapshot file name, relative to the repository root
pub const SNAPSHOT_FILE: &str = ".activity-pattern.json";

/// Effective options of the run that produced a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotOptions {
    pub intensity: String,
    pub commits_per_day: u32,
    pub center_message: bool,
    pub force_replace: bool,
    pub keep_in_view: bool,
    pub use_utc: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl SnapshotOptions {
    pub fn from_options(options: &PatternOptions) -> Self {
        Self {
            intensity: options.intensity.as_str().to_string(),
            commits_per_day: options.effective_commits_per_day(),
            center_message: options.placement == PlacementMode::Centered,
            force_replace: options.force_replace,
            keep_in_view: options.keep_in_view,
            use_utc: options.clock == ClockMode::Utc,
            start_date: options.start_date,
        }
    }

    /// Rebuild engine options. A commit count that differs from the
    /// intensity's own level is restored as an explicit override.
    pub fn to_options(&self) -> Result<PatternOptions> {
        let intensity: Intensity = self
            .intensity
            .parse()
            .map_err(|err| ProtocolError::InvalidSnapshot(format!("{err}")))?;
        if self.commits_per_day == 0 {
            return Err(ProtocolError::InvalidSnapshot(
                "commitsPerDay must be at least 1".to_string(),
            ));
        }
        let commits_per_day =
            (self.commits_per_day != intensity.commits_per_day()).then_some(self.commits_per_day);

        Ok(PatternOptions {
            intensity,
            commits_per_day,
            placement: if self.center_message {
                PlacementMode::Centered
            } else {
                PlacementMode::LeftAligned
            },
            force_replace: self.force_replace,
            keep_in_view: self.keep_in_view,
            clock: if self.use_utc {
                ClockMode::Utc
            } else {
                ClockMode::Local
            },
            start_date: self.start_date,
            dry_run: false,
            jitter: JitterMode::default(),
        })
    }
}

/// Display window at the time the snapshot was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowInfo {
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
}

/// Record of the last successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    /// The normalized message
    pub version: String,
    pub options: SnapshotOptions,
    pub created: DateTime<FixedOffset>,
    pub message_width: usize,
    #[serde(default)]
    pub refresh_schedule: Vec<NaiveDate>,
    pub window_info: WindowInfo,
}

impl ConfigSnapshot {
    pub fn from_plan(plan: &ActivityPlan, created: DateTime<FixedOffset>) -> Self {
        let clock = plan.options().clock;
        let midnight = |date: NaiveDate| clock.resolve(date.and_time(NaiveTime::MIN));
        let window = plan.window();

        Self {
            version: plan.message().to_string(),
            options: SnapshotOptions::from_options(plan.options()),
            created,
            message_width: plan.width(),
            refresh_schedule: plan.refresh_dates().to_vec(),
            window_info: WindowInfo {
                start_date: midnight(window.start),
                end_date: midnight(window.end),
            },
        }
    }

    /// First scheduled refresh on or after `today`
    pub fn next_refresh(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.refresh_schedule.iter().copied().find(|d| *d >= today)
    }
}

pub fn snapshot_path(repo: &Path) -> PathBuf {
    repo.join(SNAPSHOT_FILE)
}

pub fn load_snapshot(repo: &Path) -> Result<ConfigSnapshot> {
    let path = snapshot_path(repo);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ProtocolError::MissingConfiguration { path });
        }
        Err(source) => return Err(ProtocolError::Io { path, source }),
    };
    let snapshot = serde_json::from_str(&raw)?;
    log::debug!("Loaded snapshot from {}", path.display());
    Ok(snapshot)
}

/// Write the snapshot as pretty JSON; returns the file path.
pub fn save_snapshot(repo: &Path, snapshot: &ConfigSnapshot) -> Result<PathBuf> {
    let path = snapshot_path(repo);
    let mut body = serde_json::to_string_pretty(snapshot)?;
    body.push('\n');
    fs::write(&path, body).map_err(|source| ProtocolError::Io {
        path: path.clone(),
        source,
    })?;
    log::debug!("Saved snapshot to {}", path.display());
    Ok(path)
}

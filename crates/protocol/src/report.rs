use activity_pattern::{
    ActivityPlan, Intensity, PlacementKind, RecommendedVersion, Window, RECOMMENDED_VERSIONS,
    WINDOW_WEEKS,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::snapshot::ConfigSnapshot;

/// Column past which the display is close to scrolling the oldest weeks out
pub const ROLLOVER_WARNING_WEEK: usize = 40;

#[derive(Debug, Clone, Serialize)]
pub struct PreviewReport {
    pub message: String,
    pub width: usize,
    pub placement: &'static str,
    pub offset_weeks: i64,
    pub start_date: NaiveDate,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub intensity: String,
    pub commits_per_day: u32,
    pub active_days: usize,
    pub total_commits: usize,
    pub clipped_days: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    /// One string per weekday, Sunday first, `#` for an active day
    pub rows: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub refresh_schedule: Vec<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<&'static str>,
}

impl PreviewReport {
    pub fn from_plan(plan: &ActivityPlan) -> Self {
        let preview = plan.preview();
        let window = plan.window();
        let placement = plan.placement();

        Self {
            message: plan.message().to_string(),
            width: plan.width(),
            placement: placement_label(placement.kind),
            offset_weeks: placement.offset_weeks,
            start_date: placement.start_date,
            window_start: window.start,
            window_end: window.end,
            intensity: plan.options().intensity.to_string(),
            commits_per_day: plan.commits_per_day(),
            active_days: plan.active_days(),
            total_commits: plan.total_commits(),
            clipped_days: preview.clipped_days(),
            skipped: plan.skipped().iter().map(char::to_string).collect(),
            rows: preview.lines('#', '.'),
            refresh_schedule: plan.refresh_dates().to_vec(),
            recommendation: activity_pattern::lookup_recommended(plan.message().as_str())
                .map(|v| v.description),
        }
    }
}

pub fn placement_label(kind: PlacementKind) -> &'static str {
    match kind {
        PlacementKind::Centered => "centered",
        PlacementKind::LeftAligned => "left_aligned",
        PlacementKind::Overflow => "overflow",
        PlacementKind::Explicit => "explicit",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowReport {
    pub today: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_weeks: usize,
    /// 1-based column holding today, at most the last rendered column
    pub current_week: usize,
    pub rollover_warning: bool,
}

impl WindowReport {
    pub fn new(window: Window, today: NaiveDate) -> Self {
        let week = window.week_of(today).unwrap_or(WINDOW_WEEKS);
        Self {
            today,
            start_date: window.start,
            end_date: window.end,
            total_weeks: WINDOW_WEEKS,
            current_week: week.min(WINDOW_WEEKS),
            rollover_warning: week > ROLLOVER_WARNING_WEEK,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub snapshot: ConfigSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_refresh: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_refresh: Option<i64>,
    pub refresh_due: bool,
    /// `None` when the directory is not a git work tree
    pub working_tree_clean: Option<bool>,
}

impl StatusReport {
    pub fn new(snapshot: ConfigSnapshot, today: NaiveDate, working_tree_clean: Option<bool>) -> Self {
        let next_refresh = if snapshot.options.keep_in_view {
            snapshot.next_refresh(today)
        } else {
            None
        };
        let days_until_refresh = next_refresh.map(|d| (d - today).num_days());
        let refresh_due = snapshot.options.keep_in_view
            && !snapshot.refresh_schedule.is_empty()
            && days_until_refresh.map_or(true, |days| days <= 0);

        Self {
            snapshot,
            next_refresh,
            days_until_refresh,
            refresh_due,
            working_tree_clean,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionEntry {
    pub message: &'static str,
    pub width: usize,
    pub visibility: &'static str,
    pub description: &'static str,
}

impl From<&RecommendedVersion> for VersionEntry {
    fn from(version: &RecommendedVersion) -> Self {
        Self {
            message: version.message,
            width: version.width(),
            visibility: version.visibility.as_str(),
            description: version.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IntensityEntry {
    pub name: &'static str,
    pub commits_per_day: u32,
    pub default: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionsReport {
    pub versions: Vec<VersionEntry>,
    pub intensities: Vec<IntensityEntry>,
    pub max_width: usize,
}

impl VersionsReport {
    pub fn catalog() -> Self {
        Self {
            versions: RECOMMENDED_VERSIONS.iter().map(VersionEntry::from).collect(),
            intensities: Intensity::ALL
                .iter()
                .map(|level| IntensityEntry {
                    name: level.as_str(),
                    commits_per_day: level.commits_per_day(),
                    default: *level == Intensity::default(),
                })
                .collect(),
            max_width: WINDOW_WEEKS,
        }
    }
}

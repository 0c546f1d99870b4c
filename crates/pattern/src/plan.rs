use chrono::{Duration, NaiveDate};

use crate::error::{PatternError, Result};
use crate::grid::{Composition, Grid, GridComposer};
use crate::message::Message;
use crate::options::{PatternOptions, PlacementMode};
use crate::preview::PreviewGrid;
use crate::refresh::{RefreshPlanner, DEFAULT_REFRESH_COUNT, REFRESH_INTERVAL_WEEKS};
use crate::schedule::{CommitScheduler, Jitter, ScheduledCommit};
use crate::window::{
    Placement, Window, WindowPlanner, DAYS_PER_WEEK, WINDOW_DAYS, WINDOW_WEEKS,
};

/// Everything needed to draw one message, computed up front so that every
/// validation error surfaces before anything touches the repository.
#[derive(Debug, Clone)]
pub struct ActivityPlan {
    message: Message,
    options: PatternOptions,
    composition: Composition,
    window: Window,
    placement: Placement,
    scheduler: CommitScheduler,
    refresh_dates: Vec<NaiveDate>,
    today: NaiveDate,
}

impl ActivityPlan {
    pub fn build(message: &str, options: PatternOptions, today: NaiveDate) -> Result<Self> {
        options.validate()?;
        let message = Message::new(message);
        let composition = GridComposer::default().compose(&message);
        let width = composition.grid.width();
        if width == 0 {
            return Err(PatternError::EmptyMessage);
        }

        // Refresh triggers can sit up to one interval before the start date.
        let lead_days = (REFRESH_INTERVAL_WEEKS + 1) * DAYS_PER_WEEK as i64;
        checked_days(today, -(WINDOW_DAYS + lead_days))?;
        checked_days(today, 1)?;
        let planner = WindowPlanner::new(today);
        let allow_overflow = options.force_replace;
        let placement = match (options.start_date, options.placement) {
            (Some(date), _) => {
                if width > WINDOW_WEEKS && !allow_overflow {
                    return Err(PatternError::MessageTooWide {
                        message: message.to_string(),
                        width,
                        max: WINDOW_WEEKS,
                    });
                }
                checked_days(date, -lead_days)?;
                planner.place_explicit(date)
            }
            (None, PlacementMode::Centered) => {
                planner.place_centered(message.as_str(), width, allow_overflow)?
            }
            (None, PlacementMode::LeftAligned) => {
                planner.place_left_aligned(message.as_str(), width, allow_overflow)?
            }
        };

        // Every date the plan produces lies before this horizon.
        let mut horizon_weeks = width as i64 + 1;
        if options.keep_in_view {
            horizon_weeks += REFRESH_INTERVAL_WEEKS * (DEFAULT_REFRESH_COUNT as i64 + 1);
        }
        checked_days(
            placement.start_date.max(today),
            horizon_weeks * DAYS_PER_WEEK as i64,
        )?;

        let scheduler =
            CommitScheduler::new(options.effective_commits_per_day(), options.clock)?;

        let refresh_dates = if options.keep_in_view {
            RefreshPlanner::default().schedule(placement.start_date, width, today)
        } else {
            Vec::new()
        };

        log::debug!(
            "Planned {message:?}: width={width} start={} offset={} kind={:?}",
            placement.start_date,
            placement.offset_weeks,
            placement.kind
        );

        Ok(Self {
            message,
            options,
            composition,
            window: planner.window(),
            placement,
            scheduler,
            refresh_dates,
            today,
        })
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn options(&self) -> &PatternOptions {
        &self.options
    }

    pub fn grid(&self) -> &Grid {
        &self.composition.grid
    }

    /// Characters that were dropped because no glyph exists for them
    pub fn skipped(&self) -> &[char] {
        &self.composition.skipped
    }

    pub fn width(&self) -> usize {
        self.composition.grid.width()
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn commits_per_day(&self) -> u32 {
        self.scheduler.commits_per_day()
    }

    /// Empty unless keep-in-view is enabled
    pub fn refresh_dates(&self) -> &[NaiveDate] {
        &self.refresh_dates
    }

    pub fn active_days(&self) -> usize {
        self.composition.grid.active_count()
    }

    pub fn total_commits(&self) -> usize {
        self.active_days() * self.commits_per_day() as usize
    }

    pub fn schedule(&self, jitter: &mut dyn Jitter) -> Vec<ScheduledCommit> {
        self.scheduler
            .schedule(&self.composition.grid, self.placement.start_date, jitter)
    }

    pub fn preview(&self) -> PreviewGrid {
        PreviewGrid::render(
            &self.composition.grid,
            self.placement.start_date,
            &self.window,
        )
    }
}

fn checked_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| PatternError::InvalidDate(format!("{date} is too close to the calendar limit")))
}

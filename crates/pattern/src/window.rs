use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{PatternError, Result};

/// Columns the activity graph renders
pub const WINDOW_WEEKS: usize = 53;
pub const DAYS_PER_WEEK: usize = 7;
pub const WINDOW_DAYS: i64 = (WINDOW_WEEKS * DAYS_PER_WEEK) as i64;

/// The Sunday on or before `date`
pub fn previous_sunday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Rolling display window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Always a Sunday
    pub start: NaiveDate,
    /// Tomorrow, relative to the day the window was computed
    pub end: NaiveDate,
}

impl Window {
    /// Window as rendered on `today`.
    pub fn current(today: NaiveDate) -> Self {
        let end = today + Duration::days(1);
        let start = previous_sunday(end - Duration::days(WINDOW_DAYS));
        Self { start, end }
    }

    /// Exclusive end of the 53rd column. Depending on the weekday, `end` can
    /// reach up to six days into a 54th column.
    pub fn grid_end(&self) -> NaiveDate {
        self.start + Duration::days(WINDOW_DAYS)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// 1-based column holding `date`, if it falls inside the window.
    pub fn week_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        let days = (date - self.start).num_days();
        usize::try_from(days / DAYS_PER_WEEK as i64).ok().map(|w| w + 1)
    }
}

/// How a placement was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    Centered,
    LeftAligned,
    /// Message wider than the window, forced to the left edge
    Overflow,
    /// Caller supplied the start date
    Explicit,
}

/// Where grid column 0 lands on the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Sunday of the first grid column
    pub start_date: NaiveDate,
    /// Whole weeks between the window start and `start_date`
    pub offset_weeks: i64,
    pub kind: PlacementKind,
}

/// Places a composed grid inside the current window
#[derive(Debug, Clone, Copy)]
pub struct WindowPlanner {
    window: Window,
}

impl WindowPlanner {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            window: Window::current(today),
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Center the grid; oversized grids need `allow_overflow` and then start
    /// at the window's left edge.
    pub fn place_centered(
        &self,
        message: &str,
        width: usize,
        allow_overflow: bool,
    ) -> Result<Placement> {
        if let Some(placement) = self.check_overflow(message, width, allow_overflow)? {
            return Ok(placement);
        }
        let offset = ((WINDOW_WEEKS - width) / 2) as i64;
        Ok(Placement {
            start_date: self.window.start + Duration::days(offset * DAYS_PER_WEEK as i64),
            offset_weeks: offset,
            kind: PlacementKind::Centered,
        })
    }

    pub fn place_left_aligned(
        &self,
        message: &str,
        width: usize,
        allow_overflow: bool,
    ) -> Result<Placement> {
        if let Some(placement) = self.check_overflow(message, width, allow_overflow)? {
            return Ok(placement);
        }
        Ok(Placement {
            start_date: self.window.start,
            offset_weeks: 0,
            kind: PlacementKind::LeftAligned,
        })
    }

    /// Use a caller-chosen date, moved back to its Sunday so rows stay aligned.
    pub fn place_explicit(&self, date: NaiveDate) -> Placement {
        let start_date = previous_sunday(date);
        Placement {
            start_date,
            offset_weeks: (start_date - self.window.start).num_days() / DAYS_PER_WEEK as i64,
            kind: PlacementKind::Explicit,
        }
    }

    fn check_overflow(
        &self,
        message: &str,
        width: usize,
        allow_overflow: bool,
    ) -> Result<Option<Placement>> {
        if width <= WINDOW_WEEKS {
            return Ok(None);
        }
        if !allow_overflow {
            return Err(PatternError::MessageTooWide {
                message: message.to_string(),
                width,
                max: WINDOW_WEEKS,
            });
        }
        log::warn!("Message is {width} weeks wide, exceeds the {WINDOW_WEEKS}-week display");
        Ok(Some(Placement {
            start_date: self.window.start,
            offset_weeks: 0,
            kind: PlacementKind::Overflow,
        }))
    }
}

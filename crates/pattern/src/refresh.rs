use chrono::{Duration, NaiveDate};

use crate::window::DAYS_PER_WEEK;

/// Gap between two refreshes
pub const REFRESH_INTERVAL_WEEKS: i64 = 6;
pub const DEFAULT_REFRESH_COUNT: usize = 12;

/// Advisory dates at which a pattern should be regenerated to stay visible.
///
/// The first trigger is six weeks before the message's last column:
/// `start_date + width weeks - 6 weeks`. Further triggers follow every six
/// weeks. Triggers before `today` are skipped, so every returned date is in
/// the future (or today).
#[derive(Debug, Clone, Copy)]
pub struct RefreshPlanner {
    interval_weeks: i64,
    count: usize,
}

impl Default for RefreshPlanner {
    fn default() -> Self {
        Self {
            interval_weeks: REFRESH_INTERVAL_WEEKS,
            count: DEFAULT_REFRESH_COUNT,
        }
    }
}

impl RefreshPlanner {
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn first_trigger(&self, start_date: NaiveDate, width: usize) -> NaiveDate {
        let message_end = start_date + Duration::days((width * DAYS_PER_WEEK) as i64);
        message_end - Duration::weeks(self.interval_weeks)
    }

    pub fn schedule(&self, start_date: NaiveDate, width: usize, today: NaiveDate) -> Vec<NaiveDate> {
        let step = Duration::weeks(self.interval_weeks);
        let mut next = self.first_trigger(start_date, width);
        if next < today {
            let behind = (today - next).num_days();
            let step_days = step.num_days();
            let steps = (behind + step_days - 1) / step_days;
            next += Duration::days(steps * step_days);
        }

        let mut dates = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            dates.push(next);
            next += step;
        }
        dates
    }
}

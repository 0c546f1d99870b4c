use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::clock::ClockMode;
use crate::error::{PatternError, Result};
use crate::grid::Grid;
use crate::window::DAYS_PER_WEEK;

/// Minute and second of a commit inside its hour.
pub trait Jitter {
    /// `index` is the commit's position within its day (0-based) out of `per_day`.
    fn sub_hour(&mut self, index: u32, per_day: u32) -> (u32, u32);
}

/// Spreads commits evenly over the day: the sub-hour offset is the exact
/// fraction of the day the commit index represents.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvenJitter;

impl Jitter for EvenJitter {
    fn sub_hour(&mut self, index: u32, per_day: u32) -> (u32, u32) {
        let index = u64::from(index);
        let per_day = u64::from(per_day.max(1));
        let minute = (index * 24 * 60 / per_day) % 60;
        let second = (index * 24 * 60 * 60 / per_day) % 60;
        (minute as u32, second as u32)
    }
}

/// Pseudo-random offsets from a ChaCha8 stream
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: ChaCha8Rng,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Jitter for SeededJitter {
    fn sub_hour(&mut self, _index: u32, _per_day: u32) -> (u32, u32) {
        (self.rng.gen_range(0..60), self.rng.gen_range(0..60))
    }
}

/// One backdated commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledCommit {
    pub at: DateTime<FixedOffset>,
    /// 1-based position in the final (sorted) sequence
    pub sequence: usize,
}

/// Turns active grid cells into a sorted list of commit timestamps
#[derive(Debug, Clone, Copy)]
pub struct CommitScheduler {
    commits_per_day: u32,
    clock: ClockMode,
}

impl CommitScheduler {
    pub fn new(commits_per_day: u32, clock: ClockMode) -> Result<Self> {
        if commits_per_day == 0 {
            return Err(PatternError::InvalidCommitsPerDay(commits_per_day));
        }
        Ok(Self {
            commits_per_day,
            clock,
        })
    }

    pub fn commits_per_day(&self) -> u32 {
        self.commits_per_day
    }

    /// Hour of the `index`-th commit of a day: floor(index / (N / 24)) mod 24.
    pub fn hour_for(&self, index: u32) -> u32 {
        let spread = u64::from(index) * 24 / u64::from(self.commits_per_day);
        (spread % 24) as u32
    }

    /// Calendar date of a grid cell
    pub fn date_for(start_date: NaiveDate, week: usize, day: usize) -> NaiveDate {
        start_date + Duration::days((week * DAYS_PER_WEEK + day) as i64)
    }

    pub fn schedule(
        &self,
        grid: &Grid,
        start_date: NaiveDate,
        jitter: &mut dyn Jitter,
    ) -> Vec<ScheduledCommit> {
        let mut stamps = Vec::with_capacity(grid.active_count() * self.commits_per_day as usize);

        for cell in grid.active_cells() {
            let date = Self::date_for(start_date, cell.week, cell.day);
            for index in 0..self.commits_per_day {
                let hour = self.hour_for(index);
                let (minute, second) = jitter.sub_hour(index, self.commits_per_day);
                let Some(naive) = date.and_hms_opt(hour, minute.min(59), second.min(59)) else {
                    continue;
                };
                stamps.push(self.clock.resolve(naive));
            }
        }

        // History must advance with the backdated time, not with grid order.
        stamps.sort();

        stamps
            .into_iter()
            .enumerate()
            .map(|(idx, at)| ScheduledCommit {
                at,
                sequence: idx + 1,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::GLYPH_HEIGHT;
    use chrono::Timelike;
    use std::collections::BTreeMap;

    fn single_cell_grid() -> Grid {
        let mut rows: [Vec<bool>; GLYPH_HEIGHT] = std::array::from_fn(|_| vec![false; 2]);
        rows[3][1] = true;
        Grid::from_rows(rows).unwrap()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
    }

    #[test]
    fn zero_commits_per_day_is_a_configuration_error() {
        assert!(CommitScheduler::new(0, ClockMode::Utc).is_err());
    }

    #[test]
    fn hours_follow_the_spread_formula() {
        let scheduler = CommitScheduler::new(25, ClockMode::Utc).unwrap();
        assert_eq!(scheduler.hour_for(0), 0);
        assert_eq!(scheduler.hour_for(1), 0);
        assert_eq!(scheduler.hour_for(2), 1);
        assert_eq!(scheduler.hour_for(24), 23);

        let sparse = CommitScheduler::new(3, ClockMode::Utc).unwrap();
        let hours: Vec<_> = (0..3).map(|i| sparse.hour_for(i)).collect();
        assert_eq!(hours, vec![0, 8, 16]);
    }

    #[test]
    fn cell_maps_to_week_and_weekday() {
        let scheduler = CommitScheduler::new(3, ClockMode::Utc).unwrap();
        let commits = scheduler.schedule(&single_cell_grid(), start(), &mut EvenJitter);
        assert_eq!(commits.len(), 3);
        let expected = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
        assert!(commits.iter().all(|c| c.at.date_naive() == expected));
        let hours: Vec<_> = commits.iter().map(|c| c.at.hour()).collect();
        assert_eq!(hours, vec![0, 8, 16]);
        let seq: Vec<_> = commits.iter().map(|c| c.sequence).collect();
        assert_eq!(seq, vec![1, 2, 3]);
    }

    #[test]
    fn seeded_jitter_is_reproducible_and_sorted() {
        let grid = crate::GridComposer::default()
            .compose(&crate::Message::new("HI"))
            .grid;
        let scheduler = CommitScheduler::new(30, ClockMode::Utc).unwrap();
        let a = scheduler.schedule(&grid, start(), &mut SeededJitter::new(7));
        let b = scheduler.schedule(&grid, start(), &mut SeededJitter::new(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), grid.active_count() * 30);
        assert!(a.windows(2).all(|w| w[0].at <= w[1].at));

        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for commit in &a {
            *per_day.entry(commit.at.date_naive()).or_default() += 1;
        }
        assert_eq!(per_day.len(), grid.active_count());
        assert!(per_day.values().all(|n| *n == 30));
    }

    #[test]
    fn even_jitter_stays_inside_its_hour() {
        let scheduler = CommitScheduler::new(7, ClockMode::Utc).unwrap();
        let mut jitter = EvenJitter;
        for index in 0..7 {
            let (minute, second) = jitter.sub_hour(index, 7);
            let total = scheduler.hour_for(index) * 3600 + minute * 60 + second;
            let exact = u64::from(index) * 86_400 / 7;
            assert_eq!(u64::from(total), exact);
        }
    }

    #[test]
    fn empty_grid_yields_empty_schedule() {
        let rows: [Vec<bool>; GLYPH_HEIGHT] = std::array::from_fn(|_| vec![false; 4]);
        let grid = Grid::from_rows(rows).unwrap();
        let scheduler = CommitScheduler::new(25, ClockMode::Utc).unwrap();
        assert!(scheduler.schedule(&grid, start(), &mut EvenJitter).is_empty());
    }
}

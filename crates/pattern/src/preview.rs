use chrono::NaiveDate;

use crate::glyphs::GLYPH_HEIGHT;
use crate::grid::Grid;
use crate::schedule::CommitScheduler;
use crate::window::{Window, DAYS_PER_WEEK, WINDOW_WEEKS};

/// The 7 × 53 board as the activity graph would show it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewGrid {
    cells: [[bool; WINDOW_WEEKS]; GLYPH_HEIGHT],
    active_days: usize,
    clipped_days: usize,
}

impl PreviewGrid {
    pub fn render(grid: &Grid, start_date: NaiveDate, window: &Window) -> Self {
        let mut cells = [[false; WINDOW_WEEKS]; GLYPH_HEIGHT];
        let mut active_days = 0;
        let mut clipped_days = 0;

        for cell in grid.active_cells() {
            active_days += 1;
            let date = CommitScheduler::date_for(start_date, cell.week, cell.day);
            let offset = (date - window.start).num_days();
            let column = offset.div_euclid(DAYS_PER_WEEK as i64);
            match usize::try_from(column) {
                Ok(week) if week < WINDOW_WEEKS => {
                    cells[offset.rem_euclid(DAYS_PER_WEEK as i64) as usize][week] = true;
                }
                _ => clipped_days += 1,
            }
        }

        Self {
            cells,
            active_days,
            clipped_days,
        }
    }

    pub fn is_active(&self, day: usize, week: usize) -> bool {
        self.cells
            .get(day)
            .and_then(|r| r.get(week))
            .copied()
            .unwrap_or(false)
    }

    /// One row per weekday, Sunday first
    pub fn rows(&self) -> &[[bool; WINDOW_WEEKS]; GLYPH_HEIGHT] {
        &self.cells
    }

    /// Rows rendered with the given on/off symbols
    pub fn lines(&self, on: char, off: char) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| if *c { on } else { off }).collect())
            .collect()
    }

    /// Distinct dates that receive commits
    pub fn active_days(&self) -> usize {
        self.active_days
    }

    /// Active dates that fall outside the 53 visible columns
    pub fn clipped_days(&self) -> usize {
        self.clipped_days
    }
}

use crate::error::{PatternError, Result};
use crate::glyphs::{GlyphTable, GLYPH_HEIGHT};
use crate::message::Message;

/// Position of a pixel in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Column, counted in weeks from the placement start
    pub week: usize,
    /// Row, 0 = Sunday .. 6 = Saturday
    pub day: usize,
}

/// Composed message: 7 rows (days) × width columns (weeks)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [Vec<bool>; GLYPH_HEIGHT],
}

impl Grid {
    fn blank(width: usize) -> Self {
        Self {
            rows: std::array::from_fn(|_| vec![false; width]),
        }
    }

    /// Build a grid from explicit rows (all rows must share one width).
    pub fn from_rows(rows: [Vec<bool>; GLYPH_HEIGHT]) -> Result<Self> {
        let width = rows[0].len();
        if let Some((day, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(PatternError::InvalidGrid(format!(
                "row {day} has {} columns, expected {width}",
                row.len()
            )));
        }
        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn is_active(&self, day: usize, week: usize) -> bool {
        self.rows
            .get(day)
            .and_then(|r| r.get(week))
            .copied()
            .unwrap_or(false)
    }

    /// Active cells in column-major order (week by week, Sunday first)
    pub fn active_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width()).flat_map(move |week| {
            (0..GLYPH_HEIGHT)
                .filter(move |&day| self.rows[day][week])
                .map(move |day| Cell { week, day })
        })
    }

    pub fn active_count(&self) -> usize {
        self.rows.iter().flatten().filter(|on| **on).count()
    }

    pub fn rows(&self) -> &[Vec<bool>; GLYPH_HEIGHT] {
        &self.rows
    }
}

/// Result of composing a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub grid: Grid,
    /// Characters that had no glyph, in message order
    pub skipped: Vec<char>,
}

/// Lays glyphs side by side with a one-column gap
pub struct GridComposer<'a> {
    table: &'a GlyphTable,
}

impl Default for GridComposer<'static> {
    fn default() -> Self {
        Self::new(GlyphTable::standard())
    }
}

impl<'a> GridComposer<'a> {
    pub fn new(table: &'a GlyphTable) -> Self {
        Self { table }
    }

    pub fn compose(&self, message: &Message) -> Composition {
        let mut skipped = Vec::new();
        let glyphs: Vec<_> = message
            .chars()
            .filter_map(|ch| match self.table.lookup(ch) {
                Some(glyph) => Some(glyph),
                None => {
                    log::warn!("Character {ch:?} not supported, skipping");
                    skipped.push(ch);
                    None
                }
            })
            .collect();

        let mut grid = Grid::blank(self.table.message_width(message));
        let mut cursor = 0usize;
        for (idx, glyph) in glyphs.iter().enumerate() {
            for (day, row) in glyph.rows().iter().enumerate() {
                for (col, on) in row.iter().enumerate() {
                    grid.rows[day][cursor + col] = *on;
                }
            }
            cursor += glyph.width();
            if idx + 1 < glyphs.len() {
                cursor += 1;
            }
        }
        debug_assert_eq!(cursor, grid.width());

        Composition { grid, skipped }
    }
}

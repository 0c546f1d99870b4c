//! # Activity Pattern
//!
//! Renders a text message as a pixel pattern on the 7 × 53 calendar grid of an
//! activity graph and schedules the backdated commits that draw it.
//!
//! ## Architecture
//!
//! ```text
//! Message ("AWS HERO")
//!     │
//!     ├──> GlyphTable (char → 7-row matrix)
//!     │
//!     ├──> GridComposer
//!     │      └─ 7 × width grid, one gap column between glyphs
//!     │
//!     ├──> WindowPlanner
//!     │      ├─ rolling 53-week window ending tomorrow (Sunday aligned)
//!     │      └─ centered / left-aligned / explicit placement, overflow policy
//!     │
//!     ├──> CommitScheduler
//!     │      └─ active cell → date → N intraday timestamps, sorted
//!     │
//!     └──> RefreshPlanner
//!            └─ future dates to regenerate before the pattern scrolls out
//! ```
//!
//! ## Example
//!
//! ```rust
//! use activity_pattern::{ActivityPlan, EvenJitter, PatternOptions};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
//! let plan = ActivityPlan::build("AI", PatternOptions::default(), today).unwrap();
//! assert_eq!(plan.width(), 11);
//! assert_eq!(plan.placement().offset_weeks, 21);
//!
//! let commits = plan.schedule(&mut EvenJitter);
//! assert_eq!(commits.len(), plan.total_commits());
//! ```

mod catalog;
mod clock;
mod error;
mod glyphs;
mod grid;
mod message;
mod options;
mod plan;
mod preview;
mod refresh;
mod schedule;
mod window;

pub use catalog::{lookup_recommended, RecommendedVersion, Visibility, RECOMMENDED_VERSIONS};
pub use clock::ClockMode;
pub use error::{PatternError, Result};
pub use glyphs::{Glyph, GlyphTable, GLYPH_HEIGHT};
pub use grid::{Cell, Composition, Grid, GridComposer};
pub use message::Message;
pub use options::{Intensity, JitterMode, PatternOptions, PlacementMode};
pub use plan::ActivityPlan;
pub use preview::PreviewGrid;
pub use refresh::{RefreshPlanner, DEFAULT_REFRESH_COUNT, REFRESH_INTERVAL_WEEKS};
pub use schedule::{CommitScheduler, EvenJitter, Jitter, ScheduledCommit, SeededJitter};
pub use window::{
    previous_sunday, Placement, PlacementKind, Window, WindowPlanner, DAYS_PER_WEEK,
    WINDOW_DAYS, WINDOW_WEEKS,
};

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::clock::ClockMode;
use crate::error::{PatternError, Result};
use crate::schedule::{EvenJitter, Jitter, SeededJitter};

/// Named commits-per-active-day levels. More commits give a darker pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Intensity {
    Low,
    Medium,
    High,
    Max,
    #[default]
    Ultra,
    Extreme,
}

impl Intensity {
    pub const ALL: [Intensity; 6] = [
        Intensity::Low,
        Intensity::Medium,
        Intensity::High,
        Intensity::Max,
        Intensity::Ultra,
        Intensity::Extreme,
    ];

    pub const fn commits_per_day(self) -> u32 {
        match self {
            Intensity::Low => 3,
            Intensity::Medium => 8,
            Intensity::High => 15,
            Intensity::Max => 20,
            Intensity::Ultra => 25,
            Intensity::Extreme => 30,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
            Intensity::Max => "max",
            Intensity::Ultra => "ultra",
            Intensity::Extreme => "extreme",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Intensity::ALL
            .into_iter()
            .find(|level| level.as_str() == needle)
            .ok_or_else(|| PatternError::UnknownIntensity(s.to_string()))
    }
}

/// Where the message goes when no explicit start date is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    #[default]
    Centered,
    LeftAligned,
}

/// Source of the sub-hour offsets of each commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JitterMode {
    /// Fresh seed drawn once per run
    #[default]
    Random,
    /// Reproducible pseudo-random offsets
    Seeded(u64),
    /// Deterministic even spread, no randomness
    Even,
}

impl JitterMode {
    pub fn build(self) -> Box<dyn Jitter> {
        match self {
            JitterMode::Random => {
                let seed = rand::random::<u64>();
                log::debug!("Jitter seed: {seed}");
                Box::new(SeededJitter::new(seed))
            }
            JitterMode::Seeded(seed) => Box::new(SeededJitter::new(seed)),
            JitterMode::Even => Box::new(EvenJitter),
        }
    }
}

/// Effective configuration of one run, assembled once by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternOptions {
    pub intensity: Intensity,

    /// Overrides the intensity level when set
    pub commits_per_day: Option<u32>,

    pub placement: PlacementMode,

    /// Allow oversized messages and rebuild history from scratch
    pub force_replace: bool,

    /// Compute refresh dates so the message can be regenerated before it scrolls out
    pub keep_in_view: bool,

    pub clock: ClockMode,

    /// Explicit first column (bypasses centering)
    pub start_date: Option<NaiveDate>,

    /// Plan and preview only
    pub dry_run: bool,

    pub jitter: JitterMode,
}

impl PatternOptions {
    pub fn effective_commits_per_day(&self) -> u32 {
        self.commits_per_day
            .unwrap_or_else(|| self.intensity.commits_per_day())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(0) = self.commits_per_day {
            return Err(PatternError::InvalidCommitsPerDay(0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_table() {
        let counts: Vec<_> = Intensity::ALL.iter().map(|i| i.commits_per_day()).collect();
        assert_eq!(counts, vec![3, 8, 15, 20, 25, 30]);
        assert_eq!(Intensity::default(), Intensity::Ultra);
    }

    #[test]
    fn intensity_parses_case_insensitively() {
        assert_eq!("ULTRA".parse::<Intensity>().unwrap(), Intensity::Ultra);
        assert_eq!(" low ".parse::<Intensity>().unwrap(), Intensity::Low);
        assert_eq!(
            "blinding".parse::<Intensity>().unwrap_err(),
            PatternError::UnknownIntensity("blinding".to_string())
        );
    }

    #[test]
    fn explicit_commit_count_wins_over_intensity() {
        let options = PatternOptions {
            intensity: Intensity::Low,
            commits_per_day: Some(12),
            ..PatternOptions::default()
        };
        assert_eq!(options.effective_commits_per_day(), 12);
        assert_eq!(PatternOptions::default().effective_commits_per_day(), 25);
    }

    #[test]
    fn zero_commits_per_day_is_rejected() {
        let options = PatternOptions {
            commits_per_day: Some(0),
            ..PatternOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(PatternError::InvalidCommitsPerDay(0))
        );
    }
}

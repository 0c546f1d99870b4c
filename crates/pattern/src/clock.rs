use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Calendar semantics for a whole run. Mixing UTC and local dates inside one
/// schedule would shift pixels across rows, so the mode is chosen once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockMode {
    Utc,
    #[default]
    Local,
}

impl ClockMode {
    pub fn now(self) -> DateTime<FixedOffset> {
        match self {
            ClockMode::Utc => Utc::now().fixed_offset(),
            ClockMode::Local => Local::now().fixed_offset(),
        }
    }

    pub fn today(self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Attach this clock's offset to a wall-clock time.
    pub fn resolve(self, naive: NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            ClockMode::Utc => Utc.from_utc_datetime(&naive).fixed_offset(),
            ClockMode::Local => resolve_wall_clock(naive, |wall| {
                Local
                    .from_local_datetime(wall)
                    .earliest()
                    .map(|dt| dt.fixed_offset())
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ClockMode::Utc => "utc",
            ClockMode::Local => "local",
        }
    }
}

/// Earliest instant for `naive` according to `lookup`.
///
/// A time inside a DST gap moves forward one hour. When that would cross
/// midnight it moves back one hour instead, so the instant keeps its date.
fn resolve_wall_clock<F>(naive: NaiveDateTime, lookup: F) -> DateTime<FixedOffset>
where
    F: Fn(&NaiveDateTime) -> Option<DateTime<FixedOffset>>,
{
    lookup(&naive)
        .or_else(|| {
            [Duration::hours(1), Duration::hours(-1)]
                .into_iter()
                .filter_map(|shift| naive.checked_add_signed(shift))
                .filter(|moved| moved.date() == naive.date())
                .find_map(|moved| lookup(&moved))
        })
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive).fixed_offset())
}

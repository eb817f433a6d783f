use alloc::{collections::BTreeMap, string::String};

use crate::civil::{self, CalendarFields, Weekday};

const MILLIS_PER_DAY: i64 = 86_400_000;
const MILLIS_PER_HOUR: i64 = 3_600_000;

/// A resolved time zone: a canonical identifier, a standard UTC offset and
/// an optional daylight saving rule.
///
/// This is the shape of the answers the injected zone database gives. The
/// engine never consults a platform zone facility; whatever the
/// [`ZoneProvider`] hands back is the whole truth about a zone.
///
/// Negative offsets lie west of the prime meridian, positive offsets east,
/// so `civil-time - offset = UTC` in all cases.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ZoneOffsetRule {
    id: String,
    std_offset_millis: i64,
    dst: Option<DstRule>,
}

impl ZoneOffsetRule {
    /// Creates a zone with a fixed offset and no daylight saving.
    pub fn fixed(id: impl Into<String>, std_offset_millis: i64) -> ZoneOffsetRule {
        ZoneOffsetRule { id: id.into(), std_offset_millis, dst: None }
    }

    /// Creates a zone whose offset alternates between `std_offset_millis`
    /// and `std_offset_millis + dst.save` according to the rule's
    /// transitions.
    pub fn with_dst(
        id: impl Into<String>,
        std_offset_millis: i64,
        dst: DstRule,
    ) -> ZoneOffsetRule {
        ZoneOffsetRule { id: id.into(), std_offset_millis, dst: Some(dst) }
    }

    /// The zero-offset zone.
    pub fn utc() -> ZoneOffsetRule {
        ZoneOffsetRule::fixed("UTC", 0)
    }

    /// Returns the canonical identifier of this zone.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the standard (non-DST) offset from UTC in milliseconds.
    pub fn std_offset_millis(&self) -> i64 {
        self.std_offset_millis
    }

    /// Returns the offset from UTC in effect at the given instant.
    pub fn offset_at(&self, utc_millis: i64) -> i64 {
        match self.dst {
            Some(ref dst) if self.in_dst(utc_millis) => {
                self.std_offset_millis + dst.save_millis
            }
            _ => self.std_offset_millis,
        }
    }

    /// Returns true when the given instant falls inside this zone's DST
    /// window.
    pub fn in_dst(&self, utc_millis: i64) -> bool {
        let Some(ref dst) = self.dst else { return false };
        // The transition year is read off the standard-time clock. The
        // start transition happens on the standard offset, the end
        // transition on the shifted one.
        let year =
            CalendarFields::from_epoch_millis(utc_millis, self.std_offset_millis)
                .year();
        let start =
            dst.start.epoch_millis_in_year(year, self.std_offset_millis);
        let end = dst.end.epoch_millis_in_year(
            year,
            self.std_offset_millis + dst.save_millis,
        );
        if start <= end {
            utc_millis >= start && utc_millis < end
        } else {
            // Southern-hemisphere rules wrap across the year boundary.
            utc_millis >= start || utc_millis < end
        }
    }
}

/// A daylight saving rule: a save amount plus the two civil transitions
/// that bracket the DST window each year.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DstRule {
    save_millis: i64,
    start: ZoneTransition,
    end: ZoneTransition,
}

impl DstRule {
    /// Creates a rule that adds `save_millis` between the `start` and
    /// `end` transitions. The save amount is almost always one hour.
    pub fn new(
        save_millis: i64,
        start: ZoneTransition,
        end: ZoneTransition,
    ) -> DstRule {
        DstRule { save_millis, start, end }
    }

    /// Returns the amount added to the standard offset while DST is in
    /// effect.
    pub fn save_millis(&self) -> i64 {
        self.save_millis
    }
}

/// A yearly civil transition expressed as month, week-of-month, weekday
/// and time of day, in the manner of a POSIX `TZ` rule like `M3.2.0/2`
/// (the second Sunday in March at 02:00).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ZoneTransition {
    month: i8,
    week: i8,
    weekday: Weekday,
    millis_of_day: i64,
}

impl ZoneTransition {
    /// Creates a transition on the `week`-th `weekday` of `month` at
    /// `millis_of_day` on the local clock. A week of `5` means the last
    /// such weekday of the month.
    pub fn new(
        month: i8,
        week: i8,
        weekday: Weekday,
        millis_of_day: i64,
    ) -> ZoneTransition {
        debug_assert!((1..=12).contains(&month));
        debug_assert!((1..=5).contains(&week));
        ZoneTransition { month, week, weekday, millis_of_day }
    }

    /// Resolves this transition to an instant within the given year,
    /// interpreting the time-of-day on a clock running at
    /// `utc_offset_millis`.
    fn epoch_millis_in_year(&self, year: i32, utc_offset_millis: i64) -> i64 {
        let first = civil::days_from_civil(year, self.month, 1);
        let wd1 = Weekday::from_epoch_days(first, 4).to_sunday_zero_offset();
        let target = self.weekday.to_sunday_zero_offset();
        let delta = i64::from(target - wd1).rem_euclid(7);
        let mut day = 1 + delta as i8 + 7 * (self.week - 1);
        let len = civil::days_in_month(year, self.month);
        // Week 5 asks for the last occurrence; earlier weeks can also
        // overshoot a short month and snap back a week.
        while day > len {
            day -= 7;
        }
        if self.week == 5 {
            while day + 7 <= len {
                day += 7;
            }
        }
        let days = civil::days_from_civil(year, self.month, day);
        days * MILLIS_PER_DAY + self.millis_of_day - utc_offset_millis
    }
}

/// The source of zone lookups: resolves a zone name to its offset rule.
///
/// This crate implements no zone database of its own. The environment
/// injects an implementation of this trait through
/// [`ParseRules::with_provider`](crate::ParseRules::with_provider);
/// [`ZoneTable`] is a ready-made map-backed implementation for
/// configuration layers and tests.
pub trait ZoneProvider {
    /// Resolves a zone name. Lookups are case-insensitive for
    /// implementations that normalize, and the parser always queries with
    /// uppercased text.
    fn resolve(&self, name: &str) -> Option<ZoneOffsetRule>;
}

/// A map-backed [`ZoneProvider`] keyed by uppercased zone identifier.
#[derive(Clone, Debug, Default)]
pub struct ZoneTable {
    entries: BTreeMap<String, ZoneOffsetRule>,
}

impl ZoneTable {
    /// Creates an empty table.
    pub fn new() -> ZoneTable {
        ZoneTable::default()
    }

    /// Adds a zone, keyed by its own identifier.
    pub fn insert(&mut self, rule: ZoneOffsetRule) {
        self.entries.insert(rule.id().to_uppercase(), rule);
    }
}

impl ZoneProvider for ZoneTable {
    fn resolve(&self, name: &str) -> Option<ZoneOffsetRule> {
        self.entries.get(&name.to_uppercase()).cloned()
    }
}

/// The built-in Pacific rule used as the reference zone for DST
/// correction when the caller configures no default zone: standard offset
/// UTC-8, one hour of DST from the second Sunday in March to the first
/// Sunday in November, transitions at 02:00 local.
pub(crate) fn pacific() -> ZoneOffsetRule {
    ZoneOffsetRule::with_dst(
        "America/Los_Angeles",
        -8 * MILLIS_PER_HOUR,
        DstRule::new(
            MILLIS_PER_HOUR,
            ZoneTransition::new(3, 2, Weekday::Sunday, 2 * MILLIS_PER_HOUR),
            ZoneTransition::new(11, 1, Weekday::Sunday, 2 * MILLIS_PER_HOUR),
        ),
    )
}

/// Renders an offset as its canonical `{sign}HH:MM` spelling, read in
/// the ISO convention (east of Greenwich positive). This is the key
/// format the zone alias map uses for offset-to-zone entries.
pub(crate) fn canonical_offset_name(offset_millis: i64) -> String {
    use core::fmt::Write;

    let sign = if offset_millis < 0 { '-' } else { '+' };
    let magnitude = offset_millis.unsigned_abs();
    let hours = magnitude / MILLIS_PER_HOUR as u64;
    let minutes = magnitude % MILLIS_PER_HOUR as u64 / 60_000;
    let mut out = String::new();
    // Writing to a `String` cannot fail.
    let _ = write!(out, "{sign}{hours:02}:{minutes:02}");
    out
}

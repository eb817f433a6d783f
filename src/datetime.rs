use core::cmp::Ordering;

use crate::{
    civil::{self, CalendarFields, Weekday},
    duration::FixedDuration,
    error::Error,
    tz::ZoneOffsetRule,
};

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_SECOND: i64 = 1_000;

/// A calendar or clock unit for arithmetic and truncation.
///
/// Units up to [`Unit::Hour`] have a fixed length and arithmetic on them
/// is pure duration addition. [`Unit::Day`] and larger are civil units:
/// arithmetic converts through calendar fields in the value's own zone,
/// so a day added across a DST transition preserves the clock reading
/// rather than lasting exactly 24 hours.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Unit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Century,
}

/// A structured bundle of calendar and clock deltas for
/// [`PointInTime::shift`].
///
/// The deltas apply in a fixed order: years, months, weeks, days, hours,
/// minutes, seconds, each through the calendar-aware path, then the
/// sub-second remainder as a single duration addition. The order matters:
/// shifting 2008-01-30 by one month and one day clamps to February 29th
/// first and only then steps to March 1st.
///
/// # Example
///
/// ```
/// use loosetime::{PointInTime, Shift};
///
/// let t = PointInTime::from_epoch_millis(0);
/// let shifted = t.shift(&Shift::new().days(1).hours(2))?;
/// assert_eq!(shifted.to_epoch_millis(), 93_600_000);
/// # Ok::<(), loosetime::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Shift {
    years: i64,
    months: i64,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    millis: i64,
    nanos: i32,
}

impl Shift {
    /// A shift of nothing at all.
    pub fn new() -> Shift {
        Shift::default()
    }

    pub fn years(self, n: i64) -> Shift {
        Shift { years: n, ..self }
    }

    pub fn months(self, n: i64) -> Shift {
        Shift { months: n, ..self }
    }

    pub fn weeks(self, n: i64) -> Shift {
        Shift { weeks: n, ..self }
    }

    pub fn days(self, n: i64) -> Shift {
        Shift { days: n, ..self }
    }

    pub fn hours(self, n: i64) -> Shift {
        Shift { hours: n, ..self }
    }

    pub fn minutes(self, n: i64) -> Shift {
        Shift { minutes: n, ..self }
    }

    pub fn seconds(self, n: i64) -> Shift {
        Shift { seconds: n, ..self }
    }

    pub fn millis(self, n: i64) -> Shift {
        Shift { millis: n, ..self }
    }

    /// Sets the nanosecond delta. The magnitude must not exceed one whole
    /// second, matching the duration-arithmetic contract.
    pub fn nanos(self, n: i32) -> Shift {
        Shift { nanos: n, ..self }
    }
}

/// An immutable point in time: elapsed time since the Unix epoch at
/// nanosecond precision, plus the zone the value is viewed in.
///
/// The underlying [`FixedDuration`] always measures UTC elapsed time; the
/// zone is advisory metadata driving zone-relative truncation and the
/// broken-down [`PointInTime::fields`] view, never a reinterpretation of
/// the instant. Two values are equal exactly when their durations are
/// equal, regardless of zone:
///
/// ```
/// use loosetime::{PointInTime, ZoneOffsetRule};
///
/// let utc = PointInTime::from_epoch_millis(86_400_000);
/// let tokyo = utc.clone().with_zone(ZoneOffsetRule::fixed("Asia/Tokyo", 32_400_000));
/// assert_eq!(utc, tokyo);
/// ```
///
/// Every operation returns a new value; nothing mutates in place.
#[derive(Clone, Debug)]
pub struct PointInTime {
    duration: FixedDuration,
    zone: ZoneOffsetRule,
}

impl PointInTime {
    /// Creates a point in time from epoch milliseconds, viewed in UTC.
    pub fn from_epoch_millis(millis: i64) -> PointInTime {
        PointInTime {
            duration: FixedDuration::from_millis(millis),
            zone: ZoneOffsetRule::utc(),
        }
    }

    /// Creates a point in time from epoch seconds and a nanosecond
    /// adjustment, viewed in UTC.
    ///
    /// # Errors
    ///
    /// As for [`FixedDuration::new`]: a nanosecond magnitude beyond one
    /// whole second is an overflow error.
    pub fn from_epoch_seconds_nanos(
        seconds: i64,
        nanos: i32,
    ) -> Result<PointInTime, Error> {
        Ok(PointInTime {
            duration: FixedDuration::new(seconds, nanos)?,
            zone: ZoneOffsetRule::utc(),
        })
    }

    /// Returns the same instant viewed in the given zone.
    pub fn with_zone(self, zone: ZoneOffsetRule) -> PointInTime {
        PointInTime { duration: self.duration, zone }
    }

    pub(crate) fn from_raw(
        duration: FixedDuration,
        zone: ZoneOffsetRule,
    ) -> PointInTime {
        PointInTime { duration, zone }
    }

    /// Returns elapsed time since the epoch as a duration.
    pub fn duration(&self) -> FixedDuration {
        self.duration
    }

    /// Returns epoch milliseconds.
    pub fn to_epoch_millis(&self) -> i64 {
        self.duration.millis()
    }

    /// Returns whole epoch seconds, rounded toward negative infinity.
    pub fn seconds(&self) -> i64 {
        self.duration.seconds()
    }

    /// Returns the fractional second in nanoseconds, always
    /// non-negative.
    pub fn nanoseconds(&self) -> i32 {
        self.duration.nanoseconds()
    }

    /// Returns the identifier of the zone this value is viewed in.
    pub fn zone_id(&self) -> &str {
        self.zone.id()
    }

    /// Returns the zone rule this value is viewed in.
    pub fn zone(&self) -> &ZoneOffsetRule {
        &self.zone
    }

    /// Returns the broken-down calendar fields of this instant in its
    /// own zone.
    pub fn fields(&self) -> CalendarFields {
        let millis = self.duration.millis();
        let offset = self.zone.offset_at(millis);
        let mut fields = CalendarFields::from_epoch_millis(millis, offset);
        fields.nanosecond = self.duration.nanoseconds();
        fields
    }

    /// Returns the day of the week of this instant in its own zone.
    pub fn weekday(&self) -> Weekday {
        self.fields().weekday()
    }

    /// Compares two instants chronologically, ignoring zones.
    pub fn compare_to(&self, other: &PointInTime) -> Ordering {
        self.duration.compare_to(&other.duration)
    }

    /// Returns this instant advanced by `amount` of `unit`.
    ///
    /// Units up to hours are fixed-length duration addition and never
    /// consult the calendar. Days and larger convert to calendar fields
    /// in the value's own zone, apply the delta there, and convert back
    /// at the offset in effect at the result. Month, quarter, year and
    /// century deltas clamp the day into the target month, so one month
    /// past January 30th of a leap year is February 29th. The sub-second
    /// remainder is preserved exactly in all cases.
    ///
    /// # Example
    ///
    /// ```
    /// use loosetime::{parse, ParseRules, Unit};
    ///
    /// let rules = ParseRules::fixed_now(0);
    /// let t = parse("2008-01-30", &rules)?.add(Unit::Month, 1)?;
    /// let f = t.fields();
    /// assert_eq!((f.year(), f.month(), f.day()), (2008, 2, 29));
    /// # Ok::<(), loosetime::Error>(())
    /// ```
    pub fn add(&self, unit: Unit, amount: i64) -> Result<PointInTime, Error> {
        match unit {
            Unit::Nanosecond => self.add_seconds_nanos(
                amount.div_euclid(1_000_000_000),
                amount.rem_euclid(1_000_000_000) as i32,
            ),
            Unit::Microsecond => self.add_seconds_nanos(
                amount.div_euclid(1_000_000),
                (amount.rem_euclid(1_000_000) * 1_000) as i32,
            ),
            Unit::Millisecond => {
                self.add_duration(FixedDuration::from_millis(amount))
            }
            Unit::Second => self.add_seconds_nanos(amount, 0),
            Unit::Minute => {
                self.add_seconds_nanos(checked_scale(amount, 60)?, 0)
            }
            Unit::Hour => {
                self.add_seconds_nanos(checked_scale(amount, 3_600)?, 0)
            }
            Unit::Day => self.add_days(amount),
            Unit::Week => self.add_days(checked_scale(amount, 7)?),
            Unit::Month => self.add_months(amount),
            Unit::Quarter => self.add_months(checked_scale(amount, 3)?),
            Unit::Year => self.add_years(amount),
            Unit::Century => self.add_years(checked_scale(amount, 100)?),
        }
    }

    fn add_seconds_nanos(
        &self,
        seconds: i64,
        nanos: i32,
    ) -> Result<PointInTime, Error> {
        self.add_duration(FixedDuration::new(seconds, nanos)?)
    }

    fn add_duration(&self, delta: FixedDuration) -> Result<PointInTime, Error> {
        Ok(PointInTime {
            duration: self.duration.checked_add(delta)?,
            zone: self.zone.clone(),
        })
    }

    fn add_days(&self, amount: i64) -> Result<PointInTime, Error> {
        let mut fields = self.own_fields();
        let days = fields
            .epoch_days()
            .checked_add(amount)
            .ok_or_else(|| Error::overflow("days", amount))?;
        // Keeps the resulting year within i32; several million years of
        // headroom remain.
        if i32::try_from(days).is_err() {
            return Err(Error::overflow("days", amount));
        }
        let (year, month, day) = civil::civil_from_days(days);
        fields.year = year;
        fields.month = month;
        fields.day = day;
        self.rebuild(fields)
    }

    fn add_months(&self, amount: i64) -> Result<PointInTime, Error> {
        let mut fields = self.own_fields();
        let total = i64::from(fields.year)
            .checked_mul(12)
            .and_then(|m| m.checked_add(i64::from(fields.month) - 1))
            .and_then(|m| m.checked_add(amount))
            .ok_or_else(|| Error::overflow("months", amount))?;
        let year = i32::try_from(total.div_euclid(12))
            .map_err(|_| Error::overflow("months", amount))?;
        let month = (total.rem_euclid(12) + 1) as i8;
        fields.year = year;
        fields.month = month;
        fields.day = civil::saturate_day_in_month(year, month, fields.day);
        self.rebuild(fields)
    }

    fn add_years(&self, amount: i64) -> Result<PointInTime, Error> {
        let mut fields = self.own_fields();
        let year = i64::from(fields.year)
            .checked_add(amount)
            .and_then(|y| i32::try_from(y).ok())
            .ok_or_else(|| Error::overflow("years", amount))?;
        fields.year = year;
        fields.day =
            civil::saturate_day_in_month(year, fields.month, fields.day);
        self.rebuild(fields)
    }

    /// The calendar fields of this instant in its own zone, at
    /// millisecond resolution.
    fn own_fields(&self) -> CalendarFields {
        let millis = self.duration.millis();
        CalendarFields::from_epoch_millis(millis, self.zone.offset_at(millis))
    }

    /// Converts mutated fields back to an instant, resolving the offset
    /// at the result and carrying the sub-second remainder over exactly.
    fn rebuild(&self, fields: CalendarFields) -> Result<PointInTime, Error> {
        let epoch = epoch_from_fields_in_zone(&fields, &self.zone);
        let duration =
            FixedDuration::from_parts(epoch, self.duration.nanoseconds());
        Ok(PointInTime { duration, zone: self.zone.clone() })
    }

    /// Returns this instant truncated to the start of `unit`, in its own
    /// zone.
    ///
    /// Units up to the hour truncate by modulo arithmetic on the
    /// zone-shifted millisecond value, then shift back by the offset in
    /// effect at the *truncated* instant; across a DST boundary those two
    /// offsets differ and both are applied. Day and larger units zero the
    /// finer calendar fields (a week truncates back to Sunday, a quarter
    /// to its first month, a century to its first year).
    ///
    /// Truncation is idempotent for every unit.
    pub fn truncate(&self, unit: Unit) -> Result<PointInTime, Error> {
        match unit {
            Unit::Nanosecond => Ok(self.clone()),
            Unit::Microsecond => {
                let nanos = self.duration.nanoseconds();
                let duration = FixedDuration::from_parts(
                    self.duration.millis(),
                    nanos - nanos % 1_000,
                );
                Ok(PointInTime { duration, zone: self.zone.clone() })
            }
            Unit::Millisecond => {
                let nanos = self.duration.nanoseconds();
                let duration = FixedDuration::from_parts(
                    self.duration.millis(),
                    nanos - nanos % 1_000_000,
                );
                Ok(PointInTime { duration, zone: self.zone.clone() })
            }
            Unit::Second => self.truncate_clock(MILLIS_PER_SECOND),
            Unit::Minute => self.truncate_clock(MILLIS_PER_MINUTE),
            Unit::Hour => self.truncate_clock(MILLIS_PER_HOUR),
            Unit::Day
            | Unit::Week
            | Unit::Month
            | Unit::Quarter
            | Unit::Year
            | Unit::Century => self.truncate_calendar(unit),
        }
    }

    fn truncate_clock(&self, unit_millis: i64) -> Result<PointInTime, Error> {
        let millis = i128::from(self.duration.millis());
        let first = i128::from(self.zone.offset_at(self.duration.millis()));
        let local = millis + first;
        let truncated = local - local.rem_euclid(i128::from(unit_millis));
        let candidate = civil::clamp_millis(truncated - first);
        let second = i128::from(self.zone.offset_at(candidate));
        let epoch = civil::clamp_millis(truncated - second);
        Ok(PointInTime {
            duration: FixedDuration::from_millis(epoch),
            zone: self.zone.clone(),
        })
    }

    fn truncate_calendar(&self, unit: Unit) -> Result<PointInTime, Error> {
        let mut fields = self.own_fields();
        fields.hour = 0;
        fields.minute = 0;
        fields.second = 0;
        fields.nanosecond = 0;
        match unit {
            Unit::Day => {}
            Unit::Week => {
                let back =
                    i64::from(fields.weekday.to_sunday_zero_offset());
                let days = fields.epoch_days() - back;
                let (year, month, day) = civil::civil_from_days(days);
                fields.year = year;
                fields.month = month;
                fields.day = day;
            }
            Unit::Month => fields.day = 1,
            Unit::Quarter => {
                fields.month = ((fields.month - 1) / 3) * 3 + 1;
                fields.day = 1;
            }
            Unit::Year => {
                fields.month = 1;
                fields.day = 1;
            }
            Unit::Century => {
                fields.year -= fields.year.rem_euclid(100);
                fields.month = 1;
                fields.day = 1;
            }
            _ => {}
        }
        let epoch = epoch_from_fields_in_zone(&fields, &self.zone);
        Ok(PointInTime {
            duration: FixedDuration::from_millis(epoch),
            zone: self.zone.clone(),
        })
    }

    /// Applies a structured [`Shift`]: years, months, weeks, days,
    /// hours, minutes and seconds in that fixed order through the
    /// calendar-aware path, then the sub-second deltas as one duration
    /// addition.
    pub fn shift(&self, shift: &Shift) -> Result<PointInTime, Error> {
        let mut t = self.clone();
        let steps = [
            (Unit::Year, shift.years),
            (Unit::Month, shift.months),
            (Unit::Week, shift.weeks),
            (Unit::Day, shift.days),
            (Unit::Hour, shift.hours),
            (Unit::Minute, shift.minutes),
            (Unit::Second, shift.seconds),
        ];
        for (unit, amount) in steps {
            if amount != 0 {
                t = t.add(unit, amount)?;
            }
        }
        if shift.millis != 0 {
            t = t.add(Unit::Millisecond, shift.millis)?;
        }
        if shift.nanos != 0 {
            t = t.add_seconds_nanos(0, shift.nanos)?;
        }
        Ok(t)
    }
}

/// Converts civil fields to an epoch instant in the given zone,
/// resolving DST with one re-interpretation pass: the fields are first
/// read on the standard offset, and when that instant turns out to fall
/// inside the DST window they are re-read on the shifted offset.
pub(crate) fn epoch_from_fields_in_zone(
    fields: &CalendarFields,
    zone: &ZoneOffsetRule,
) -> i64 {
    let guess = fields.to_epoch_millis(zone.std_offset_millis());
    let offset = zone.offset_at(guess);
    if offset == zone.std_offset_millis() {
        guess
    } else {
        fields.to_epoch_millis(offset)
    }
}

fn checked_scale(amount: i64, factor: i64) -> Result<i64, Error> {
    amount
        .checked_mul(factor)
        .ok_or_else(|| Error::overflow("amount", amount))
}

impl PartialEq for PointInTime {
    fn eq(&self, other: &PointInTime) -> bool {
        self.duration == other.duration
    }
}

impl Eq for PointInTime {}

impl PartialOrd for PointInTime {
    fn partial_cmp(&self, other: &PointInTime) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointInTime {
    fn cmp(&self, other: &PointInTime) -> Ordering {
        self.duration.cmp(&other.duration)
    }
}

impl core::hash::Hash for PointInTime {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.duration.hash(state);
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for PointInTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> PointInTime {
        use quickcheck::Arbitrary;

        PointInTime {
            duration: FixedDuration::arbitrary(g),
            zone: ZoneOffsetRule::utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        parse::parse,
        rules::ParseRules,
        tz::{testzones, ZoneProvider},
    };

    fn rules() -> ParseRules {
        ParseRules::fixed_now(0)
            .with_provider(testzones::provider())
            .with_zone_alias("PST", "America/Los_Angeles")
            .with_zone_alias("PDT", "America/Los_Angeles")
    }

    fn la() -> ZoneOffsetRule {
        testzones::provider().resolve("America/Los_Angeles").unwrap()
    }

    fn ymd(t: &PointInTime) -> (i32, i8, i8, i8, i8, i8) {
        let f = t.fields();
        (f.year(), f.month(), f.day(), f.hour(), f.minute(), f.second())
    }

    #[test]
    fn month_add_clamps_into_leap_february() {
        let t = parse("2008-01-30", &rules()).unwrap();
        let t = t.add(Unit::Month, 1).unwrap();
        assert_eq!(ymd(&t), (2008, 2, 29, 0, 0, 0));
        // And a non-leap year clamps one day shorter.
        let t = parse("2009-01-30", &rules()).unwrap();
        let t = t.add(Unit::Month, 1).unwrap();
        assert_eq!(ymd(&t), (2009, 2, 28, 0, 0, 0));
    }

    #[test]
    fn century_leap_exception() {
        // 1900 is not a leap year.
        let t = parse("1900-03-01", &rules()).unwrap();
        assert_eq!(ymd(&t.add(Unit::Day, -1).unwrap()), (1900, 2, 28, 0, 0, 0));
        assert_eq!(
            ymd(&t.add(Unit::Second, -1).unwrap()),
            (1900, 2, 28, 23, 59, 59),
        );
        // 1904 is.
        let t = parse("1904-03-01", &rules()).unwrap();
        assert_eq!(ymd(&t.add(Unit::Day, -1).unwrap()), (1904, 2, 29, 0, 0, 0));
        assert_eq!(
            ymd(&t.add(Unit::Second, -1).unwrap()),
            (1904, 2, 29, 23, 59, 59),
        );
    }

    #[test]
    fn year_add_clamps_leap_day() {
        let t = parse("2008-02-29", &rules()).unwrap();
        assert_eq!(ymd(&t.add(Unit::Year, 1).unwrap()), (2009, 2, 28, 0, 0, 0));
        assert_eq!(ymd(&t.add(Unit::Year, 4).unwrap()), (2012, 2, 29, 0, 0, 0));
    }

    #[test]
    fn clock_units_never_touch_the_calendar() {
        let t = PointInTime::from_epoch_millis(0);
        assert_eq!(t.add(Unit::Hour, 25).unwrap().to_epoch_millis(), 90_000_000);
        assert_eq!(t.add(Unit::Minute, -1).unwrap().to_epoch_millis(), -60_000);
        assert_eq!(
            t.add(Unit::Nanosecond, 1_500_000_000).unwrap().nanoseconds(),
            500_000_000,
        );
        assert_eq!(
            t.add(Unit::Microsecond, 250).unwrap().nanoseconds(),
            250_000,
        );
    }

    #[test]
    fn sub_second_remainder_survives_calendar_math() {
        let t = parse("2008-05-16 01:23:45.987654321", &rules()).unwrap();
        let moved = t.add(Unit::Month, 7).unwrap();
        assert_eq!(moved.nanoseconds(), 987_654_321);
        assert_eq!(moved.to_epoch_millis().rem_euclid(1_000), 987);
        let f = moved.fields();
        assert_eq!((f.month(), f.day()), (12, 16));
    }

    #[test]
    fn day_add_preserves_clock_across_dst() {
        // 2008-03-08 08:00 PST, the day before the spring-forward.
        let t = parse("2008-03-08 08:00 PST", &rules()).unwrap();
        let next = t.add(Unit::Day, 1).unwrap();
        let f = next.fields();
        assert_eq!((f.day(), f.hour()), (9, 8));
        // The civil day was 23 hours long.
        assert_eq!(
            next.to_epoch_millis() - t.to_epoch_millis(),
            23 * MILLIS_PER_HOUR,
        );
    }

    #[test]
    fn hour_truncation_applies_both_offsets() {
        // 01:30 on the fall-back morning, inside the repeated hour.
        let t = parse("2008-11-02 01:30 PDT", &rules()).unwrap();
        let truncated = t.truncate(Unit::Hour).unwrap();
        let f = truncated.fields();
        assert_eq!((f.hour(), f.minute()), (1, 0));
        assert_eq!(
            t.to_epoch_millis() - truncated.to_epoch_millis(),
            30 * MILLIS_PER_MINUTE,
        );
    }

    #[test]
    fn truncate_is_idempotent_for_every_unit() {
        let units = [
            Unit::Nanosecond,
            Unit::Microsecond,
            Unit::Millisecond,
            Unit::Second,
            Unit::Minute,
            Unit::Hour,
            Unit::Day,
            Unit::Week,
            Unit::Month,
            Unit::Quarter,
            Unit::Year,
            Unit::Century,
        ];
        let samples = [
            parse("2008-05-16 01:23:45.987 PST", &rules()).unwrap(),
            parse("2008-11-02 01:30 PST", &rules()).unwrap(),
            parse("1899-12-31 23:59:59", &rules()).unwrap(),
        ];
        for t in &samples {
            for unit in units {
                let once = t.truncate(unit).unwrap();
                let twice = once.truncate(unit).unwrap();
                assert_eq!(once, twice, "truncate({unit:?}) on {t:?}");
                assert!(once <= *t);
            }
        }
    }

    #[test]
    fn truncate_calendar_boundaries() {
        let t = parse("2008-05-16 13:45:12 PST", &rules()).unwrap();
        assert_eq!(ymd(&t.truncate(Unit::Day).unwrap()), (2008, 5, 16, 0, 0, 0));
        // May 16th 2008 was a Friday; the week starts the preceding
        // Sunday.
        assert_eq!(
            ymd(&t.truncate(Unit::Week).unwrap()),
            (2008, 5, 11, 0, 0, 0),
        );
        assert_eq!(ymd(&t.truncate(Unit::Month).unwrap()), (2008, 5, 1, 0, 0, 0));
        assert_eq!(
            ymd(&t.truncate(Unit::Quarter).unwrap()),
            (2008, 4, 1, 0, 0, 0),
        );
        assert_eq!(ymd(&t.truncate(Unit::Year).unwrap()), (2008, 1, 1, 0, 0, 0));
        assert_eq!(
            ymd(&t.truncate(Unit::Century).unwrap()),
            (2000, 1, 1, 0, 0, 0),
        );
    }

    #[test]
    fn truncate_millisecond_trims_finer_digits() {
        let t = PointInTime::from_epoch_seconds_nanos(12, 987_654_321).unwrap();
        let ms = t.truncate(Unit::Millisecond).unwrap();
        assert_eq!(ms.nanoseconds(), 987_000_000);
        assert_eq!(ms.to_epoch_millis(), 12_987);
        let us = t.truncate(Unit::Microsecond).unwrap();
        assert_eq!(us.nanoseconds(), 987_654_000);
    }

    #[test]
    fn shift_applies_in_fixed_order() {
        let t = parse("2008-01-30", &rules()).unwrap();
        let shifted = t
            .shift(&Shift::new().months(1).days(1).hours(6))
            .unwrap();
        // Month first clamps into February, then the day steps over the
        // month boundary.
        assert_eq!(ymd(&shifted), (2008, 3, 1, 6, 0, 0));

        let back = parse("2008-03-01 06:00", &rules())
            .unwrap()
            .shift(&Shift::new().millis(250).nanos(500_000))
            .unwrap();
        assert_eq!(back.nanoseconds(), 250_500_000);
    }

    #[test]
    fn equality_and_ordering_ignore_zone() {
        let utc = PointInTime::from_epoch_millis(1_210_926_225_987);
        let zoned = utc.clone().with_zone(la());
        assert_eq!(utc, zoned);
        assert_eq!(utc.compare_to(&zoned), Ordering::Equal);
        assert!(utc < PointInTime::from_epoch_millis(1_210_926_225_988));
    }

    #[test]
    fn weekday_matches_fields() {
        let t = parse("2008-05-16", &rules()).unwrap();
        assert_eq!(t.weekday(), Weekday::Friday);
        assert_eq!(t.fields().weekday(), Weekday::Friday);
    }

    #[test]
    fn from_epoch_seconds_nanos_normalizes() {
        let t = PointInTime::from_epoch_seconds_nanos(0, -1).unwrap();
        assert_eq!(t.seconds(), -1);
        assert_eq!(t.nanoseconds(), 999_999_999);
        assert!(PointInTime::from_epoch_seconds_nanos(0, 2_000_000_000)
            .unwrap_err()
            .is_overflow());
    }

    quickcheck::quickcheck! {
        fn prop_compare_antisymmetric(
            a: PointInTime,
            b: PointInTime
        ) -> bool {
            a.compare_to(&b) == b.compare_to(&a).reverse()
        }

        fn prop_truncate_second_idempotent(t: PointInTime) -> bool {
            let once = t.truncate(Unit::Second).unwrap();
            once.truncate(Unit::Second).unwrap() == once
        }
    }
}

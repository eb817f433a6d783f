use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use crate::{
    civil::{self, CalendarFields, Weekday},
    datetime::{self, PointInTime, Unit},
    duration::FixedDuration,
    error::Error,
    rules::ParseRules,
};

mod scan;
mod zone;

use self::scan::{scan, Token};

/// Parses a loosely formatted date/time string into a [`PointInTime`]
/// under the given rules.
///
/// There is no format string. The input is trimmed, uppercased and split
/// into alphanumeric tokens; each token is then assigned a meaning by
/// position and range. Month names (in the configured languages,
/// abbreviated freely), AM/PM markers, two-digit years, packed
/// `YYYYMMDD` dates, relative offsets like `+3` or `-1Y` and trailing
/// zone designations like `PST`, `GMT-7` or `+07:00` are all recognized.
///
/// # Errors
///
/// All failures are terminal and typed: an input that never determines a
/// year, month and day is [`ErrorKind::MissingField`]; an out-of-range
/// field is [`ErrorKind::InvalidValue`] carrying the offending literal;
/// an unresolvable trailing zone is [`ErrorKind::AmbiguousZone`]; empty
/// input is [`ErrorKind::EmptyInput`].
///
/// # Example
///
/// ```
/// use loosetime::{parse, ParseRules};
///
/// let rules = ParseRules::fixed_now(1_200_000_000_000);
/// let a = parse("May 16, 2008 1:23:45 AM", &rules)?;
/// let b = parse("2008-05-16 01:23:45", &rules)?;
/// assert_eq!(a, b);
/// # Ok::<(), loosetime::Error>(())
/// ```
///
/// [`ErrorKind::MissingField`]: crate::ErrorKind::MissingField
/// [`ErrorKind::InvalidValue`]: crate::ErrorKind::InvalidValue
/// [`ErrorKind::AmbiguousZone`]: crate::ErrorKind::AmbiguousZone
/// [`ErrorKind::EmptyInput`]: crate::ErrorKind::EmptyInput
pub fn parse(text: &str, rules: &ParseRules) -> Result<PointInTime, Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::empty_input());
    }
    let input = trimmed.to_uppercase();
    trace!("parsing {input:?}");
    if let Some(result) = parse_compact(&input, rules) {
        return result;
    }
    parse_general(&input, rules)
}

/// Handles a single contiguous alphanumeric run with no separators: a
/// packed `YYYYMMDD` date or a relative reference against "now". Returns
/// `None` when the input should take the general multi-token path.
fn parse_compact(
    input: &str,
    rules: &ParseRules,
) -> Option<Result<PointInTime, Error>> {
    let (sign, rest) = match input.strip_prefix('+') {
        Some(r) => (Some(1i64), r),
        None => match input.strip_prefix('-') {
            Some(r) => (Some(-1i64), r),
            None => (None, input),
        },
    };
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let digit_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (digits, suffix) = rest.split_at(digit_len);
    match (sign, suffix) {
        (None, "") if digits.len() == 8 => Some(packed_date(digits, rules)),
        // A bare digit run with no sign and no unit letter is not a
        // relative reference; it falls through to the general path. The
        // unit-letter forms below do treat a bare count as positive.
        // That asymmetry is deliberate.
        (None, "") => None,
        (Some(sign), "") => Some(relative(Unit::Day, sign, digits, rules)),
        (sign, "D") if !digits.is_empty() => {
            Some(relative(Unit::Day, sign.unwrap_or(1), digits, rules))
        }
        (sign, "M") if !digits.is_empty() => {
            Some(relative(Unit::Month, sign.unwrap_or(1), digits, rules))
        }
        (sign, "Y") if !digits.is_empty() => {
            Some(relative(Unit::Year, sign.unwrap_or(1), digits, rules))
        }
        _ if sign.is_some() => {
            Some(Err(Error::invalid_value("relative offset", input)))
        }
        _ => None,
    }
}

fn relative(
    unit: Unit,
    sign: i64,
    digits: &str,
    rules: &ParseRules,
) -> Result<PointInTime, Error> {
    if digits.is_empty() || digits.len() > 9 {
        return Err(Error::invalid_value("relative offset", digits));
    }
    let amount: i64 = digits.parse().unwrap_or(0);
    trace!("relative reference: {:+} {unit:?}", sign * amount);
    let now = PointInTime::from_epoch_millis(rules.now_millis())
        .with_zone(rules.default_zone());
    now.add(unit, sign * amount)
}

fn packed_date(digits: &str, rules: &ParseRules) -> Result<PointInTime, Error> {
    debug_assert_eq!(digits.len(), 8);
    let mut fields = Fields::default();
    fields.year = Some(Slot::from_digits(&digits[0..4]));
    fields.month = Some(Slot::from_digits(&digits[4..6]));
    fields.day = Some(Slot::from_digits(&digits[6..8]));
    let fields = validate(&fields, rules)?;
    build(fields, None, rules)
}

fn parse_general(
    input: &str,
    rules: &ParseRules,
) -> Result<PointInTime, Error> {
    let (body, zone_text) = zone::split_suffix(input, rules);
    let tokens = scan(body);
    trace!("zone candidate {zone_text:?}, tokens {tokens:?}");
    let resolver = Resolver::new(rules, tokens);
    let fields = resolver.run()?;
    build(fields, zone_text, rules)
}

fn build(
    fields: CalendarFields,
    zone_text: Option<&str>,
    rules: &ParseRules,
) -> Result<PointInTime, Error> {
    let zone = zone::resolve(zone_text, &fields, rules)?;
    let epoch = datetime::epoch_from_fields_in_zone(&fields, &zone);
    // Zone offsets are whole minutes, so the sub-second milliseconds of
    // the civil fields survive into the epoch value and the parsed
    // nanoseconds slot in beside them untouched.
    let duration = FixedDuration::from_parts(epoch, fields.nanosecond);
    debug!(
        "parsed {:04}-{:02}-{:02} {:02}:{:02}:{:02} in {} -> {}ms",
        fields.year,
        fields.month,
        fields.day,
        fields.hour,
        fields.minute,
        fields.second,
        zone.id(),
        epoch,
    );
    Ok(PointInTime::from_raw(duration, zone))
}

/// A value assigned to a semantic slot, keeping the literal it came from
/// for diagnostics.
#[derive(Clone, Debug)]
struct Slot {
    value: i64,
    raw: String,
}

impl Slot {
    fn from_digits(digits: &str) -> Slot {
        Slot { value: digits.parse().unwrap_or(0), raw: digits.to_string() }
    }
}

#[derive(Clone, Debug, Default)]
struct Fields {
    year: Option<Slot>,
    month: Option<Slot>,
    day: Option<Slot>,
    hour: Option<Slot>,
    minute: Option<Slot>,
    second: Option<Slot>,
    nanos: Option<i32>,
    /// Set when a 4-5 digit year led the input, which disables the
    /// day-before-month preference for the remaining tokens.
    year_first: bool,
}

/// The heuristic engine: an ordered pipeline of classification stages
/// over the token list. Each stage consumes the tokens it understands and
/// leaves the rest for the next one, which keeps the priority order
/// auditable and testable per stage.
struct Resolver<'r> {
    rules: &'r ParseRules,
    tokens: Vec<Token>,
    consumed: Vec<bool>,
    fields: Fields,
}

impl<'r> Resolver<'r> {
    fn new(rules: &'r ParseRules, tokens: Vec<Token>) -> Resolver<'r> {
        let consumed = vec![false; tokens.len()];
        Resolver { rules, tokens, consumed, fields: Fields::default() }
    }

    fn run(mut self) -> Result<CalendarFields, Error> {
        self.scan_names();
        self.scan_year();
        self.assign_remaining()?;
        self.apply_meridiem_tokens();
        self.reject_unknown_alpha()?;
        validate(&self.fields, self.rules)
    }

    /// Month-name scan: alpha tokens longer than two characters are
    /// matched as prefixes of the configured languages' month names; the
    /// first match wins and stops the scan. Weekday names are recognized
    /// and skipped outright.
    fn scan_names(&mut self) {
        let mut month_found = false;
        for i in 0..self.tokens.len() {
            if self.tokens[i].is_numeric() {
                continue;
            }
            let raw = &self.tokens[i].raw;
            if raw == "AM" || raw == "PM" {
                continue;
            }
            if !month_found {
                if let Some(month) = self.rules.month_from_token(raw) {
                    trace!("token {raw:?} is month {month}");
                    self.fields.month = Some(Slot {
                        value: i64::from(month),
                        raw: raw.clone(),
                    });
                    self.consumed[i] = true;
                    month_found = true;
                    continue;
                }
            }
            if self.rules.is_weekday_token(raw) {
                trace!("token {raw:?} is a weekday name, skipped");
                self.consumed[i] = true;
            }
        }
    }

    /// Year scan: the first 4-5 digit token is the year. When it leads
    /// the input, later disambiguation switches to year-first order. An
    /// 8-digit token with no date fields assigned yet is a packed
    /// `YYYYMMDD`. Under day-before-month rules with a trailing year,
    /// the token immediately preceding the year is the day, not the
    /// month.
    fn scan_year(&mut self) {
        for i in 0..self.tokens.len() {
            if self.consumed[i] || !self.tokens[i].is_numeric() {
                continue;
            }
            if !self.tokens[i].suffix().is_empty() {
                continue;
            }
            let digit_len = self.tokens[i].digit_len();
            if (4..=5).contains(&digit_len) {
                let token = &self.tokens[i];
                trace!("token {:?} is the year", token.raw);
                self.fields.year = Some(Slot {
                    value: token.value(),
                    raw: token.raw.clone(),
                });
                self.fields.year_first = i == 0;
                self.consumed[i] = true;
                if self.rules.day_before_month()
                    && !self.fields.year_first
                    && self.fields.day.is_none()
                {
                    self.consume_day_before_year(i);
                }
                return;
            }
            if digit_len == 8
                && self.fields.year.is_none()
                && self.fields.month.is_none()
                && self.fields.day.is_none()
            {
                let digits = self.tokens[i].digits().to_string();
                trace!("token {digits:?} is a packed date");
                self.fields.year = Some(Slot::from_digits(&digits[0..4]));
                self.fields.month = Some(Slot::from_digits(&digits[4..6]));
                self.fields.day = Some(Slot::from_digits(&digits[6..8]));
                self.consumed[i] = true;
                return;
            }
        }
    }

    /// The one context-sensitive lookback of the grammar.
    fn consume_day_before_year(&mut self, year_index: usize) {
        let Some(prev) = year_index.checked_sub(1) else { return };
        if self.consumed[prev] || !self.tokens[prev].is_numeric() {
            return;
        }
        if !self.tokens[prev].suffix().is_empty() {
            return;
        }
        let token = &self.tokens[prev];
        trace!("token {:?} precedes the year and becomes the day", token.raw);
        self.fields.day =
            Some(Slot { value: token.value(), raw: token.raw.clone() });
        self.consumed[prev] = true;
    }

    /// Assigns every remaining numeric token to the first still-unfilled
    /// slot it is in range for, in the fixed priority order
    /// day/month/day/year/hour/minute/second/sub-second.
    fn assign_remaining(&mut self) -> Result<(), Error> {
        for i in 0..self.tokens.len() {
            if self.consumed[i] || !self.tokens[i].is_numeric() {
                continue;
            }
            self.assign_numeric(i)?;
            self.consumed[i] = true;
        }
        Ok(())
    }

    fn assign_numeric(&mut self, i: usize) -> Result<(), Error> {
        let token = self.tokens[i].clone();
        let value = token.value();
        let slot = || Slot { value, raw: token.raw.clone() };
        // The first slot whose range check fails names the error if
        // nothing further fits.
        let mut first_fail: Option<&'static str> = None;

        if self.rules.day_before_month()
            && !self.fields.year_first
            && self.fields.day.is_none()
        {
            if value <= 31 {
                trace!("token {:?} -> day (day-before-month)", token.raw);
                self.fields.day = Some(slot());
                return Ok(());
            }
            first_fail.get_or_insert("day");
        }
        if self.fields.month.is_none() {
            if (1..=12).contains(&value) {
                trace!("token {:?} -> month", token.raw);
                self.fields.month = Some(slot());
                return Ok(());
            }
            first_fail.get_or_insert("month");
        }
        if self.fields.day.is_none() {
            if value <= 31 {
                trace!("token {:?} -> day", token.raw);
                self.fields.day = Some(slot());
                return Ok(());
            }
            first_fail.get_or_insert("day");
        }
        if self.fields.year.is_none() {
            if value <= 999 {
                let year = i64::from(self.rules.pivot_year(value as i32));
                trace!("token {:?} -> year {year} via pivot", token.raw);
                self.fields.year =
                    Some(Slot { value: year, raw: token.raw.clone() });
                return Ok(());
            }
            first_fail.get_or_insert("year");
        }
        if self.fields.hour.is_none() {
            if value <= 23 {
                trace!("token {:?} -> hour", token.raw);
                self.fields.hour = Some(slot());
                return Ok(());
            }
            first_fail.get_or_insert("hour");
        }
        if self.fields.hour.is_some() && self.fields.minute.is_none() {
            if value <= 59 {
                trace!("token {:?} -> minute", token.raw);
                self.fields.minute = Some(slot());
                let suffix = token.suffix();
                if suffix == "AM" || suffix == "PM" {
                    self.apply_meridiem(suffix);
                }
                return Ok(());
            }
            first_fail.get_or_insert("minute");
        }
        if self.fields.minute.is_some() && self.fields.second.is_none() {
            if value <= 60 {
                trace!("token {:?} -> second", token.raw);
                self.fields.second = Some(slot());
                return Ok(());
            }
            first_fail.get_or_insert("second");
        }
        if self.fields.second.is_some() && self.fields.nanos.is_none() {
            trace!("token {:?} -> sub-second", token.raw);
            self.fields.nanos = Some(nanos_from_digits(token.digits()));
            return Ok(());
        }
        Err(Error::invalid_value(first_fail.unwrap_or("date"), token.raw))
    }

    /// Standalone AM/PM tokens adjust a previously parsed 12-hour-clock
    /// hour. With no hour to adjust, the marker is inert.
    fn apply_meridiem_tokens(&mut self) {
        for i in 0..self.tokens.len() {
            if self.consumed[i] || self.tokens[i].is_numeric() {
                continue;
            }
            if self.tokens[i].raw == "AM" || self.tokens[i].raw == "PM" {
                let raw = self.tokens[i].raw.clone();
                self.apply_meridiem(&raw);
                self.consumed[i] = true;
            }
        }
    }

    fn apply_meridiem(&mut self, marker: &str) {
        let Some(hour) = self.fields.hour.as_mut() else { return };
        let adjusted = match marker {
            // Noon stays noon; midnight is written 12 AM.
            "PM" if (0..12).contains(&hour.value) => hour.value + 12,
            "AM" if hour.value == 12 => 0,
            _ => hour.value,
        };
        if adjusted != hour.value {
            trace!("meridiem {marker} adjusts hour {} -> {adjusted}", hour.value);
            hour.value = adjusted;
        }
    }

    /// Anything alphabetic still unclaimed was a zone candidate that
    /// appeared somewhere a zone cannot, or an unknown word; either way
    /// it is unresolvable.
    fn reject_unknown_alpha(&self) -> Result<(), Error> {
        for i in 0..self.tokens.len() {
            if self.consumed[i] || self.tokens[i].is_numeric() {
                continue;
            }
            return Err(Error::ambiguous_zone(self.tokens[i].raw.clone()));
        }
        Ok(())
    }
}

/// Right-pads or truncates a digit run to nine digits of nanoseconds, so
/// `.987` means 987 milliseconds.
fn nanos_from_digits(digits: &str) -> i32 {
    let bytes = digits.as_bytes();
    let mut nanos: i32 = 0;
    for i in 0..9 {
        let digit = bytes.get(i).map_or(0, |b| i32::from(b - b'0'));
        nanos = nanos * 10 + digit;
    }
    nanos
}

/// Final legality check over the assigned slots, producing the civil
/// fields handed to zone resolution and epoch conversion.
fn validate(
    fields: &Fields,
    rules: &ParseRules,
) -> Result<CalendarFields, Error> {
    let year_slot =
        fields.year.as_ref().ok_or_else(|| Error::missing_field("year"))?;
    let month_slot =
        fields.month.as_ref().ok_or_else(|| Error::missing_field("month"))?;
    let day_slot =
        fields.day.as_ref().ok_or_else(|| Error::missing_field("day"))?;

    // The calendar has no year zero.
    if year_slot.value == 0 {
        return Err(Error::invalid_value("year", year_slot.raw.clone()));
    }
    let year = year_slot.value as i32;
    if !(1..=12).contains(&month_slot.value) {
        return Err(Error::invalid_value("month", month_slot.raw.clone()));
    }
    let month = month_slot.value as i8;
    let max_day = i64::from(civil::days_in_month(year, month));
    if day_slot.value < 1 || day_slot.value > max_day {
        return Err(Error::invalid_value("day", day_slot.raw.clone()));
    }
    let day = day_slot.value as i8;

    let hour = match fields.hour {
        Some(ref slot) if slot.value > 23 => {
            return Err(Error::invalid_value("hour", slot.raw.clone()));
        }
        Some(ref slot) => slot.value as i8,
        None => 0,
    };
    let minute = match fields.minute {
        Some(ref slot) if slot.value > 59 => {
            return Err(Error::invalid_value("minute", slot.raw.clone()));
        }
        Some(ref slot) => slot.value as i8,
        None => 0,
    };
    let second = match fields.second {
        Some(ref slot) if slot.value > 60 => {
            return Err(Error::invalid_value("second", slot.raw.clone()));
        }
        Some(ref slot)
            if slot.value == 60
                && !civil::leap_second_slot(month, day, hour, minute) =>
        {
            return Err(Error::invalid_value("second", slot.raw.clone()));
        }
        Some(ref slot) => slot.value as i8,
        None => 0,
    };

    let weekday = Weekday::from_epoch_days(
        civil::days_from_civil(year, month, day),
        rules.epoch_weekday_offset(),
    );
    Ok(CalendarFields {
        year,
        month,
        day,
        hour,
        minute,
        second,
        nanosecond: fields.nanos.unwrap_or(0),
        weekday,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        civil::days_from_civil,
        tz::{testzones, ZoneProvider},
    };

    const HOUR: i64 = 3_600_000;
    const DAY: i64 = 86_400_000;

    fn utc_millis(year: i32, month: i8, day: i8) -> i64 {
        days_from_civil(year, month, day) * DAY
    }

    /// Rules anchored mid-2024 with the test zone database, matching the
    /// reference year the pivot examples are specified against.
    fn rules() -> ParseRules {
        ParseRules::fixed_now(utc_millis(2024, 6, 1))
            .with_provider(testzones::provider())
            .with_zone_alias("PST", "America/Los_Angeles")
            .with_zone_alias("PDT", "America/Los_Angeles")
            .with_zone_alias("EST", "America/New_York")
            .with_zone_alias("GMT", "UTC")
    }

    #[test]
    fn iso_with_fraction_and_zone() {
        let _ = env_logger::try_init();
        let t = parse("2008-05-16 01:23:45.987 PST", &rules()).unwrap();
        // Mid-May Los Angeles is on daylight time, UTC-7.
        let local = utc_millis(2008, 5, 16) + HOUR + 23 * 60_000 + 45_987;
        assert_eq!(t.to_epoch_millis(), local + 7 * HOUR);
        assert_eq!(t.to_epoch_millis().rem_euclid(1_000), 987);
        assert_eq!(t.nanoseconds(), 987_000_000);
        assert_eq!(t.zone_id(), "America/Los_Angeles");
    }

    #[test]
    fn winter_zone_alias_uses_standard_offset() {
        let t = parse("2008-01-15 12:00 PST", &rules()).unwrap();
        assert_eq!(t.to_epoch_millis(), utc_millis(2008, 1, 15) + 20 * HOUR);
    }

    #[test]
    fn token_order_disambiguation() {
        let t = parse("2008-05-16", &rules()).unwrap();
        let f = t.fields();
        assert_eq!((f.year(), f.month(), f.day()), (2008, 5, 16));

        // Month first when the year leads is year-month-day.
        let t = parse("2008 05 16", &rules()).unwrap();
        let f = t.fields();
        assert_eq!((f.year(), f.month(), f.day()), (2008, 5, 16));

        // Month names abbreviate and can sit anywhere.
        let t = parse("16 May 2008", &rules()).unwrap();
        let f = t.fields();
        assert_eq!((f.year(), f.month(), f.day()), (2008, 5, 16));
        let t = parse("May 16, 2008 1:23 AM", &rules()).unwrap();
        let f = t.fields();
        assert_eq!((f.year(), f.month(), f.day()), (2008, 5, 16));
        assert_eq!((f.hour(), f.minute()), (1, 23));

        // Weekday names are recognized and skipped.
        let t = parse("Friday May 16 2008", &rules()).unwrap();
        assert_eq!(t.fields().day(), 16);
    }

    #[test]
    fn day_before_month_ordering() {
        let rules = rules().with_day_before_month(true);
        // With a leading year the preference is suspended.
        let t = parse("2008 05 16", &rules).unwrap();
        let f = t.fields();
        assert_eq!((f.month(), f.day()), (5, 16));
        // With a month name, the number next to the trailing year is the
        // day.
        let t = parse("16 May 2008", &rules).unwrap();
        let f = t.fields();
        assert_eq!((f.month(), f.day()), (5, 16));
        // All-numeric with a trailing year: the pre-year token is pinned
        // as the day and the leading token must be the month.
        let t = parse("05 16 2008", &rules).unwrap();
        let f = t.fields();
        assert_eq!((f.month(), f.day()), (5, 16));
        // Without a leading year, an ambiguous small pair honors the
        // preference: the first number is the day.
        let t = parse("04 05 98", &rules).unwrap();
        let f = t.fields();
        assert_eq!((f.day(), f.month(), f.year()), (4, 5, 1998));
    }

    #[test]
    fn two_digit_year_pivot() {
        let t = parse("5/16/30", &rules()).unwrap();
        assert_eq!(t.fields().year(), 2030);
        let t = parse("5/16/90", &rules()).unwrap();
        assert_eq!(t.fields().year(), 1990);
        // Three digits offset from 1900.
        let t = parse("5/16/108", &rules()).unwrap();
        assert_eq!(t.fields().year(), 2008);
    }

    #[test]
    fn meridiem_adjustment() {
        let hour_of = |text: &str| {
            parse(text, &rules()).unwrap().fields().hour()
        };
        assert_eq!(hour_of("2008/6/5 10:30 PM"), 22);
        assert_eq!(hour_of("2008/6/5 10:30PM"), 22);
        assert_eq!(hour_of("2008/6/5 10:30 AM"), 10);
        assert_eq!(hour_of("2008/6/5 12:30 AM"), 0);
        assert_eq!(hour_of("2008/6/5 12:30 PM"), 12);
    }

    #[test]
    fn packed_dates() {
        let t = parse("20080109", &rules()).unwrap();
        assert_eq!(t.to_epoch_millis(), utc_millis(2008, 1, 9));
        // Packed date with a time alongside.
        let t = parse("20080109 12:30", &rules()).unwrap();
        assert_eq!(
            t.to_epoch_millis(),
            utc_millis(2008, 1, 9) + 12 * HOUR + 30 * 60_000,
        );
    }

    #[test]
    fn relative_references() {
        let t = parse("+3", &rules()).unwrap();
        assert_eq!(t.to_epoch_millis(), utc_millis(2024, 6, 4));
        let t = parse("-3", &rules()).unwrap();
        assert_eq!(t.to_epoch_millis(), utc_millis(2024, 5, 29));
        let t = parse("30D", &rules()).unwrap();
        assert_eq!(t.to_epoch_millis(), utc_millis(2024, 7, 1));
        let t = parse("+2M", &rules()).unwrap();
        assert_eq!(t.to_epoch_millis(), utc_millis(2024, 8, 1));
        let t = parse("-1Y", &rules()).unwrap();
        assert_eq!(t.to_epoch_millis(), utc_millis(2023, 6, 1));
    }

    #[test]
    fn bare_unsigned_count_is_not_relative() {
        // `30D` is thirty days from now, but a bare `30` takes the
        // general path and dies for want of a year. The asymmetry is
        // load-bearing; see the relative-token grammar.
        let err = parse("30", &rules()).unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn numeric_offset_zones() {
        // January: the Pacific reference zone is on standard time and
        // the ISO offset stands as written.
        let t = parse("2008-01-15 12:00 +05:30", &rules()).unwrap();
        assert_eq!(
            t.to_epoch_millis(),
            utc_millis(2008, 1, 15) + 12 * HOUR - (5 * HOUR + 1_800_000),
        );
        assert_eq!(t.zone_id(), "+05:30");

        // The POSIX spelling GMT-7 denotes the same offset as +07:00.
        let a = parse("2008-01-15 12:00 GMT-7", &rules()).unwrap();
        let b = parse("2008-01-15 12:00 +07:00", &rules()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn numeric_offset_dst_correction() {
        // July: the reference zone is in DST, the derived offset loses
        // an hour, and -07:00 happens to be a known zone by alias.
        let rules = rules().with_zone_alias("-07:00", "America/Denver");
        let t = parse("2008-07-15 12:00 -06:00", &rules).unwrap();
        assert_eq!(t.zone_id(), "America/Denver");
        // Denver runs at -06:00 in July, so the instant reads back as
        // written.
        assert_eq!(
            t.to_epoch_millis(),
            utc_millis(2008, 7, 15) + 12 * HOUR + 6 * HOUR,
        );
    }

    #[test]
    fn missing_zone_uses_default() {
        let denver = testzones::provider().resolve("America/Denver").unwrap();
        let rules = rules().with_default_zone(denver);
        let t = parse("2008-01-15 12:00", &rules).unwrap();
        assert_eq!(t.to_epoch_millis(), utc_millis(2008, 1, 15) + 19 * HOUR);
        assert_eq!(t.zone_id(), "America/Denver");
    }

    #[test]
    fn leap_second_placeholder() {
        let t = parse("2008-12-31 23:59:60", &rules()).unwrap();
        assert_eq!(t.to_epoch_millis(), utc_millis(2009, 1, 1));
        let t = parse("2012-06-30 23:59:60", &rules()).unwrap();
        assert_eq!(t.to_epoch_millis(), utc_millis(2012, 7, 1));

        let err = parse("2008-12-30 23:59:60", &rules()).unwrap_err();
        assert!(err.is_invalid_value());
        let err = parse("2008-12-31 23:58:60", &rules()).unwrap_err();
        assert!(err.is_invalid_value());
    }

    #[test]
    fn invalid_inputs() {
        use crate::error::ErrorKind;

        let kind = |text: &str| {
            parse(text, &rules()).unwrap_err().kind().clone()
        };
        assert_eq!(
            kind("2010-02-00"),
            ErrorKind::InvalidValue { field: "day", literal: "00".into() },
        );
        assert_eq!(
            kind("2010-01-32"),
            ErrorKind::InvalidValue { field: "day", literal: "32".into() },
        );
        assert_eq!(
            kind("2010.04.30 8:61"),
            ErrorKind::InvalidValue { field: "minute", literal: "61".into() },
        );
        assert_eq!(
            kind("0000-01-02"),
            ErrorKind::InvalidValue { field: "year", literal: "0000".into() },
        );
        assert_eq!(kind("20-Sep"), ErrorKind::MissingField { field: "year" });
        // February legality tracks the leap cycle.
        assert!(parse("2019-02-29", &rules()).unwrap_err().is_invalid_value());
        assert!(parse("2020-02-29", &rules()).is_ok());
        assert!(parse("1900-02-29", &rules()).unwrap_err().is_invalid_value());
    }

    #[test]
    fn empty_input() {
        assert!(parse("", &rules()).unwrap_err().is_empty_input());
        assert!(parse("   ", &rules()).unwrap_err().is_empty_input());
    }

    #[test]
    fn unknown_words_are_ambiguous_zones() {
        let err = parse("2008-05-16 01:23:45 XQZ", &rules()).unwrap_err();
        assert!(err.is_ambiguous_zone());
        // Mid-string unknown words are failed zone candidates too.
        let err = parse("2008 BLORP 16", &rules()).unwrap_err();
        assert!(err.is_ambiguous_zone());
    }

    #[test]
    fn multi_language_month_names() {
        use crate::rules::Language;

        let rules = rules()
            .with_language(Language::French)
            .with_language(Language::German);
        let a = parse("16 décembre 2008", &rules).unwrap();
        let b = parse("16 Dezember 2008", &rules).unwrap();
        let c = parse("December 16 2008", &rules).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn parse_is_pure_over_rules() {
        // Equal inputs under equal rules give equal instants; the engine
        // keeps no state between calls.
        let r = rules();
        let a = parse("2008-05-16 01:23:45.987 PST", &r).unwrap();
        let b = parse("2008-05-16 01:23:45.987 PST", &r).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.compare_to(&b), core::cmp::Ordering::Equal);
    }
}

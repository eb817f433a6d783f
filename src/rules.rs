use alloc::{
    collections::BTreeMap, string::String, sync::Arc, vec, vec::Vec,
};

use crate::{
    civil::CalendarFields,
    tz::{self, ZoneOffsetRule, ZoneProvider},
};

/// 1970-01-01 was a Thursday; weekday numbering starts the week on Sunday
/// at zero.
pub(crate) const DEFAULT_EPOCH_WEEKDAY_OFFSET: u8 = 4;

/// A language whose month names (and weekday names) the parser can
/// recognize.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Language {
    English,
    French,
    German,
    Spanish,
}

const ENGLISH_MONTHS: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

const FRENCH_MONTHS: [&str; 12] = [
    "JANVIER",
    "FÉVRIER",
    "MARS",
    "AVRIL",
    "MAI",
    "JUIN",
    "JUILLET",
    "AOÛT",
    "SEPTEMBRE",
    "OCTOBRE",
    "NOVEMBRE",
    "DÉCEMBRE",
];

const GERMAN_MONTHS: [&str; 12] = [
    "JANUAR",
    "FEBRUAR",
    "MÄRZ",
    "APRIL",
    "MAI",
    "JUNI",
    "JULI",
    "AUGUST",
    "SEPTEMBER",
    "OKTOBER",
    "NOVEMBER",
    "DEZEMBER",
];

const SPANISH_MONTHS: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// Unaccented spellings accepted in addition to the proper ones, since
/// input normalization is plain uppercasing and users type what their
/// keyboard gives them.
const FRENCH_MONTH_FOLDS: &[(&str, i8)] =
    &[("FEVRIER", 2), ("AOUT", 8), ("DECEMBRE", 12)];
const GERMAN_MONTH_FOLDS: &[(&str, i8)] = &[("MAERZ", 3)];
const SPANISH_WEEKDAY_FOLDS: &[&str] = &["MIERCOLES", "SABADO"];

const ENGLISH_WEEKDAYS: [&str; 7] = [
    "SUNDAY",
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
];
const FRENCH_WEEKDAYS: [&str; 7] = [
    "DIMANCHE",
    "LUNDI",
    "MARDI",
    "MERCREDI",
    "JEUDI",
    "VENDREDI",
    "SAMEDI",
];
const GERMAN_WEEKDAYS: [&str; 7] = [
    "SONNTAG",
    "MONTAG",
    "DIENSTAG",
    "MITTWOCH",
    "DONNERSTAG",
    "FREITAG",
    "SAMSTAG",
];
const SPANISH_WEEKDAYS: [&str; 7] = [
    "DOMINGO",
    "LUNES",
    "MARTES",
    "MIÉRCOLES",
    "JUEVES",
    "VIERNES",
    "SÁBADO",
];

impl Language {
    fn month_names(self) -> &'static [&'static str; 12] {
        match self {
            Language::English => &ENGLISH_MONTHS,
            Language::French => &FRENCH_MONTHS,
            Language::German => &GERMAN_MONTHS,
            Language::Spanish => &SPANISH_MONTHS,
        }
    }

    fn month_folds(self) -> &'static [(&'static str, i8)] {
        match self {
            Language::French => FRENCH_MONTH_FOLDS,
            Language::German => GERMAN_MONTH_FOLDS,
            Language::English | Language::Spanish => &[],
        }
    }

    fn weekday_names(self) -> &'static [&'static str; 7] {
        match self {
            Language::English => &ENGLISH_WEEKDAYS,
            Language::French => &FRENCH_WEEKDAYS,
            Language::German => &GERMAN_WEEKDAYS,
            Language::Spanish => &SPANISH_WEEKDAYS,
        }
    }

    /// Matches an uppercased token of length > 2 as a prefix of one of
    /// this language's month names, e.g. `DEC` against `DECEMBER`.
    pub(crate) fn month_from_prefix(self, token: &str) -> Option<i8> {
        if token.chars().count() <= 2 {
            return None;
        }
        for (i, name) in self.month_names().iter().enumerate() {
            if name.starts_with(token) {
                return Some((i + 1) as i8);
            }
        }
        for &(name, month) in self.month_folds() {
            if name.starts_with(token) {
                return Some(month);
            }
        }
        None
    }

    pub(crate) fn is_weekday_prefix(self, token: &str) -> bool {
        if token.chars().count() <= 2 {
            return false;
        }
        if self.weekday_names().iter().any(|name| name.starts_with(token)) {
            return true;
        }
        match self {
            Language::Spanish => SPANISH_WEEKDAY_FOLDS
                .iter()
                .any(|name| name.starts_with(token)),
            _ => false,
        }
    }
}

/// The rule set a parse runs under.
///
/// A `ParseRules` value carries everything configurable about the
/// heuristics: which languages' month names are recognized, whether an
/// ambiguous leading number is a day or a month, the zone alias table,
/// the injected zone database, the weekday the epoch fell on, and the
/// reference instant ("now") from which two-digit years and relative
/// dates are resolved.
///
/// The engine holds no process-wide state; every parse receives its rules
/// explicitly. Rules are read-only during a parse. Sharing one value
/// across threads is safe; swapping in a new rule set while a parse is in
/// flight is the caller's responsibility to avoid (clone-and-replace
/// rather than mutate in place).
///
/// # Example
///
/// ```
/// use loosetime::{parse, Language, ParseRules};
///
/// let rules = ParseRules::fixed_now(1_200_000_000_000)
///     .with_language(Language::French)
///     .with_day_before_month(true);
/// let t = parse("16 décembre 2008", &rules)?;
/// assert_eq!(t.fields().month(), 12);
/// assert_eq!(t.fields().day(), 16);
/// # Ok::<(), loosetime::Error>(())
/// ```
#[derive(Clone)]
pub struct ParseRules {
    languages: Vec<Language>,
    day_before_month: bool,
    zone_aliases: BTreeMap<String, String>,
    epoch_weekday_offset: u8,
    now_millis: i64,
    default_zone: Option<ZoneOffsetRule>,
    zones: Arc<dyn ZoneProvider + Send + Sync>,
}

struct NoZones;

impl ZoneProvider for NoZones {
    fn resolve(&self, _name: &str) -> Option<ZoneOffsetRule> {
        None
    }
}

impl ParseRules {
    /// Creates a rule set whose reference instant is the system clock.
    ///
    /// Everything else starts at the defaults: English month names only,
    /// month-before-day ordering, an empty alias table, no zone database
    /// and UTC as the default zone.
    #[cfg(feature = "std")]
    pub fn new() -> ParseRules {
        let now_millis = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        ParseRules::fixed_now(now_millis)
    }

    /// Creates a rule set with an explicit reference instant, given as
    /// epoch milliseconds.
    ///
    /// The reference instant anchors the two-digit year pivot and the
    /// relative single-token forms (`+3`, `-1Y`). Tests use this
    /// constructor for determinism.
    pub fn fixed_now(now_millis: i64) -> ParseRules {
        ParseRules {
            languages: vec![Language::English],
            day_before_month: false,
            zone_aliases: BTreeMap::new(),
            epoch_weekday_offset: DEFAULT_EPOCH_WEEKDAY_OFFSET,
            now_millis,
            default_zone: None,
            zones: Arc::new(NoZones),
        }
    }

    /// Adds a language whose month and weekday names the parser will
    /// recognize, in addition to those already configured.
    pub fn with_language(mut self, language: Language) -> ParseRules {
        if !self.languages.contains(&language) {
            self.languages.push(language);
        }
        self
    }

    /// Sets whether an ambiguous leading number is a day (`true`, common
    /// outside the United States) or a month (`false`, the default).
    pub fn with_day_before_month(mut self, yes: bool) -> ParseRules {
        self.day_before_month = yes;
        self
    }

    /// Maps a zone alias (like `PST`) to a zone identifier resolvable by
    /// the provider, or to a fixed-offset spelling like `GMT-08:00`.
    pub fn with_zone_alias(
        mut self,
        alias: impl Into<String>,
        target: impl Into<String>,
    ) -> ParseRules {
        self.zone_aliases.insert(alias.into().to_uppercase(), target.into());
        self
    }

    /// Overrides the weekday offset of the epoch. The default of `4`
    /// makes 1970-01-01 a Thursday with Sunday numbered zero.
    pub fn with_epoch_weekday_offset(mut self, offset: u8) -> ParseRules {
        self.epoch_weekday_offset = offset % 7;
        self
    }

    /// Sets the zone applied when the input carries no zone designation.
    /// This zone also becomes the reference zone for DST correction of
    /// numeric offsets.
    pub fn with_default_zone(mut self, zone: ZoneOffsetRule) -> ParseRules {
        self.default_zone = Some(zone);
        self
    }

    /// Injects the zone database.
    pub fn with_provider<P>(mut self, provider: P) -> ParseRules
    where
        P: ZoneProvider + Send + Sync + 'static,
    {
        self.zones = Arc::new(provider);
        self
    }

    pub(crate) fn day_before_month(&self) -> bool {
        self.day_before_month
    }

    pub(crate) fn epoch_weekday_offset(&self) -> u8 {
        self.epoch_weekday_offset
    }

    pub(crate) fn now_millis(&self) -> i64 {
        self.now_millis
    }

    /// The zone used when the input names none.
    pub(crate) fn default_zone(&self) -> ZoneOffsetRule {
        self.default_zone.clone().unwrap_or_else(ZoneOffsetRule::utc)
    }

    /// The zone whose DST status corrects numeric offset fallbacks: the
    /// configured default zone, else the built-in Pacific rule.
    pub(crate) fn reference_zone(&self) -> ZoneOffsetRule {
        self.default_zone.clone().unwrap_or_else(tz::pacific)
    }

    pub(crate) fn zone_alias(&self, name: &str) -> Option<&str> {
        self.zone_aliases.get(name).map(String::as_str)
    }

    pub(crate) fn resolve_zone(&self, name: &str) -> Option<ZoneOffsetRule> {
        self.zones.resolve(name)
    }

    /// Matches a token against the configured languages' month names.
    /// The first configured language that matches wins.
    pub(crate) fn month_from_token(&self, token: &str) -> Option<i8> {
        self.languages
            .iter()
            .find_map(|lang| lang.month_from_prefix(token))
    }

    pub(crate) fn is_weekday_token(&self, token: &str) -> bool {
        self.languages.iter().any(|lang| lang.is_weekday_prefix(token))
    }

    /// The calendar year of the reference instant, read off the UTC
    /// clock.
    pub(crate) fn current_year(&self) -> i32 {
        CalendarFields::from_epoch_millis(self.now_millis, 0).year()
    }

    /// Resolves a bare 1-3 digit year token.
    ///
    /// Values above `99` are offsets from 1900. One- and two-digit values
    /// are windowed around the reference year: up to twenty years
    /// forward, else eighty back.
    pub(crate) fn pivot_year(&self, value: i32) -> i32 {
        if value > 99 {
            return 1900 + value;
        }
        let current = self.current_year();
        let century = current - current.rem_euclid(100);
        let year = century + value;
        if year - current > 20 {
            year - 100
        } else {
            year
        }
    }
}

impl core::fmt::Debug for ParseRules {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ParseRules")
            .field("languages", &self.languages)
            .field("day_before_month", &self.day_before_month)
            .field("zone_aliases", &self.zone_aliases)
            .field("epoch_weekday_offset", &self.epoch_weekday_offset)
            .field("now_millis", &self.now_millis)
            .field("default_zone", &self.default_zone)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "std")]
impl Default for ParseRules {
    fn default() -> ParseRules {
        ParseRules::new()
    }
}

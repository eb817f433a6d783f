/*!
An immutable, nanosecond-precision point-in-time value type paired with a
heuristic parser for loosely formatted date/time strings.

The parser has no format string. It splits its input into alphanumeric
tokens, classifies each token by position and range (unlabeled numbers,
month names in several languages, AM/PM markers, time zone abbreviations
and numeric offsets) and resolves the ambiguity with a fixed, documented
priority order. All calendar math is anchored in a self-contained proleptic
Gregorian calendar; no platform calendar type is consulted.

# Example

```
use loosetime::{parse, ParseRules, ZoneOffsetRule, ZoneTable};

let mut zones = ZoneTable::new();
zones.insert(ZoneOffsetRule::fixed("UTC", 0));
let rules = ParseRules::fixed_now(1_200_000_000_000).with_provider(zones);

let t = parse("2008-05-16 01:23:45.987 UTC", &rules)?;
assert_eq!(t.to_epoch_millis(), 1_210_901_025_987);
assert_eq!(t.nanoseconds(), 987_000_000);
# Ok::<(), loosetime::Error>(())
```

The same engine accepts `16 May 2008`, `May 16, 2008 1:23 AM`, `20080516`,
relative offsets like `+3` or `-1Y`, and trailing zone designations like
`PST`, `GMT-7` or `+07:00`, resolving each through the caller-supplied
[`ParseRules`].

# Configuration

There is no process-wide state in this crate. Every parse receives an
explicit [`ParseRules`] value carrying the month-name languages, the
day-before-month preference, the zone alias table, the injected
[`ZoneProvider`] database and the reference instant used for two-digit year
windowing and relative dates. Callers that want a global default can build
that sugar on top; the engine itself reads the rules it is handed and
nothing else.

# Crate features

* **std** (enabled by default) - Implements `std::error::Error` for
  [`Error`] and provides the system-clock constructor [`ParseRules::new`].
* **logging** - Emits trace/debug records through the [`log`] crate at each
  stage of the parsing pipeline.

[`log`]: https://docs.rs/log
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

pub use crate::{
    civil::{CalendarFields, Era, Weekday},
    datetime::{PointInTime, Shift, Unit},
    duration::FixedDuration,
    error::{Error, ErrorKind},
    parse::parse,
    rules::{Language, ParseRules},
    tz::{DstRule, ZoneOffsetRule, ZoneProvider, ZoneTable, ZoneTransition},
};

#[macro_use]
mod logging;

mod civil;
mod datetime;
mod duration;
mod error;
mod parse;
mod rules;
mod tz;

use crate::{
    civil::CalendarFields,
    error::Error,
    rules::ParseRules,
    tz::{canonical_offset_name, ZoneOffsetRule},
};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Splits a trailing zone designation off the (trimmed, uppercased)
/// input.
///
/// The candidate is the last whitespace-delimited word when it matches
/// the zone grammar: letters, digits, `/`, `:`, `+`, `-` and `_`, leading
/// with a letter (`PST`, `GMT-7`, `AMERICA/NEW_YORK`) or with a signed
/// digit run (`+07:00`, `-0800`). Month names, weekday names and AM/PM
/// markers are never zone candidates, nor is a word leading with a bare
/// digit (which would otherwise swallow dates like `2008-05-16`).
pub(crate) fn split_suffix<'i>(
    input: &'i str,
    rules: &ParseRules,
) -> (&'i str, Option<&'i str>) {
    let Some(at) = input.rfind(char::is_whitespace) else {
        return (input, None);
    };
    let candidate = input[at..].trim_start();
    if candidate.is_empty() || !is_candidate(candidate, rules) {
        return (input, None);
    }
    (&input[..at], Some(candidate))
}

fn is_candidate(word: &str, rules: &ParseRules) -> bool {
    let grammar = |c: char| {
        c.is_alphanumeric() || matches!(c, '/' | ':' | '+' | '-' | '_')
    };
    if !word.chars().all(grammar) {
        return false;
    }
    let Some(first) = word.chars().next() else { return false };
    if first.is_alphabetic() {
        if word == "AM" || word == "PM" {
            return false;
        }
        if rules.month_from_token(word).is_some()
            || rules.is_weekday_token(word)
        {
            return false;
        }
        true
    } else if first == '+' || first == '-' {
        word[1..].starts_with(|c: char| c.is_ascii_digit())
    } else {
        false
    }
}

/// Interprets a zone candidate against the rule set, given the civil
/// fields already parsed from the rest of the input.
///
/// Resolution order: the alias map, the injected provider, then the
/// numeric-offset fallback. The fallback applies the POSIX sign-inversion
/// convention (`GMT-7` and `+07:00` denote the same offset) and subtracts
/// one hour when the reference zone is in DST at the tentatively computed
/// instant, then routes the corrected offset back through the alias map
/// under its canonical `{sign}HH:MM` spelling before settling for a
/// fixed-offset zone.
pub(crate) fn resolve(
    text: Option<&str>,
    fields: &CalendarFields,
    rules: &ParseRules,
) -> Result<ZoneOffsetRule, Error> {
    let Some(text) = text else {
        return Ok(rules.default_zone());
    };
    if let Some(rule) = resolve_name(text, rules) {
        debug!("zone {text:?} resolved by name to {}", rule.id());
        return Ok(rule);
    }
    let Some(mut offset) = parse_offset(text) else {
        return Err(Error::ambiguous_zone(text));
    };
    let reference = rules.reference_zone();
    let tentative = fields.to_epoch_millis(reference.std_offset_millis());
    if reference.in_dst(tentative) {
        offset -= MILLIS_PER_HOUR;
    }
    let name = canonical_offset_name(offset);
    if let Some(rule) = resolve_name(&name, rules) {
        debug!("zone {text:?} resolved through offset alias {name}");
        return Ok(rule);
    }
    debug!("zone {text:?} resolved to fixed offset {name}");
    Ok(ZoneOffsetRule::fixed(name, offset))
}

/// Resolves a name through the alias map and the provider. An alias
/// target may itself be a fixed-offset spelling.
fn resolve_name(text: &str, rules: &ParseRules) -> Option<ZoneOffsetRule> {
    if let Some(target) = rules.zone_alias(text) {
        if let Some(rule) = rules.resolve_zone(target) {
            return Some(rule);
        }
        let upper = target.to_uppercase();
        if let Some(offset) = parse_offset(&upper) {
            return Some(ZoneOffsetRule::fixed(upper, offset));
        }
        return None;
    }
    rules.resolve_zone(text)
}

/// Parses the numeric offset forms of the zone grammar.
///
/// Bare signed forms (`+07:00`, `-0800`, `-7`) are read in the ISO
/// convention, east of Greenwich positive. Letters-then-digits forms
/// (`GMT-7`, `UTC+3`, `EST5`) are POSIX `TZ` designations whose offset
/// sign is inverted, so `GMT-7` also denotes `+07:00` and an unsigned
/// `EST5` denotes `-05:00`.
fn parse_offset(text: &str) -> Option<i64> {
    let rest = text.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let lettered = rest.len() != text.len();
    if rest.is_empty() {
        return None;
    }
    let (explicit_sign, digits) = match rest.strip_prefix('+') {
        Some(r) => (Some(1i64), r),
        None => match rest.strip_prefix('-') {
            Some(r) => (Some(-1i64), r),
            None => (None, rest),
        },
    };
    // A bare digit run with no sign and no letters is not an offset.
    if explicit_sign.is_none() && !lettered {
        return None;
    }
    let (hours, minutes) = split_hhmm(digits)?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    let magnitude = hours * MILLIS_PER_HOUR + minutes * 60_000;
    let offset = explicit_sign.unwrap_or(1) * magnitude;
    Some(if lettered { -offset } else { offset })
}

fn split_hhmm(digits: &str) -> Option<(i64, i64)> {
    if let Some((hh, mm)) = digits.split_once(':') {
        return Some((parse_digits(hh)?, parse_digits(mm)?));
    }
    match digits.len() {
        1 | 2 => Some((parse_digits(digits)?, 0)),
        3 | 4 => {
            let split = digits.len() - 2;
            Some((parse_digits(&digits[..split])?, parse_digits(&digits[split..])?))
        }
        _ => None,
    }
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i64>().ok()
}

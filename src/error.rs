use alloc::{boxed::Box, string::String};

/// An error that can occur in this crate.
///
/// Every failure is terminal for the call that produced it: the engine never
/// retries or repairs input internally. The error carries a typed
/// [`ErrorKind`] so callers can distinguish malformed input (expected and
/// recoverable, such as a day of `32`) from a programming contract violation
/// (such as handing duration arithmetic a nanosecond magnitude beyond one
/// second).
///
/// # Example
///
/// ```
/// use loosetime::{parse, ParseRules};
///
/// let rules = ParseRules::fixed_now(0);
/// let err = parse("2010-01-32", &rules).unwrap_err();
/// assert!(err.is_invalid_value());
/// assert_eq!(err.to_string(), "value \"32\" is out of range for day");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// Boxed to keep the error (and thus every `Result` in the crate) one
    /// word wide.
    kind: Box<ErrorKind>,
}

/// The kind of an [`Error`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input was empty after trimming.
    EmptyInput,
    /// The parse finished without determining the named calendar field.
    MissingField {
        /// The first undetermined field, one of `"year"`, `"month"` or
        /// `"day"`.
        field: &'static str,
    },
    /// A field was assigned a value outside its calendar range.
    InvalidValue {
        /// The field the value was destined for.
        field: &'static str,
        /// The offending literal as it appeared in the input.
        literal: String,
    },
    /// A trailing token was syntactically a time zone candidate but could
    /// not be resolved through the alias map, the zone provider, or the
    /// numeric offset fallback.
    AmbiguousZone {
        /// The candidate zone text.
        literal: String,
    },
    /// Duration arithmetic was given an out-of-contract operand, or the
    /// result left the representable 64-bit range.
    Overflow {
        /// What overflowed, e.g. `"nanosecond"` or `"seconds"`.
        what: &'static str,
        /// The offending value.
        given: i64,
    },
}

impl Error {
    #[cold]
    #[inline(never)]
    pub(crate) fn empty_input() -> Error {
        Error::from(ErrorKind::EmptyInput)
    }

    #[cold]
    #[inline(never)]
    pub(crate) fn missing_field(field: &'static str) -> Error {
        Error::from(ErrorKind::MissingField { field })
    }

    #[cold]
    #[inline(never)]
    pub(crate) fn invalid_value(
        field: &'static str,
        literal: impl Into<String>,
    ) -> Error {
        Error::from(ErrorKind::InvalidValue { field, literal: literal.into() })
    }

    #[cold]
    #[inline(never)]
    pub(crate) fn ambiguous_zone(literal: impl Into<String>) -> Error {
        Error::from(ErrorKind::AmbiguousZone { literal: literal.into() })
    }

    #[cold]
    #[inline(never)]
    pub(crate) fn overflow(what: &'static str, given: i64) -> Error {
        Error::from(ErrorKind::Overflow { what, given })
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns true when the input was empty.
    pub fn is_empty_input(&self) -> bool {
        matches!(*self.kind, ErrorKind::EmptyInput)
    }

    /// Returns true when the parse could not determine the year, month or
    /// day.
    pub fn is_missing_field(&self) -> bool {
        matches!(*self.kind, ErrorKind::MissingField { .. })
    }

    /// Returns true when a field value was out of its calendar range.
    pub fn is_invalid_value(&self) -> bool {
        matches!(*self.kind, ErrorKind::InvalidValue { .. })
    }

    /// Returns true when a trailing zone candidate could not be resolved.
    pub fn is_ambiguous_zone(&self) -> bool {
        matches!(*self.kind, ErrorKind::AmbiguousZone { .. })
    }

    /// Returns true when duration arithmetic overflowed or was handed an
    /// out-of-contract operand.
    pub fn is_overflow(&self) -> bool {
        matches!(*self.kind, ErrorKind::Overflow { .. })
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { kind: Box::new(kind) }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self.kind {
            EmptyInput => f.write_str("input is empty"),
            MissingField { field } => write!(
                f,
                "could not determine a value for the {field} field",
            ),
            InvalidValue { field, ref literal } => write!(
                f,
                "value \"{literal}\" is out of range for {field}",
            ),
            AmbiguousZone { ref literal } => write!(
                f,
                "\"{literal}\" looks like a time zone but is not a known \
                 zone name, alias or numeric offset",
            ),
            Overflow { what, given } => write!(
                f,
                "{what} value {given} overflows the supported range",
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

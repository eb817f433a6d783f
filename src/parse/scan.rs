use alloc::{string::String, vec::Vec};

/// A maximal alphanumeric run of the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    /// The run as it appeared in the (uppercased) input, suffix letters
    /// included, so `30PM` survives as one numeric token.
    pub(crate) raw: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TokenKind {
    /// The run starts with an ASCII digit. The value is parsed from the
    /// leading digit run, saturating rather than overflowing for absurdly
    /// long runs (which no slot will accept anyway).
    Numeric(i64),
    /// The run starts with a letter.
    Alpha,
}

impl Token {
    pub(crate) fn is_numeric(&self) -> bool {
        matches!(self.kind, TokenKind::Numeric(_))
    }

    pub(crate) fn value(&self) -> i64 {
        match self.kind {
            TokenKind::Numeric(v) => v,
            TokenKind::Alpha => 0,
        }
    }

    /// The leading ASCII digit run of the raw text.
    pub(crate) fn digits(&self) -> &str {
        let end = self
            .raw
            .as_bytes()
            .iter()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(self.raw.len());
        &self.raw[..end]
    }

    pub(crate) fn digit_len(&self) -> usize {
        self.digits().len()
    }

    /// Whatever trails the digit run, e.g. `PM` of `30PM`.
    pub(crate) fn suffix(&self) -> &str {
        &self.raw[self.digits().len()..]
    }
}

/// Splits the input into maximal alphanumeric runs, classifying each as
/// numeric or alpha by its first character. Every other character is a
/// separator and is dropped.
pub(crate) fn scan(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run = String::new();
    for ch in input.chars() {
        if ch.is_alphanumeric() {
            run.push(ch);
        } else if !run.is_empty() {
            tokens.push(classify(core::mem::take(&mut run)));
        }
    }
    if !run.is_empty() {
        tokens.push(classify(run));
    }
    tokens
}

fn classify(raw: String) -> Token {
    let kind = if raw.as_bytes().first().is_some_and(u8::is_ascii_digit) {
        TokenKind::Numeric(leading_value(&raw))
    } else {
        TokenKind::Alpha
    };
    Token { kind, raw }
}

fn leading_value(raw: &str) -> i64 {
    let mut value: i64 = 0;
    for b in raw.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }
    value
}

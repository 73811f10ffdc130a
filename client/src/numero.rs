//! Conversion of the `numero` form input, following JavaScript's `Number(string)`.

use nameth::NamedEnumValues as _;
use nameth::nameth;
use serde::Serialize;
use serde::Serializer;

/// The numeric value sent as the `numero` field of a spin.
///
/// Always finite. Integral values serialize as JSON integers, so `7` is sent as
/// `7` and not `7.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Numero(f64);

impl Numero {
    /// Converts the raw text of the form input the way `Number(input)` does.
    ///
    /// - Surrounding whitespace is ignored, and blank input converts to `0`.
    /// - `0x`, `0o` and `0b` prefixes select an unsigned integer radix.
    /// - Anything that would convert to `NaN` or `±Infinity` is rejected.
    pub fn parse(input: &str) -> Result<Self, ParseNumeroError> {
        let value = to_number(input);
        if value.is_nan() {
            return Err(ParseNumeroError::NotANumber {
                input: input.to_owned(),
            });
        }
        if value.is_infinite() {
            return Err(ParseNumeroError::NotFinite {
                input: input.to_owned(),
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    fn as_integer(self) -> Option<i64> {
        const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
        let value = self.0;
        if value.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&value) {
            // Exact: integral and in range. Also maps -0 to 0.
            Some(value as i64)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Numero {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_integer() {
            Some(integer) => std::fmt::Display::fmt(&integer, f),
            None => std::fmt::Display::fmt(&self.0, f),
        }
    }
}

impl Serialize for Numero {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(integer) => serializer.serialize_i64(integer),
            None => serializer.serialize_f64(self.0),
        }
    }
}

#[nameth]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNumeroError {
    #[error("[{n}] '{input}' is not a number", n = self.name())]
    NotANumber { input: String },

    #[error("[{n}] '{input}' is not a finite number", n = self.name())]
    NotFinite { input: String },
}

fn to_number(input: &str) -> f64 {
    let input = input.trim_matches(is_js_whitespace);
    if input.is_empty() {
        return 0.0;
    }
    if let Some((radix, digits)) = radix_prefix(input) {
        return parse_digits(digits, radix);
    }
    match input {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if is_decimal_literal(input) => input.parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn radix_prefix(input: &str) -> Option<(u32, &str)> {
    let radix = match input.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, &input[2..]))
}

fn parse_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            return f64::NAN;
        };
        value = value * radix as f64 + digit as f64;
    }
    value
}

/// Rust's float parser also accepts `inf` and `nan`, JavaScript does not.
fn is_decimal_literal(input: &str) -> bool {
    input
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
}

fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

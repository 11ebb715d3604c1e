//! Column-independent token classification

/// Spellings accepted as boolean true
pub const BOOLEAN_TRUE_LITERALS: &[&str] = &["y", "yes", "t", "true", "1", "on"];

/// Spellings accepted as boolean false
pub const BOOLEAN_FALSE_LITERALS: &[&str] = &["n", "no", "f", "false", "0", "off"];

/// Longest digit run accepted in a date fragment (a year)
const MAX_DATE_FRAGMENT_DIGITS: usize = 4;

/// Numeric nature of a token.
///
/// A token is numeric when it parses as a finite real number. Leading
/// zeros do not change eligibility: "0005" is numeric for numeric columns
/// and plain text for string columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenClass {
    number: Option<f64>,
}

impl TokenClass {
    pub fn classify(token: &str) -> Self {
        Self {
            number: token.parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// The parsed value, if numeric
    pub fn number(&self) -> Option<f64> {
        self.number
    }

    pub fn is_numeric(&self) -> bool {
        self.number.is_some()
    }

    /// Numeric and equal to its own truncation
    pub fn is_integer_valued(&self) -> bool {
        self.number.map_or(false, |n| n.fract() == 0.0)
    }

    /// Numeric with a non-zero fractional part
    pub fn is_decimal_valued(&self) -> bool {
        self.number.map_or(false, |n| n.fract() != 0.0)
    }

}

/// Maps a recognized boolean spelling to its value
pub fn boolean_literal(token: &str) -> Option<bool> {
    if BOOLEAN_TRUE_LITERALS.contains(&token) {
        Some(true)
    } else if BOOLEAN_FALSE_LITERALS.contains(&token) {
        Some(false)
    } else {
        None
    }
}

/// Returns true for tokens made only of digits and the separators
/// `-`, `/`, `:` and `.`, with at least one digit
pub fn is_numeric_with_separators(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '/' | ':' | '.'))
}

/// Returns true for digit runs of at most four digits joined by `-`, `/`
/// or `:` ("9", "2014", "2014-03", "3/9")
pub fn is_date_fragment(token: &str) -> bool {
    !token.is_empty()
        && token.split(|c| matches!(c, '-' | '/' | ':')).all(|part| {
            !part.is_empty()
                && part.len() <= MAX_DATE_FRAGMENT_DIGITS
                && part.chars().all(|c| c.is_ascii_digit())
        })
}

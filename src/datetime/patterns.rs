//! Regular expressions that locate date and time phrases in a query.
//!
//! Phrases are searched in the space-joined token string, so they may span
//! several tokens ("mar 1 2014"). Every pattern is anchored on word
//! boundaries so a phrase never starts or ends inside a token.

use regex::Regex;

use crate::schema::DataType;

const DATETIME_PATTERNS: &[&str] = &[r"\d{4}-\d{1,2}-\d{1,2}\s\d{1,2}:\d{1,2}:\d{1,2}\.?\d{0,10}"];

const DATE_PATTERNS: &[&str] = &[
    r"\d{4}-\d{1,2}-\d{1,2}",
    r"\d{1,2}/\d{1,2}/\d{2,4}",
    r"[a-zA-Z]{1,3}\.?\s\d{1,2},?\s\d{2,4}",
];

const TIME_PATTERNS: &[&str] = &[r"\d{1,2}:\d{1,2}:\d{1,2}\.?\d{0,10}"];

/// Loose shape of a single time token: "1", "01:02", "01:02:03.25"
const TIME_TOKEN_PATTERN: &str = r"^\d{0,2}:?\d{0,2}:?\d{0,2}\.?\d{0,10}$";

/// Compiled phrase patterns for each temporal type
#[derive(Debug, Clone)]
pub struct TemporalPatterns {
    datetime: Regex,
    date: Regex,
    time: Regex,
    time_token: Regex,
}

impl TemporalPatterns {
    /// Compiles every pattern set
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            datetime: Self::compile(DATETIME_PATTERNS)?,
            date: Self::compile(DATE_PATTERNS)?,
            time: Self::compile(TIME_PATTERNS)?,
            time_token: Regex::new(TIME_TOKEN_PATTERN)?,
        })
    }

    fn compile(patterns: &[&str]) -> Result<Regex, regex::Error> {
        let alternation = patterns
            .iter()
            .map(|p| format!("(?:{})", p))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\b(?:{})\b", alternation))
    }

    /// Returns the phrase pattern for a temporal type
    pub fn for_type(&self, data_type: DataType) -> Option<&Regex> {
        match data_type {
            DataType::DateTime => Some(&self.datetime),
            DataType::Date => Some(&self.date),
            DataType::Time => Some(&self.time),
            _ => None,
        }
    }

    /// All non-overlapping phrases of `data_type` in `haystack`, left to right
    pub fn find_all<'t>(&self, data_type: DataType, haystack: &'t str) -> Vec<&'t str> {
        match self.for_type(data_type) {
            Some(regex) => regex.find_iter(haystack).map(|m| m.as_str()).collect(),
            None => Vec::new(),
        }
    }

    /// Returns true if a single token has the shape of a time value
    pub fn is_time_token(&self, token: &str) -> bool {
        self.time_token.is_match(token)
    }
}

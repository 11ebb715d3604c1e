//! Tokenizer and type classifier
//!
//! Turns a raw query into normalized tokens and classifies each token
//! independently of any column.

mod classifier;
mod tokenizer;

pub use classifier::{
    boolean_literal, is_date_fragment, is_numeric_with_separators, TokenClass,
    BOOLEAN_FALSE_LITERALS, BOOLEAN_TRUE_LITERALS,
};
pub use tokenizer::{
    normalize_word, Tokenizer, DEFAULT_MAX_TOKEN_LENGTH, DEFAULT_MIN_TOKEN_LENGTH, PUNCTUATION,
};

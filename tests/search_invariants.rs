//! Search Invariant Tests
//!
//! Property tests over generated queries and tables:
//! - tokenizing is idempotent on its own output
//! - matched positions are in range, strictly ascending and unique
//! - an uncovered query never scans and never matches
//! - parallel and sequential scans agree
//! - the same query always gives the same result

use proptest::prelude::*;
use tabsearch::tokenizer::Tokenizer;
use tabsearch::{Dataset, FieldValue, Row, Schema, SchemaLoader, SearchConfig, SearchEngine};

// =============================================================================
// Helper Functions
// =============================================================================

const SCHEMA: &str = r#"[
    {"name": "id", "type": "integer", "match": "exact"},
    {"name": "date", "type": "date", "match": "exact"},
    {"name": "territory_id", "type": "string", "match": "edge", "max_length": 2, "is_all_upper": true},
    {"name": "code", "type": "string", "match": "edge", "max_length": 6},
    {"name": "price", "type": "decimal", "match": "exact", "min_value": 0, "max_value": 100},
    {"name": "note", "type": "string", "match": "off"}
]"#;

const QUERY_WORDS: &[&str] = &[
    "ne", "az", "ca", "hdbuy", "sdrent", "hd", "rent", "buy", "9.99", "3.99", "3/9/18", "2018-03-10",
    "42", "gift", "zzzzzzzzzzzzzz",
];

fn schema() -> Schema {
    SchemaLoader::from_json_str(SCHEMA).unwrap()
}

fn arb_row() -> impl Strategy<Value = Row> {
    (
        0i64..1000,
        43160u32..43175,
        prop::sample::select(vec!["NE", "AZ", "CA"]),
        prop::sample::select(vec!["HDBUY", "SDRENT", "HDRENT", "SDBUY"]),
        prop::sample::select(vec![3.99, 9.99, 42.0, 0.5]),
        prop::option::of(prop::sample::select(vec!["gift card", "renewal", "bulk buy"])),
    )
        .prop_map(|(id, serial, territory, code, price, note)| {
            Row::new(vec![
                FieldValue::Integer(id),
                FieldValue::Serial(f64::from(serial)),
                FieldValue::from(territory),
                FieldValue::from(code),
                FieldValue::Decimal(price),
                note.map_or(FieldValue::Null, FieldValue::from),
            ])
        })
}

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(arb_row(), 0..60).prop_map(Dataset::new)
}

fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(QUERY_WORDS.to_vec()), 0..4)
        .prop_map(|words| words.join(" "))
}

// =============================================================================
// Tokenizer
// =============================================================================

proptest! {
    #[test]
    fn prop_tokenize_is_idempotent(raw in "[a-zA-Z0-9 ,.'/:-]{0,60}") {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize(&raw);
        let again = tokenizer.tokenize(&tokens.join(" "));
        prop_assert_eq!(again, tokens);
    }

    #[test]
    fn prop_tokens_are_distinct_and_well_formed(raw in "[a-zA-Z0-9 ,.'/:-]{0,60}") {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize(&raw);
        let mut seen = std::collections::HashSet::new();
        for token in &tokens {
            prop_assert!(seen.insert(token.clone()));
            prop_assert!(tokenizer.is_well_formed(token));
        }
    }
}

// =============================================================================
// Result Invariants
// =============================================================================

proptest! {
    #[test]
    fn prop_matches_ascending_and_in_range(dataset in arb_dataset(), raw in arb_query()) {
        let schema = schema();
        let engine = SearchEngine::new(&schema, &dataset, SearchConfig::default()).unwrap();
        let result = engine.query(&raw).unwrap();

        prop_assert!(result.matched_rows.iter().all(|&i| i < dataset.len()));
        prop_assert!(result.matched_rows.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(result.match_count, result.matched_rows.len());
        prop_assert!(result.preview.len() <= 10);
    }

    #[test]
    fn prop_uncovered_never_matches(dataset in arb_dataset(), raw in arb_query()) {
        let schema = schema();
        let engine = SearchEngine::new(&schema, &dataset, SearchConfig::default()).unwrap();
        let result = engine.query(&raw).unwrap();

        if !result.uncovered_tokens.is_empty() {
            prop_assert!(result.scan_skipped);
            prop_assert!(result.matched_rows.is_empty());
            prop_assert_eq!(result.scanned_rows, 0);
        }
    }

    #[test]
    fn prop_unmatchable_token_skips(dataset in arb_dataset(), raw in arb_query()) {
        let schema = schema();
        let engine = SearchEngine::new(&schema, &dataset, SearchConfig::default()).unwrap();
        // too long for every string column, not a number or date
        let query = format!("{} zzzzzzzz", raw);
        let result = engine.query(&query).unwrap();

        prop_assert!(result.scan_skipped);
        prop_assert!(result.uncovered_tokens.iter().any(|t| t == "zzzzzzzz"));
        prop_assert_eq!(result.scanned_rows, 0);
    }

    #[test]
    fn prop_parallel_matches_sequential(dataset in arb_dataset(), raw in arb_query()) {
        let schema = schema();
        let sequential = SearchEngine::new(&schema, &dataset, SearchConfig::default()).unwrap();
        let parallel_config = SearchConfig {
            parallel_threshold: 1,
            batch_size: 3,
            ..SearchConfig::default()
        };
        let parallel = SearchEngine::new(&schema, &dataset, parallel_config).unwrap();

        let a = sequential.query(&raw).unwrap();
        let b = parallel.query(&raw).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_query_is_deterministic(dataset in arb_dataset(), raw in arb_query()) {
        let schema = schema();
        let engine = SearchEngine::new(&schema, &dataset, SearchConfig::default()).unwrap();
        let first = engine.query(&raw).unwrap();
        let second = engine.query(&raw).unwrap();
        prop_assert_eq!(first, second);
    }
}

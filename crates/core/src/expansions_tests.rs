// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn bindings() -> Expansions {
    [("splunk_server", "https://hec.example.com"), ("splunk_token", "tok-123"), ("dotted.key", "v")]
        .into_iter()
        .collect()
}

#[yare::parameterized(
    plain           = { "no references",                  "no references" },
    simple          = { "${splunk_server}",                "https://hec.example.com" },
    embedded        = { "Splunk ${splunk_token}!",         "Splunk tok-123!" },
    multiple        = { "${splunk_token}/${splunk_token}", "tok-123/tok-123" },
    dotted          = { "${dotted.key}",                   "v" },
    unknown_empty   = { "a${missing}b",                    "ab" },
    default_used    = { "${missing|fallback}",             "fallback" },
    default_ignored = { "${splunk_token|fallback}",        "tok-123" },
    empty_default   = { "${missing|}",                     "" },
    lone_dollar     = { "cost: $5",                        "cost: $5" },
    empty_template  = { "",                                "" },
)]
fn expand_cases(template: &str, expected: &str) {
    assert_eq!(bindings().expand_string(template).unwrap(), expected);
}

#[yare::parameterized(
    unterminated       = { "${splunk_server",      ExpansionError::Unterminated { offset: 0 } },
    unterminated_later = { "ok ${a} then ${b",     ExpansionError::Unterminated { offset: 13 } },
    empty_name         = { "${}",                  ExpansionError::InvalidName { name: String::new() } },
    spaced_name        = { "${not valid}",         ExpansionError::InvalidName { name: "not valid".to_string() } },
)]
fn expand_errors(template: &str, expected: ExpansionError) {
    assert_eq!(bindings().expand_string(template).unwrap_err(), expected);
}

#[test]
fn put_overrides_existing_value() {
    let mut exp = bindings();
    exp.put("splunk_token", "rotated");
    assert_eq!(exp.get("splunk_token"), Some("rotated"));
    assert_eq!(exp.expand_string("${splunk_token}").unwrap(), "rotated");
    assert_eq!(exp.len(), 3);
}

#[test]
fn deserializes_from_flat_map() {
    let exp: Expansions = serde_json::from_str(r#"{"a": "1", "b": "2"}"#).unwrap();
    assert_eq!(exp.get("a"), Some("1"));
    assert_eq!(exp.expand_string("${a}${b}").unwrap(), "12");
}

proptest! {
    #[test]
    fn text_without_references_is_unchanged(s in "[a-zA-Z0-9 /:._-]{0,40}") {
        prop_assert_eq!(Expansions::new().expand_string(&s).unwrap(), s);
    }
}
